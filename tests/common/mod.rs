use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use reya_pulse::api::router::create_router;
use reya_pulse::config::AppConfig;
use reya_pulse::AppState;

/// Wallet that has data everywhere.
#[allow(dead_code)]
pub const WALLET_OK: &str = "0xABC";
/// Wallet with no positions, trades or points.
#[allow(dead_code)]
pub const WALLET_EMPTY: &str = "0xEMPTY";
/// Wallet whose lookups fail with a 500.
#[allow(dead_code)]
pub const WALLET_FAIL: &str = "0xFAIL";
/// Wallet whose lookups fail with a 504.
#[allow(dead_code)]
pub const WALLET_SLOW: &str = "0xSLOW";

/// Switches and counters shared with the fake upstream handlers.
#[derive(Clone, Default)]
pub struct UpstreamControl {
    pub fail_markets: Arc<AtomicBool>,
    pub fail_hyperliquid: Arc<AtomicBool>,
    pub chat_hits: Arc<AtomicUsize>,
    pub market_hits: Arc<AtomicUsize>,
}

pub struct TestApp {
    pub router: Router,
    #[allow(dead_code)]
    pub state: AppState,
    #[allow(dead_code)]
    pub upstream: UpstreamControl,
}

// ---------------------------------------------------------------------------
// Fake upstream (Reya + Hyperliquid + chat answerer)
// ---------------------------------------------------------------------------

fn reya_markets() -> Value {
    json!([
        {"symbol": "ETHRUSDPERP", "throttledOraclePrice": "3000", "volume24h": "100", "oiQty": "2", "pxChange24h": "2", "fundingRate": "0.00001"},
        {"symbol": "BTCRUSDPERP", "throttledOraclePrice": "60000", "volume24h": "500", "oiQty": "1", "pxChange24h": "-1", "fundingRate": "-0.00002"},
        {"symbol": "SOLRUSDPERP", "throttledOraclePrice": "150", "volume24h": "50", "oiQty": "10", "pxChange24h": "9", "fundingRate": "0.00003"},
        {"symbol": "AVAXRUSDPERP", "throttledOraclePrice": "not-a-number", "volume24h": "??", "oiQty": "4", "pxChange24h": "0", "fundingRate": "0.00001"}
    ])
}

fn hyperliquid_meta() -> Value {
    json!([
        {"universe": [{"name": "BTC"}, {"name": "ETH"}, {"name": "DOGE"}, {"name": "SOL"}]},
        [
            {"funding": "0.00001", "openInterest": "1000", "oraclePx": "60010"},
            {"funding": "0.00003", "openInterest": "5000", "oraclePx": "3001"},
            {"funding": "0.0001", "openInterest": "9", "oraclePx": "0.1"},
            null
        ]
    ])
}

async fn markets(State(ctl): State<UpstreamControl>) -> Response {
    ctl.market_hits.fetch_add(1, Ordering::SeqCst);
    if ctl.fail_markets.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(reya_markets()).into_response()
}

async fn info(State(ctl): State<UpstreamControl>, Json(body): Json<Value>) -> Response {
    if ctl.fail_hyperliquid.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if body["type"] != "metaAndAssetCtxs" {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(hyperliquid_meta()).into_response()
}

fn wallet_failure(address: &str) -> Option<Response> {
    match address {
        WALLET_FAIL => Some(StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        WALLET_SLOW => Some(StatusCode::GATEWAY_TIMEOUT.into_response()),
        _ => None,
    }
}

async fn positions(Path(address): Path<String>) -> Response {
    if let Some(failure) = wallet_failure(&address) {
        return failure;
    }
    if address == WALLET_OK {
        Json(json!([
            {"symbol": "ETHRUSDPERP", "side": "B", "qty": "2", "avgEntryPrice": "2990"},
            {"symbol": "BTCRUSDPERP", "side": "A", "qty": "0.5", "avgEntryPrice": "61000"},
            {"symbol": "LINKRUSDPERP", "side": "A", "qty": "10", "avgEntryPrice": "14"}
        ]))
        .into_response()
    } else {
        Json(json!([])).into_response()
    }
}

async fn executions(
    Path(address): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(failure) = wallet_failure(&address) {
        return failure;
    }
    if params.get("limit").map(String::as_str) != Some("50") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    if address == WALLET_OK {
        Json(json!({"data": [
            {"symbol": "ETHRUSDPERP", "side": "B", "price": "3000.456", "qty": "0.5", "blockTimestamp": 1700000000},
            {"symbol": "BTCRUSDPERP", "side": "A", "price": "60000", "qty": "0.01", "blockTimestamp": 1700003661}
        ]}))
        .into_response()
    } else {
        Json(json!({"data": []})).into_response()
    }
}

async fn incentives(Path(address): Path<String>) -> Response {
    if let Some(failure) = wallet_failure(&address) {
        return failure;
    }
    if address == WALLET_OK {
        Json(json!({"points": {
            "season_1": {"trading": "1500", "referrals": 25},
            "all_time": {"total": "1234567.5"}
        }}))
        .into_response()
    } else {
        Json(json!({"wallet": address})).into_response()
    }
}

async fn chat(State(ctl): State<UpstreamControl>, Json(body): Json<Value>) -> Response {
    ctl.chat_hits.fetch_add(1, Ordering::SeqCst);
    if body.get("history").is_some() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match body["question"].as_str().unwrap_or_default() {
        "silent" => Json(json!({})).into_response(),
        "explode" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        q => Json(json!({"answer": format!("echo: {q}")})).into_response(),
    }
}

async fn candles(
    Path((symbol, interval)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if interval != "1h" || !params.contains_key("endTime") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match symbol.as_str() {
        "ETHRUSDPERP" => Json(json!({"t": [1, 2, 3], "c": ["10", "20", "15"]})).into_response(),
        "BROKENRUSDPERP" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({"s": "no_data"})).into_response(),
    }
}

/// Serve the fake upstream on an ephemeral port; returns its base URL.
pub async fn spawn_upstream(ctl: UpstreamControl) -> String {
    let app = Router::new()
        .route("/v2/markets/summary", get(markets))
        .route("/info", post(info))
        .route("/v2/wallet/:address/positions", get(positions))
        .route("/v2/wallet/:address/perpExecutions", get(executions))
        .route("/api/incentives/wallet/:address", get(incentives))
        .route("/v2/candleHistory/:symbol/:interval", get(candles))
        .route("/chat", post(chat))
        .with_state(ctl);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let addr = listener.local_addr().expect("Fake upstream has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// App under test
// ---------------------------------------------------------------------------

/// Unique saved-wallet path per test so runs never share state.
pub fn temp_wallet_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("reya-pulse-{name}-{}-{nanos}", std::process::id()))
        .join("saved_wallet.json")
}

pub async fn build_test_app_with(name: &str, configure: impl FnOnce(&mut AppConfig)) -> TestApp {
    let upstream = UpstreamControl::default();
    let base = spawn_upstream(upstream.clone()).await;

    let mut config = AppConfig::with_upstream_base(&base, temp_wallet_path(name));
    configure(&mut config);

    let metrics_handle = reya_pulse::metrics::init_metrics().expect("metrics recorder");
    let state = AppState::new(config, metrics_handle);
    let router = create_router(state.clone());

    TestApp {
        router,
        state,
        upstream,
    }
}

#[allow(dead_code)]
pub async fn build_test_app(name: &str) -> TestApp {
    build_test_app_with(name, |_| {}).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[allow(dead_code)]
pub async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

#[allow(dead_code)]
pub async fn get_with_token(app: &TestApp, uri: &str, token: Option<&str>) -> StatusCode {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).expect("valid request");
    send(app, request).await.0
}

#[allow(dead_code)]
pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}
