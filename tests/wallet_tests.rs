mod common;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;

use common::{build_test_app, get_json, WALLET_EMPTY, WALLET_FAIL, WALLET_OK, WALLET_SLOW};

#[tokio::test]
async fn test_positions_with_pnl() {
    let app = build_test_app("positions").await;

    let uri = format!("/api/wallet/positions?address=%20{WALLET_OK}%20");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let view = &json["data"];
    assert!(view["notice"].is_null());
    let rows = view["positions"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0]["symbol"], "ETH");
    assert_eq!(rows[0]["side_label"], "LONG");
    assert_eq!(rows[0]["current_display"], "3000.00");
    assert_eq!(rows[0]["pnl_display"], "20.00");

    assert_eq!(rows[1]["symbol"], "BTC");
    assert_eq!(rows[1]["side_label"], "SHORT");
    assert_eq!(rows[1]["pnl_display"], "500.00");
    assert_eq!(rows[1]["tone"], "green");

    // No market quote for LINK: current falls back to entry.
    assert_eq!(rows[2]["current_display"], "14.00");
    assert_eq!(rows[2]["pnl_display"], "0.00");

    assert_eq!(view["total_pnl_display"], "$520.00");
    assert_eq!(view["total_tone"], "green");
}

#[tokio::test]
async fn test_positions_empty_wallet() {
    let app = build_test_app("positions-empty").await;

    let uri = format!("/api/wallet/positions?address={WALLET_EMPTY}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["notice"], "No open positions");
    assert!(json["data"]["positions"].as_array().unwrap().is_empty());
    assert!(json["data"]["total_pnl_display"].is_null());
}

#[tokio::test]
async fn test_positions_blank_address_asks_for_one() {
    let app = build_test_app("positions-blank").await;

    let (status, json) = get_json(&app, "/api/wallet/positions?address=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["notice"], "Enter address");
    assert_eq!(app.upstream.market_hits.load(Ordering::SeqCst), 0);

    let (_, saved) = get_json(&app, "/api/wallet/saved").await;
    assert!(saved["data"].is_null());
}

#[tokio::test]
async fn test_positions_failure_still_saves_wallet() {
    let app = build_test_app("positions-fail").await;

    let uri = format!("/api/wallet/positions?address={WALLET_FAIL}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Error loading positions");

    let (_, saved) = get_json(&app, "/api/wallet/saved").await;
    assert_eq!(saved["data"], WALLET_FAIL);
}

#[tokio::test]
async fn test_failed_trades_and_points_still_save_wallet() {
    let app = build_test_app("history-points-fail").await;

    let uri = format!("/api/wallet/trades?address={WALLET_SLOW}");
    let (status, _) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let (_, saved) = get_json(&app, "/api/wallet/saved").await;
    assert_eq!(saved["data"], WALLET_SLOW);

    let uri = format!("/api/wallet/points?address={WALLET_FAIL}");
    let (status, _) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let (_, saved) = get_json(&app, "/api/wallet/saved").await;
    assert_eq!(saved["data"], WALLET_FAIL);

    let (_, panel) = get_json(&app, "/api/panels/trades").await;
    assert_eq!(panel["data"]["content"]["address"], WALLET_FAIL);
}

#[tokio::test]
async fn test_positions_fail_when_markets_fail() {
    let app = build_test_app("positions-markets-down").await;
    app.upstream.fail_markets.store(true, Ordering::SeqCst);

    let uri = format!("/api/wallet/positions?address={WALLET_OK}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Error loading positions");
}

#[tokio::test]
async fn test_trade_history() {
    let app = build_test_app("trades").await;

    let uri = format!("/api/wallet/trades?address={WALLET_OK}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let rows = json["data"]["trades"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["time"], "22:13:20");
    assert_eq!(rows[0]["symbol"], "ETH");
    assert_eq!(rows[0]["side"], "BUY");
    assert_eq!(rows[0]["tone"], "green");
    assert_eq!(rows[0]["price_display"], "3000.46");
    assert_eq!(rows[0]["qty_display"], "0.500");

    assert_eq!(rows[1]["time"], "23:14:21");
    assert_eq!(rows[1]["side"], "SELL");
    assert_eq!(rows[1]["tone"], "red");
}

#[tokio::test]
async fn test_trade_history_empty_and_failures() {
    let app = build_test_app("trades-edge").await;

    let uri = format!("/api/wallet/trades?address={WALLET_EMPTY}");
    let (_, json) = get_json(&app, &uri).await;
    assert_eq!(json["data"]["notice"], "No trades found");

    for wallet in [WALLET_FAIL, WALLET_SLOW] {
        let uri = format!("/api/wallet/trades?address={wallet}");
        let (status, json) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY, "{wallet}");
        assert_eq!(json["error"], "Error loading history");
    }
}

#[tokio::test]
async fn test_points_cards() {
    let app = build_test_app("points").await;

    let uri = format!("/api/wallet/points?address={WALLET_OK}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let cards = json["data"]["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["period"], "SEASON 1");
    assert_eq!(cards[0]["rows"][0]["metric"], "trading");
    assert_eq!(cards[0]["rows"][0]["value_display"], "1,500");
    assert_eq!(cards[0]["rows"][1]["metric"], "referrals");
    assert_eq!(cards[0]["rows"][1]["value_display"], "25");
    assert_eq!(cards[1]["period"], "ALL TIME");
    assert_eq!(cards[1]["rows"][0]["value_display"], "1,234,567.5");
}

#[tokio::test]
async fn test_points_without_record_is_no_data() {
    let app = build_test_app("points-empty").await;

    let uri = format!("/api/wallet/points?address={WALLET_EMPTY}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["notice"], "No data");
    assert!(json["data"]["cards"].as_array().unwrap().is_empty());

    let uri = format!("/api/wallet/points?address={WALLET_FAIL}");
    let (status, json) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Error fetching points");
}

#[tokio::test]
async fn test_saved_wallet_is_last_lookup() {
    let app = build_test_app("saved").await;

    let (_, none) = get_json(&app, "/api/wallet/saved").await;
    assert!(none["data"].is_null());

    get_json(&app, &format!("/api/wallet/trades?address={WALLET_OK}")).await;
    get_json(&app, &format!("/api/wallet/points?address={WALLET_EMPTY}")).await;

    let (_, saved) = get_json(&app, "/api/wallet/saved").await;
    assert_eq!(saved["data"], WALLET_EMPTY);
}
