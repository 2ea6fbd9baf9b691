use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes: no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Panel routes: require Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Navigation
        .route("/api/panels", get(handlers::panels::list))
        .route("/api/panels/:name", get(handlers::panels::enter))
        // Markets
        .route("/api/markets", get(handlers::markets::list))
        .route("/api/overview", get(handlers::markets::overview))
        .route("/api/arbitrage", get(handlers::arbitrage::scan))
        // Wallet lookups
        .route("/api/wallet/saved", get(handlers::wallet::saved))
        .route("/api/wallet/positions", get(handlers::wallet::positions))
        .route("/api/wallet/trades", get(handlers::wallet::trades))
        .route("/api/wallet/points", get(handlers::wallet::points))
        // Chat
        .route("/api/chat", get(handlers::chat::transcript).post(handlers::chat::ask))
        // Chart
        .route("/api/chart/:symbol", get(handlers::chart::sparkline))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // The popup runs on a chrome-extension:// origin, so CORS stays open;
    // direct API access needs the token.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
