use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::api::middleware::metrics_middleware;
use crate::api::state::AppState;

/// Every endpoint §6 describes is reachable without a session (no auth
/// layer exists in this system), so there is one flat router rather than
/// this codebase's public/protected split.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/wallet/create", post(handlers::wallet::create_wallet))
        .route("/api/wallet/:id/balance", get(handlers::wallet::get_balance))
        .route("/api/secondary/order", post(handlers::secondary::place_order))
        .route("/api/secondary/order/bulk", post(handlers::secondary::place_bulk_orders))
        .route("/api/secondary/book/:market_id", get(handlers::secondary::get_book))
        .route(
            "/api/secondary/orders/:market_id/:operator_id",
            delete(handlers::secondary::cancel_orders_by_operator),
        )
        .route("/api/markets/active", get(handlers::markets::get_active_markets))
        .route("/api/markets/orderbook/:outcome_id", get(handlers::markets::get_market_orderbook))
        .route("/api/celebrity/simulate", post(handlers::celebrity::simulate_trade))
        .route("/api/celebrity/outcome-reached", post(handlers::celebrity::outcome_reached))
        .route("/api/admin/resolve-market", post(handlers::admin::resolve_market))
        .route("/api/portfolio/:account_id", get(handlers::portfolio::get_holdings))
        .route("/api/portfolio/position", get(handlers::portfolio::get_net_position))
        .route("/api/audit/market/:market_id", get(handlers::audit::get_market_audit_trail))
        .route("/api/audit/user/:user_id", get(handlers::audit::get_user_audit_trail))
        .route("/api/copy-trading/follow", post(handlers::copy_trading::follow))
        .layer(axum_middleware::from_fn(metrics_middleware))
        .with_state(state)
}
