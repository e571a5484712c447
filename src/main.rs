use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod copy_trading;
mod db;
mod domain;
mod events;
mod ids;
mod ledger;
mod market_resolver;
mod matching;
mod metrics;
mod oracle;
mod outcome_ledger;
mod position;
mod settlement;
mod social;
mod support;

use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::copy_trading::{ClearingIndex, CopyTradingEngine};
use crate::db::Database;
use crate::events::PgEventStore;
use crate::ledger::PgLedger;
use crate::market_resolver::MarketResolver;
use crate::matching::{MatchingEngine, OrderBookStore, OutcomeRegistry, PgClearing};
use crate::oracle::{BaseOracleService, CelebrityOracleService};
use crate::outcome_ledger::PgOutcomeLedger;
use crate::position::PositionService;
use crate::settlement::AutoSettlement;
use crate::social::{PgFollowStore, Social};

const ORACLE_ID: &str = "primary-celebrity-oracle";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter.clone())))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting celebrity-exchange-engine v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(environment = %config.environment, "environment loaded");

    let metrics_handle = metrics::init_metrics();

    let db = Database::connect(&config.database_url).await?;

    let ledger: Arc<dyn ledger::LedgerPort> = Arc::new(PgLedger::new(db.pool().clone()));
    let outcome_ledger: Arc<dyn outcome_ledger::OutcomeLedgerPort> = Arc::new(PgOutcomeLedger::new(db.pool().clone()));
    let events: Arc<dyn events::EventStorePort> = Arc::new(PgEventStore::new(db.pool().clone()));
    let books = Arc::new(OrderBookStore::new());
    let outcome_registry = Arc::new(OutcomeRegistry::new());
    let clearing = Arc::new(PgClearing::new(db.pool().clone()));
    let follow_store = Arc::new(PgFollowStore::new(db.pool().clone()));
    let social = Arc::new(Social::new(Some(follow_store)));

    let matching_engine = Arc::new(MatchingEngine::new(
        books.clone(),
        Some(outcome_registry.clone()),
        ledger.clone(),
        clearing.clone(),
        events.clone(),
        social.clone(),
    ));

    let clearing_index = Arc::new(ClearingIndex::new());
    let copy_trading = Arc::new(CopyTradingEngine::new(ledger.clone(), clearing_index));

    let base_oracle = BaseOracleService::new(ORACLE_ID, outcome_registry.clone(), books.clone(), events.clone());
    let oracle = Arc::new(CelebrityOracleService::new(base_oracle, copy_trading.clone()));

    let settlement = Arc::new(AutoSettlement::new(ledger.clone(), copy_trading.clone()));
    oracle.base().bind_settlement(settlement.clone());

    let market_resolver = Arc::new(MarketResolver::new(outcome_ledger.clone()));
    let position_service = Arc::new(PositionService::new(events.clone()));

    let state = Arc::new(AppState {
        config: config.clone(),
        ledger,
        outcome_ledger,
        events,
        books,
        matching_engine,
        copy_trading,
        oracle,
        settlement,
        market_resolver,
        position_service,
        social,
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(move || render_metrics(metrics_handle.clone())))
        .merge(api::routes::create_router(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn render_metrics(handle: metrics_exporter_prometheus::PrometheusHandle) -> String {
    handle.render()
}
