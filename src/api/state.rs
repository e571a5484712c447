use std::sync::Arc;

use crate::config::AppConfig;
use crate::copy_trading::CopyTradingEngine;
use crate::events::EventStorePort;
use crate::ledger::LedgerPort;
use crate::market_resolver::MarketResolver;
use crate::matching::{MatchingEngine, OrderBookStore};
use crate::oracle::CelebrityOracleService;
use crate::outcome_ledger::OutcomeLedgerPort;
use crate::position::PositionService;
use crate::settlement::AutoSettlement;
use crate::social::Social;

pub struct AppState {
    pub config: AppConfig,
    pub ledger: Arc<dyn LedgerPort>,
    pub outcome_ledger: Arc<dyn OutcomeLedgerPort>,
    pub events: Arc<dyn EventStorePort>,
    pub books: Arc<OrderBookStore>,
    pub matching_engine: Arc<MatchingEngine>,
    pub copy_trading: Arc<CopyTradingEngine>,
    pub oracle: Arc<CelebrityOracleService>,
    pub settlement: Arc<AutoSettlement>,
    pub market_resolver: Arc<MarketResolver>,
    pub position_service: Arc<PositionService>,
    pub social: Arc<Social>,
}
