#[derive(Debug, thiserror::Error)]
pub enum CopyTradingError {
    #[error("no celebrity account found for actor {0:?} under operator {1}")]
    CelebrityAccountNotFound(String, String),

    #[error(transparent)]
    Ledger(#[from] crate::ledger::LedgerError),
}
