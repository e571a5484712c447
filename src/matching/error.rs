use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("unknown outcome: {0}")]
    InvalidOutcome(String),

    #[error("insufficient funds: required={required} available={available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("price must be within [0.00, 1.00]")]
    PriceOutOfRange,

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error(transparent)]
    Ledger(#[from] crate::ledger::LedgerError),

    #[error(transparent)]
    OutcomeLedger(#[from] crate::outcome_ledger::OutcomeLedgerError),

    #[error(transparent)]
    EventStore(#[from] crate::events::EventStoreError),

    #[error("matching backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for MatchingError {
    fn from(err: sqlx::Error) -> Self {
        MatchingError::Backend(err.to_string())
    }
}
