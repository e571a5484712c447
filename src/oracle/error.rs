#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("trade amount must be positive")]
    NonPositiveAmount,

    #[error("outcome id must not be blank")]
    BlankOutcomeId,

    #[error(transparent)]
    EventStore(#[from] crate::events::EventStoreError),
}
