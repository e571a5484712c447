#[derive(Debug, thiserror::Error)]
pub enum OutcomeLedgerError {
    #[error("cash amount must be positive")]
    NonPositiveCashAmount,

    #[error("outcome quantity must be positive")]
    NonPositiveQuantity,

    #[error("outcome asset type must not be blank")]
    BlankAssetType,

    #[error("outcome ledger backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for OutcomeLedgerError {
    fn from(err: sqlx::Error) -> Self {
        OutcomeLedgerError::Backend(err.to_string())
    }
}
