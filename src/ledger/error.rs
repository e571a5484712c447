use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account name must not be blank")]
    BlankName,

    #[error("transaction not balanced: debits={total_debits} credits={total_credits}")]
    TransactionNotBalanced {
        total_debits: Decimal,
        total_credits: Decimal,
    },

    #[error("a transaction must contain at least two entries")]
    TooFewEntries,

    #[error("account not found: {0}")]
    AccountNotFound(Uuid),

    #[error("transaction not found: {0}")]
    TransactionNotFound(Uuid),

    #[error("ledger backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Backend(err.to_string())
    }
}
