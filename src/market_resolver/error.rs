#[derive(Debug, thiserror::Error)]
pub enum MarketResolverError {
    #[error("winning asset type must not be blank")]
    BlankAssetType,

    #[error(transparent)]
    OutcomeLedger(#[from] crate::outcome_ledger::OutcomeLedgerError),
}
