//! `MarketResolver`: the admin path that settles a market by zeroing every
//! positive holder's position in the winning outcome asset.

mod error;

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

pub use error::MarketResolverError;

use crate::domain::{Direction, NewOutcomeEntry};
use crate::outcome_ledger::OutcomeLedgerPort;

#[derive(Debug, Clone, Copy)]
pub struct ResolutionSummary {
    pub accounts_settled: usize,
    pub total_usd_paid_out: Decimal,
}

pub struct MarketResolver {
    outcome_ledger: Arc<dyn OutcomeLedgerPort>,
}

impl MarketResolver {
    pub fn new(outcome_ledger: Arc<dyn OutcomeLedgerPort>) -> Self {
        Self { outcome_ledger }
    }

    pub async fn resolve_market(
        &self,
        winning_asset_type: &str,
        settlement_account_id: Uuid,
        usd_per_token: Decimal,
    ) -> Result<ResolutionSummary, MarketResolverError> {
        if winning_asset_type.trim().is_empty() {
            return Err(MarketResolverError::BlankAssetType);
        }

        let holdings = self.outcome_ledger.net_holdings(winning_asset_type).await?;

        let mut entries = Vec::new();
        let mut accounts_settled = 0usize;
        let mut total_usd_paid_out = Decimal::ZERO;

        for (account_id, holding) in holdings {
            if holding <= Decimal::ZERO {
                continue;
            }

            let usd_amount = holding * usd_per_token;
            entries.push(NewOutcomeEntry::new(account_id, winning_asset_type, holding, Direction::Credit));
            entries.push(NewOutcomeEntry::new(account_id, "USD_CASH", usd_amount, Direction::Debit));
            entries.push(NewOutcomeEntry::new(settlement_account_id, winning_asset_type, holding, Direction::Debit));
            entries.push(NewOutcomeEntry::new(settlement_account_id, "USD_CASH", usd_amount, Direction::Credit));

            accounts_settled += 1;
            total_usd_paid_out += usd_amount;
        }

        if !entries.is_empty() {
            self.outcome_ledger.append_entries(entries).await?;
        }

        Ok(ResolutionSummary {
            accounts_settled,
            total_usd_paid_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::memory_backend::MemoryBackend;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn resolve_market_pays_out_positive_holders_only() {
        let backend = MemoryBackend::new();
        let outcome_ledger = backend.outcome_ledger();
        let settlement_account = Uuid::new_v4();
        let holder = Uuid::new_v4();
        let short_seller = Uuid::new_v4();

        outcome_ledger
            .append_entries(vec![
                NewOutcomeEntry::new(holder, "DRAKE_ALBUM", dec!(10), Direction::Debit),
                NewOutcomeEntry::new(short_seller, "DRAKE_ALBUM", dec!(5), Direction::Credit),
            ])
            .await
            .unwrap();

        let resolver = MarketResolver::new(outcome_ledger.clone());
        let summary = resolver
            .resolve_market("DRAKE_ALBUM", settlement_account, dec!(1.00))
            .await
            .unwrap();

        assert_eq!(summary.accounts_settled, 1);
        assert_eq!(summary.total_usd_paid_out, dec!(10.00));

        let post_holdings = outcome_ledger.net_holdings("DRAKE_ALBUM").await.unwrap();
        assert_eq!(post_holdings.get(&holder).copied().unwrap_or(Decimal::ZERO), dec!(0));
    }

    #[tokio::test]
    async fn resolve_market_rejects_blank_asset_type() {
        let backend = MemoryBackend::new();
        let resolver = MarketResolver::new(backend.outcome_ledger());
        let err = resolver.resolve_market("  ", Uuid::new_v4(), dec!(1.00)).await.unwrap_err();
        assert!(matches!(err, MarketResolverError::BlankAssetType));
    }
}
