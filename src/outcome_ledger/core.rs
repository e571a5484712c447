//! Pure construction of the four share-leg entries a matched trade produces.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Direction, NewOutcomeEntry};

use super::OutcomeLedgerError;

/// buyer Credit cash + buyer Debit outcome-asset + seller Debit cash +
/// seller Credit outcome-asset. The two "cash" entries here are the
/// asset-ledger mirror the specification calls for alongside the Ledger's
/// own cash-leg transaction; see `matching::clearing` for how both are
/// combined into one atomic write.
pub fn book_trade_entries(
    buyer_account_id: Uuid,
    seller_account_id: Uuid,
    cash_amount: Decimal,
    outcome_asset_type: &str,
    outcome_quantity: Decimal,
) -> Result<[NewOutcomeEntry; 4], OutcomeLedgerError> {
    if cash_amount <= Decimal::ZERO {
        return Err(OutcomeLedgerError::NonPositiveCashAmount);
    }
    if outcome_quantity <= Decimal::ZERO {
        return Err(OutcomeLedgerError::NonPositiveQuantity);
    }
    if outcome_asset_type.trim().is_empty() {
        return Err(OutcomeLedgerError::BlankAssetType);
    }

    Ok([
        NewOutcomeEntry::new(buyer_account_id, "USD_CASH", cash_amount, Direction::Credit),
        NewOutcomeEntry::new(buyer_account_id, outcome_asset_type, outcome_quantity, Direction::Debit),
        NewOutcomeEntry::new(seller_account_id, "USD_CASH", cash_amount, Direction::Debit),
        NewOutcomeEntry::new(seller_account_id, outcome_asset_type, outcome_quantity, Direction::Credit),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn produces_four_balanced_entries() {
        let buyer = Uuid::new_v4();
        let seller = Uuid::new_v4();
        let entries = book_trade_entries(buyer, seller, dec!(5.00), "OUTCOME_X", dec!(10)).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].account_id, buyer);
        assert_eq!(entries[0].direction, Direction::Credit);
        assert_eq!(entries[1].direction, Direction::Debit);
        assert_eq!(entries[1].amount, dec!(10));
        assert_eq!(entries[2].account_id, seller);
        assert_eq!(entries[2].direction, Direction::Debit);
        assert_eq!(entries[3].direction, Direction::Credit);
    }

    #[test]
    fn rejects_non_positive_cash_amount() {
        let err = book_trade_entries(Uuid::new_v4(), Uuid::new_v4(), dec!(0), "OUTCOME_X", dec!(10)).unwrap_err();
        assert!(matches!(err, OutcomeLedgerError::NonPositiveCashAmount));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let err = book_trade_entries(Uuid::new_v4(), Uuid::new_v4(), dec!(5), "OUTCOME_X", dec!(0)).unwrap_err();
        assert!(matches!(err, OutcomeLedgerError::NonPositiveQuantity));
    }

    #[test]
    fn rejects_blank_asset_type() {
        let err = book_trade_entries(Uuid::new_v4(), Uuid::new_v4(), dec!(5), "  ", dec!(10)).unwrap_err();
        assert!(matches!(err, OutcomeLedgerError::BlankAssetType));
    }
}
