//! Pure ledger math, kept free of any I/O so it can be unit tested without a
//! database and reused identically by every adapter.

use rust_decimal::Decimal;

use crate::domain::{Direction, JournalEntry, Phase};

use super::LedgerError;

/// Verifies Σ(debits) = Σ(credits) on the exact decimal grid (no rounding)
/// and that the transaction has at least two entries. Returns the two
/// totals so callers/tests can inspect them even on success.
pub fn verify_balanced(entries: &[JournalEntry]) -> Result<(Decimal, Decimal), LedgerError> {
    if entries.len() < 2 {
        return Err(LedgerError::TooFewEntries);
    }

    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    for entry in entries {
        match entry.direction {
            Direction::Debit => total_debits += entry.amount,
            Direction::Credit => total_credits += entry.amount,
        }
    }

    if total_debits != total_credits {
        return Err(LedgerError::TransactionNotBalanced {
            total_debits,
            total_credits,
        });
    }

    Ok((total_debits, total_credits))
}

/// Σ(Debit) − Σ(Credit) over a set of entries for one account, optionally
/// restricted to one phase. This is the balance convention named in the
/// specification; callers decide how to interpret the sign for their
/// account type.
pub fn aggregate_balance<'a>(
    entries: impl Iterator<Item = (&'a Direction, &'a Phase, &'a Decimal)>,
    phase: Option<Phase>,
) -> Decimal {
    entries
        .filter(|(_, entry_phase, _)| match phase {
            Some(p) => **entry_phase == p,
            None => true,
        })
        .fold(Decimal::ZERO, |acc, (direction, _, amount)| {
            acc + direction.sign() * amount
        })
}

/// Builds the reversing Settlement transaction for a Clearing transaction:
/// every entry's direction flips, phase becomes Settlement, amounts are
/// unchanged.
pub fn reverse_entries(entries: &[JournalEntry]) -> Vec<JournalEntry> {
    entries
        .iter()
        .map(|entry| JournalEntry::new(entry.account_id, entry.amount, entry.direction.flipped(), Phase::Settlement))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn entry(amount: Decimal, direction: Direction) -> JournalEntry {
        JournalEntry::new(Uuid::new_v4(), amount, direction, Phase::Clearing)
    }

    #[test]
    fn balanced_transaction_passes() {
        let entries = vec![entry(dec!(5.00), Direction::Debit), entry(dec!(5.00), Direction::Credit)];
        let (debits, credits) = verify_balanced(&entries).unwrap();
        assert_eq!(debits, dec!(5.00));
        assert_eq!(credits, dec!(5.00));
    }

    #[test]
    fn unbalanced_transaction_is_rejected() {
        let entries = vec![entry(dec!(5.00), Direction::Debit), entry(dec!(4.99), Direction::Credit)];
        let err = verify_balanced(&entries).unwrap_err();
        match err {
            LedgerError::TransactionNotBalanced { total_debits, total_credits } => {
                assert_eq!(total_debits, dec!(5.00));
                assert_eq!(total_credits, dec!(4.99));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn single_entry_transaction_is_rejected() {
        let entries = vec![entry(dec!(5.00), Direction::Debit)];
        assert!(matches!(verify_balanced(&entries), Err(LedgerError::TooFewEntries)));
    }

    #[test]
    fn reverse_entries_flips_direction_and_phase() {
        let entries = vec![entry(dec!(5.00), Direction::Debit), entry(dec!(5.00), Direction::Credit)];
        let reversed = reverse_entries(&entries);
        assert_eq!(reversed[0].direction, Direction::Credit);
        assert_eq!(reversed[1].direction, Direction::Debit);
        assert!(reversed.iter().all(|e| e.phase == Phase::Settlement));
        assert_eq!(reversed[0].amount, entries[0].amount);
    }
}
