//! A shared in-memory backend implementing `LedgerPort`, `OutcomeLedgerPort`,
//! `EventStorePort` and `matching::ClearingPort` against one guarded state
//! struct, so tests get the same cross-port atomicity the Postgres adapters
//! give production without standing up a database. Gated behind the
//! `test-support` feature (also always compiled under `#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Account, AccountType, DomainEvent, JournalEntry, NewDomainEvent, NewOutcomeEntry, OutcomeEntry,
    Phase, Transaction, TransactionType,
};
use crate::events::{EventStoreError, EventStorePort};
use crate::ledger::core::{aggregate_balance, verify_balanced};
use crate::ledger::{LedgerError, LedgerPort};
use crate::matching::{ClearingPort, MatchingError, TradeToClear};
use crate::outcome_ledger::core::book_trade_entries;
use crate::outcome_ledger::{OutcomeLedgerError, OutcomeLedgerPort};

#[derive(Default)]
struct State {
    accounts: HashMap<Uuid, Account>,
    transactions: HashMap<Uuid, Transaction>,
    outcome_entries: Vec<OutcomeEntry>,
    events: Vec<DomainEvent>,
    next_event_id: i64,
}

/// Shared guarded state. Every in-memory adapter below holds a clone of the
/// same `Arc`, so a `clear_trade` call and a subsequent `account_balance`
/// read see a consistent world.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> Arc<dyn LedgerPort> {
        Arc::new(InMemoryLedger { state: self.state.clone() })
    }

    pub fn outcome_ledger(&self) -> Arc<dyn OutcomeLedgerPort> {
        Arc::new(InMemoryOutcomeLedger { state: self.state.clone() })
    }

    pub fn events(&self) -> Arc<dyn EventStorePort> {
        Arc::new(InMemoryEventStore { state: self.state.clone() })
    }

    pub fn clearing(&self) -> Arc<dyn ClearingPort> {
        Arc::new(InMemoryClearing { state: self.state.clone() })
    }
}

pub struct InMemoryLedger {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl LedgerPort for InMemoryLedger {
    async fn create_account(
        &self,
        id: Option<Uuid>,
        name: &str,
        account_type: AccountType,
        operator_id: &str,
    ) -> Result<Account, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::BlankName);
        }
        let account = Account {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: name.to_string(),
            account_type,
            operator_id: operator_id.to_string(),
            created_at: Utc::now(),
        };
        self.state.lock().accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn post_transaction(
        &self,
        entries: Vec<JournalEntry>,
        settles_clearing_transaction_id: Option<Uuid>,
        transaction_type: Option<TransactionType>,
    ) -> Result<Uuid, LedgerError> {
        verify_balanced(&entries)?;
        let transaction = Transaction {
            id: Uuid::new_v4(),
            entries,
            created_at: Utc::now(),
            settles_clearing_transaction_id,
            transaction_type,
        };
        let id = transaction.id;
        self.state.lock().transactions.insert(id, transaction);
        Ok(id)
    }

    async fn account_balance(&self, account_id: Uuid, phase: Option<Phase>) -> Result<Decimal, LedgerError> {
        let state = self.state.lock();
        let entries: Vec<(&_, &_, &_)> = state
            .transactions
            .values()
            .flat_map(|tx| tx.entries.iter())
            .filter(|entry| entry.account_id == account_id)
            .map(|entry| (&entry.direction, &entry.phase, &entry.amount))
            .collect();
        Ok(aggregate_balance(entries.into_iter(), phase))
    }

    async fn operator_balances(&self, operator_id: &str) -> Result<HashMap<Uuid, Decimal>, LedgerError> {
        let state = self.state.lock();
        let account_ids: Vec<Uuid> = state
            .accounts
            .values()
            .filter(|account| account.operator_id == operator_id)
            .map(|account| account.id)
            .collect();
        drop(state);

        let mut balances = HashMap::new();
        for account_id in account_ids {
            balances.insert(account_id, self.account_balance(account_id, None).await?);
        }
        Ok(balances)
    }

    async fn find_account_for_user(&self, user_id: &str) -> Result<Option<Account>, LedgerError> {
        let state = self.state.lock();
        let mut candidates: Vec<&Account> = state
            .accounts
            .values()
            .filter(|account| account.operator_id == user_id)
            .collect();
        candidates.sort_by_key(|account| account.created_at);
        Ok(candidates.into_iter().next().cloned())
    }

    async fn find_account_by_name(&self, operator_id: &str, name: &str) -> Result<Option<Account>, LedgerError> {
        let state = self.state.lock();
        Ok(state
            .accounts
            .values()
            .find(|account| account.operator_id == operator_id && account.name == name)
            .cloned())
    }

    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError> {
        Ok(self.state.lock().transactions.get(&transaction_id).cloned())
    }

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, LedgerError> {
        Ok(self.state.lock().accounts.get(&account_id).cloned())
    }
}

pub struct InMemoryOutcomeLedger {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl OutcomeLedgerPort for InMemoryOutcomeLedger {
    async fn append_entries(&self, entries: Vec<NewOutcomeEntry>) -> Result<(), OutcomeLedgerError> {
        let mut state = self.state.lock();
        for entry in entries {
            state.outcome_entries.push(OutcomeEntry {
                id: Uuid::new_v4(),
                account_id: entry.account_id,
                asset_type: entry.asset_type,
                amount: entry.amount,
                direction: entry.direction,
                occurred_at: entry.occurred_at,
            });
        }
        Ok(())
    }

    async fn net_holdings(&self, asset_type: &str) -> Result<HashMap<Uuid, Decimal>, OutcomeLedgerError> {
        let state = self.state.lock();
        let mut holdings: HashMap<Uuid, Decimal> = HashMap::new();
        for entry in state.outcome_entries.iter().filter(|entry| entry.asset_type == asset_type) {
            *holdings.entry(entry.account_id).or_insert(Decimal::ZERO) += entry.direction.sign() * entry.amount;
        }
        Ok(holdings)
    }

    async fn holdings_for_account(&self, account_id: Uuid) -> Result<HashMap<String, Decimal>, OutcomeLedgerError> {
        let state = self.state.lock();
        let mut holdings: HashMap<String, Decimal> = HashMap::new();
        for entry in state.outcome_entries.iter().filter(|entry| entry.account_id == account_id) {
            *holdings.entry(entry.asset_type.clone()).or_insert(Decimal::ZERO) += entry.direction.sign() * entry.amount;
        }
        Ok(holdings)
    }
}

pub struct InMemoryEventStore {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl EventStorePort for InMemoryEventStore {
    async fn append(&self, event: NewDomainEvent) -> Result<DomainEvent, EventStoreError> {
        let mut state = self.state.lock();
        state.next_event_id += 1;
        let stored = DomainEvent {
            id: state.next_event_id,
            event_type: event.event_type,
            payload: event.payload,
            occurred_at: Utc::now(),
            market_id: event.market_id,
            user_id: event.user_id,
        };
        state.events.push(stored.clone());
        Ok(stored)
    }

    async fn append_many(&self, events: Vec<NewDomainEvent>) -> Result<Vec<DomainEvent>, EventStoreError> {
        let mut stored = Vec::with_capacity(events.len());
        for event in events {
            stored.push(self.append(event).await?);
        }
        Ok(stored)
    }

    async fn by_market(&self, market_id: &str) -> Result<Vec<DomainEvent>, EventStoreError> {
        Ok(self
            .state
            .lock()
            .events
            .iter()
            .filter(|event| event.market_id.as_deref() == Some(market_id))
            .cloned()
            .collect())
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<DomainEvent>, EventStoreError> {
        Ok(self
            .state
            .lock()
            .events
            .iter()
            .filter(|event| event.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }
}

pub struct InMemoryClearing {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl ClearingPort for InMemoryClearing {
    async fn clear_trade(&self, trade: &TradeToClear) -> Result<Uuid, MatchingError> {
        let required = trade.required_buyer_funds();
        let mut state = self.state.lock();

        let available: Decimal = state
            .transactions
            .values()
            .flat_map(|tx| tx.entries.iter())
            .filter(|entry| entry.account_id == trade.buyer_account_id && entry.phase == Phase::Clearing)
            .fold(Decimal::ZERO, |acc, entry| acc + entry.direction.sign() * entry.amount);

        if available < required {
            return Err(MatchingError::InsufficientFunds { required, available });
        }

        let entries = vec![
            JournalEntry::new(trade.buyer_account_id, required, crate::domain::Direction::Credit, Phase::Clearing),
            JournalEntry::new(trade.seller_account_id, required, crate::domain::Direction::Debit, Phase::Clearing),
        ];
        verify_balanced(&entries)?;

        let transaction = Transaction {
            id: Uuid::new_v4(),
            entries,
            created_at: Utc::now(),
            settles_clearing_transaction_id: None,
            transaction_type: Some(TransactionType::Trade),
        };
        let transaction_id = transaction.id;
        state.transactions.insert(transaction_id, transaction);

        let outcome_entries = book_trade_entries(
            trade.buyer_account_id,
            trade.seller_account_id,
            required,
            &trade.outcome_asset_type,
            trade.quantity,
        )?;
        for entry in outcome_entries {
            state.outcome_entries.push(OutcomeEntry {
                id: Uuid::new_v4(),
                account_id: entry.account_id,
                asset_type: entry.asset_type,
                amount: entry.amount,
                direction: entry.direction,
                occurred_at: entry.occurred_at,
            });
        }

        Ok(transaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn clear_trade_moves_cash_and_shares_atomically() {
        let backend = MemoryBackend::new();
        let ledger = backend.ledger();
        let clearing = backend.clearing();

        let buyer = ledger.create_account(None, "buyer-cash", AccountType::Asset, "buyer").await.unwrap();
        let seller = ledger.create_account(None, "seller-cash", AccountType::Asset, "seller").await.unwrap();

        ledger
            .post_transaction(
                vec![
                    JournalEntry::new(buyer.id, dec!(100.00), crate::domain::Direction::Debit, Phase::Clearing),
                    JournalEntry::new(seller.id, dec!(100.00), crate::domain::Direction::Credit, Phase::Clearing),
                ],
                None,
                None,
            )
            .await
            .unwrap();

        let trade = TradeToClear {
            buyer_account_id: buyer.id,
            seller_account_id: seller.id,
            price: dec!(0.60),
            quantity: dec!(10),
            outcome_asset_type: "DRAKE_ALBUM".to_string(),
        };
        clearing.clear_trade(&trade).await.unwrap();

        let buyer_balance = ledger.account_balance(buyer.id, None).await.unwrap();
        assert_eq!(buyer_balance, dec!(94.00));

        let outcome_ledger = backend.outcome_ledger();
        let holdings = outcome_ledger.net_holdings("DRAKE_ALBUM").await.unwrap();
        assert_eq!(holdings.get(&buyer.id).copied().unwrap(), dec!(10));
    }

    #[tokio::test]
    async fn clear_trade_rejects_insufficient_funds() {
        let backend = MemoryBackend::new();
        let clearing = backend.clearing();

        let trade = TradeToClear {
            buyer_account_id: Uuid::new_v4(),
            seller_account_id: Uuid::new_v4(),
            price: dec!(0.60),
            quantity: dec!(10),
            outcome_asset_type: "DRAKE_ALBUM".to_string(),
        };
        let err = clearing.clear_trade(&trade).await.unwrap_err();
        assert!(matches!(err, MatchingError::InsufficientFunds { .. }));
    }
}
