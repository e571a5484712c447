//! Shared value types used across ledger, matching, oracle and settlement
//! components. Kept free of any persistence concern so every module can
//! depend on these without pulling in `sqlx`.

mod account;
mod domain_event;
mod follow;
mod ledger_entry;
mod market_event;
mod order;
mod outcome_entry;

pub use account::{Account, AccountType};
pub use domain_event::{DomainEvent, NewDomainEvent, OrderPlacedPayload, TradeMatchedPayload};
pub use follow::Follow;
pub use ledger_entry::{Direction, JournalEntry, Phase, Transaction, TransactionType};
pub use market_event::{MarketEvent, MarketEventType};
pub use order::{Order, Side};
pub use outcome_entry::{NewOutcomeEntry, OutcomeEntry};
