pub mod core;
mod error;
pub mod port;
pub mod postgres;

pub use error::LedgerError;
pub use port::LedgerPort;
pub use postgres::PgLedger;
