mod error;
pub mod port;
pub mod postgres;

pub use error::EventStoreError;
pub use port::EventStorePort;
pub use postgres::PgEventStore;
