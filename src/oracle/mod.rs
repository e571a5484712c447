mod base;
mod celebrity;
mod error;

pub use base::BaseOracleService;
pub use celebrity::CelebrityOracleService;
pub use error::OracleError;
