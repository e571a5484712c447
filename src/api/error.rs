use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::copy_trading::CopyTradingError;
use crate::events::EventStoreError;
use crate::ledger::LedgerError;
use crate::market_resolver::MarketResolverError;
use crate::matching::MatchingError;
use crate::oracle::OracleError;
use crate::outcome_ledger::OutcomeLedgerError;
use crate::social::SocialError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// Maps every domain error to the §7 taxonomy: validation and domain
/// rejections surface as typed 4xx, backend/infrastructure failures as 5xx.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::BAD_REQUEST {
            return (self.status, self.message).into_response();
        }

        let body = ApiErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<MatchingError> for AppError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::InvalidOutcome(_) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_OUTCOME", err.to_string()),
            MatchingError::InsufficientFunds { .. } => Self::new(StatusCode::CONFLICT, "INSUFFICIENT_FUNDS", err.to_string()),
            MatchingError::PriceOutOfRange | MatchingError::NonPositiveQuantity => Self::bad_request(err.to_string()),
            MatchingError::InvalidOperation(_) => Self::bad_request(err.to_string()),
            MatchingError::Ledger(inner) => inner.into(),
            MatchingError::OutcomeLedger(inner) => inner.into(),
            MatchingError::EventStore(_) | MatchingError::Backend(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INFRASTRUCTURE_ERROR", err.to_string())
            }
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::BlankName | LedgerError::TooFewEntries => Self::bad_request(err.to_string()),
            LedgerError::TransactionNotBalanced { .. } => Self::new(StatusCode::UNPROCESSABLE_ENTITY, "TRANSACTION_NOT_BALANCED", err.to_string()),
            LedgerError::AccountNotFound(_) | LedgerError::TransactionNotFound(_) => Self::not_found(err.to_string()),
            LedgerError::Backend(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INFRASTRUCTURE_ERROR", err.to_string()),
        }
    }
}

impl From<OutcomeLedgerError> for AppError {
    fn from(err: OutcomeLedgerError) -> Self {
        match &err {
            OutcomeLedgerError::NonPositiveCashAmount | OutcomeLedgerError::NonPositiveQuantity | OutcomeLedgerError::BlankAssetType => {
                Self::bad_request(err.to_string())
            }
            OutcomeLedgerError::Backend(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INFRASTRUCTURE_ERROR", err.to_string()),
        }
    }
}

impl From<OracleError> for AppError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::NonPositiveAmount | OracleError::BlankOutcomeId => Self::bad_request(err.to_string()),
            OracleError::EventStore(inner) => inner.into(),
        }
    }
}

impl From<EventStoreError> for AppError {
    fn from(err: EventStoreError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INFRASTRUCTURE_ERROR", err.to_string())
    }
}

impl From<CopyTradingError> for AppError {
    fn from(err: CopyTradingError) -> Self {
        let message = err.to_string();
        match err {
            CopyTradingError::CelebrityAccountNotFound(..) => Self::not_found(message),
            CopyTradingError::Ledger(inner) => inner.into(),
        }
    }
}

impl From<MarketResolverError> for AppError {
    fn from(err: MarketResolverError) -> Self {
        let message = err.to_string();
        match err {
            MarketResolverError::BlankAssetType => Self::bad_request(message),
            MarketResolverError::OutcomeLedger(inner) => inner.into(),
        }
    }
}

impl From<SocialError> for AppError {
    fn from(err: SocialError) -> Self {
        match &err {
            SocialError::SelfFollow => Self::bad_request(err.to_string()),
            SocialError::Backend(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INFRASTRUCTURE_ERROR", err.to_string()),
        }
    }
}
