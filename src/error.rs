//! Structured error kinds shared across the pipeline.
//!
//! Fetch-layer failures are caught at the provider boundary and turned into
//! neutral fetch results (fail-soft); only genuine invariant violations
//! escape as `EngineError`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("required API key missing: {0}")]
    ApiKeyMissing(String),
    #[error("API key invalid for provider: {0}")]
    ApiKeyInvalid(String),
    #[error("invalid sport: {0}")]
    InvalidSport(String),
    #[error("invalid market: {0}")]
    InvalidMarket(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no data available: {0}")]
    NoDataAvailable(String),
    #[error("rate limited by provider: {0}")]
    RateLimited(String),
    #[error("quota exceeded for provider: {0}")]
    QuotaExceeded(String),
    #[error("provider unavailable: {0}")]
    ApiUnavailable(String),
    #[error("provider call timed out: {0}")]
    ApiTimeout(String),
    #[error("provider call failed: {0}")]
    ApiError(String),
    #[error("internal invariant violated: {0}")]
    InternalError(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("best-bets computation failed: {0}")]
    BestBetsFailed(String),
}

impl EngineError {
    /// The stable error code carried in responses and telemetry.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ApiKeyMissing(_) => "API_KEY_MISSING",
            EngineError::ApiKeyInvalid(_) => "API_KEY_INVALID",
            EngineError::InvalidSport(_) => "INVALID_SPORT",
            EngineError::InvalidMarket(_) => "INVALID_MARKET",
            EngineError::InvalidDate(_) => "INVALID_DATE",
            EngineError::ValidationError(_) => "VALIDATION_ERROR",
            EngineError::NotFound(_) => "NOT_FOUND",
            EngineError::NoDataAvailable(_) => "NO_DATA_AVAILABLE",
            EngineError::RateLimited(_) => "RATE_LIMITED",
            EngineError::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            EngineError::ApiUnavailable(_) => "API_UNAVAILABLE",
            EngineError::ApiTimeout(_) => "API_TIMEOUT",
            EngineError::ApiError(_) => "API_ERROR",
            EngineError::InternalError(_) => "INTERNAL_ERROR",
            EngineError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            EngineError::BestBetsFailed(_) => "BEST_BETS_FAILED",
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
