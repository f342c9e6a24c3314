//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a caller input failure: deterministic, never transient and
/// never worth retrying. The HTTP layer turns all of them into `400`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A bucket identifier is unknown, already taken, or outside the length limits.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A debit/credit pair does not balance.
    #[error("invalid pair value: {0}")]
    InvalidPairValue(String),

    /// An effective date is not an ISO `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    pub fn invalid_pair_value(msg: impl Into<String>) -> Self {
        Self::InvalidPairValue(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidIdentifier(m) | Self::InvalidPairValue(m) | Self::InvalidDate(m) => m,
        }
    }
}
