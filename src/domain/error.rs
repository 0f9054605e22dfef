//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid input to the rewrite rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
