//! Error types for boptone-qc
//!
//! Validation operations never return these for expected conditions: every expected
//! problem becomes a `ValidationIssue`. These cover configuration loading only.

use thiserror::Error;

/// boptone-qc error type
#[derive(Debug, Error)]
pub enum QcError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// boptone-common error
    #[error("Common error: {0}")]
    Common(#[from] boptone_common::Error),
}

/// Result type for boptone-qc
pub type QcResult<T> = Result<T, QcError>;
