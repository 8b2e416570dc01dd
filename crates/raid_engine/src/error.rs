//! Error types raised at the engine's boundaries.
//!
//! The numeric core prefers defined fallbacks (a zero-rated candidate is
//! simply excluded), so errors are reserved for inputs that would otherwise
//! turn into `NaN`/`Infinity` and for configuration outside its domain.

use thiserror::Error;

/// Errors surfaced by the rating engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A formula input would divide by zero or produce a non-finite value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value lies outside its domain.
    #[error("configuration error: {field}: {reason}")]
    Configuration { field: &'static str, reason: String },

    /// Game data could not be parsed.
    #[error("data error: {0}")]
    Data(#[from] serde_json::Error),

    /// A species or move referenced by a query does not exist.
    #[error("unknown {kind} `{name}`")]
    Unknown { kind: &'static str, name: String },
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject `NaN`/`Infinity` with a message naming the offending quantity.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(format!("{} is not finite ({})", what, value)))
    }
}

/// Reject zero or negative denominators before they reach a division.
pub(crate) fn ensure_positive(value: f64, what: &str) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(format!("{} must be positive, got {}", what, value)))
    }
}
