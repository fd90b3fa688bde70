//! Error types for the I/O surfaces (CSV loaders, environment configuration)
//!
//! The calculation functions themselves never fail; see [`crate::xirr::XirrFailure`]
//! for the solver's non-convergence reasons.

use thiserror::Error;

/// Errors raised while loading inputs or reading configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),

    #[error("Unknown transaction status: {0}")]
    UnknownTransactionStatus(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: String, value: String },
}

impl Error {
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
