//! Error types for Benford conformity analysis

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum BenfordError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
