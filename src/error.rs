//! Error types for index construction and configuration.
//!
//! Index operations themselves never fail with an error: insert, remove,
//! update and the queries report outcomes through `bool` or an empty result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
