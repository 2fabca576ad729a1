//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input and configuration validation failures.
#[derive(Debug)]
pub enum WalloraError {
    /// An error from the underlying API client.
    Api(wallora_api::Error),
    /// User-provided input or configuration failed validation.
    InvalidInput(String),
}

impl fmt::Display for WalloraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for WalloraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<wallora_api::Error> for WalloraError {
    fn from(e: wallora_api::Error) -> Self {
        Self::Api(e)
    }
}
