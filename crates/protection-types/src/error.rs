//! Error types for the shared model

use thiserror::Error;

/// Error raised while parsing or validating shared types
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Invalid protection option: {0}")]
    InvalidOption(#[from] serde_json::Error),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Invalid content mode: {0}")]
    InvalidContentMode(u8),

    #[error("Surface {0} does not support image or text covers")]
    UnsupportedOverlay(crate::Surface),
}

/// Result type alias for shared model operations
pub type TypesResult<T> = Result<T, TypesError>;
