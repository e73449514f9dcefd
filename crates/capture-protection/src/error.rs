//! Capture protection error types

use protection_types::TypesError;
use thiserror::Error;

/// Error returned by a native capability provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no entry point for this capability
    #[error("Capability not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Native error: {0}")]
    Native(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error returned to callers of the protection API
#[derive(Debug, Error)]
pub enum ProtectionError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    InvalidOption(#[from] TypesError),
}

pub type ProtectionResult<T> = Result<T, ProtectionError>;
