//! Storefront error types.

use thiserror::Error;

use basecamp_core::DomainError;

pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Failures of the key-value store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("stored value is not valid json: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid decision scope: {0}")]
    InvalidDecisionScope(String),
}
