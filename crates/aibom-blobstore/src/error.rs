// [crates/aibom-blobstore/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobStoreError {
    #[error("object store unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("object store rejected the operation: {0}")]
    Rejected(String),

    #[error("object not found: {0}")]
    NotFound(String),
}

impl From<BlobStoreError> for DomainError {
    fn from(err: BlobStoreError) -> Self {
        match err {
            BlobStoreError::Unreachable(_) => DomainError::StoreUnavailable(err.to_string()),
            BlobStoreError::Rejected(_) => DomainError::StoreRejected(err.to_string()),
            BlobStoreError::NotFound(key) => DomainError::NotFound(key),
        }
    }
}
