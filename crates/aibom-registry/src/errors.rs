// [crates/aibom-registry/src/errors.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("registry connection failed: {0}")]
    ConnectionError(String),

    #[error("registry query failed: {0}")]
    QueryError(#[from] libsql::Error),

    #[error("job {0} not found")]
    JobNotFound(String),

    #[error("job {0} already exists")]
    DuplicateJobId(String),
}

impl From<RegistryError> for DomainError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::JobNotFound(id) => DomainError::NotFound(format!("job {id}")),
            RegistryError::DuplicateJobId(_) => DomainError::InvalidInput(err.to_string()),
            RegistryError::ConnectionError(_) | RegistryError::QueryError(_) => {
                DomainError::Internal(err.to_string())
            }
        }
    }
}
