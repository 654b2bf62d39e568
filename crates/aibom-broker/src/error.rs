// [crates/aibom-broker/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("broker unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("broker rejected the request: {0}")]
    Rejected(String),

    #[error("task {0} not found")]
    TaskNotFound(String),
}

impl From<BrokerError> for DomainError {
    fn from(err: BrokerError) -> Self {
        match err {
            BrokerError::Unreachable(_) => DomainError::BrokerUnavailable(err.to_string()),
            BrokerError::Rejected(_) => DomainError::Internal(err.to_string()),
            BrokerError::TaskNotFound(id) => DomainError::NotFound(format!("task {id}")),
        }
    }
}
