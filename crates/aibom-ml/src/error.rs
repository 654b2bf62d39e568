// [crates/aibom-ml/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MlError {
    #[error("{0}")]
    ShapeMismatch(String),

    #[error("no compute device available: {0}")]
    NoDeviceAvailable(String),

    #[error("training failed: {0}")]
    TrainingFailed(String),
}

impl From<MlError> for DomainError {
    fn from(err: MlError) -> Self {
        match err {
            MlError::ShapeMismatch(msg) => DomainError::ShapeMismatch(msg),
            MlError::NoDeviceAvailable(msg) => DomainError::NoDeviceAvailable(msg),
            MlError::TrainingFailed(msg) => DomainError::Internal(msg),
        }
    }
}
