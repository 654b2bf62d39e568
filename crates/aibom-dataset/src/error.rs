// [crates/aibom-dataset/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("uploaded .zip file is too large")]
    ZipTooLarge,

    #[error("uploaded file is not a valid .zip archive")]
    NotAZipArchive,

    #[error("entry '{0}' is too large when decompressed")]
    EntryTooLarge(String),

    #[error("decompressed archive exceeds the total size limit")]
    TotalSizeExceeded,

    #[error("path traversal detected in .zip file: {0}")]
    PathTraversal(String),

    #[error("invalid file type in .zip file: {0}")]
    DisallowedExtension(String),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("dataset definition does not parse as YAML: {0}")]
    DefinitionInvalid(String),

    #[error("required column '{0}' is missing from the CSV dataset")]
    MissingColumn(String),

    #[error("{0}")]
    SchemaMismatch(String),
}

impl From<DatasetError> for DomainError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::ZipTooLarge
            | DatasetError::NotAZipArchive
            | DatasetError::EntryTooLarge(_)
            | DatasetError::TotalSizeExceeded
            | DatasetError::PathTraversal(_)
            | DatasetError::DisallowedExtension(_)
            | DatasetError::DefinitionInvalid(_) => DomainError::InvalidInput(err.to_string()),
            DatasetError::Zip(_) | DatasetError::Io(_) => DomainError::InputMissing(err.to_string()),
            DatasetError::Csv(_) => DomainError::SchemaMismatch(err.to_string()),
            DatasetError::MissingColumn(_) | DatasetError::SchemaMismatch(_) => {
                DomainError::SchemaMismatch(err.to_string())
            }
        }
    }
}
