// [crates/aibom-bom/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BomError {
    #[error("BOM does not validate against CycloneDX v1.6: {0}")]
    SchemaInvalid(String),

    #[error("BOM metadata is missing a {0} property")]
    SignatureMissing(&'static str),

    #[error("BOM signature does not verify")]
    SignatureInvalid,

    #[error("malformed base64 signature: {0}")]
    MalformedSignature(String),
}

impl From<BomError> for DomainError {
    fn from(err: BomError) -> Self {
        match err {
            BomError::SchemaInvalid(_) => DomainError::BomInvalid(err.to_string()),
            BomError::SignatureMissing(_) | BomError::MalformedSignature(_) | BomError::SignatureInvalid => {
                DomainError::SignatureInvalid(err.to_string())
            }
        }
    }
}
