// [crates/aibom-attestation/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttestationError {
    #[error("malformed signature encoding: {0}")]
    MalformedSignature(String),

    #[error("signature does not verify against the functionary key")]
    SignatureInvalid,

    #[error("signed layout has expired")]
    LayoutExpired,

    #[error("no link found for step {0}")]
    LinkMissing(String),

    #[error("layout requires {required} functionary signatures, found {found}")]
    ThresholdUnmet { required: u32, found: u32 },

    #[error("artifact rule violated: {0}")]
    RuleViolation(String),
}

impl From<AttestationError> for DomainError {
    fn from(err: AttestationError) -> Self {
        match err {
            AttestationError::MalformedSignature(_) | AttestationError::SignatureInvalid => {
                DomainError::SignatureInvalid(err.to_string())
            }
            AttestationError::LayoutExpired => DomainError::LayoutExpired(err.to_string()),
            AttestationError::LinkMissing(_) => DomainError::LinkMissing(err.to_string()),
            AttestationError::ThresholdUnmet { .. } => DomainError::ThresholdUnmet(err.to_string()),
            AttestationError::RuleViolation(_) => DomainError::RuleViolation(err.to_string()),
        }
    }
}
