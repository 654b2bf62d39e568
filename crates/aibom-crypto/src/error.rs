// [crates/aibom-crypto/src/error.rs]
use aibom_core::DomainError;
use thiserror::Error;

/// Errores propios de la capa criptografica, antes de aplanarse sobre
/// la taxonomia compartida en la frontera de cada servicio.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// El material de clave cargado no usa el esquema Ed25519 (p. ej.
    /// RSA/PSS heredado).
    #[error("unsupported key scheme: {0}")]
    UnsupportedKeyScheme(String),

    #[error("malformed key material: {0}")]
    MalformedKey(String),

    #[error("signature does not verify")]
    VerificationFailed,
}

impl From<CryptoError> for DomainError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::VerificationFailed => DomainError::SignatureInvalid(err.to_string()),
            CryptoError::UnsupportedKeyScheme(_) | CryptoError::MalformedKey(_) => {
                DomainError::SignatureInvalid(err.to_string())
            }
            CryptoError::FileNotFound(_) | CryptoError::Io { .. } => {
                DomainError::InputMissing(err.to_string())
            }
        }
    }
}
