// [crates/aibom-crypto/src/signing.rs]
//! Firma y verificacion Ed25519 para links de atestacion y documentos
//! BOM. El unico esquema soportado es Ed25519; cualquier otro material
//! de clave (p. ej. RSA/PSS, visto en generadores heredados) se
//! rechaza explicitamente en lugar de intentar interpretarlo.

use crate::error::CryptoError;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::Deserialize;
use std::path::Path;

const PEM_ED25519_PRIVATE_LABEL: &str = "PRIVATE KEY";
const PEM_ED25519_PUBLIC_LABEL: &str = "PUBLIC KEY";

/// Par de claves Ed25519 cargado desde PEM, con el prefijo de keyid
/// corto usado en el nombre de archivo del link (`<step>.<keyid>.link`).
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Carga un par de claves Ed25519 desde un archivo PEM que contiene
    /// la clave privada de 32 bytes. Rechaza cualquier otro esquema de
    /// clave con `UnsupportedKeyScheme`.
    pub fn load_from_pem_file(path: impl AsRef<Path>) -> Result<Self, CryptoError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CryptoError::FileNotFound(path.display().to_string())
            } else {
                CryptoError::Io { path: path.display().to_string(), source }
            }
        })?;
        Self::from_pem_str(&contents)
    }

    pub fn from_pem_str(pem_text: &str) -> Result<Self, CryptoError> {
        let parsed = pem::parse(pem_text)
            .map_err(|e| CryptoError::MalformedKey(e.to_string()))?;

        if parsed.tag() != PEM_ED25519_PRIVATE_LABEL {
            return Err(CryptoError::UnsupportedKeyScheme(parsed.tag().to_string()));
        }

        let bytes: [u8; 32] = parsed
            .contents()
            .try_into()
            .map_err(|_| CryptoError::UnsupportedKeyScheme("non-32-byte key material".into()))?;

        Ok(Self { signing_key: SigningKey::from_bytes(&bytes) })
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Identificador corto de clave derivado de los primeros 8 bytes
    /// hex del digest SHA-256 de la clave publica, usado en el nombre
    /// de archivo del link.
    pub fn short_keyid(&self) -> String {
        let digest = crate::digest::sha256_bytes(self.signing_key.verifying_key().as_bytes());
        digest[..16].to_string()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

/// Verifica una firma Ed25519 sobre `message` contra `verifying_key`.
pub fn verify(verifying_key: &VerifyingKey, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
    verifying_key
        .verify(message, signature)
        .map_err(|_| CryptoError::VerificationFailed)
}

/// Forma del documento `/run/secrets/worker_public_key`: el mismo
/// formato `keytype`/`scheme`/`keyval.public` que in-toto usa para sus
/// claves funcionarias, en lugar de un PEM desnudo — asi el verificador
/// puede cargar la misma clave publica que firma tanto links como BOMs.
#[derive(Debug, Deserialize)]
struct PublicKeyDocument {
    keytype: String,
    scheme: String,
    keyval: PublicKeyValue,
}

#[derive(Debug, Deserialize)]
struct PublicKeyValue {
    public: String,
}

/// Carga una clave publica Ed25519 desde el formato JSON documentado
/// para `/run/secrets/worker_public_key`. Rechaza cualquier
/// `keytype`/`scheme` distinto de `ed25519` con `UnsupportedKeyScheme`.
pub fn load_verifying_key_from_json_file(path: impl AsRef<Path>) -> Result<VerifyingKey, CryptoError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CryptoError::FileNotFound(path.display().to_string())
        } else {
            CryptoError::Io { path: path.display().to_string(), source }
        }
    })?;
    load_verifying_key_from_json_str(&contents)
}

pub fn load_verifying_key_from_json_str(json_text: &str) -> Result<VerifyingKey, CryptoError> {
    let document: PublicKeyDocument =
        serde_json::from_str(json_text).map_err(|e| CryptoError::MalformedKey(e.to_string()))?;

    if document.keytype != "ed25519" || document.scheme != "ed25519" {
        return Err(CryptoError::UnsupportedKeyScheme(format!("{}/{}", document.keytype, document.scheme)));
    }

    let bytes = hex::decode(&document.keyval.public).map_err(|e| CryptoError::MalformedKey(e.to_string()))?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::MalformedKey("public key is not 32 bytes".into()))?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::MalformedKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    fn sample_keypair_pem() -> String {
        let signing_key = SigningKey::generate(&mut OsRng);
        let contents = pem::Pem::new(PEM_ED25519_PRIVATE_LABEL.to_string(), signing_key.to_bytes().to_vec());
        pem::encode(&contents)
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let pem_text = sample_keypair_pem();
        let keypair = KeyPair::from_pem_str(&pem_text).unwrap();
        let signature = keypair.sign(b"attestation payload");
        assert!(verify(&keypair.verifying_key(), b"attestation payload", &signature).is_ok());
    }

    #[test]
    fn tampered_message_fails_verification() {
        let pem_text = sample_keypair_pem();
        let keypair = KeyPair::from_pem_str(&pem_text).unwrap();
        let signature = keypair.sign(b"attestation payload");
        let err = verify(&keypair.verifying_key(), b"tampered payload", &signature).unwrap_err();
        assert!(matches!(err, CryptoError::VerificationFailed));
    }

    #[test]
    fn wrong_pem_label_is_rejected_as_unsupported_scheme() {
        let contents = pem::Pem::new(PEM_ED25519_PUBLIC_LABEL.to_string(), vec![0u8; 32]);
        let pem_text = pem::encode(&contents);
        let err = KeyPair::from_pem_str(&pem_text).unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedKeyScheme(_)));
    }

    #[test]
    fn short_keyid_is_stable_for_same_key() {
        let pem_text = sample_keypair_pem();
        let keypair = KeyPair::from_pem_str(&pem_text).unwrap();
        assert_eq!(keypair.short_keyid(), keypair.short_keyid());
        assert_eq!(keypair.short_keyid().len(), 16);
    }

    #[test]
    fn public_key_json_round_trips_with_the_matching_private_key() {
        let pem_text = sample_keypair_pem();
        let keypair = KeyPair::from_pem_str(&pem_text).unwrap();
        let document = serde_json::json!({
            "keytype": "ed25519",
            "scheme": "ed25519",
            "keyval": { "public": hex::encode(keypair.verifying_key().to_bytes()) },
        });
        let loaded = load_verifying_key_from_json_str(&document.to_string()).unwrap();
        assert_eq!(loaded, keypair.verifying_key());
    }

    #[test]
    fn public_key_json_rejects_non_ed25519_scheme() {
        let document = serde_json::json!({
            "keytype": "rsa",
            "scheme": "rsassa-pss-sha256",
            "keyval": { "public": "00".repeat(32) },
        });
        let err = load_verifying_key_from_json_str(&document.to_string()).unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedKeyScheme(_)));
    }
}
