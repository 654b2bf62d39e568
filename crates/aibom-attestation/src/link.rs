// [crates/aibom-attestation/src/link.rs]
//! Link de atestacion al estilo in-toto: el registro firmado de un
//! paso de la tuberia (materiales consumidos, productos generados,
//! comando ejecutado, subproductos).

use crate::error::AttestationError;
use aibom_core::artifact::DigestMap;
use ed25519_dalek::Signature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Byproducts por defecto cuando el invocador no provee ninguno —
/// exactamente el valor que el generador original siempre adjuntaba.
pub fn default_byproducts() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("stdout".to_string(), "Task completed successfully.".to_string());
    map
}

/// Cuerpo sin firmar de un link de atestacion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBody {
    pub name: String,
    pub materials: DigestMap,
    pub products: DigestMap,
    #[serde(default)]
    pub byproducts: BTreeMap<String, String>,
    pub command: Vec<String>,
}

/// Un link de atestacion firmado, listo para serializarse al archivo
/// `<step_name>.<short_keyid>.link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedLink {
    #[serde(flatten)]
    pub body: LinkBody,
    pub keyid: String,
    /// Firma Ed25519 en hex sobre la serializacion canonica de `body`.
    pub signature_hex: String,
}

impl SignedLink {
    /// Nombre de archivo convencional: `<step_name>.<short_keyid>.link`.
    pub fn filename(&self) -> String {
        format!("{}.{}.link", self.body.name, self.keyid)
    }

    pub fn signature(&self) -> Result<Signature, AttestationError> {
        let bytes = hex::decode(&self.signature_hex)
            .map_err(|e| AttestationError::MalformedSignature(e.to_string()))?;
        Signature::from_slice(&bytes).map_err(|e| AttestationError::MalformedSignature(e.to_string()))
    }

    /// Bytes canonicos que la firma cubre: la serializacion JSON del
    /// cuerpo sin firmar, con claves ordenadas (a traves de `BTreeMap`
    /// y de la ordenacion natural de campos de struct de `serde_json`).
    pub fn canonical_body_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.body).expect("LinkBody always serialises")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_follows_step_name_dot_keyid_dot_link() {
        let link = SignedLink {
            body: LinkBody {
                name: "run_training".into(),
                materials: DigestMap::new(),
                products: DigestMap::new(),
                byproducts: default_byproducts(),
                command: vec!["worker".into(), "run".into()],
            },
            keyid: "ab12cd34".into(),
            signature_hex: "00".repeat(64),
        };
        assert_eq!(link.filename(), "run_training.ab12cd34.link");
    }

    #[test]
    fn default_byproducts_matches_original_stdout_message() {
        let byproducts = default_byproducts();
        assert_eq!(byproducts.get("stdout").unwrap(), "Task completed successfully.");
    }
}
