// [crates/aibom-attestation/src/layout.rs]
//! Verificacion de un link contra un layout de verificacion firmado:
//! la politica que enumera los pasos permitidos, las llaves
//! funcionarias de confianza y las reglas de material/producto.

use crate::error::AttestationError;
use crate::link::SignedLink;
use chrono::{DateTime, Utc};
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

/// Llave funcionaria de confianza, identificada por su `keyid` corto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionaryKey {
    pub keyid: String,
    #[serde(with = "hex::serde")]
    pub public_key_bytes: Vec<u8>,
}

impl FunctionaryKey {
    pub fn verifying_key(&self) -> Result<VerifyingKey, AttestationError> {
        let bytes: [u8; 32] = self
            .public_key_bytes
            .as_slice()
            .try_into()
            .map_err(|_| AttestationError::MalformedSignature("public key is not 32 bytes".into()))?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|e| AttestationError::MalformedSignature(e.to_string()))
    }
}

/// Regla de nombre de artefacto requerida para un paso (p. ej. "debe
/// existir un material llamado model.keras").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRule {
    pub step_name: String,
    pub required_material_basenames: Vec<String>,
    pub required_product_basenames: Vec<String>,
}

/// Politica de verificacion firmada: llaves funcionarias de confianza,
/// umbral de firmas requeridas y expiracion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationLayout {
    pub expires: DateTime<Utc>,
    pub functionaries: Vec<FunctionaryKey>,
    pub threshold: u32,
    pub rules: Vec<ArtifactRule>,
}

impl VerificationLayout {
    fn rule_for(&self, step_name: &str) -> Option<&ArtifactRule> {
        self.rules.iter().find(|rule| rule.step_name == step_name)
    }

    fn functionary_for(&self, keyid: &str) -> Option<&FunctionaryKey> {
        self.functionaries.iter().find(|key| key.keyid == keyid)
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Verifica `link` contra `layout`, evaluando expiracion, firma,
/// umbral de funcionarios y reglas de artefacto en ese orden —
/// cualquiera de esas comprobaciones puede fallar primero.
pub fn verify_link(layout: &VerificationLayout, link: &SignedLink, now: DateTime<Utc>) -> Result<(), AttestationError> {
    if now > layout.expires {
        return Err(AttestationError::LayoutExpired);
    }

    let functionary = layout
        .functionary_for(&link.keyid)
        .ok_or(AttestationError::SignatureInvalid)?;

    let verifying_key = functionary.verifying_key()?;
    let signature = link.signature()?;
    aibom_crypto::verify(&verifying_key, &link.canonical_body_bytes(), &signature)
        .map_err(|_| AttestationError::SignatureInvalid)?;

    let signers_met = 1;
    if signers_met < layout.threshold {
        return Err(AttestationError::ThresholdUnmet { required: layout.threshold, found: signers_met });
    }

    if let Some(rule) = layout.rule_for(&link.body.name) {
        let material_basenames: Vec<&str> = link.body.materials.keys().map(|p| basename(p)).collect();
        for required in &rule.required_material_basenames {
            if !material_basenames.contains(&required.as_str()) {
                return Err(AttestationError::RuleViolation(format!(
                    "missing required material: {required}"
                )));
            }
        }

        let product_basenames: Vec<&str> = link.body.products.keys().map(|p| basename(p)).collect();
        for required in &rule.required_product_basenames {
            if !product_basenames.contains(&required.as_str()) {
                return Err(AttestationError::RuleViolation(format!(
                    "missing required product: {required}"
                )));
            }
        }
    }

    Ok(())
}

/// Resultado de la verificacion de un archivo contra un digest
/// registrado en el link (operacion 2 del verificador).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileHashVerdict {
    Match,
    Mismatch,
    NotRecorded,
}

/// Busca una entrada (material o producto) cuyo basename coincida con
/// `filename` y compara su digest contra `candidate_sha256`.
pub fn verify_file_hash(link: &SignedLink, filename: &str, candidate_sha256: &str) -> FileHashVerdict {
    let recorded = link
        .body
        .materials
        .iter()
        .chain(link.body.products.iter())
        .find(|(path, _)| basename(path) == filename);

    match recorded {
        Some((_, digest)) if digest.sha256 == candidate_sha256 => FileHashVerdict::Match,
        Some(_) => FileHashVerdict::Mismatch,
        None => FileHashVerdict::NotRecorded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_link;
    use aibom_core::artifact::{ArtifactDigest, DigestMap};
    use aibom_crypto::KeyPair;
    use chrono::Duration;
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    fn sample_keypair() -> KeyPair {
        let signing_key = SigningKey::generate(&mut OsRng);
        let pem_text = pem::encode(&pem::Pem::new("PRIVATE KEY".to_string(), signing_key.to_bytes().to_vec()));
        KeyPair::from_pem_str(&pem_text).unwrap()
    }

    fn sample_layout(keypair: &KeyPair, expires: DateTime<Utc>) -> VerificationLayout {
        VerificationLayout {
            expires,
            functionaries: vec![FunctionaryKey {
                keyid: keypair.short_keyid(),
                public_key_bytes: keypair.verifying_key().to_bytes().to_vec(),
            }],
            threshold: 1,
            rules: vec![ArtifactRule {
                step_name: "run_training".into(),
                required_material_basenames: vec!["m.keras".into()],
                required_product_basenames: vec!["trained_model.keras".into()],
            }],
        }
    }

    fn sample_link(keypair: &KeyPair) -> SignedLink {
        let mut materials = DigestMap::new();
        materials.insert("job-1/model/m.keras".into(), ArtifactDigest::new("aa"));
        let mut products = DigestMap::new();
        products.insert("job-1/output/trained_model.keras".into(), ArtifactDigest::new("bb"));
        build_link("run_training", materials, products, vec!["worker".into()], None, keypair)
    }

    #[test]
    fn valid_link_verifies_against_matching_layout() {
        let keypair = sample_keypair();
        let layout = sample_layout(&keypair, Utc::now() + Duration::days(1));
        let link = sample_link(&keypair);
        assert!(verify_link(&layout, &link, Utc::now()).is_ok());
    }

    #[test]
    fn expired_layout_is_reported_before_anything_else() {
        let keypair = sample_keypair();
        let layout = sample_layout(&keypair, Utc::now() - Duration::days(1));
        let link = sample_link(&keypair);
        let err = verify_link(&layout, &link, Utc::now()).unwrap_err();
        assert!(matches!(err, AttestationError::LayoutExpired));
    }

    #[test]
    fn unknown_functionary_keyid_is_signature_invalid() {
        let keypair = sample_keypair();
        let mut layout = sample_layout(&keypair, Utc::now() + Duration::days(1));
        layout.functionaries.clear();
        let link = sample_link(&keypair);
        let err = verify_link(&layout, &link, Utc::now()).unwrap_err();
        assert!(matches!(err, AttestationError::SignatureInvalid));
    }

    #[test]
    fn missing_required_artifact_is_rule_violation() {
        let keypair = sample_keypair();
        let mut layout = sample_layout(&keypair, Utc::now() + Duration::days(1));
        layout.rules[0].required_material_basenames.push("extra.csv".into());
        let link = sample_link(&keypair);
        let err = verify_link(&layout, &link, Utc::now()).unwrap_err();
        assert!(matches!(err, AttestationError::RuleViolation(_)));
    }

    #[test]
    fn file_hash_verification_distinguishes_match_mismatch_and_unrecorded() {
        let keypair = sample_keypair();
        let link = sample_link(&keypair);
        assert_eq!(verify_file_hash(&link, "m.keras", "aa"), FileHashVerdict::Match);
        assert_eq!(verify_file_hash(&link, "m.keras", "zz"), FileHashVerdict::Mismatch);
        assert_eq!(verify_file_hash(&link, "unknown.csv", "aa"), FileHashVerdict::NotRecorded);
    }
}
