// [crates/aibom-bom/src/signing.rs]
//! Firma y verificacion del documento BOM completo, construidas sobre
//! el contrato de canonicalizacion y las primitivas Ed25519 de
//! `aibom_crypto`.

use crate::canonical::{canonical_bytes, embed_signature};
use crate::error::BomError;
use crate::model::Bom;
use aibom_crypto::KeyPair;
use base64::Engine;
use chrono::Utc;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

const BASE64: base64::engine::general_purpose::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Firma `bom` con `keypair`, devolviendo una copia con la propiedad
/// `BOM Signature` y el timestamp de metadata puestos.
pub fn sign_bom(bom: &Bom, keypair: &KeyPair) -> Bom {
    let message = canonical_bytes(bom);
    let signature = keypair.sign(&message);
    let signature_b64 = BASE64.encode(signature.to_bytes());

    let mut signed = bom.clone();
    embed_signature(&mut signed, signature_b64, Utc::now());
    signed
}

/// Verifica la firma embebida de `bom` contra `verifying_key`.
pub fn verify_bom(bom: &Bom, verifying_key: &VerifyingKey) -> Result<(), BomError> {
    let signature_b64 = bom
        .find_bom_signature()
        .ok_or(BomError::SignatureMissing("BOM Signature"))?;

    let signature_bytes = BASE64
        .decode(signature_b64)
        .map_err(|e| BomError::MalformedSignature(e.to_string()))?;
    let signature = Signature::from_slice(&signature_bytes)
        .map_err(|e| BomError::MalformedSignature(e.to_string()))?;

    let message = canonical_bytes(bom);
    verifying_key
        .verify(&message, &signature)
        .map_err(|_| BomError::SignatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, OrganizationalEntity, Tools};
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    fn empty_bom() -> Bom {
        Bom {
            bom_format: "CycloneDX".into(),
            spec_version: "1.6".into(),
            version: 1,
            metadata: Metadata {
                timestamp: None,
                tools: Tools { components: vec![] },
                authors: vec![],
                supplier: OrganizationalEntity { name: "x".into(), url: vec![] },
                manufacturer: OrganizationalEntity { name: "x".into(), url: vec![] },
                properties: vec![],
            },
            components: vec![],
            external_references: vec![],
            dependencies: vec![],
        }
    }

    fn generate_keypair() -> KeyPair {
        let signing_key = SigningKey::generate(&mut OsRng);
        let pem_contents = pem::Pem::new("PRIVATE KEY".to_string(), signing_key.to_bytes().to_vec());
        KeyPair::from_pem_str(&pem::encode(&pem_contents)).expect("generated key parses")
    }

    #[test]
    fn signed_bom_verifies_against_the_matching_public_key() {
        let keypair = generate_keypair();
        let bom = empty_bom();

        let signed = sign_bom(&bom, &keypair);
        assert!(verify_bom(&signed, &keypair.verifying_key()).is_ok());
    }

    #[test]
    fn tampering_with_a_component_invalidates_the_signature() {
        let keypair = generate_keypair();
        let bom = empty_bom();

        let mut signed = sign_bom(&bom, &keypair);
        signed.version = 2;

        assert!(matches!(verify_bom(&signed, &keypair.verifying_key()), Err(BomError::SignatureInvalid)));
    }

    #[test]
    fn missing_signature_property_is_reported_distinctly() {
        let bom = empty_bom();
        let keypair = generate_keypair();
        assert!(matches!(verify_bom(&bom, &keypair.verifying_key()), Err(BomError::SignatureMissing(_))));
    }
}
