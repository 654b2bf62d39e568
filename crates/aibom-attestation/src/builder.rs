// [crates/aibom-attestation/src/builder.rs]
//! Construccion de un link firmado a partir de los digests de
//! materiales y productos recolectados durante un paso del pipeline.

use crate::link::{default_byproducts, LinkBody, SignedLink};
use aibom_core::artifact::DigestMap;
use aibom_crypto::KeyPair;
use std::collections::BTreeMap;

/// Construye y firma un link de atestacion para `step_name`.
pub fn build_link(
    step_name: &str,
    materials: DigestMap,
    products: DigestMap,
    command: Vec<String>,
    byproducts: Option<BTreeMap<String, String>>,
    keypair: &KeyPair,
) -> SignedLink {
    let body = LinkBody {
        name: step_name.to_string(),
        materials,
        products,
        byproducts: byproducts.unwrap_or_else(default_byproducts),
        command,
    };

    let body_bytes = serde_json::to_vec(&body).expect("LinkBody always serialises");
    let signature = keypair.sign(&body_bytes);

    SignedLink {
        body,
        keyid: keypair.short_keyid(),
        signature_hex: hex::encode(signature.to_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aibom_core::artifact::ArtifactDigest;
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    fn sample_keypair() -> KeyPair {
        let signing_key = SigningKey::generate(&mut OsRng);
        let pem_text = pem::encode(&pem::Pem::new("PRIVATE KEY".to_string(), signing_key.to_bytes().to_vec()));
        KeyPair::from_pem_str(&pem_text).unwrap()
    }

    #[test]
    fn build_link_produces_a_verifiable_signature() {
        let keypair = sample_keypair();
        let mut materials = DigestMap::new();
        materials.insert("job-1/model/m.keras".into(), ArtifactDigest::new("aa"));
        let mut products = DigestMap::new();
        products.insert("job-1/output/trained_model.keras".into(), ArtifactDigest::new("bb"));

        let link = build_link(
            "run_training",
            materials,
            products,
            vec!["worker".into(), "train".into()],
            None,
            &keypair,
        );

        assert_eq!(link.body.byproducts.get("stdout").unwrap(), "Task completed successfully.");
        let signature = link.signature().unwrap();
        assert!(aibom_crypto::verify(&keypair.verifying_key(), &link.canonical_body_bytes(), &signature).is_ok());
    }
}
