// [crates/aibom-bom/src/canonical.rs]
//! El contrato de canonicalizacion (spec step 8): firmar y verificar
//! deben operar sobre exactamente los mismos bytes. Se logra limpiando
//! el `BOM Signature` y el timestamp volatil antes de serializar, y
//! restaurandolos despues — nunca se firma un documento que todavia
//! contenga su propia firma.

use crate::model::{Bom, Property, BOM_SIGNATURE_PROPERTY_NAME};
use chrono::{DateTime, Utc};

/// Produce una copia de `bom` sin la propiedad `BOM Signature` y con el
/// timestamp de metadata puesto a `None`, lista para serializarse a
/// los bytes que la firma cubre.
pub fn strip_for_signing(bom: &Bom) -> Bom {
    let mut stripped = bom.clone();
    stripped.metadata.timestamp = None;
    stripped.metadata.properties.retain(|p| p.name != BOM_SIGNATURE_PROPERTY_NAME);
    stripped
}

/// Bytes JSON canonicos sobre los que se calcula y verifica la firma.
pub fn canonical_bytes(bom: &Bom) -> Vec<u8> {
    serde_json::to_vec(&strip_for_signing(bom)).expect("Bom always serialises")
}

/// Reinserta la firma base64 como una propiedad de metadata y restaura
/// el timestamp, completando el contrato de canonicalizacion.
pub fn embed_signature(bom: &mut Bom, signature_base64: String, timestamp: DateTime<Utc>) {
    bom.metadata.properties.retain(|p| p.name != BOM_SIGNATURE_PROPERTY_NAME);
    bom.metadata.properties.push(Property::new(BOM_SIGNATURE_PROPERTY_NAME, signature_base64));
    bom.metadata.timestamp = Some(timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, OrganizationalEntity, Tools};

    fn empty_bom() -> Bom {
        Bom {
            bom_format: "CycloneDX".into(),
            spec_version: "1.6".into(),
            version: 1,
            metadata: Metadata {
                timestamp: Some(Utc::now()),
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

    #[test]
    fn round_trip_sign_then_verify_yields_identical_canonical_bytes() {
        let bom = empty_bom();
        let before_signing = canonical_bytes(&bom);

        let mut signed = bom.clone();
        embed_signature(&mut signed, "c2lnbmF0dXJl".into(), Utc::now());

        let after_signing = canonical_bytes(&signed);
        assert_eq!(before_signing, after_signing);
    }

    #[test]
    fn stripping_removes_signature_property_but_keeps_others() {
        let mut bom = empty_bom();
        bom.metadata.properties.push(Property::new("Unrelated", "kept"));
        embed_signature(&mut bom, "sig".into(), Utc::now());

        let stripped = strip_for_signing(&bom);
        assert!(stripped.metadata.properties.iter().all(|p| p.name != BOM_SIGNATURE_PROPERTY_NAME));
        assert!(stripped.metadata.properties.iter().any(|p| p.name == "Unrelated"));
        assert!(stripped.metadata.timestamp.is_none());
    }
}
