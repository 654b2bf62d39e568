// [crates/aibom-core/src/artifact.rs]
//! Artefactos: materiales (entradas) y productos (salidas) direccionados
//! por su digest SHA-256 (spec.md §3).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rol de un artefacto dentro de una atestacion de un paso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactRole {
    Material,
    Product,
}

/// Digest hexadecimal SHA-256, la unica identidad criptografica que la
/// atestacion reconoce para un artefacto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDigest {
    pub sha256: String,
}

impl ArtifactDigest {
    pub fn new(hex_digest: impl Into<String>) -> Self {
        Self { sha256: hex_digest.into() }
    }
}

/// Un artefacto publicado bajo una ruta relativa al bucket dentro del
/// directorio de staging de un job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Ruta relativa al bucket, p. ej. `<staging_dir>/model/model.keras`.
    pub bucket_path: String,
    pub role: ArtifactRole,
    pub digest: ArtifactDigest,
}

impl Artifact {
    pub fn new(bucket_path: impl Into<String>, role: ArtifactRole, digest: ArtifactDigest) -> Self {
        Self { bucket_path: bucket_path.into(), role, digest }
    }
}

/// Mapa `path -> {sha256}` tal como lo exige el registro de materiales o
/// productos de un link de atestacion (spec.md §3).
pub type DigestMap = BTreeMap<String, ArtifactDigest>;

/// Particiona una lista de artefactos en sus dos mapas de digest,
/// preservando el invariante "la clave de ruta es la ruta del bucket".
pub fn partition_digests(artifacts: &[Artifact]) -> (DigestMap, DigestMap) {
    let mut materials = DigestMap::new();
    let mut products = DigestMap::new();
    for artifact in artifacts {
        match artifact.role {
            ArtifactRole::Material => {
                materials.insert(artifact.bucket_path.clone(), artifact.digest.clone());
            }
            ArtifactRole::Product => {
                products.insert(artifact.bucket_path.clone(), artifact.digest.clone());
            }
        }
    }
    (materials, products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_respects_role() {
        let artifacts = vec![
            Artifact::new("s/model/m.keras", ArtifactRole::Material, ArtifactDigest::new("aa")),
            Artifact::new("s/output/trained_model.keras", ArtifactRole::Product, ArtifactDigest::new("bb")),
        ];
        let (materials, products) = partition_digests(&artifacts);
        assert_eq!(materials.len(), 1);
        assert_eq!(products.len(), 1);
        assert_eq!(materials.get("s/model/m.keras").unwrap().sha256, "aa");
    }
}
