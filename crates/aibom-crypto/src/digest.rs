// [crates/aibom-crypto/src/digest.rs]
//! Digest SHA-256 de archivos, leidos en bloques de 8 KiB — el mismo
//! tamano de bloque que el generador de atestaciones original usaba
//! para no materializar artefactos grandes en memoria.

use crate::error::CryptoError;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const CHUNK_SIZE: usize = 8192;

/// Calcula el digest SHA-256 hexadecimal en minusculas de un archivo,
/// transmitiendolo en bloques de 8 KiB en lugar de cargarlo entero.
pub async fn sha256_file(path: impl AsRef<Path>) -> Result<String, CryptoError> {
    let path = path.as_ref();
    let mut file = File::open(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CryptoError::FileNotFound(path.display().to_string())
        } else {
            CryptoError::Io { path: path.display().to_string(), source }
        }
    })?;

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file
            .read(&mut buf)
            .await
            .map_err(|source| CryptoError::Io { path: path.display().to_string(), source })?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Calcula el digest SHA-256 hexadecimal de un buffer ya en memoria,
/// usado para documentos generados en proceso (el BOM canonicalizado,
/// por ejemplo) en lugar de archivos en disco.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn digest_of_known_bytes_matches_reference_vector() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        let digest = sha256_file(file.path()).await.unwrap();
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn missing_file_yields_file_not_found() {
        let err = sha256_file("/nonexistent/path/aibom-test").await.unwrap_err();
        assert!(matches!(err, CryptoError::FileNotFound(_)));
    }

    #[test]
    fn bytes_digest_is_deterministic() {
        assert_eq!(sha256_bytes(b"abc"), sha256_bytes(b"abc"));
        assert_ne!(sha256_bytes(b"abc"), sha256_bytes(b"abd"));
    }
}
