// [apps/verifier-service/src/handlers/file_hash.rs]
//! `POST /verifier/verify_file_hash` (operacion 2): recibe un link y
//! un archivo candidato, y compara el digest del candidato contra la
//! entrada del link cuyo basename coincide con su nombre de archivo.

use crate::error::ApiError;
use aibom_attestation::{verify_file_hash as compare_file_hash, FileHashVerdict, SignedLink};
use aibom_core::DomainError;
use axum::extract::Multipart;
use axum::Json;
use serde_json::json;

pub async fn verify_file_hash(mut multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    let mut link: Option<SignedLink> = None;
    let mut filename: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("link") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DomainError::InvalidInput(format!("cannot read link field: {e}")))?;
                link = Some(
                    serde_json::from_slice(&bytes)
                        .map_err(|e| DomainError::InvalidInput(format!("link is not valid JSON: {e}")))?,
                );
            }
            Some("file") => {
                filename = field.file_name().map(|s| s.to_string());
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| DomainError::InvalidInput(format!("cannot read candidate file: {e}")))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let link = link.ok_or_else(|| DomainError::InvalidInput("missing link part".to_string()))?;
    let filename = filename.ok_or_else(|| DomainError::InvalidInput("candidate file has no filename".to_string()))?;
    let file_bytes = file_bytes.ok_or_else(|| DomainError::InvalidInput("missing file part".to_string()))?;

    let candidate_sha256 = aibom_crypto::sha256_bytes(&file_bytes);
    let verdict = compare_file_hash(&link, &filename, &candidate_sha256);

    let status = if verdict == FileHashVerdict::Match { "success" } else { "failure" };
    Ok(Json(json!({
        "status": status,
        "details": { "verdict": verdict, "filename": filename, "sha256": candidate_sha256 },
    })))
}
