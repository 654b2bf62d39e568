// [apps/verifier-service/src/handlers/minio_artifacts.rs]
//! `POST /verifier/verify_minio_artifacts` (operacion 3): redescarga
//! cada material y producto listado en el link desde el almacen de
//! objetos y compara su digest real contra el registrado, en lugar de
//! confiar en lo que el link afirma.

use crate::error::ApiError;
use crate::extract::read_json_file_field;
use crate::state::AppState;
use aibom_attestation::SignedLink;
use aibom_core::StagingLayout;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
struct VerifiedEntry {
    path: String,
    sha256: String,
}

#[derive(Debug, Serialize)]
struct MismatchedEntry {
    path: String,
    expected: String,
    actual: String,
}

async fn check_entries(state: &AppState, entries: &aibom_core::artifact::DigestMap) -> (Vec<VerifiedEntry>, Vec<Value>) {
    let mut verified = Vec::new();
    let mut mismatched = Vec::new();

    for (path, digest) in entries {
        match state.blobstore.get(path).await {
            Ok(bytes) => {
                let actual = aibom_crypto::sha256_bytes(&bytes);
                if actual == digest.sha256 {
                    verified.push(VerifiedEntry { path: path.clone(), sha256: actual });
                } else {
                    mismatched.push(
                        serde_json::to_value(MismatchedEntry {
                            path: path.clone(),
                            expected: digest.sha256.clone(),
                            actual,
                        })
                        .expect("MismatchedEntry always serialises"),
                    );
                }
            }
            Err(err) => {
                mismatched.push(json!({ "path": path, "error": err.to_string() }));
            }
        }
    }

    (verified, mismatched)
}

pub async fn verify_minio_artifacts(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<Value>, ApiError> {
    let link: SignedLink = read_json_file_field(&mut multipart, "link").await?;

    let _staging_dir = StagingLayout::staging_dir_from_paths(
        link.body.materials.keys().chain(link.body.products.keys()).map(|s| s.as_str()),
    );

    let (verified_materials, mismatched_materials) = check_entries(&state, &link.body.materials).await;
    let (verified_products, mismatched_products) = check_entries(&state, &link.body.products).await;

    let status = if mismatched_materials.is_empty() && mismatched_products.is_empty() { "success" } else { "failure" };

    Ok(Json(json!({
        "status": status,
        "verified_materials": verified_materials,
        "verified_products": verified_products,
        "mismatched_materials": mismatched_materials,
        "mismatched_products": mismatched_products,
    })))
}
