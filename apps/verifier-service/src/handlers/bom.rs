// [apps/verifier-service/src/handlers/bom.rs]
//! `POST /verifier/verify_bom_and_link` (operacion 4): valida el BOM
//! contra el esquema, verifica su firma embebida con la clave publica
//! del worker, y delega en la operacion 1 sobre el link que su
//! referencia externa de atestacion senala.

use crate::error::ApiError;
use crate::extract::read_json_file_field;
use crate::state::AppState;
use aibom_attestation::{verify_link, SignedLink};
use aibom_bom::{validate, verify_bom, Bom};
use aibom_core::DomainError;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde_json::json;

pub async fn verify_bom_and_link(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    let bom: Bom = read_json_file_field(&mut multipart, "bom").await?;
    validate(&bom).map_err(DomainError::from)?;
    verify_bom(&bom, &state.worker_public_key).map_err(DomainError::from)?;

    let attestation = bom
        .external_attestation_reference()
        .ok_or_else(|| DomainError::BomInvalid("BOM carries no attestation external reference".to_string()))?;

    let link_bytes = state.blobstore.get(&attestation.url).await.map_err(DomainError::from)?;
    let link: SignedLink = serde_json::from_slice(&link_bytes)
        .map_err(|e| DomainError::LinkMissing(format!("stored link is not valid JSON: {e}")))?;

    verify_link(&state.layout, &link, Utc::now()).map_err(DomainError::from)?;

    Ok(Json(json!({
        "status": "success",
        "details": {
            "bom_version": bom.version,
            "link_step_name": link.body.name,
        }
    })))
}
