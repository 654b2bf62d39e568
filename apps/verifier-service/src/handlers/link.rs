// [apps/verifier-service/src/handlers/link.rs]
//! `POST /verifier/verify_in-toto_link` (operacion 1): verifica un
//! link de atestacion contra el layout de verificacion firmado
//! cargado al arrancar, usando las llaves funcionarias que el propio
//! layout declara de confianza.

use crate::error::ApiError;
use crate::extract::read_json_file_field;
use crate::state::AppState;
use aibom_attestation::{verify_link, SignedLink};
use aibom_core::DomainError;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use serde_json::json;

pub async fn verify_in_toto_link(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    let link: SignedLink = read_json_file_field(&mut multipart, "link").await?;
    verify_link(&state.layout, &link, Utc::now()).map_err(DomainError::from)?;

    Ok(Json(json!({
        "status": "success",
        "details": {
            "step_name": link.body.name,
            "keyid": link.keyid,
        }
    })))
}
