// [apps/submission-service/src/handlers/artifacts.rs]
//! `GET /developer/job_artifacts/{job_id}` (listado) y
//! `GET /developer/job_artifacts/{job_id}/{name}` (redireccion a URL
//! presignada, 1h de validez).

use crate::error::ApiError;
use crate::middleware::OwnerIdentity;
use crate::state::AppState;
use aibom_core::DomainError;
use aibom_registry::JobRepository;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Extension, Json};
use serde::Serialize;

const PRESIGN_TTL_SECONDS: u64 = 3600;

#[derive(Debug, Serialize)]
pub struct ArtifactListResponse {
    pub job_id: String,
    pub artifacts: Vec<String>,
}

async fn owned_job(state: &AppState, owner: &OwnerIdentity, job_id: &str) -> Result<aibom_core::Job, DomainError> {
    let connection = state.registry.connection()?;
    let job = JobRepository::new(connection).get(job_id).await?;
    if job.owner_id != owner.owner_id {
        return Err(DomainError::Unauthorized(format!("job {job_id} does not belong to the caller")));
    }
    Ok(job)
}

pub async fn list_artifacts(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerIdentity>,
    Path(job_id): Path<String>,
) -> Result<Json<ArtifactListResponse>, ApiError> {
    let job = owned_job(&state, &owner, &job_id).await?;
    let prefix = format!("{}/", job.staging_dir);
    let artifacts = state.blobstore.list(&prefix).await.map_err(DomainError::from)?;
    Ok(Json(ArtifactListResponse { job_id, artifacts }))
}

pub async fn download_artifact(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerIdentity>,
    Path((job_id, name)): Path<(String, String)>,
) -> Result<Redirect, ApiError> {
    let job = owned_job(&state, &owner, &job_id).await?;
    let key = format!("{}/{}", job.staging_dir, name);
    let url = state.blobstore.presign(&key, PRESIGN_TTL_SECONDS);
    Ok(Redirect::temporary(&url))
}
