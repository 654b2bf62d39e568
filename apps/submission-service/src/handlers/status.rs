// [apps/submission-service/src/handlers/status.rs]
//! `GET /developer/job_status/{job_id}`: el estado siempre se deriva
//! del broker, nunca de una columna propia del registro.

use crate::error::ApiError;
use crate::middleware::OwnerIdentity;
use crate::state::AppState;
use aibom_core::DomainError;
use aibom_registry::JobRepository;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: &'static str,
}

pub async fn job_status(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerIdentity>,
    Path(job_id): Path<String>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let connection = state.registry.connection().map_err(DomainError::from)?;
    let job = JobRepository::new(connection).get(&job_id).await.map_err(DomainError::from)?;

    if job.owner_id != owner.owner_id {
        return Err(DomainError::Unauthorized(format!("job {job_id} does not belong to the caller")).into());
    }

    let task_status = state.broker.status(&job_id).await.map_err(DomainError::from)?;

    Ok(Json(JobStatusResponse { job_id: task_status.task_id, status: task_status.state.as_str() }))
}
