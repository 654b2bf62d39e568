// [apps/submission-service/src/handlers/tasks.rs]
//! `GET /celery_utils/tasks/my`: los jobs del invocador, enriquecidos
//! con el estado que reporta el broker. Un job cuyo estado no puede
//! consultarse se reporta igual, con estado `"unknown"`.

use crate::middleware::OwnerIdentity;
use crate::state::AppState;
use aibom_core::DomainError;
use aibom_registry::JobRepository;
use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct MyTask {
    pub job_id: String,
    pub staging_dir: String,
    pub status: String,
}

pub async fn my_tasks(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerIdentity>,
) -> Result<Json<Vec<MyTask>>, ApiError> {
    let connection = state.registry.connection().map_err(DomainError::from)?;
    let jobs = JobRepository::new(connection).list_by_owner(&owner.owner_id).await.map_err(DomainError::from)?;

    let mut tasks = Vec::with_capacity(jobs.len());
    for job in jobs {
        let status = match state.broker.status(&job.job_id).await {
            Ok(status) => status.state.as_str().to_string(),
            Err(err) => {
                warn!(job_id = %job.job_id, error = %err, "could not fetch task status from broker");
                "unknown".to_string()
            }
        };
        tasks.push(MyTask { job_id: job.job_id, staging_dir: job.staging_dir, status });
    }

    Ok(Json(tasks))
}
