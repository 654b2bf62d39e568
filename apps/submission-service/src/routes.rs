// [apps/submission-service/src/routes.rs]
//! Topologia HTTP del servicio de envio (spec.md §6): el prefijo
//! `/developer` exige identidad de propietario y el envio ademas pasa
//! por el limitador de tasa; `/celery_utils` comparte el mismo guardia
//! de autenticacion.

use crate::handlers::{artifacts, status, submit, tasks};
use crate::middleware::{auth_guard, rate_limit_guard};
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    let submit_route = Router::new()
        .route("/submit_job_by_model_and_data", post(submit::submit_job))
        .layer(from_fn_with_state(state.clone(), rate_limit_guard));

    let developer = Router::new()
        .merge(submit_route)
        .route("/job_status/:job_id", get(status::job_status))
        .route("/job_artifacts/:job_id", get(artifacts::list_artifacts))
        .route("/job_artifacts/:job_id/:name", get(artifacts::download_artifact))
        .layer(from_fn_with_state(state.clone(), auth_guard));

    let celery_utils = Router::new()
        .route("/tasks/my", get(tasks::my_tasks))
        .layer(from_fn_with_state(state.clone(), auth_guard));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/developer", developer)
        .nest("/celery_utils", celery_utils)
        .with_state(state)
}
