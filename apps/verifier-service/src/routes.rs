// [apps/verifier-service/src/routes.rs]
//! Topologia HTTP del servicio de verificacion (spec.md §6): las
//! cuatro operaciones son publicas, sin guardia de autenticacion — el
//! propio verificador es la autoridad que decide si un artefacto es de
//! fiar.

use crate::handlers::{bom, file_hash, link, minio_artifacts};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    let verifier = Router::new()
        .route("/verify_in-toto_link", post(link::verify_in_toto_link))
        .route("/verify_file_hash", post(file_hash::verify_file_hash))
        .route("/verify_minio_artifacts", post(minio_artifacts::verify_minio_artifacts))
        .route("/verify_bom_and_link", post(bom::verify_bom_and_link));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/verifier", verifier)
        .with_state(state)
}
