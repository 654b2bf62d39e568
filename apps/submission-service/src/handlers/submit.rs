// [apps/submission-service/src/handlers/submit.rs]
//! El paso 8 del algoritmo de C8: aloja el staging dir, transmite las
//! tres partes a disco, valida el dataset-definition y el .zip de
//! imagen si corresponde, sube los materiales, y encola la tarea.

use crate::error::ApiError;
use crate::middleware::OwnerIdentity;
use crate::state::AppState;
use aibom_broker::TrainingTask;
use aibom_core::{DatasetKind, DomainError, FitParams};
use aibom_registry::JobRepository;
use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub job_id: String,
    pub status: String,
    pub staging_dir: String,
}

/// Los campos numericos del formulario, parseados en `FitParams` con
/// los mismos defaults documentados en el formulario de envio.
fn parse_fit_params(fields: &BTreeMap<String, String>) -> Result<FitParams, DomainError> {
    let mut params = FitParams::default();

    if let Some(v) = fields.get("epochs") {
        params.epochs = v.parse().map_err(|_| DomainError::InvalidInput("epochs must be an integer".into()))?;
    }
    if let Some(v) = fields.get("validation_split") {
        params.validation_split = v
            .parse()
            .map_err(|_| DomainError::InvalidInput("validation_split must be a number".into()))?;
    }
    if let Some(v) = fields.get("initial_epoch") {
        params.initial_epoch = v
            .parse()
            .map_err(|_| DomainError::InvalidInput("initial_epoch must be an integer".into()))?;
    }
    if let Some(v) = fields.get("batch_size") {
        params.batch_size = v.parse().map_err(|_| DomainError::InvalidInput("batch_size must be an integer".into()))?;
    }
    if let Some(v) = fields.get("steps_per_epoch") {
        if !v.is_empty() {
            params.steps_per_epoch =
                Some(v.parse().map_err(|_| DomainError::InvalidInput("steps_per_epoch must be an integer".into()))?);
        }
    }
    if let Some(v) = fields.get("validation_steps") {
        if !v.is_empty() {
            params.validation_steps =
                Some(v.parse().map_err(|_| DomainError::InvalidInput("validation_steps must be an integer".into()))?);
        }
    }
    if let Some(v) = fields.get("validation_freq") {
        params.validation_freq =
            v.parse().map_err(|_| DomainError::InvalidInput("validation_freq must be an integer".into()))?;
    }

    Ok(params)
}

async fn stream_field_to_file(
    field: &mut axum::extract::multipart::Field<'_>,
    dest: &Path,
) -> Result<(), DomainError> {
    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| DomainError::Internal(format!("cannot create temp file: {e}")))?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| DomainError::InvalidInput(format!("malformed upload: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| DomainError::Internal(format!("cannot write temp file: {e}")))?;
    }
    Ok(())
}

const FIT_PARAM_FIELDS: &[&str] = &[
    "epochs",
    "validation_split",
    "initial_epoch",
    "batch_size",
    "steps_per_epoch",
    "validation_steps",
    "validation_freq",
];

#[instrument(skip(state, multipart))]
pub async fn submit_job(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerIdentity>,
    mut multipart: Multipart,
) -> Result<Json<SubmitResponse>, ApiError> {
    let staging_dir = Uuid::new_v4().to_string();
    let temp_dir = tempfile::tempdir().map_err(|e| DomainError::Internal(e.to_string()))?;

    let mut model_path: Option<(String, PathBuf)> = None;
    let mut dataset_path: Option<(String, PathBuf)> = None;
    let mut definition_path: Option<PathBuf> = None;
    let mut metadata: BTreeMap<String, String> = BTreeMap::new();
    let mut fit_param_fields: BTreeMap<String, String> = BTreeMap::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "model" | "dataset" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let dest = temp_dir.path().join(format!("{name}__{filename}"));
                stream_field_to_file(&mut field, &dest).await?;
                if name == "model" {
                    model_path = Some((filename, dest));
                } else {
                    dataset_path = Some((filename, dest));
                }
            }
            "dataset_definition" => {
                let dest = temp_dir.path().join("definition.yaml");
                stream_field_to_file(&mut field, &dest).await?;
                definition_path = Some(dest);
            }
            other if FIT_PARAM_FIELDS.contains(&other) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| DomainError::InvalidInput(format!("malformed field {other}: {e}")))?;
                fit_param_fields.insert(other.to_string(), text);
            }
            other => {
                let text = field.text().await.unwrap_or_default();
                metadata.insert(other.to_string(), text);
            }
        }
    }

    let (model_filename, model_file) =
        model_path.ok_or_else(|| DomainError::InvalidInput("missing required 'model' part".to_string()))?;
    let (dataset_filename, dataset_file) =
        dataset_path.ok_or_else(|| DomainError::InvalidInput("missing required 'dataset' part".to_string()))?;
    let definition_file = definition_path
        .ok_or_else(|| DomainError::InvalidInput("missing required 'dataset_definition' part".to_string()))?;

    let definition_text = tokio::fs::read_to_string(&definition_file)
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    let definition = aibom_dataset::parse_definition(&definition_text).map_err(DomainError::from)?;

    if definition.kind == DatasetKind::Image {
        let extract_to = temp_dir.path().join("dataset_extracted");
        tokio::fs::create_dir_all(&extract_to).await.map_err(|e| DomainError::Internal(e.to_string()))?;
        let zip_path = dataset_file.clone();
        let extract_to_blocking = extract_to.clone();
        tokio::task::spawn_blocking(move || aibom_dataset::validate_and_extract(&zip_path, &extract_to_blocking))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .map_err(DomainError::from)?;
    }

    let model_bytes = tokio::fs::read(&model_file).await.map_err(|e| DomainError::Internal(e.to_string()))?;
    let dataset_bytes = tokio::fs::read(&dataset_file).await.map_err(|e| DomainError::Internal(e.to_string()))?;
    let definition_bytes = definition_text.clone().into_bytes();

    let model_url = format!("{staging_dir}/model/{model_filename}");
    let dataset_url = format!("{staging_dir}/dataset/{dataset_filename}");
    let definition_url = format!("{staging_dir}/definition/dataset_definition.yaml");

    state.blobstore.put(&model_url, model_bytes).await.map_err(DomainError::from)?;
    state.blobstore.put(&dataset_url, dataset_bytes).await.map_err(DomainError::from)?;
    state.blobstore.put(&definition_url, definition_bytes).await.map_err(DomainError::from)?;

    let fit_params = parse_fit_params(&fit_param_fields)?;
    let task = TrainingTask {
        staging_dir: staging_dir.clone(),
        model_url,
        dataset_url,
        definition_url,
        optional_params: metadata,
        fit_params,
    };

    let task_id = state
        .broker
        .submit_training_task(&task)
        .await
        .map_err(DomainError::from)?;

    let connection = state.registry.connection().map_err(DomainError::from)?;
    JobRepository::new(connection)
        .create(&task_id, &owner.owner_id, &staging_dir)
        .await
        .map_err(DomainError::from)?;

    info!(job_id = %task_id, owner = %owner.owner_id, "job submitted");

    Ok(Json(SubmitResponse { job_id: task_id, status: "Training started".to_string(), staging_dir }))
}
