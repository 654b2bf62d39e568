// [apps/worker/src/job_runner.rs]
//! El ciclo de vida completo de un job de entrenamiento:
//! `Fetching -> Loading -> Training -> Capturing -> Attesting ->
//! Publishing -> Done`, con una transicion `Failing` implicita ante
//! cualquier error: el log acumulado hasta ese punto y el motivo del
//! fallo se publican igual al staging dir antes de propagar el error.

use crate::model_loader;
use aibom_attestation::build_link;
use aibom_blobstore::BlobStoreClient;
use aibom_broker::TrainingTask;
use aibom_bom::{assemble, sign_bom, AttestationReference, BomAssemblyInput, OptionalModelParams};
use aibom_core::{
    Artifact, ArtifactDigest, ArtifactRole, DatasetKind, DomainError, StagingLayout,
};
use aibom_crypto::KeyPair;
use aibom_environment::{ExtractionTimes, TaskContext};
use aibom_ml::{select_device, validate_shape, Device, DeviceAvailability, MockTrainingExecutor, ShapeKind, TrainingExecutor, TrainingRequest};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Todo lo que el runner necesita para ejecutar un job, inyectado por
/// el motor de ignicion (`engine.rs`).
pub struct JobContext {
    pub blobstore: Arc<BlobStoreClient>,
    pub scans_blobstore: Arc<BlobStoreClient>,
    pub keypair: Arc<KeyPair>,
    pub worker_id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct JobOutcome {
    pub status: String,
    pub job_id: String,
    pub staging_dir: String,
}

struct LogBuffer(Vec<String>);

impl LogBuffer {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{line}");
        self.0.push(line);
    }

    fn contents(&self) -> String {
        self.0.join("\n")
    }
}

fn extension_of(path: &str) -> String {
    Path::new(path).extension().and_then(|e| e.to_str()).unwrap_or("bin").to_string()
}

/// Ejecuta el job completo. En caso de error publica `logs.log` y
/// `error_logs.txt` bajo el staging dir antes de devolver el error.
pub async fn run(ctx: &JobContext, task_id: &str, task: &TrainingTask) -> Result<JobOutcome, DomainError> {
    let mut logs = LogBuffer::new();
    logs.push(format!("job {task_id} claimed, staging_dir={}", task.staging_dir));

    match run_states(ctx, task_id, task, &mut logs).await {
        Ok(outcome) => {
            let _ = ctx.blobstore.put(&StagingLayout::new(&task.staging_dir).logs_path(), logs.contents().into_bytes()).await;
            Ok(outcome)
        }
        Err(err) => {
            logs.push(format!("FAILED: {err}"));
            let layout = StagingLayout::new(&task.staging_dir);
            if let Err(upload_err) = ctx.blobstore.put(&layout.logs_path(), logs.contents().into_bytes()).await {
                warn!(error = %upload_err, "could not publish logs.log after job failure");
            }
            let error_path = format!("{}/output/error_logs.txt", task.staging_dir);
            if let Err(upload_err) = ctx.blobstore.put(&error_path, err.to_string().into_bytes()).await {
                warn!(error = %upload_err, "could not publish error_logs.txt after job failure");
            }
            Err(err)
        }
    }
}

async fn run_states(
    ctx: &JobContext,
    task_id: &str,
    task: &TrainingTask,
    logs: &mut LogBuffer,
) -> Result<JobOutcome, DomainError> {
    let request_time = Utc::now();
    let layout = StagingLayout::new(&task.staging_dir);
    let temp_dir = tempfile::tempdir().map_err(|e| DomainError::InputMissing(e.to_string()))?;

    // --- Fetching ---
    logs.push("state=Fetching");
    let model_bytes = fetch_material(ctx, &task.model_url).await?;
    let dataset_bytes = fetch_material(ctx, &task.dataset_url).await?;
    let definition_bytes = fetch_material(ctx, &task.definition_url).await?;

    let dataset_file = temp_dir.path().join("dataset_raw");
    tokio::fs::write(&dataset_file, &dataset_bytes)
        .await
        .map_err(|e| DomainError::InputMissing(format!("cannot stage dataset: {e}")))?;

    // --- Loading ---
    logs.push("state=Loading");
    let definition_text = String::from_utf8(definition_bytes)
        .map_err(|e| DomainError::InputMissing(format!("dataset definition is not valid UTF-8: {e}")))?;
    let definition = aibom_dataset::parse_definition(&definition_text).map_err(DomainError::from)?;

    let dataset_path_for_validation = match definition.kind {
        DatasetKind::Image => {
            let extract_to = temp_dir.path().join("dataset_extracted");
            let zip_path = dataset_file.clone();
            let extract_to_blocking = extract_to.clone();
            tokio::task::spawn_blocking(move || aibom_dataset::validate_and_extract(&zip_path, &extract_to_blocking))
                .await
                .map_err(|e| DomainError::Internal(e.to_string()))?
                .map_err(DomainError::from)?;
            extract_to
        }
        DatasetKind::Csv | DatasetKind::Tfrecord => dataset_file.clone(),
    };
    aibom_dataset::validate_dataset(&dataset_path_for_validation, &definition).map_err(DomainError::from)?;
    logs.push(format!("dataset validated as {:?}", definition.kind));

    let start_training_time = Utc::now();

    // --- Training ---
    logs.push("state=Training");
    let introspector = model_loader::introspect(&model_bytes, &definition.input_shape, &definition.output_shape);
    validate_shape(ShapeKind::Input, &introspector.input_shape(), &definition.input_shape).map_err(DomainError::from)?;
    validate_shape(ShapeKind::Output, &introspector.output_shape(), &definition.output_shape).map_err(DomainError::from)?;

    let device = select_device(DeviceAvailability {
        gpu_available: matches!(aibom_environment::gpu::collect().await, aibom_core::GpuSummary::Detected { .. }),
        cpu_available: true,
    })
    .map_err(DomainError::from)?;
    logs.push(format!("device selected: {device:?}"));

    let executor = MockTrainingExecutor;
    let outcome = executor
        .fit(TrainingRequest {
            device,
            fit_params: task.fit_params.clone(),
            declared_input_shape: definition.input_shape.clone(),
            declared_output_shape: definition.output_shape.clone(),
        })
        .await
        .map_err(DomainError::from)?;
    logs.push(format!("training finished, epochs_run={:?}", outcome.metrics.get("epochs_run")));

    let start_aibom_time = Utc::now();

    // --- Capturing ---
    logs.push("state=Capturing");
    let trained_model_bytes = model_bytes.clone();
    let trained_model_ext = extension_of(&task.model_url);
    let trained_model_path = layout.trained_model_path(&trained_model_ext);
    let metrics_bytes = serde_json::to_vec_pretty(&outcome.metrics)
        .map_err(|e| DomainError::Internal(format!("cannot serialise metrics: {e}")))?;

    // --- Attesting ---
    logs.push("state=Attesting");
    let mut materials = Vec::new();
    materials.push(Artifact::new(
        task.model_url.clone(),
        ArtifactRole::Material,
        ArtifactDigest::new(aibom_crypto::sha256_bytes(&model_bytes)),
    ));
    materials.push(Artifact::new(
        task.dataset_url.clone(),
        ArtifactRole::Material,
        ArtifactDigest::new(aibom_crypto::sha256_bytes(&dataset_bytes)),
    ));
    materials.push(Artifact::new(
        task.definition_url.clone(),
        ArtifactRole::Material,
        ArtifactDigest::new(aibom_crypto::sha256_bytes(definition_text.as_bytes())),
    ));

    let mut products = Vec::new();
    products.push(Artifact::new(
        trained_model_path.clone(),
        ArtifactRole::Product,
        ArtifactDigest::new(aibom_crypto::sha256_bytes(&trained_model_bytes)),
    ));
    products.push(Artifact::new(
        layout.metrics_path(),
        ArtifactRole::Product,
        ArtifactDigest::new(aibom_crypto::sha256_bytes(&metrics_bytes)),
    ));

    let materials_digest_map = materials
        .iter()
        .map(|artifact| (artifact.bucket_path.clone(), artifact.digest.clone()))
        .collect::<BTreeMap<_, _>>();
    let products_digest_map = products
        .iter()
        .map(|artifact| (artifact.bucket_path.clone(), artifact.digest.clone()))
        .collect::<BTreeMap<_, _>>();

    let link = build_link(
        "run_training",
        materials_digest_map,
        products_digest_map,
        vec!["worker".to_string(), "run_training".to_string()],
        None,
        &ctx.keypair,
    );
    let link_path = layout.link_path(&link.keyid);
    let link_bytes = serde_json::to_vec_pretty(&link)
        .map_err(|e| DomainError::Internal(format!("cannot serialise link: {e}")))?;
    logs.push(format!("attestation link built: {}", link.filename()));

    // --- Publishing ---
    logs.push("state=Publishing");
    let vulnerability_scan = fetch_latest_vulnerability_report(ctx).await;
    let environment = aibom_environment::extract(
        task_id,
        &task.staging_dir,
        Some(TaskContext { task_id: task_id.to_string(), task_name: "run_training".to_string(), queue: "training_queue".to_string() }),
        &ExtractionTimes { request_time, start_training_time, start_aibom_time },
        vulnerability_scan,
    )
    .await;

    let optional_params = split_optional_params(&task.optional_params);
    let architecture_summary = introspector.architecture_summary();

    let bom = assemble(BomAssemblyInput {
        environment,
        materials,
        products,
        fit_params: task.fit_params.clone(),
        optional_params,
        attestation: Some(AttestationReference {
            bucket_path: link_path.clone(),
            description: "Attestation file for artifact integrity verification".to_string(),
        }),
        metrics: outcome.metrics.clone(),
        architecture_summary,
    })
    .map_err(DomainError::from)?;
    let signed_bom = sign_bom(&bom, &ctx.keypair);
    let bom_bytes = serde_json::to_vec_pretty(&signed_bom)
        .map_err(|e| DomainError::Internal(format!("cannot serialise BOM: {e}")))?;

    ctx.blobstore.put(&trained_model_path, trained_model_bytes).await.map_err(DomainError::from)?;
    ctx.blobstore.put(&layout.metrics_path(), metrics_bytes).await.map_err(DomainError::from)?;
    ctx.blobstore.put(&link_path, link_bytes).await.map_err(DomainError::from)?;
    ctx.blobstore.put(&layout.bom_path(), bom_bytes).await.map_err(DomainError::from)?;

    logs.push(format!("worker {} completed job {task_id}", ctx.worker_id));

    Ok(JobOutcome { status: "succeeded".to_string(), job_id: task_id.to_string(), staging_dir: task.staging_dir.clone() })
}

async fn fetch_material(ctx: &JobContext, url: &str) -> Result<Vec<u8>, DomainError> {
    ctx.blobstore.get(url).await.map_err(|e| DomainError::InputMissing(e.to_string()))
}

/// Descarga el reporte de vulnerabilidades mas reciente (orden
/// lexicografico de clave) publicado por el escaner periodico. Nunca
/// falla el job: un bucket vacio o inalcanzable se reporta como un
/// `VulnerabilitySummary::Error` dentro del BOM, igual que cualquier
/// otro sensor best-effort de entorno.
async fn fetch_latest_vulnerability_report(ctx: &JobContext) -> aibom_core::VulnerabilitySummary {
    let keys = match ctx.scans_blobstore.list("").await {
        Ok(keys) => keys,
        Err(err) => return aibom_core::VulnerabilitySummary::Error { error: err.to_string() },
    };

    let Some(newest_key) = keys.into_iter().max() else {
        return aibom_core::VulnerabilitySummary::Error { error: "no vulnerability report has been published yet".to_string() };
    };

    match ctx.scans_blobstore.get(&newest_key).await {
        Ok(bytes) => aibom_environment::vulnerability::parse_report(&bytes),
        Err(err) => aibom_core::VulnerabilitySummary::Error { error: err.to_string() },
    }
}

const KNOWN_OPTIONAL_FIELDS: &[&str] = &["model_name", "model_version", "model_description", "framework", "license_name"];

/// Separa los campos de metadato con nombre propio del resto, que caen
/// en `extra` tal como el ensamblador de BOM los reporta.
fn split_optional_params(fields: &BTreeMap<String, String>) -> OptionalModelParams {
    let mut params = OptionalModelParams::default();
    for (key, value) in fields {
        match key.as_str() {
            "model_name" => params.model_name = Some(value.clone()),
            "model_version" => params.model_version = Some(value.clone()),
            "model_description" => params.model_description = Some(value.clone()),
            "framework" => params.framework = Some(value.clone()),
            "license_name" => params.license_name = Some(value.clone()),
            other if !KNOWN_OPTIONAL_FIELDS.contains(&other) => {
                params.extra.insert(other.to_string(), value.clone());
            }
            _ => {}
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_are_split_out_of_extra() {
        let mut fields = BTreeMap::new();
        fields.insert("model_name".to_string(), "digit-classifier".to_string());
        fields.insert("intended_use".to_string(), "research".to_string());

        let params = split_optional_params(&fields);
        assert_eq!(params.model_name.as_deref(), Some("digit-classifier"));
        assert_eq!(params.extra.get("intended_use").map(String::as_str), Some("research"));
        assert!(!params.extra.contains_key("model_name"));
    }
}
