// [crates/aibom-broker/src/model.rs]
use aibom_core::{FitParams, JobState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cuerpo del mensaje de la cola de entrenamiento, tal como lo describe
/// la interfaz externa de envio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingTask {
    pub staging_dir: String,
    pub model_url: String,
    pub dataset_url: String,
    pub definition_url: String,
    #[serde(default)]
    pub optional_params: BTreeMap<String, String>,
    pub fit_params: FitParams,
}

/// Estado de una tarea enviada, devuelto por `BrokerClient::status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task_id: String,
    pub state: JobState,
}

/// Entrada de una tarea actualmente en ejecucion en algun worker,
/// devuelta por `BrokerClient::inspect_active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTask {
    pub task_id: String,
    pub queue: String,
    pub worker_id: String,
}

/// Una tarea de entrenamiento reclamada de `training_queue` por
/// `BrokerClient::claim_training_task`, junto con el conteo de
/// entregas previas (0 en el primer intento).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimedTrainingTask {
    pub task_id: String,
    pub delivery_count: u32,
    pub body: TrainingTask,
}
