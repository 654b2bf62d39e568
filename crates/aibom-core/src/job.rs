// [crates/aibom-core/src/job.rs]
//! El registro de job (spec.md §3): identidad inmutable mas nada de
//! estado propio. El estado vive exclusivamente en el broker.

use serde::{Deserialize, Serialize};

/// Tupla inmutable que la registry persiste para un job. Nunca se
/// mutan sus campos tras la creacion; el estado derivado (pendiente,
/// corriendo, ...) NUNCA se duplica aqui — se consulta al broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Coincide exactamente con el id de tarea del broker.
    pub job_id: String,
    /// Referencia opaca al contexto de autenticacion del invocador.
    pub owner_id: String,
    /// Prefijo de ruta dentro del almacen de objetos para este job.
    pub staging_dir: String,
}

impl Job {
    pub fn new(job_id: impl Into<String>, owner_id: impl Into<String>, staging_dir: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            owner_id: owner_id.into(),
            staging_dir: staging_dir.into(),
        }
    }
}

/// Estado derivado del broker; nunca almacenado junto al `Job`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_state_serialises_to_lowercase_per_spec_table() {
        let json = serde_json::to_string(&JobState::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }

    #[test]
    fn job_carries_only_the_documented_triple() {
        let job = Job::new("task-1", "user-a", "3e5c…-staging");
        assert_eq!(job.job_id, "task-1");
        assert_eq!(job.owner_id, "user-a");
    }
}
