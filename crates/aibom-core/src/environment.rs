// [crates/aibom-core/src/environment.rs]
//! Forma de los hechos de entorno recolectados durante un job de
//! entrenamiento. El extractor (C7) produce este tipo; el ensamblador
//! de BOM (C6) lo consume para poblar el componente "Training
//! Environment". Cada campo opcional recurre al literal `"Unknown"`
//! en vez de fallar: la recoleccion de hechos nunca debe abortar un
//! job por un sensor no disponible.

use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub name: String,
    pub memory_total_mb: u64,
    pub memory_used_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GpuSummary {
    Detected { gpus: Vec<GpuInfo> },
    NoneDetected,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub task_id: String,
    pub task_name: String,
    pub queue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskSummary {
    Running(TaskInfo),
    NotRunningInTask,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub container_id: String,
    pub image_name: String,
    pub image_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ContainerSummary {
    Containerized(ContainerInfo),
    NotContainerized,
    Error { message: String },
}

/// Resumen de vulnerabilidades: severidad -> conteo, o un error si el
/// escaneo en si mismo fallo (p. ej. imagen desconocida, CLI ausente).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VulnerabilitySummary {
    BySeverity(std::collections::BTreeMap<String, u64>),
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentFacts {
    pub os: String,
    pub python_version: String,
    pub tensorflow_version: String,
    pub cpu_count: String,
    pub memory_total_mb: String,
    pub disk_usage_mb: String,
    pub gpu_info: GpuSummary,
    pub task_info: TaskSummary,
    pub container_info: ContainerSummary,
    pub vulnerability_scan: VulnerabilitySummary,
    pub request_time: String,
    pub start_training_time: String,
    pub start_aibom_time: String,
    pub training_time_seconds: String,
    pub job_id: String,
    pub staging_dir: String,
}

impl EnvironmentFacts {
    /// Lista plana de propiedades en el mismo orden que el generador
    /// de referencia: base, cada GPU individualmente, tarea, contenedor
    /// y finalmente vulnerabilidades.
    pub fn as_property_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("OS".to_string(), self.os.clone()),
            ("Python Version".to_string(), self.python_version.clone()),
            ("TensorFlow Version".to_string(), self.tensorflow_version.clone()),
            ("CPU Count".to_string(), self.cpu_count.clone()),
            ("Memory Total (MB)".to_string(), self.memory_total_mb.clone()),
            ("Disk Usage (MB)".to_string(), self.disk_usage_mb.clone()),
            ("Request Time".to_string(), self.request_time.clone()),
            ("Start Training Time".to_string(), self.start_training_time.clone()),
            ("Start AIBoM Time".to_string(), self.start_aibom_time.clone()),
            ("Training Time (seconds)".to_string(), self.training_time_seconds.clone()),
            ("Job ID".to_string(), self.job_id.clone()),
            ("Unique Directory".to_string(), self.staging_dir.clone()),
        ];

        match &self.gpu_info {
            GpuSummary::Detected { gpus } => {
                for gpu in gpus {
                    pairs.push(("GPU Name".to_string(), gpu.name.clone()));
                    pairs.push(("GPU Memory Total (MB)".to_string(), gpu.memory_total_mb.to_string()));
                    pairs.push(("GPU Memory Used (MB)".to_string(), gpu.memory_used_mb.to_string()));
                }
            }
            GpuSummary::NoneDetected => {}
            GpuSummary::Error { message } => {
                pairs.push(("GPU Info Error".to_string(), message.clone()));
            }
        }

        match &self.task_info {
            TaskSummary::Running(task) => {
                pairs.push(("Celery Task ID".to_string(), task.task_id.clone()));
                pairs.push(("Celery Task Name".to_string(), task.task_name.clone()));
                pairs.push(("Celery Queue".to_string(), task.queue.clone()));
            }
            TaskSummary::NotRunningInTask => {
                pairs.push(("Celery Task ID".to_string(), UNKNOWN.to_string()));
                pairs.push(("Celery Task Name".to_string(), UNKNOWN.to_string()));
                pairs.push(("Celery Queue".to_string(), UNKNOWN.to_string()));
            }
        }

        match &self.container_info {
            ContainerSummary::Containerized(container) => {
                pairs.push(("Docker Container ID".to_string(), container.container_id.clone()));
                pairs.push(("Docker Image Name".to_string(), container.image_name.clone()));
                pairs.push(("Docker Image ID".to_string(), container.image_id.clone()));
            }
            ContainerSummary::NotContainerized | ContainerSummary::Error { .. } => {
                pairs.push(("Docker Container ID".to_string(), UNKNOWN.to_string()));
                pairs.push(("Docker Image Name".to_string(), UNKNOWN.to_string()));
                pairs.push(("Docker Image ID".to_string(), UNKNOWN.to_string()));
            }
        }

        match &self.vulnerability_scan {
            VulnerabilitySummary::BySeverity(counts) => {
                for (severity, count) in counts {
                    pairs.push((format!("Vulnerability Scan {severity}"), count.to_string()));
                }
            }
            VulnerabilitySummary::Error { error } => {
                pairs.push(("Vulnerability Scan Error".to_string(), error.clone()));
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EnvironmentFacts {
        EnvironmentFacts {
            os: "Linux 6.1".into(),
            python_version: UNKNOWN.into(),
            tensorflow_version: UNKNOWN.into(),
            cpu_count: "8".into(),
            memory_total_mb: "16384".into(),
            disk_usage_mb: "512000".into(),
            gpu_info: GpuSummary::NoneDetected,
            task_info: TaskSummary::NotRunningInTask,
            container_info: ContainerSummary::NotContainerized,
            vulnerability_scan: VulnerabilitySummary::Error { error: "scan skipped".into() },
            request_time: "2026-01-01 00:00:00".into(),
            start_training_time: "2026-01-01 00:01:00".into(),
            start_aibom_time: "2026-01-01 00:05:00".into(),
            training_time_seconds: "240".into(),
            job_id: "job-1".into(),
            staging_dir: "job-1-abc".into(),
        }
    }

    #[test]
    fn property_pairs_include_base_fields_and_vulnerability_error() {
        let facts = sample();
        let pairs = facts.as_property_pairs();
        assert!(pairs.contains(&("OS".to_string(), "Linux 6.1".to_string())));
        assert!(pairs.contains(&("Vulnerability Scan Error".to_string(), "scan skipped".to_string())));
    }

    #[test]
    fn detected_gpus_expand_into_one_triplet_each() {
        let mut facts = sample();
        facts.gpu_info = GpuSummary::Detected {
            gpus: vec![GpuInfo { name: "RTX".into(), memory_total_mb: 8192, memory_used_mb: 1024 }],
        };
        let pairs = facts.as_property_pairs();
        assert!(pairs.contains(&("GPU Name".to_string(), "RTX".to_string())));
        assert!(pairs.contains(&("GPU Memory Used (MB)".to_string(), "1024".to_string())));
    }
}
