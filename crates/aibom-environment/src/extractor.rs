// [crates/aibom-environment/src/extractor.rs]
//! Punto de entrada unico: compone los sensores individuales en un
//! `EnvironmentFacts` completo. Nunca falla — cada sensor ya absorbe
//! sus propios errores — salvo que el reloj del sistema sea inutilizable.

use crate::{container, gpu, os_facts};
use aibom_core::{EnvironmentFacts, TaskInfo, TaskSummary, VulnerabilitySummary};
use chrono::{DateTime, Utc};

/// Contexto del job en ejecucion que el worker ya conoce y que este
/// crate no puede descubrir por si mismo (no hay broker a quien
/// preguntar "quien soy").
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub task_id: String,
    pub task_name: String,
    pub queue: String,
}

#[derive(Debug, Clone)]
pub struct ExtractionTimes {
    pub request_time: DateTime<Utc>,
    pub start_training_time: DateTime<Utc>,
    pub start_aibom_time: DateTime<Utc>,
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Recolecta los hechos de entorno de un job. `vulnerability_scan` es
/// el reporte mas reciente ya publicado por el escaner periodico (C11)
/// — este extractor nunca invoca un escaneo en vivo, solo lo reporta.
pub async fn extract(
    job_id: &str,
    staging_dir: &str,
    task: Option<TaskContext>,
    times: &ExtractionTimes,
    vulnerability_scan: VulnerabilitySummary,
) -> EnvironmentFacts {
    let os = os_facts::collect();
    let gpu_info = gpu::collect().await;
    let container_info = container::collect().await;

    let task_info = match task {
        Some(task) => TaskSummary::Running(TaskInfo { task_id: task.task_id, task_name: task.task_name, queue: task.queue }),
        None => TaskSummary::NotRunningInTask,
    };

    let training_time_seconds =
        (times.start_aibom_time - times.start_training_time).num_seconds().to_string();

    EnvironmentFacts {
        os: os.os,
        python_version: os_facts::python_version(),
        tensorflow_version: os_facts::tensorflow_version(),
        cpu_count: os.cpu_count,
        memory_total_mb: os.memory_total_mb,
        disk_usage_mb: os.disk_usage_mb,
        gpu_info,
        task_info,
        container_info,
        vulnerability_scan,
        request_time: format_time(&times.request_time),
        start_training_time: format_time(&times.start_training_time),
        start_aibom_time: format_time(&times.start_aibom_time),
        training_time_seconds,
        job_id: job_id.to_string(),
        staging_dir: staging_dir.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn extraction_never_fails_and_stamps_job_identity() {
        let times = ExtractionTimes {
            request_time: Utc::now(),
            start_training_time: Utc::now(),
            start_aibom_time: Utc::now(),
        };
        let facts = extract("job-42", "job-42-abc", None, &times, VulnerabilitySummary::Error { error: "no report yet".into() }).await;
        assert_eq!(facts.job_id, "job-42");
        assert_eq!(facts.staging_dir, "job-42-abc");
        assert!(matches!(facts.task_info, TaskSummary::NotRunningInTask));
    }

    #[tokio::test]
    async fn task_context_is_carried_through_as_running() {
        let times = ExtractionTimes {
            request_time: Utc::now(),
            start_training_time: Utc::now(),
            start_aibom_time: Utc::now(),
        };
        let task = TaskContext { task_id: "t-1".into(), task_name: "train".into(), queue: "training.csv".into() };
        let facts = extract("job-42", "job-42-abc", Some(task), &times, VulnerabilitySummary::Error { error: "no report yet".into() }).await;
        match facts.task_info {
            TaskSummary::Running(info) => assert_eq!(info.task_id, "t-1"),
            TaskSummary::NotRunningInTask => panic!("expected a running task"),
        }
    }
}
