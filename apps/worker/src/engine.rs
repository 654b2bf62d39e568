// [apps/worker/src/engine.rs]
//! Bucle de reclamo del worker: reclama una tarea de `training_queue`,
//! la ejecuta con un presupuesto de tiempo de vida de
//! [`TASK_TIME_LIMIT_SECS`], y decide entre reintentar o declarar
//! fallo terminal segun [`TASK_MAX_RETRIES`] y si el error observado es
//! reintentable. Una cola vacia simplemente duerme antes de volver a
//! sondear.

use crate::job_runner::{self, JobContext};
use aibom_broker::constants::{TASK_DEFAULT_RETRY_DELAY_SECS, TASK_MAX_RETRIES, TASK_TIME_LIMIT_SECS};
use aibom_broker::{BrokerClient, ClaimedTrainingTask};
use aibom_core::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Intervalo de sondeo cuando `training_queue` esta vacia.
const EMPTY_QUEUE_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Reclama y ejecuta tareas de `training_queue` indefinidamente. No
/// retorna salvo que el broker rechace el reclamo de forma persistente
/// (seniales de apagado se manejan fuera de este bucle, a nivel de
/// proceso).
pub async fn run_forever(ctx: Arc<JobContext>, broker: Arc<BrokerClient>) {
    loop {
        match broker.claim_training_task().await {
            Ok(Some(claimed)) => {
                handle_claimed_task(&ctx, &broker, claimed).await;
            }
            Ok(None) => {
                tokio::time::sleep(EMPTY_QUEUE_POLL_INTERVAL).await;
            }
            Err(err) => {
                warn!(error = %err, "could not claim from training_queue, backing off");
                tokio::time::sleep(EMPTY_QUEUE_POLL_INTERVAL).await;
            }
        }
    }
}

async fn handle_claimed_task(ctx: &Arc<JobContext>, broker: &Arc<BrokerClient>, claimed: ClaimedTrainingTask) {
    let ClaimedTrainingTask { task_id, delivery_count, body } = claimed;
    info!(task_id = %task_id, delivery_count, "claimed training task");

    let execution = tokio::time::timeout(
        Duration::from_secs(TASK_TIME_LIMIT_SECS),
        job_runner::run(ctx, &task_id, &body),
    )
    .await;

    match execution {
        Ok(Ok(outcome)) => {
            info!(task_id = %task_id, status = %outcome.status, "job completed");
            if let Err(err) = broker.report_success(&task_id, serde_json::to_value(&outcome).unwrap_or_default()).await {
                error!(task_id = %task_id, error = %err, "could not report success to broker");
            }
        }
        Ok(Err(domain_err)) => {
            report_failure_or_retry(broker, &task_id, delivery_count, &domain_err.to_string(), domain_err.is_retryable()).await;
        }
        Err(_elapsed) => {
            // El presupuesto de 3600s se agoto: el job se declara fallido sin
            // reintento, sin importar cuantas entregas lleve.
            error!(task_id = %task_id, "job exceeded the task wall-time budget");
            if let Err(err) = broker.report_failure(&task_id, "task exceeded wall-time budget").await {
                error!(task_id = %task_id, error = %err, "could not report wall-time failure to broker");
            }
        }
    }
}

async fn report_failure_or_retry(broker: &BrokerClient, task_id: &str, delivery_count: u32, error_message: &str, retryable: bool) {
    if retryable && delivery_count < TASK_MAX_RETRIES {
        let countdown = TASK_DEFAULT_RETRY_DELAY_SECS * (delivery_count as u64 + 1);
        warn!(task_id = %task_id, delivery_count, countdown, error = %error_message, "retrying job after transient failure");
        if let Err(err) = broker.report_retry(task_id, error_message, countdown).await {
            error!(task_id = %task_id, error = %err, "could not report retry to broker, falling back to terminal failure");
            let _ = broker.report_failure(task_id, error_message).await;
        }
    } else {
        error!(task_id = %task_id, delivery_count, error = %error_message, "job failed terminally");
        if let Err(err) = broker.report_failure(task_id, error_message).await {
            error!(task_id = %task_id, error = %err, "could not report terminal failure to broker");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_countdown_grows_linearly_with_delivery_count() {
        let first = TASK_DEFAULT_RETRY_DELAY_SECS * (0u64 + 1);
        let second = TASK_DEFAULT_RETRY_DELAY_SECS * (1u64 + 1);
        assert_eq!(first, 60);
        assert_eq!(second, 120);
    }

    #[test]
    fn domain_error_retryability_matches_broker_policy_expectations() {
        assert!(DomainError::StoreUnavailable("x".into()).is_retryable());
        assert!(!DomainError::BomInvalid("x".into()).is_retryable());
    }
}
