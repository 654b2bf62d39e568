// [crates/aibom-broker/src/client.rs]
/*!
 * Cliente del broker de colas. El servicio de envio nunca sondea el
 * estado de una tarea — solo el worker la procesa y solo el
 * verificador o el propio cliente HTTP consultan `status`. Implementado
 * sobre `reqwest` contra una puerta de enlace HTTP delante del broker
 * de tareas real, siguiendo el mismo patron de cliente ligero que el
 * resto del workspace usa para hablar con servicios externos.
 */

use crate::constants::{SCANNER_ROUTING_PREFIX, TRAINING_QUEUE, TRAINING_ROUTING_PREFIX};
use crate::error::BrokerError;
use crate::model::{ActiveTask, ClaimedTrainingTask, TaskStatus, TrainingTask};
use reqwest::{Client, StatusCode};
use tracing::instrument;
use uuid::Uuid;

pub struct BrokerClient {
    http: Client,
    base_url: String,
}

impl BrokerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("broker http client must build"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Envia una tarea de entrenamiento a `training_queue`. El servicio
    /// de envio nunca espera aqui por el resultado.
    #[instrument(skip(self, task))]
    pub async fn submit_training_task(&self, task: &TrainingTask) -> Result<String, BrokerError> {
        let task_id = Uuid::new_v4().to_string();
        let routing_key = format!("{TRAINING_ROUTING_PREFIX}default");

        let response = self
            .http
            .post(format!("{}/tasks", self.base_url))
            .json(&serde_json::json!({
                "task_id": task_id,
                "queue": "training_queue",
                "routing_key": routing_key,
                "body": task,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(task_id)
        } else {
            Err(BrokerError::Rejected(format!("submit -> {}", response.status())))
        }
    }

    /// Envia una tarea de escaneo de vulnerabilidades a `scanner_queue`.
    #[instrument(skip(self))]
    pub async fn submit_scan_task(&self) -> Result<String, BrokerError> {
        let task_id = Uuid::new_v4().to_string();
        let routing_key = format!("{SCANNER_ROUTING_PREFIX}periodic");

        let response = self
            .http
            .post(format!("{}/tasks", self.base_url))
            .json(&serde_json::json!({
                "task_id": task_id,
                "queue": "scanner_queue",
                "routing_key": routing_key,
                "body": {},
            }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(task_id)
        } else {
            Err(BrokerError::Rejected(format!("submit_scan -> {}", response.status())))
        }
    }

    #[instrument(skip(self))]
    pub async fn status(&self, task_id: &str) -> Result<TaskStatus, BrokerError> {
        let response = self.http.get(format!("{}/tasks/{task_id}", self.base_url)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<TaskStatus>().await?),
            StatusCode::NOT_FOUND => Err(BrokerError::TaskNotFound(task_id.to_string())),
            status => Err(BrokerError::Rejected(format!("status -> {status}"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn inspect_active(&self) -> Result<Vec<ActiveTask>, BrokerError> {
        let response = self.http.get(format!("{}/tasks/active", self.base_url)).send().await?;
        if response.status().is_success() {
            Ok(response.json::<Vec<ActiveTask>>().await?)
        } else {
            Err(BrokerError::Rejected(format!("inspect_active -> {}", response.status())))
        }
    }

    /// Reclama la siguiente tarea pendiente de `training_queue`, si
    /// alguna existe. Un 204 vacio significa cola vacia, no un error:
    /// el llamador debe esperar y volver a intentar.
    #[instrument(skip(self))]
    pub async fn claim_training_task(&self) -> Result<Option<ClaimedTrainingTask>, BrokerError> {
        let response = self
            .http
            .post(format!("{}/tasks/claim", self.base_url))
            .json(&serde_json::json!({ "queue": TRAINING_QUEUE }))
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            StatusCode::OK => Ok(Some(response.json::<ClaimedTrainingTask>().await?)),
            status => Err(BrokerError::Rejected(format!("claim -> {status}"))),
        }
    }

    /// Reporta la finalizacion exitosa de `task_id`, con `result` como
    /// carga estructurada opaca para el backend de resultados.
    #[instrument(skip(self, result))]
    pub async fn report_success(&self, task_id: &str, result: serde_json::Value) -> Result<(), BrokerError> {
        let response = self
            .http
            .post(format!("{}/tasks/{task_id}/succeed", self.base_url))
            .json(&serde_json::json!({ "result": result }))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(BrokerError::Rejected(format!("report_success -> {}", response.status())))
        }
    }

    /// Reporta el fallo terminal (no reintentable, o retries agotados)
    /// de `task_id`.
    #[instrument(skip(self))]
    pub async fn report_failure(&self, task_id: &str, error: &str) -> Result<(), BrokerError> {
        let response = self
            .http
            .post(format!("{}/tasks/{task_id}/fail", self.base_url))
            .json(&serde_json::json!({ "error": error }))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(BrokerError::Rejected(format!("report_failure -> {}", response.status())))
        }
    }

    /// Reencola `task_id` para un nuevo intento tras `countdown_secs`,
    /// en lugar de declararlo fallido de inmediato. El gateway de
    /// broker incrementa `delivery_count` en la siguiente entrega.
    #[instrument(skip(self))]
    pub async fn report_retry(&self, task_id: &str, error: &str, countdown_secs: u64) -> Result<(), BrokerError> {
        let response = self
            .http
            .post(format!("{}/tasks/{task_id}/retry", self.base_url))
            .json(&serde_json::json!({ "error": error, "countdown": countdown_secs }))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(BrokerError::Rejected(format!("report_retry -> {}", response.status())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aibom_core::FitParams;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_task() -> TrainingTask {
        TrainingTask {
            staging_dir: "job-1".into(),
            model_url: "job-1/model/m.keras".into(),
            dataset_url: "job-1/dataset/d.csv".into(),
            definition_url: "job-1/definition/def.yaml".into(),
            optional_params: Default::default(),
            fit_params: FitParams::default(),
        }
    }

    #[tokio::test]
    async fn submit_returns_a_task_id_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        let task_id = client.submit_training_task(&sample_task()).await.unwrap();
        assert!(!task_id.is_empty());
    }

    #[tokio::test]
    async fn submit_rejection_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        let err = client.submit_training_task(&sample_task()).await.unwrap_err();
        assert!(matches!(err, BrokerError::Rejected(_)));
    }

    #[tokio::test]
    async fn missing_task_status_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/unknown-id"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        let err = client.status("unknown-id").await.unwrap_err();
        assert!(matches!(err, BrokerError::TaskNotFound(_)));
    }

    #[tokio::test]
    async fn empty_queue_claim_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/claim"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        assert!(client.claim_training_task().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn claim_returns_the_queued_task_body() {
        let server = MockServer::start().await;
        let claimed = crate::model::ClaimedTrainingTask {
            task_id: "task-1".into(),
            delivery_count: 0,
            body: sample_task(),
        };
        Mock::given(method("POST"))
            .and(path("/tasks/claim"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&claimed))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        let result = client.claim_training_task().await.unwrap().unwrap();
        assert_eq!(result.task_id, "task-1");
        assert_eq!(result.body, sample_task());
    }

    #[tokio::test]
    async fn report_success_posts_the_result_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/task-1/succeed"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        client.report_success("task-1", serde_json::json!({"status": "ok"})).await.unwrap();
    }

    #[tokio::test]
    async fn report_failure_posts_the_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks/task-1/fail"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = BrokerClient::new(server.uri());
        client.report_failure("task-1", "boom").await.unwrap();
    }
}
