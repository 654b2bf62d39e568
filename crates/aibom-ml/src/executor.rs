// [crates/aibom-ml/src/executor.rs]
//! Ejecucion de entrenamiento como trait opaco: este crate no sabe
//! (ni necesita saber) que framework produce las metricas, solo que un
//! `TrainingExecutor` consume una peticion y devuelve metricas mas un
//! introspector del modelo resultante.

use crate::device::Device;
use crate::error::MlError;
use crate::introspector::ModelIntrospector;
use aibom_core::FitParams;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TrainingRequest {
    pub device: Device,
    pub fit_params: FitParams,
    pub declared_input_shape: Vec<i64>,
    pub declared_output_shape: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub metrics: BTreeMap<String, f64>,
    pub introspector: Arc<dyn ModelIntrospector>,
}

#[async_trait]
pub trait TrainingExecutor: Send + Sync {
    async fn fit(&self, request: TrainingRequest) -> Result<TrainingOutcome, MlError>;
}

/// Ejecutor simulado: no entrena nada, reporta metricas fijas y un
/// introspector cuyas formas coinciden siempre con las declaradas.
/// Sirve para ejercitar el resto del pipeline (captura, atestacion,
/// BOM) sin depender de un framework de ML real.
pub struct MockTrainingExecutor;

#[async_trait]
impl TrainingExecutor for MockTrainingExecutor {
    async fn fit(&self, request: TrainingRequest) -> Result<TrainingOutcome, MlError> {
        let mut metrics = BTreeMap::new();
        metrics.insert("loss".to_string(), 0.1);
        metrics.insert("accuracy".to_string(), 0.97);
        metrics.insert("epochs_run".to_string(), request.fit_params.epochs as f64);

        let introspector = Arc::new(crate::introspector::DeclaredShapeIntrospector::new(
            request.declared_input_shape,
            request.declared_output_shape,
            "MockSequential(dense x2)".to_string(),
        ));

        Ok(TrainingOutcome { metrics, introspector })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_executor_reports_fixed_metrics_and_matching_shapes() {
        let request = TrainingRequest {
            device: Device::Cpu,
            fit_params: FitParams::default(),
            declared_input_shape: vec![11],
            declared_output_shape: vec![1],
        };

        let outcome = MockTrainingExecutor.fit(request).await.unwrap();
        assert_eq!(outcome.metrics.get("accuracy"), Some(&0.97));
        assert_eq!(outcome.introspector.input_shape(), vec![11]);
    }
}
