// [crates/aibom-core/src/fit_params.rs]
//! Hiperparametros de entrenamiento, con los mismos defaults que el
//! formulario de envio documenta (spec.md §6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitParams {
    #[serde(default = "default_epochs")]
    pub epochs: u32,
    #[serde(default = "default_validation_split")]
    pub validation_split: f64,
    #[serde(default)]
    pub initial_epoch: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    pub steps_per_epoch: Option<u32>,
    pub validation_steps: Option<u32>,
    #[serde(default = "default_validation_freq")]
    pub validation_freq: u32,
}

fn default_epochs() -> u32 {
    50
}

fn default_validation_split() -> f64 {
    0.2
}

fn default_batch_size() -> u32 {
    32
}

fn default_validation_freq() -> u32 {
    1
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            validation_split: default_validation_split(),
            initial_epoch: 0,
            batch_size: default_batch_size(),
            steps_per_epoch: None,
            validation_steps: None,
            validation_freq: default_validation_freq(),
        }
    }
}

impl FitParams {
    /// Numero de lotes de entrenamiento cuando el dataset es un
    /// iterable finito de `total_batches` lotes: los primeros
    /// `floor((1 - validation_split) * total_batches)` se entrenan, el
    /// resto se reserva para validacion.
    pub fn training_batch_count(&self, total_batches: u32) -> u32 {
        if self.validation_split <= 0.0 {
            return total_batches;
        }
        let fraction = (1.0 - self.validation_split).max(0.0);
        ((total_batches as f64) * fraction).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_form_values() {
        let params = FitParams::default();
        assert_eq!(params.epochs, 50);
        assert_eq!(params.validation_split, 0.2);
        assert_eq!(params.initial_epoch, 0);
        assert_eq!(params.batch_size, 32);
        assert_eq!(params.validation_freq, 1);
        assert!(params.steps_per_epoch.is_none());
        assert!(params.validation_steps.is_none());
    }

    #[test]
    fn zero_validation_split_reserves_no_batches() {
        let mut params = FitParams::default();
        params.validation_split = 0.0;
        assert_eq!(params.training_batch_count(10), 10);
    }

    #[test]
    fn split_takes_floor_of_training_fraction() {
        let params = FitParams::default();
        assert_eq!(params.training_batch_count(10), 8);
    }
}
