// [crates/aibom-broker/src/lib.rs]
//! Cliente del broker de colas de tareas (C3): envio, consulta de
//! estado e inspeccion de tareas activas.

pub mod client;
pub mod constants;
pub mod error;
pub mod model;

pub use client::BrokerClient;
pub use error::BrokerError;
pub use model::{ActiveTask, ClaimedTrainingTask, TaskStatus, TrainingTask};
