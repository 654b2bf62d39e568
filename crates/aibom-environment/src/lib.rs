// [crates/aibom-environment/src/lib.rs]
//! Extraccion best-effort de hechos de entorno. Cada sensor (SO, GPU,
//! contenedor, vulnerabilidades) es independiente y nunca propaga su
//! propio fallo: un sensor ausente se convierte en el literal
//! "Unknown" dentro del `EnvironmentFacts` resultante, nunca en un job
//! abortado.

pub mod container;
pub mod extractor;
pub mod gpu;
pub mod os_facts;
pub mod vulnerability;

pub use extractor::{extract, ExtractionTimes, TaskContext};
