// [crates/aibom-core/src/lib.rs]
//! Contratos de dominio compartidos. Este crate no habla con ningun
//! sistema externo: define unicamente las formas de datos que
//! atraviesan el pipeline de envio, el motor de entrenamiento y el
//! servicio de verificacion, junto con la taxonomia de errores que el
//! resto del workspace comparte.

pub mod artifact;
pub mod dataset_def;
pub mod environment;
pub mod error;
pub mod fit_params;
pub mod job;
pub mod staging;

pub use artifact::{Artifact, ArtifactDigest, ArtifactRole};
pub use dataset_def::{DatasetDefinition, DatasetKind, PreprocessingSpec};
pub use environment::{
    ContainerInfo, ContainerSummary, EnvironmentFacts, GpuInfo, GpuSummary, TaskInfo, TaskSummary,
    VulnerabilitySummary,
};
pub use error::DomainError;
pub use fit_params::FitParams;
pub use job::{Job, JobState};
pub use staging::StagingLayout;
