// [apps/worker/src/lib.rs]
//! Worker de entrenamiento: reclama jobs de `training_queue`, los
//! ejecuta de punta a punta (descarga de materiales, entrenamiento,
//! atestacion in-toto, firma y publicacion del BOM) y reporta el
//! resultado al broker.

pub mod config;
pub mod engine;
pub mod job_runner;
pub mod model_loader;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::engine::run_forever;
    pub use crate::job_runner::JobContext;
}
