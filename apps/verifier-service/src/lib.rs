// [apps/verifier-service/src/lib.rs]
//! Servicio HTTP de verificacion: re-verifica links de atestacion,
//! re-hashea artefactos almacenados, y valida documentos BOM firmados
//! contra la clave publica del worker (C10).

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod kernel;
pub mod routes;
pub mod state;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::kernel::Kernel;
    pub use crate::state::AppState;
}
