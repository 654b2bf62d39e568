// [crates/aibom-registry/src/lib.rs]
//! Registro durable de jobs (C2): la unica tabla relacional del
//! sistema, usada estrictamente como un mapa `job_id -> metadata`.

pub mod client;
pub mod errors;
pub mod repository;
pub mod schema;

pub use client::RegistryClient;
pub use errors::RegistryError;
pub use repository::JobRepository;
