// [crates/aibom-attestation/src/lib.rs]
//! Construccion y verificacion de links de atestacion al estilo
//! in-toto (C5): el unico crate que conoce el formato de un link
//! firmado y la politica de verificacion que lo gobierna.

pub mod builder;
pub mod error;
pub mod layout;
pub mod link;

pub use builder::build_link;
pub use error::AttestationError;
pub use layout::{verify_file_hash, verify_link, ArtifactRule, FileHashVerdict, FunctionaryKey, VerificationLayout};
pub use link::{LinkBody, SignedLink};
