// [crates/aibom-crypto/src/lib.rs]
//! Primitivas criptograficas compartidas: digest de contenido y firma
//! Ed25519. Ningun otro crate calcula un hash o verifica una firma por
//! su cuenta — toda la criptografia del workspace pasa por aqui.

pub mod digest;
pub mod error;
pub mod signing;

pub use digest::{sha256_bytes, sha256_file};
pub use error::CryptoError;
pub use signing::{load_verifying_key_from_json_file, load_verifying_key_from_json_str, verify, KeyPair};
