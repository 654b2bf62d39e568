// [crates/aibom-blobstore/src/lib.rs]
//! Cliente de almacen de objetos (C1): el unico punto del workspace que
//! habla HTTP directamente con el MinIO/S3 subyacente.

pub mod client;
pub mod error;

pub use client::BlobStoreClient;
pub use error::BlobStoreError;
