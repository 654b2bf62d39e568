// [apps/verifier-service/src/state.rs]
//! Estado compartido por los cuatro endpoints de verificacion: el
//! cliente hacia el almacen de objetos donde viven los artefactos
//! publicados, la clave publica del worker y la politica de
//! verificacion firmada, ambas cargadas una sola vez al arrancar.

use aibom_attestation::VerificationLayout;
use aibom_blobstore::BlobStoreClient;
use ed25519_dalek::VerifyingKey;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub blobstore: Arc<BlobStoreClient>,
    pub worker_public_key: Arc<VerifyingKey>,
    pub layout: Arc<VerificationLayout>,
}
