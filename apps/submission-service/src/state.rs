// [apps/submission-service/src/state.rs]
//! Estado compartido por todos los manejadores: clientes hacia los
//! tres sistemas externos (almacen de objetos, registro, broker) mas
//! el limitador de tasa en memoria.

use crate::rate_limit::RateLimiter;
use aibom_blobstore::BlobStoreClient;
use aibom_broker::BrokerClient;
use aibom_registry::RegistryClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub blobstore: Arc<BlobStoreClient>,
    pub registry: Arc<RegistryClient>,
    pub broker: Arc<BrokerClient>,
    pub training_bucket: String,
    pub rate_limiter: Arc<RateLimiter>,
    pub auth_enabled: bool,
}
