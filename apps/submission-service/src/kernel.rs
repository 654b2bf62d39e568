// [apps/submission-service/src/kernel.rs]
//! Composition root: conecta el registro (con reintentos), construye
//! los clientes hacia el almacen de objetos y el broker, y levanta el
//! servidor HTTP.

use crate::config::Config;
use crate::rate_limit::RateLimiter;
use crate::routes::build_router;
use crate::state::AppState;
use aibom_blobstore::BlobStoreClient;
use aibom_broker::BrokerClient;
use aibom_registry::RegistryClient;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info};

pub struct Kernel {
    port: u16,
    state: AppState,
}

impl Kernel {
    pub async fn ignite(config: &Config) -> Self {
        let registry = RegistryClient::connect(&config.database_url, config.turso_auth_token.clone())
            .await
            .expect("job registry unreachable after all bootstrap attempts");

        let blobstore = BlobStoreClient::new(
            config.blobstore_endpoint.clone(),
            config.training_bucket.clone(),
            config.blobstore_access_key.clone(),
            config.blobstore_secret_key.clone(),
        );
        if let Err(err) = blobstore.ensure_bucket().await {
            error!(error = %err, "could not ensure the training bucket exists");
            std::process::exit(1);
        }

        let broker = BrokerClient::new(config.broker_url.clone());
        let rate_limiter = RateLimiter::new(config.submissions_per_minute, 60);

        let state = AppState {
            blobstore: Arc::new(blobstore),
            registry: Arc::new(registry),
            broker: Arc::new(broker),
            training_bucket: config.training_bucket.clone(),
            rate_limiter: Arc::new(rate_limiter),
            auth_enabled: config.auth_enabled,
        };

        Self { port: config.port, state }
    }

    pub async fn serve(self) {
        let router = build_router(self.state);
        let addr = SocketAddr::new(IpAddr::from([0, 0, 0, 0]), self.port);

        info!(%addr, "submission service listening");
        let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind listening port");

        if let Err(err) =
            axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await
        {
            error!(error = %err, "submission service terminated");
            std::process::exit(1);
        }
    }
}
