// [apps/verifier-service/src/kernel.rs]
//! Composition root: carga la clave publica del worker y el layout de
//! verificacion firmado una sola vez al arrancar, construye el cliente
//! hacia el almacen de objetos, y levanta el servidor HTTP.

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use aibom_attestation::VerificationLayout;
use aibom_blobstore::BlobStoreClient;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{error, info};

pub struct Kernel {
    port: u16,
    state: AppState,
}

impl Kernel {
    pub async fn ignite(config: &Config) -> Self {
        let worker_public_key = aibom_crypto::load_verifying_key_from_json_file(&config.worker_public_key_path)
            .unwrap_or_else(|err| {
                error!(error = %err, path = %config.worker_public_key_path, "could not load worker public key");
                std::process::exit(1);
            });

        let layout_contents = std::fs::read_to_string(&config.signed_layout_path).unwrap_or_else(|err| {
            error!(error = %err, path = %config.signed_layout_path, "could not read signed verification layout");
            std::process::exit(1);
        });
        let layout: VerificationLayout = serde_json::from_str(&layout_contents).unwrap_or_else(|err| {
            error!(error = %err, "signed verification layout is not valid JSON");
            std::process::exit(1);
        });

        let blobstore = BlobStoreClient::new(
            config.blobstore_endpoint.clone(),
            config.training_bucket.clone(),
            config.blobstore_access_key.clone(),
            config.blobstore_secret_key.clone(),
        );

        let state = AppState {
            blobstore: Arc::new(blobstore),
            worker_public_key: Arc::new(worker_public_key),
            layout: Arc::new(layout),
        };

        Self { port: config.port, state }
    }

    pub async fn serve(self) {
        let router = build_router(self.state);
        let addr = SocketAddr::new(IpAddr::from([0, 0, 0, 0]), self.port);

        info!(%addr, "verifier service listening");
        let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind listening port");

        if let Err(err) = axum::serve(listener, router).await {
            error!(error = %err, "verifier service terminated");
            std::process::exit(1);
        }
    }
}
