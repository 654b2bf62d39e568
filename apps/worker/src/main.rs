// [apps/worker/src/main.rs]
//! Punto de entrada del binario worker.

use aibom_worker_lib::prelude::*;

use aibom_blobstore::BlobStoreClient;
use aibom_broker::BrokerClient;
use aibom_crypto::KeyPair;
use dotenvy::dotenv;
use aibom_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing("aibom-worker");

    let config = Config::from_env();

    let keypair = match KeyPair::load_from_pem_file(&config.private_key_path) {
        Ok(keypair) => keypair,
        Err(err) => {
            error!(error = %err, path = %config.private_key_path, "could not load worker signing key");
            std::process::exit(1);
        }
    };

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

    let scans_blobstore = BlobStoreClient::new(
        config.blobstore_endpoint.clone(),
        config.worker_scans_bucket.clone(),
        config.blobstore_access_key.clone(),
        config.blobstore_secret_key.clone(),
    );
    if let Err(err) = scans_blobstore.ensure_bucket().await {
        error!(error = %err, "could not ensure the worker scans bucket exists");
        std::process::exit(1);
    }

    let ctx = Arc::new(JobContext {
        blobstore: Arc::new(blobstore),
        scans_blobstore: Arc::new(scans_blobstore),
        keypair: Arc::new(keypair),
        worker_id: config.worker_id.clone(),
    });

    let broker = Arc::new(BrokerClient::new(config.broker_url.clone()));

    info!(worker_id = %config.worker_id, "worker ready, claiming from training_queue");
    tokio::select! {
        _ = run_forever(ctx, broker) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting after the in-flight job completes");
        }
    }
}
