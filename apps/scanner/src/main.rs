// [apps/scanner/src/main.rs]
//! Punto de entrada del binario del escaner.

use aibom_scanner_lib::prelude::*;

use dotenvy::dotenv;
use aibom_telemetry::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing("aibom-scanner");

    let config = Config::from_env();
    info!(worker_image = %config.worker_image_name, "scanner ready, scanning on the hour");

    tokio::select! {
        _ = run_forever(config) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting after current scan round");
        }
    }
}
