// [apps/scanner/src/engine.rs]
//! Bucle del escaner: cada hora, en punto, escanea la imagen del
//! worker y la propia imagen del escaner, y publica cada reporte bajo
//! una clave con marca de tiempo en su bucket dedicado.

use crate::config::Config;
use aibom_blobstore::BlobStoreClient;
use aibom_core::VulnerabilitySummary;
use aibom_environment::{container, vulnerability};
use chrono::{Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const HOURLY_INTERVAL: Duration = Duration::from_secs(3600);

/// Segundos restantes hasta el proximo limite de hora exacta (minuto 0).
fn seconds_until_next_hour() -> u64 {
    let now = Utc::now();
    let elapsed = u64::from(now.minute()) * 60 + u64::from(now.second());
    if elapsed == 0 {
        0
    } else {
        3600 - elapsed
    }
}

pub async fn run_forever(config: Config) {
    let worker_scans = Arc::new(BlobStoreClient::new(
        config.blobstore_endpoint.clone(),
        config.worker_scans_bucket.clone(),
        config.blobstore_access_key.clone(),
        config.blobstore_secret_key.clone(),
    ));
    let scanner_scans = Arc::new(BlobStoreClient::new(
        config.blobstore_endpoint.clone(),
        config.scanner_scans_bucket.clone(),
        config.blobstore_access_key.clone(),
        config.blobstore_secret_key.clone(),
    ));

    for bucket in [&worker_scans, &scanner_scans] {
        if let Err(err) = bucket.ensure_bucket().await {
            error!(error = %err, "could not ensure vulnerability scans bucket exists");
            std::process::exit(1);
        }
    }

    tokio::time::sleep(Duration::from_secs(seconds_until_next_hour())).await;

    loop {
        run_scan_round(&config, &worker_scans, &scanner_scans).await;
        tokio::time::sleep(HOURLY_INTERVAL).await;
    }
}

async fn run_scan_round(config: &Config, worker_scans: &BlobStoreClient, scanner_scans: &BlobStoreClient) {
    info!("starting scheduled vulnerability scan round");

    let worker_summary = vulnerability::scan_image(&config.worker_image_name).await;
    publish_report(worker_scans, "worker-vulnerability-scans", &worker_summary).await;

    let scanner_image_name = match container::collect().await {
        aibom_core::ContainerSummary::Containerized(info) if info.image_name != "Unknown" => Some(info.image_name),
        _ => None,
    };

    match scanner_image_name {
        Some(image_name) => {
            let scanner_summary = vulnerability::scan_image(&image_name).await;
            publish_report(scanner_scans, "scanner-vulnerability-scans", &scanner_summary).await;
        }
        None => warn!("scanner image name could not be determined, skipping self-scan this round"),
    }

    info!("scan round complete");
}

async fn publish_report(bucket: &BlobStoreClient, prefix: &str, summary: &VulnerabilitySummary) {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let key = format!("{prefix}/vulnerabilities_{timestamp}.json");

    let body = match serde_json::to_vec_pretty(summary) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "could not serialise vulnerability summary");
            return;
        }
    };

    if let Err(err) = bucket.put(&key, body).await {
        error!(error = %err, key = %key, "could not publish vulnerability report");
    } else {
        info!(key = %key, "vulnerability report published");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_interval_is_one_hour() {
        assert_eq!(HOURLY_INTERVAL, Duration::from_secs(3600));
    }
}
