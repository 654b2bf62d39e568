// [apps/scanner/src/config.rs]
//! Configuracion leida desde el entorno, con los mismos nombres de
//! variable que `spec.md` §6 documenta para el resto del workspace.

#[derive(Debug, Clone)]
pub struct Config {
    pub blobstore_endpoint: String,
    pub blobstore_access_key: String,
    pub blobstore_secret_key: String,
    pub worker_scans_bucket: String,
    pub scanner_scans_bucket: String,
    pub worker_image_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            blobstore_endpoint: std::env::var("BLOBSTORE_ENDPOINT").expect("BLOBSTORE_ENDPOINT must be set"),
            blobstore_access_key: std::env::var("BLOBSTORE_ACCESS_KEY").unwrap_or_default(),
            blobstore_secret_key: std::env::var("BLOBSTORE_SECRET_KEY").unwrap_or_default(),
            worker_scans_bucket: std::env::var("WORKER_SCANS_BUCKET").unwrap_or_else(|_| "worker-scans".to_string()),
            scanner_scans_bucket: std::env::var("SCANNER_SCANS_BUCKET").unwrap_or_else(|_| "scanner-scans".to_string()),
            worker_image_name: std::env::var("WORKER_IMAGE_NAME").expect("WORKER_IMAGE_NAME must be set"),
        }
    }
}
