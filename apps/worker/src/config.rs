// [apps/worker/src/config.rs]
//! Configuracion leida desde el entorno, con los mismos nombres de
//! variable que `spec.md` §6 documenta para el resto del workspace.

#[derive(Debug, Clone)]
pub struct Config {
    pub blobstore_endpoint: String,
    pub blobstore_access_key: String,
    pub blobstore_secret_key: String,
    pub training_bucket: String,
    pub worker_scans_bucket: String,
    pub broker_url: String,
    pub worker_id: String,
    pub private_key_path: String,
    pub public_key_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            blobstore_endpoint: std::env::var("BLOBSTORE_ENDPOINT").expect("BLOBSTORE_ENDPOINT must be set"),
            blobstore_access_key: std::env::var("BLOBSTORE_ACCESS_KEY").unwrap_or_default(),
            blobstore_secret_key: std::env::var("BLOBSTORE_SECRET_KEY").unwrap_or_default(),
            training_bucket: std::env::var("TRAINING_BUCKET").unwrap_or_else(|_| "training".to_string()),
            worker_scans_bucket: std::env::var("WORKER_SCANS_BUCKET").unwrap_or_else(|_| "worker-scans".to_string()),
            broker_url: std::env::var("BROKER_URL").expect("BROKER_URL must be set"),
            worker_id: std::env::var("WORKER_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string()),
            private_key_path: std::env::var("WORKER_PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "/run/secrets/worker_private_key".to_string()),
            public_key_path: std::env::var("WORKER_PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "/run/secrets/worker_public_key".to_string()),
        }
    }
}
