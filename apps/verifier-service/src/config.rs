// [apps/verifier-service/src/config.rs]
//! Configuracion leida desde el entorno, con los mismos nombres de
//! variable que `spec.md` §6 documenta para el resto del workspace.

#[derive(Debug, Clone)]
pub struct Config {
    pub blobstore_endpoint: String,
    pub blobstore_access_key: String,
    pub blobstore_secret_key: String,
    pub training_bucket: String,
    pub port: u16,
    pub worker_public_key_path: String,
    pub signed_layout_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            blobstore_endpoint: std::env::var("BLOBSTORE_ENDPOINT").expect("BLOBSTORE_ENDPOINT must be set"),
            blobstore_access_key: std::env::var("BLOBSTORE_ACCESS_KEY").unwrap_or_default(),
            blobstore_secret_key: std::env::var("BLOBSTORE_SECRET_KEY").unwrap_or_default(),
            training_bucket: std::env::var("TRAINING_BUCKET").unwrap_or_else(|_| "training".to_string()),
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8081),
            worker_public_key_path: std::env::var("WORKER_PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "/run/secrets/worker_public_key".to_string()),
            signed_layout_path: std::env::var("SIGNED_LAYOUT_PATH")
                .unwrap_or_else(|_| "/run/secrets/signed_layout".to_string()),
        }
    }
}
