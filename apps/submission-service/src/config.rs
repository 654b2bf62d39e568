// [apps/submission-service/src/config.rs]
//! Configuracion leida desde el entorno, con los mismos nombres de
//! variable que `spec.md` §6 documenta para el resto del workspace.

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub turso_auth_token: Option<String>,
    pub blobstore_endpoint: String,
    pub blobstore_access_key: String,
    pub blobstore_secret_key: String,
    pub training_bucket: String,
    pub broker_url: String,
    pub port: u16,
    pub auth_enabled: bool,
    pub submissions_per_minute: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            turso_auth_token: std::env::var("TURSO_AUTH_TOKEN").ok(),
            blobstore_endpoint: std::env::var("BLOBSTORE_ENDPOINT")
                .expect("BLOBSTORE_ENDPOINT must be set"),
            blobstore_access_key: std::env::var("BLOBSTORE_ACCESS_KEY")
                .unwrap_or_default(),
            blobstore_secret_key: std::env::var("BLOBSTORE_SECRET_KEY")
                .unwrap_or_default(),
            training_bucket: std::env::var("TRAINING_BUCKET")
                .unwrap_or_else(|_| "training".to_string()),
            broker_url: std::env::var("BROKER_URL")
                .expect("BROKER_URL must be set"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            auth_enabled: std::env::var("AUTH_ENABLED")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            submissions_per_minute: 5,
        }
    }
}
