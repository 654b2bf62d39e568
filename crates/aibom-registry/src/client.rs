// [crates/aibom-registry/src/client.rs]
//! Conexion al registro de jobs. En el arranque, reintenta la conexion
//! con espera lineal acotada (60 intentos x 10s) antes de fallar de
//! forma fatal — el mismo patron de bootstrap retried que el resto del
//! workspace usa para sus dependencias externas.

use crate::errors::RegistryError;
use crate::schema::apply_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const MAX_CONNECTION_ATTEMPTS: u32 = 60;
const RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct RegistryClient {
    database: Arc<Database>,
}

impl RegistryClient {
    /// Conecta al registro, reintentando con espera lineal de 10s hasta
    /// 60 veces antes de devolver un error fatal.
    #[instrument(skip(auth_token))]
    pub async fn connect(database_url: &str, auth_token: Option<String>) -> Result<Self, RegistryError> {
        let mut last_error = None;

        for attempt in 1..=MAX_CONNECTION_ATTEMPTS {
            match Self::try_connect_once(database_url, auth_token.clone()).await {
                Ok(client) => {
                    info!(attempt, "registry connection established");
                    return Ok(client);
                }
                Err(err) => {
                    warn!(attempt, error = %err, "registry connection attempt failed, retrying");
                    last_error = Some(err);
                    if attempt < MAX_CONNECTION_ATTEMPTS {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }

        let err = last_error.unwrap_or_else(|| RegistryError::ConnectionError("no attempts made".into()));
        error!(error = %err, "registry unreachable after {MAX_CONNECTION_ATTEMPTS} attempts");
        Err(err)
    }

    async fn try_connect_once(database_url: &str, auth_token: Option<String>) -> Result<Self, RegistryError> {
        let is_remote = database_url.starts_with("libsql://") || database_url.starts_with("https://");

        let database = if is_remote {
            let token = auth_token
                .ok_or_else(|| RegistryError::ConnectionError("remote registry requires an auth token".into()))?;
            Builder::new_remote(database_url.to_string(), token)
                .build()
                .await
                .map_err(|e| RegistryError::ConnectionError(e.to_string()))?
        } else {
            Builder::new_local(database_url)
                .build()
                .await
                .map_err(|e| RegistryError::ConnectionError(e.to_string()))?
        };

        let bootstrap = database
            .connect()
            .map_err(|e| RegistryError::ConnectionError(e.to_string()))?;
        apply_schema(&bootstrap)
            .await
            .map_err(|e| RegistryError::ConnectionError(e.to_string()))?;

        Ok(Self { database: Arc::new(database) })
    }

    pub fn connection(&self) -> Result<Connection, RegistryError> {
        self.database.connect().map_err(|e| RegistryError::ConnectionError(e.to_string()))
    }
}
