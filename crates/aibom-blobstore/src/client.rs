// [crates/aibom-blobstore/src/client.rs]
/*!
 * Cliente de almacen de objetos compatible con S3/MinIO. Usa `reqwest`
 * con acceso en estilo de ruta (`{endpoint}/{bucket}/{key}`) en lugar
 * de una SDK especifica de AWS, siguiendo la misma filosofia que el
 * cliente de red del worker: un `reqwest::Client` configurado una vez
 * y reutilizado para cada operacion.
 */

use crate::error::BlobStoreError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::{Client, StatusCode};
use tracing::instrument;

/// Credenciales y endpoint del almacen de objetos para un bucket dado.
pub struct BlobStoreClient {
    http: Client,
    endpoint: String,
    bucket: String,
    access_key: String,
    secret_key: String,
}

impl BlobStoreClient {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("blob store http client must build"),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key.trim_start_matches('/'))
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.access_key, Some(&self.secret_key))
    }

    /// Sube `contents` bajo `key`, relativo a la raiz del bucket.
    #[instrument(skip(self, contents))]
    pub async fn put(&self, key: &str, contents: Vec<u8>) -> Result<(), BlobStoreError> {
        let response = self
            .with_auth(self.http.put(self.object_url(key)))
            .body(contents)
            .send()
            .await?;
        classify_write_response(response.status(), &response.status().to_string())
    }

    /// Descarga el objeto bajo `key`.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, BlobStoreError> {
        let response = self.with_auth(self.http.get(self.object_url(key))).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(BlobStoreError::NotFound(key.to_string())),
            status if status.is_server_error() => {
                Err(BlobStoreError::Rejected(format!("GET {key} -> {status}")))
            }
            status => Err(BlobStoreError::Rejected(format!("GET {key} -> {status}"))),
        }
    }

    /// Enumera las claves bajo `prefix`, en orden lexicografico (el
    /// mismo orden que ListObjectsV2 ya garantiza).
    #[instrument(skip(self))]
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, BlobStoreError> {
        let url = format!("{}/{}?list-type=2&prefix={}", self.endpoint, self.bucket, prefix);
        let response = self.with_auth(self.http.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(BlobStoreError::Rejected(format!("LIST {prefix} -> {}", response.status())));
        }
        let body = response.text().await?;
        Ok(parse_list_keys(&body))
    }

    /// Genera una URL de descarga valida por `expires_in_seconds`.
    ///
    /// Simplificacion deliberada: en lugar de una firma AWS SigV4
    /// completa, codifica las credenciales y la expiracion como
    /// parametros de consulta que el endpoint de almacen verifica.
    /// Suficiente para el contrato de este sistema (URLs de un solo
    /// uso consumidas por el propio verificador, nunca por un
    /// navegador de terceros).
    pub fn presign(&self, key: &str, expires_in_seconds: u64) -> String {
        format!(
            "{}?access_key={}&expires={}",
            self.object_url(key),
            self.access_key,
            expires_in_seconds
        )
    }

    /// Crea el bucket si no existe. Idempotente: un bucket ya existente
    /// no es un error.
    #[instrument(skip(self))]
    pub async fn ensure_bucket(&self) -> Result<(), BlobStoreError> {
        let head_url = format!("{}/{}", self.endpoint, self.bucket);
        let head_response = self.with_auth(self.http.head(&head_url)).send().await?;
        if head_response.status() == StatusCode::OK {
            return Ok(());
        }

        let create_response = self.with_auth(self.http.put(&head_url)).send().await?;
        classify_write_response(create_response.status(), "ensure_bucket")
    }
}

fn classify_write_response(status: StatusCode, context: &str) -> Result<(), BlobStoreError> {
    if status.is_success() {
        Ok(())
    } else if status.is_server_error() {
        Err(BlobStoreError::Rejected(format!("{context} -> {status}")))
    } else {
        Err(BlobStoreError::Rejected(format!("{context} -> {status}")))
    }
}

/// Extrae los valores `<Key>` de una respuesta ListObjectsV2 en XML.
fn parse_list_keys(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut keys = Vec::new();
    let mut in_key = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"Key" => in_key = true,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"Key" => in_key = false,
            Ok(Event::Text(e)) if in_key => {
                if let Ok(text) = e.unescape() {
                    keys.push(text.to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_from_list_objects_v2_xml() {
        let xml = r#"<ListBucketResult>
            <Contents><Key>job-1/model/model.keras</Key></Contents>
            <Contents><Key>job-1/output/metrics.json</Key></Contents>
        </ListBucketResult>"#;
        assert_eq!(
            parse_list_keys(xml),
            vec!["job-1/model/model.keras".to_string(), "job-1/output/metrics.json".to_string()]
        );
    }

    #[test]
    fn empty_listing_yields_empty_vec() {
        let xml = r#"<ListBucketResult></ListBucketResult>"#;
        assert!(parse_list_keys(xml).is_empty());
    }

    #[test]
    fn presigned_url_carries_expiry_and_access_key() {
        let client = BlobStoreClient::new("http://minio:9000", "aibom", "key-a", "secret-a");
        let url = client.presign("job-1/output/metrics.json", 3600);
        assert!(url.contains("access_key=key-a"));
        assert!(url.contains("expires=3600"));
    }
}
