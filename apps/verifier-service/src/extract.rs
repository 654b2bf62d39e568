// [apps/verifier-service/src/extract.rs]
//! Los cuatro endpoints reciben su "blob" de entrada como un archivo
//! subido por multipart, igual que el verificador de referencia acepta
//! un `UploadFile` en lugar de un cuerpo JSON desnudo. Este modulo
//! centraliza la lectura de un unico campo de archivo y su
//! deserializacion como JSON.

use aibom_core::DomainError;
use axum::extract::Multipart;
use serde::de::DeserializeOwned;

/// Lee el campo de archivo `field_name` de `multipart` y lo deserializa
/// como `T`. Ignora cualquier otro campo presente en el formulario.
pub async fn read_json_file_field<T: DeserializeOwned>(multipart: &mut Multipart, field_name: &str) -> Result<T, DomainError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::InvalidInput(format!("cannot read {field_name} field: {e}")))?;
        return serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::InvalidInput(format!("{field_name} is not valid JSON: {e}")));
    }
    Err(DomainError::InvalidInput(format!("missing {field_name} part")))
}
