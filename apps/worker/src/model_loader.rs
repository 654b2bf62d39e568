// [apps/worker/src/model_loader.rs]
//! Introspeccion del artefacto de modelo subido. Este workspace no
//! vincula ningun framework de ML real: `DeclaredShapeIntrospector` ya
//! documenta que sirve para "entornos donde el modelo ya declara su
//! forma sin necesidad de cargarlo". Aqui se reconoce esa convencion:
//! si el archivo de modelo es un documento JSON con
//! `input_shape`/`output_shape`, esas son sus formas reales; cualquier
//! otro formato (un binario de framework real) se asume coincidente
//! con lo declarado en la definicion del dataset.

use aibom_ml::DeclaredShapeIntrospector;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DeclaredModelShape {
    input_shape: Vec<i64>,
    output_shape: Vec<i64>,
    #[serde(default = "default_architecture_summary")]
    architecture_summary: String,
}

fn default_architecture_summary() -> String {
    "Unknown".to_string()
}

/// Introspecciona `model_bytes`. Cuando no son un documento JSON de
/// forma declarada, se asume que el modelo coincide con las formas
/// declaradas en la definicion del dataset.
pub fn introspect(
    model_bytes: &[u8],
    declared_input_shape: &[i64],
    declared_output_shape: &[i64],
) -> Arc<DeclaredShapeIntrospector> {
    match serde_json::from_slice::<DeclaredModelShape>(model_bytes) {
        Ok(shape) => {
            Arc::new(DeclaredShapeIntrospector::new(shape.input_shape, shape.output_shape, shape.architecture_summary))
        }
        Err(_) => Arc::new(DeclaredShapeIntrospector::new(
            declared_input_shape.to_vec(),
            declared_output_shape.to_vec(),
            "Opaque model artifact (framework-specific, not introspected)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_binary_is_assumed_to_match_the_declared_shape() {
        let introspector = introspect(b"\x00\x01not-json", &[11], &[6]);
        assert_eq!(introspector.input_shape(), vec![11]);
        assert_eq!(introspector.output_shape(), vec![6]);
    }

    #[test]
    fn a_declared_shape_document_overrides_the_dataset_definition() {
        let document = serde_json::json!({"input_shape": [11], "output_shape": [10]});
        let introspector = introspect(serde_json::to_vec(&document).unwrap().as_slice(), &[11], &[6]);
        assert_eq!(introspector.output_shape(), vec![10]);
    }
}
