// [crates/aibom-ml/src/shape.rs]
//! Validacion de forma de entrada/salida: el modelo introspeccionado
//! debe concordar exactamente (dimension de lote excluida) con la
//! forma declarada en la definicion de dataset. El formato del mensaje
//! es literal: lo verifica el escenario 2 de las propiedades probables.

use crate::error::MlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Input,
    Output,
}

impl ShapeKind {
    fn label(self) -> &'static str {
        match self {
            ShapeKind::Input => "input",
            ShapeKind::Output => "output",
        }
    }
}

fn format_shape(shape: &[i64]) -> String {
    format!("[{}]", shape.iter().map(i64::to_string).collect::<Vec<_>>().join(", "))
}

/// Compara `actual` (la forma reportada por el introspector del
/// modelo, sin dimension de lote) contra `declared` (la forma de la
/// definicion de dataset). Mensaje exacto en caso de discrepancia:
/// `"{actual} does not match dataset {input|output} shape {declared}"`.
pub fn validate_shape(kind: ShapeKind, actual: &[i64], declared: &[i64]) -> Result<(), MlError> {
    if actual == declared {
        return Ok(());
    }
    Err(MlError::ShapeMismatch(format!(
        "{} does not match dataset {} shape {}",
        format_shape(actual),
        kind.label(),
        format_shape(declared)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_shapes_pass() {
        assert!(validate_shape(ShapeKind::Input, &[224, 224, 3], &[224, 224, 3]).is_ok());
    }

    #[test]
    fn mismatched_output_shape_uses_the_exact_documented_phrasing() {
        let err = validate_shape(ShapeKind::Output, &[5], &[10]).unwrap_err();
        assert!(err.to_string().contains("does not match dataset output shape"));
    }

    #[test]
    fn mismatched_input_shape_names_input() {
        let err = validate_shape(ShapeKind::Input, &[5], &[10]).unwrap_err();
        assert!(err.to_string().contains("does not match dataset input shape"));
    }
}
