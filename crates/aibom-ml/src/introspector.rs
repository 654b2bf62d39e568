// [crates/aibom-ml/src/introspector.rs]
//! Introspeccion de modelo: reporta la forma de entrada/salida y un
//! resumen de arquitectura, sin depender de ningun framework de ML
//! concreto. El ejecutor real (TensorFlow, PyTorch, ONNX Runtime...)
//! queda fuera de alcance; este trait es el unico punto de contacto.

pub trait ModelIntrospector: Send + Sync {
    /// Forma de entrada del modelo, dimension de lote excluida.
    fn input_shape(&self) -> Vec<i64>;
    /// Forma de salida del modelo, dimension de lote excluida.
    fn output_shape(&self) -> Vec<i64>;
    /// Resumen legible de capas/arquitectura, embebido como propiedad
    /// informativa del componente de modelo en el BOM.
    fn architecture_summary(&self) -> String;
}

/// Introspector que reporta exactamente las formas con las que fue
/// construido, util para pruebas y para entornos donde el modelo ya
/// declara su forma sin necesidad de cargarlo.
pub struct DeclaredShapeIntrospector {
    input_shape: Vec<i64>,
    output_shape: Vec<i64>,
    summary: String,
}

impl DeclaredShapeIntrospector {
    pub fn new(input_shape: Vec<i64>, output_shape: Vec<i64>, summary: impl Into<String>) -> Self {
        Self { input_shape, output_shape, summary: summary.into() }
    }
}

impl ModelIntrospector for DeclaredShapeIntrospector {
    fn input_shape(&self) -> Vec<i64> {
        self.input_shape.clone()
    }

    fn output_shape(&self) -> Vec<i64> {
        self.output_shape.clone()
    }

    fn architecture_summary(&self) -> String {
        self.summary.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_introspector_reports_what_it_was_built_with() {
        let introspector = DeclaredShapeIntrospector::new(vec![224, 224, 3], vec![10], "Sequential(3 layers)");
        assert_eq!(introspector.input_shape(), vec![224, 224, 3]);
        assert_eq!(introspector.output_shape(), vec![10]);
        assert_eq!(introspector.architecture_summary(), "Sequential(3 layers)");
    }
}
