// [crates/aibom-core/src/dataset_def.rs]
//! Definicion de dataset, parseada desde el YAML subido junto al modelo
//! y los datos crudos. `DatasetKind` es un enum cerrado: la forma de la
//! definicion queda completamente determinada por su discriminante, en
//! lugar de inspeccionarse campo a campo en tiempo de carga.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// El unico campo con autoridad sobre como se carga un dataset. Un
/// literal `framework` opcional en el formulario de envio nunca
/// sustituye a este valor — se trata como metadato informativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Csv,
    Image,
    Tfrecord,
}

/// Paso de preprocesamiento de caracteristicas, aplicado en el orden
/// fijo: normalizar, luego escalar, luego recortar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingSpec {
    #[serde(default)]
    pub normalize: bool,
    pub scale: Option<f64>,
    pub clip: Option<(f64, f64)>,
}

/// Descripcion `(dtype, shape)` de una columna de TFRecord, p. ej.
/// `("float", [10])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfrecordFeature {
    pub dtype: String,
    pub shape: Vec<i64>,
}

/// La definicion de dataset completa, tal como aparece en el YAML que
/// acompana al modelo y a los datos en cada envio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    #[serde(rename = "type", default = "default_dataset_kind")]
    pub kind: DatasetKind,

    /// Forma declarada de entrada del modelo, sin dimension de lote.
    pub input_shape: Vec<i64>,
    /// Forma declarada de salida del modelo, sin dimension de lote.
    pub output_shape: Vec<i64>,

    /// Columna etiqueta; requerida para CSV y TFRecord.
    pub label: Option<String>,
    /// Nombre de columna -> tipo declarado; solo relevante para CSV.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,

    /// Tamano de imagen `[alto, ancho]`; solo relevante para `Image`.
    pub image_size: Option<(u32, u32)>,

    /// Nombre de caracteristica -> `(dtype, shape)`; solo relevante
    /// para `Tfrecord`.
    #[serde(default)]
    pub features: BTreeMap<String, TfrecordFeature>,
    /// Si aplanar las caracteristicas de TFRecord en un solo tensor.
    #[serde(default = "default_true")]
    pub flatten_features: bool,

    pub preprocessing: Option<PreprocessingSpec>,
}

fn default_true() -> bool {
    true
}

/// The definition's `type` field defaults to CSV when absent.
fn default_dataset_kind() -> DatasetKind {
    DatasetKind::Csv
}

impl DatasetDefinition {
    /// Columnas de caracteristica para un dataset CSV: todas las
    /// columnas declaradas salvo la etiqueta.
    pub fn csv_feature_columns(&self) -> Vec<&str> {
        self.columns
            .keys()
            .filter(|name| self.label.as_deref() != Some(name.as_str()))
            .map(|name| name.as_str())
            .collect()
    }

    /// Tamano de imagen efectivo, con el default `224x224` del original.
    pub fn effective_image_size(&self) -> (u32, u32) {
        self.image_size.unwrap_or((224, 224))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
type: csv
input_shape: [11]
output_shape: [6]
label: quality
columns:
  fixed_acidity: float
  quality: int
preprocessing:
  normalize: true
"#
    }

    #[test]
    fn parses_csv_definition_and_derives_feature_columns() {
        let def: DatasetDefinition = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(def.kind, DatasetKind::Csv);
        assert_eq!(def.csv_feature_columns(), vec!["fixed_acidity"]);
        assert!(def.preprocessing.unwrap().normalize);
    }

    #[test]
    fn missing_type_field_defaults_to_csv() {
        let yaml = r#"
input_shape: [11]
output_shape: [6]
label: quality
columns:
  fixed_acidity: float
  quality: int
"#;
        let def: DatasetDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.kind, DatasetKind::Csv);
    }

    #[test]
    fn image_size_defaults_to_224() {
        let def = DatasetDefinition {
            kind: DatasetKind::Image,
            input_shape: vec![224, 224, 3],
            output_shape: vec![10],
            label: None,
            columns: BTreeMap::new(),
            image_size: None,
            features: BTreeMap::new(),
            flatten_features: true,
            preprocessing: None,
        };
        assert_eq!(def.effective_image_size(), (224, 224));
    }
}
