// [crates/aibom-dataset/src/lib.rs]
//! Extraccion segura de archivos .zip y validacion de esquema por tipo
//! de dataset declarado (csv/image/tfrecord).

pub mod csv_loader;
pub mod error;
pub mod image_loader;
pub mod tfrecord_loader;
pub mod zip_guard;

pub use error::DatasetError;
pub use zip_guard::{validate_and_extract, MAX_ENTRY_UNCOMPRESSED_BYTES, MAX_TOTAL_UNCOMPRESSED_BYTES, MAX_ZIP_FILE_BYTES};

use aibom_core::{DatasetDefinition, DatasetKind};
use std::path::Path;

/// Resultado de validar un dataset contra su definicion declarada,
/// despachado por el discriminante cerrado `DatasetKind`.
#[derive(Debug, Clone)]
pub enum DatasetSummary {
    Csv(csv_loader::CsvDatasetSummary),
    Image(image_loader::ImageDatasetSummary),
    Tfrecord(tfrecord_loader::TfrecordDatasetSummary),
}

/// Valida `dataset_path` contra `definition`, despachando al cargador
/// que corresponde a `definition.kind`. `dataset_path` apunta a un
/// archivo para CSV/TFRecord y a un directorio para Image.
pub fn validate_dataset(dataset_path: &Path, definition: &DatasetDefinition) -> Result<DatasetSummary, DatasetError> {
    match definition.kind {
        DatasetKind::Csv => csv_loader::validate_and_summarize(dataset_path, definition).map(DatasetSummary::Csv),
        DatasetKind::Image => image_loader::validate_and_summarize(dataset_path, definition).map(DatasetSummary::Image),
        DatasetKind::Tfrecord => tfrecord_loader::validate_and_summarize(dataset_path, definition).map(DatasetSummary::Tfrecord),
    }
}

pub fn parse_definition(yaml: &str) -> Result<DatasetDefinition, DatasetError> {
    serde_yaml::from_str(yaml).map_err(|e| DatasetError::DefinitionInvalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn dispatches_to_the_csv_loader_for_csv_definitions() {
        let yaml = r#"
type: csv
input_shape: [2]
output_shape: [1]
label: quality
columns:
  acidity: float
  quality: int
"#;
        let definition = parse_definition(yaml).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "acidity,quality").unwrap();
        writeln!(file, "1.0,5").unwrap();

        let summary = validate_dataset(file.path(), &definition).unwrap();
        assert!(matches!(summary, DatasetSummary::Csv(_)));
    }

    #[test]
    fn malformed_yaml_is_reported_as_definition_invalid() {
        let err = parse_definition("not: [valid: yaml").unwrap_err();
        assert!(matches!(err, DatasetError::DefinitionInvalid(_)));
    }
}
