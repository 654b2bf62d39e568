// [crates/aibom-dataset/src/csv_loader.rs]
//! Validacion del dataset CSV contra la definicion declarada: las
//! columnas requeridas son las claves de `dataset_definition.columns`;
//! las columnas de caracteristicas son todas las declaradas salvo la
//! etiqueta. Una columna ausente detiene el entrenamiento antes de que
//! empiece (`SchemaMismatch`), igual que el cargador de referencia.

use crate::error::DatasetError;
use aibom_core::DatasetDefinition;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct CsvDatasetSummary {
    pub row_count: usize,
    pub feature_columns: Vec<String>,
    pub label_column: String,
}

pub fn validate_and_summarize(csv_path: &Path, definition: &DatasetDefinition) -> Result<CsvDatasetSummary, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(csv_path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for declared_column in definition.columns.keys() {
        if !headers.contains(declared_column) {
            return Err(DatasetError::MissingColumn(declared_column.clone()));
        }
    }

    let mut row_count = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.len() != headers.len() {
            return Err(DatasetError::SchemaMismatch(format!(
                "row {row_count} has {} fields, expected {}",
                record.len(),
                headers.len()
            )));
        }
        row_count += 1;
    }

    Ok(CsvDatasetSummary {
        row_count,
        feature_columns: definition.csv_feature_columns().into_iter().map(str::to_string).collect(),
        label_column: definition.label.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_definition() -> DatasetDefinition {
        let yaml = r#"
type: csv
input_shape: [2]
output_shape: [1]
label: quality
columns:
  acidity: float
  sugar: float
  quality: int
"#;
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn missing_declared_column_is_a_schema_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "acidity,sugar").unwrap();
        writeln!(file, "1.0,2.0").unwrap();

        let err = validate_and_summarize(file.path(), &sample_definition()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(col) if col == "quality"));
    }

    #[test]
    fn well_formed_csv_reports_row_count_and_feature_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "acidity,sugar,quality").unwrap();
        writeln!(file, "1.0,2.0,5").unwrap();
        writeln!(file, "1.2,2.4,6").unwrap();

        let summary = validate_and_summarize(file.path(), &sample_definition()).unwrap();
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.feature_columns, vec!["acidity".to_string(), "sugar".to_string()]);
    }

    #[test]
    fn ragged_row_is_reported_as_schema_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "acidity,sugar,quality").unwrap();
        writeln!(file, "1.0,2.0").unwrap();

        let err = validate_and_summarize(file.path(), &sample_definition());
        assert!(err.is_err());
    }
}
