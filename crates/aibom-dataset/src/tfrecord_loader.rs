// [crates/aibom-dataset/src/tfrecord_loader.rs]
//! Validacion de un dataset TFRecord: cuenta registros delimitados por
//! el encabezado de longitud de 8 bytes del formato TFRecord y
//! verifica que las caracteristicas declaradas no esten vacias. La
//! decodificacion de los `Example` protobuf individuales es
//! responsabilidad del ejecutor de entrenamiento, no de este validador.

use crate::error::DatasetError;
use aibom_core::DatasetDefinition;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct TfrecordDatasetSummary {
    pub record_count: usize,
    pub feature_names: Vec<String>,
    pub flatten_features: bool,
}

/// Cuenta los registros de un archivo TFRecord leyendo, para cada uno,
/// el encabezado `u64` little-endian de longitud y saltando el cuerpo
/// mas los dos CRC de 4 bytes que lo enmarcan.
fn count_records(path: &Path) -> Result<usize, DatasetError> {
    let mut file = std::fs::File::open(path)?;
    let mut count = 0usize;

    loop {
        let mut length_buf = [0u8; 8];
        match file.read_exact(&mut length_buf) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(DatasetError::Io(err)),
        }
        let length = u64::from_le_bytes(length_buf);

        let mut skip_buf = [0u8; 4];
        file.read_exact(&mut skip_buf)?; // length CRC
        let mut body = vec![0u8; length as usize];
        file.read_exact(&mut body)?;
        file.read_exact(&mut skip_buf)?; // body CRC

        count += 1;
    }

    Ok(count)
}

pub fn validate_and_summarize(tfrecord_path: &Path, definition: &DatasetDefinition) -> Result<TfrecordDatasetSummary, DatasetError> {
    if definition.features.is_empty() {
        return Err(DatasetError::SchemaMismatch("TFRecord definition declares no features".to_string()));
    }

    let record_count = count_records(tfrecord_path)?;
    if record_count == 0 {
        return Err(DatasetError::SchemaMismatch("TFRecord file contains no records".to_string()));
    }

    Ok(TfrecordDatasetSummary {
        record_count,
        feature_names: definition.features.keys().cloned().collect(),
        flatten_features: definition.flatten_features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aibom_core::TfrecordFeature;
    use std::collections::BTreeMap;
    use std::io::Write;

    fn write_fake_record(file: &mut impl Write, body: &[u8]) {
        file.write_all(&(body.len() as u64).to_le_bytes()).unwrap();
        file.write_all(&[0u8; 4]).unwrap();
        file.write_all(body).unwrap();
        file.write_all(&[0u8; 4]).unwrap();
    }

    fn sample_definition(features: BTreeMap<String, TfrecordFeature>) -> DatasetDefinition {
        DatasetDefinition {
            kind: aibom_core::DatasetKind::Tfrecord,
            input_shape: vec![10],
            output_shape: vec![1],
            label: Some("label".to_string()),
            columns: BTreeMap::new(),
            image_size: None,
            features,
            flatten_features: true,
            preprocessing: None,
        }
    }

    #[test]
    fn counts_framed_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_fake_record(&mut file, b"example-one");
        write_fake_record(&mut file, b"example-two");

        let mut features = BTreeMap::new();
        features.insert("x".to_string(), TfrecordFeature { dtype: "float".to_string(), shape: vec![10] });

        let summary = validate_and_summarize(file.path(), &sample_definition(features)).unwrap();
        assert_eq!(summary.record_count, 2);
    }

    #[test]
    fn no_declared_features_is_a_schema_mismatch() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = validate_and_summarize(file.path(), &sample_definition(BTreeMap::new())).unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch(_)));
    }
}
