// [crates/aibom-dataset/src/image_loader.rs]
//! Validacion del dataset de imagenes: cada archivo de la carpeta de
//! datos debe tener una extension permitida; el tamano declarado
//! (`image_size`, default 224x224) es informativo para el ejecutor de
//! entrenamiento, no se redimensiona aqui.

use crate::error::DatasetError;
use aibom_core::DatasetDefinition;
use std::path::Path;

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone)]
pub struct ImageDatasetSummary {
    pub image_count: usize,
    pub image_size: (u32, u32),
}

pub fn validate_and_summarize(dataset_dir: &Path, definition: &DatasetDefinition) -> Result<ImageDatasetSummary, DatasetError> {
    let mut image_count = 0usize;
    for entry in std::fs::read_dir(dataset_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match extension {
            Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => image_count += 1,
            _ => {
                return Err(DatasetError::DisallowedExtension(path.display().to_string()));
            }
        }
    }

    if image_count == 0 {
        return Err(DatasetError::SchemaMismatch("image dataset directory contains no images".to_string()));
    }

    Ok(ImageDatasetSummary { image_count, image_size: definition.effective_image_size() })
}
