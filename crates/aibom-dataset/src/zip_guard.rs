// [crates/aibom-dataset/src/zip_guard.rs]
//! Extraccion segura de un archivo `.zip` subido: tope de tamano del
//! archivo en si, tope por entrada descomprimida, tope acumulado, lista
//! blanca de extensiones y rechazo de traversal/rutas absolutas.
//! Limites grounded en `zip_utils.py`, reforzados con los topes
//! por-entrada y acumulado contra zip bombs.

use crate::error::DatasetError;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const MAX_ZIP_FILE_BYTES: u64 = 100 * 1024 * 1024;
pub const MAX_ENTRY_UNCOMPRESSED_BYTES: u64 = 50 * 1024 * 1024;
pub const MAX_TOTAL_UNCOMPRESSED_BYTES: u64 = 500 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "png", "csv"];

fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resuelve `member` relativo a `extract_to`, rechazando rutas
/// absolutas o que escapan del directorio de destino via `..`.
fn safe_join(extract_to: &Path, member: &str) -> Result<PathBuf, DatasetError> {
    let member_path = Path::new(member);
    if member_path.is_absolute() || member_path.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(DatasetError::PathTraversal(member.to_string()));
    }
    Ok(extract_to.join(member_path))
}

/// Valida y extrae `zip_path` dentro de `extract_to`, aplicando los
/// topes de tamano y la lista blanca de extensiones antes de escribir
/// un solo byte a disco.
pub fn validate_and_extract(zip_path: &Path, extract_to: &Path) -> Result<(), DatasetError> {
    let metadata = std::fs::metadata(zip_path)?;
    if metadata.len() > MAX_ZIP_FILE_BYTES {
        return Err(DatasetError::ZipTooLarge);
    }

    let file = File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|_| DatasetError::NotAZipArchive)?;

    let mut total_uncompressed: u64 = 0;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if name.ends_with('/') {
            continue;
        }

        safe_join(extract_to, &name)?;

        if entry.size() > MAX_ENTRY_UNCOMPRESSED_BYTES {
            return Err(DatasetError::EntryTooLarge(name));
        }
        total_uncompressed += entry.size();
        if total_uncompressed > MAX_TOTAL_UNCOMPRESSED_BYTES {
            return Err(DatasetError::TotalSizeExceeded);
        }

        if !has_allowed_extension(&name) {
            return Err(DatasetError::DisallowedExtension(name));
        }
    }

    std::fs::create_dir_all(extract_to)?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        if name.ends_with('/') {
            continue;
        }
        let out_path = safe_join(extract_to, &name)?;
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut buffer = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buffer)?;
        std::fs::write(out_path, buffer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
        file
    }

    #[test]
    fn extracts_allowed_files_into_the_target_directory() {
        let zip_file = build_zip(&[("data.csv", b"a,b\n1,2\n")]);
        let extract_to = tempfile::tempdir().unwrap();
        validate_and_extract(zip_file.path(), extract_to.path()).unwrap();
        assert!(extract_to.path().join("data.csv").exists());
    }

    #[test]
    fn rejects_disallowed_extensions() {
        let zip_file = build_zip(&[("payload.exe", b"x")]);
        let extract_to = tempfile::tempdir().unwrap();
        let err = validate_and_extract(zip_file.path(), extract_to.path()).unwrap_err();
        assert!(matches!(err, DatasetError::DisallowedExtension(_)));
    }

    #[test]
    fn rejects_path_traversal_entries() {
        let zip_file = build_zip(&[("../escape.csv", b"a")]);
        let extract_to = tempfile::tempdir().unwrap();
        let err = validate_and_extract(zip_file.path(), extract_to.path()).unwrap_err();
        assert!(matches!(err, DatasetError::PathTraversal(_)));
    }

    #[test]
    fn rejects_entries_over_the_per_entry_cap() {
        let big = vec![0u8; (MAX_ENTRY_UNCOMPRESSED_BYTES + 1) as usize];
        let zip_file = build_zip(&[("huge.csv", &big)]);
        let extract_to = tempfile::tempdir().unwrap();
        let err = validate_and_extract(zip_file.path(), extract_to.path()).unwrap_err();
        assert!(matches!(err, DatasetError::EntryTooLarge(_)));
    }
}
