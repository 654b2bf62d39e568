// [crates/aibom-core/src/staging.rs]
//! Convenciones de ruta dentro del directorio de staging de un job
//! (spec.md §3). El directorio mismo es un UUIDv4 opaco; este modulo
//! solo conoce las subcarpetas fijas y los nombres de producto.

/// Construye y resuelve rutas bajo `<staging_dir>/...` para un job.
/// Nunca toca el almacen de objetos directamente — es solo aritmetica
/// de rutas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    staging_dir: String,
}

impl StagingLayout {
    pub fn new(staging_dir: impl Into<String>) -> Self {
        Self { staging_dir: staging_dir.into() }
    }

    pub fn staging_dir(&self) -> &str {
        &self.staging_dir
    }

    pub fn model_path(&self, filename: &str) -> String {
        format!("{}/model/{}", self.staging_dir, filename)
    }

    pub fn dataset_path(&self, filename: &str) -> String {
        format!("{}/dataset/{}", self.staging_dir, filename)
    }

    pub fn definition_path(&self, filename: &str) -> String {
        format!("{}/definition/{}", self.staging_dir, filename)
    }

    pub fn trained_model_path(&self, ext: &str) -> String {
        format!("{}/output/trained_model.{}", self.staging_dir, ext)
    }

    pub fn metrics_path(&self) -> String {
        format!("{}/output/metrics.json", self.staging_dir)
    }

    pub fn logs_path(&self) -> String {
        format!("{}/output/logs.log", self.staging_dir)
    }

    pub fn link_path(&self, keyid: &str) -> String {
        format!("{}/output/run_training.{}.link", self.staging_dir, keyid)
    }

    pub fn bom_path(&self) -> String {
        format!("{}/output/cyclonedx_bom.json", self.staging_dir)
    }

    /// El prefijo `<staging_dir>/output/` comun a todos los productos.
    pub fn output_prefix(&self) -> String {
        format!("{}/output/", self.staging_dir)
    }

    /// Recupera el directorio de staging a partir del prefijo comun de
    /// un conjunto de rutas de artefacto, tal como lo hace el
    /// verificador al recibir solo un link (spec.md §4.10 paso 3).
    pub fn staging_dir_from_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Option<String> {
        let mut paths = paths.into_iter();
        let first = paths.next()?;
        let first_dir = first.split('/').next()?.to_string();
        for path in paths {
            if path.split('/').next() != Some(first_dir.as_str()) {
                return None;
            }
        }
        Some(first_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_produces_documented_paths() {
        let layout = StagingLayout::new("3e5c1a2b-uuid");
        assert_eq!(layout.model_path("model.keras"), "3e5c1a2b-uuid/model/model.keras");
        assert_eq!(layout.trained_model_path("keras"), "3e5c1a2b-uuid/output/trained_model.keras");
        assert_eq!(layout.bom_path(), "3e5c1a2b-uuid/output/cyclonedx_bom.json");
        assert_eq!(layout.link_path("ab12cd34"), "3e5c1a2b-uuid/output/run_training.ab12cd34.link");
    }

    #[test]
    fn recovers_staging_dir_from_common_prefix() {
        let paths = vec![
            "job-1/model/model.keras",
            "job-1/dataset/data.csv",
            "job-1/output/metrics.json",
        ];
        assert_eq!(
            StagingLayout::staging_dir_from_paths(paths),
            Some("job-1".to_string())
        );
    }

    #[test]
    fn mismatched_prefixes_yield_none() {
        let paths = vec!["job-1/model/model.keras", "job-2/dataset/data.csv"];
        assert_eq!(StagingLayout::staging_dir_from_paths(paths), None);
    }
}
