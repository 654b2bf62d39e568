// [crates/aibom-bom/src/assembler.rs]
//! El algoritmo de ocho pasos que ensambla un documento CycloneDX v1.6
//! a partir de los hechos de un job terminado: metadata, componente de
//! entorno, componentes de archivo por cada material/producto,
//! componente de modelo con los parametros de entrenamiento, referencia
//! externa de atestacion y el grafo de dependencias.

use crate::error::BomError;
use crate::model::{
    Bom, Component, ComponentType, Dependency, ExternalReference, ExternalReferenceType, Hash, Metadata,
    OrganizationalContact, OrganizationalEntity, Property, ToolComponent, Tools, BOM_FORMAT, OPTIONAL_PARAMS_DISCLAIMER,
    SPEC_VERSION,
};
use aibom_core::{Artifact, EnvironmentFacts, FitParams};
use std::collections::BTreeMap;
use std::path::Path;

const PLATFORM_TOOL_NAME: &str = "AIBoMGen";
const PLATFORM_TOOL_VERSION: &str = "0.1.0";
const CYCLONEDX_LIBRARY_NAME: &str = "cyclonedx-rust-model";
const CYCLONEDX_LIBRARY_VERSION: &str = "1.6.0";
const SUPPLIER_NAME: &str = "AIBoM Platform Team";

const ENVIRONMENT_COMPONENT_REF: &str = "environment";
const DATA_COMPONENT_REF_PREFIX: &str = "material";
const PRODUCT_COMPONENT_REF_PREFIX: &str = "product";
const MODEL_COMPONENT_REF: &str = "model";

const TRAINED_MODEL_BASENAME_PREFIX: &str = "trained_model.";
const METRICS_SUFFIX: &str = "metrics.json";

/// Metadatos de modelo declarados por el usuario al momento del envio;
/// no verificables por la plataforma, de ahi el disclaimer adjunto.
#[derive(Debug, Clone, Default)]
pub struct OptionalModelParams {
    pub model_name: Option<String>,
    pub model_version: Option<String>,
    pub model_description: Option<String>,
    pub framework: Option<String>,
    pub license_name: Option<String>,
    pub extra: BTreeMap<String, String>,
}

/// Referencia al archivo `.link` publicado, usada para la referencia
/// externa de atestacion.
#[derive(Debug, Clone)]
pub struct AttestationReference {
    pub bucket_path: String,
    pub description: String,
}

/// Todo lo que el ensamblador necesita para producir un `Bom` completo
/// para un unico job.
#[derive(Debug, Clone)]
pub struct BomAssemblyInput {
    pub environment: EnvironmentFacts,
    pub materials: Vec<Artifact>,
    pub products: Vec<Artifact>,
    pub fit_params: FitParams,
    pub optional_params: OptionalModelParams,
    pub attestation: Option<AttestationReference>,
    /// Metricas del documento `metrics.json`, embebidas como
    /// propiedades individuales del componente de modelo.
    pub metrics: BTreeMap<String, f64>,
    /// Resumen de arquitectura obtenido al introspeccionar el artefacto
    /// de modelo entrenado (`ModelIntrospector::architecture_summary`).
    pub architecture_summary: String,
}

fn cyclonedx_library_tool() -> ToolComponent {
    ToolComponent {
        name: CYCLONEDX_LIBRARY_NAME.to_string(),
        version: CYCLONEDX_LIBRARY_VERSION.to_string(),
        description: None,
    }
}

fn platform_tool() -> ToolComponent {
    ToolComponent {
        name: PLATFORM_TOOL_NAME.to_string(),
        version: PLATFORM_TOOL_VERSION.to_string(),
        description: Some("A platform for AI training and generating trusted AIBOMs".to_string()),
    }
}

fn platform_entity() -> OrganizationalEntity {
    OrganizationalEntity { name: SUPPLIER_NAME.to_string(), url: vec![] }
}

fn build_metadata() -> Metadata {
    Metadata {
        timestamp: None,
        tools: Tools { components: vec![cyclonedx_library_tool(), platform_tool()] },
        authors: vec![OrganizationalContact { name: PLATFORM_TOOL_NAME.to_string(), email: None }],
        supplier: platform_entity(),
        manufacturer: platform_entity(),
        properties: vec![],
    }
}

fn build_environment_component(facts: &EnvironmentFacts) -> Component {
    let properties = facts
        .as_property_pairs()
        .into_iter()
        .map(|(name, value)| Property::new(name, value))
        .collect();

    Component {
        bom_ref: ENVIRONMENT_COMPONENT_REF.to_string(),
        component_type: ComponentType::Container,
        name: "Training Environment".to_string(),
        version: None,
        description: Some("Details of the environment used for training".to_string()),
        hashes: vec![],
        properties,
    }
}

fn build_artifact_component(component_ref: String, artifact: &Artifact, description: &str) -> Component {
    Component {
        bom_ref: component_ref,
        component_type: ComponentType::File,
        name: artifact.bucket_path.clone(),
        version: None,
        description: Some(description.to_string()),
        hashes: vec![Hash::sha256(artifact.digest.sha256.clone())],
        properties: vec![],
    }
}

fn find_by_suffix(products: &[Artifact], suffix: &str) -> Option<&Artifact> {
    products.iter().find(|artifact| artifact.bucket_path.ends_with(suffix))
}

/// Localiza el producto de modelo entrenado por el prefijo de su
/// nombre base (`trained_model.<ext>`) en lugar de una extension fija:
/// `<ext>` viene de la extension del modelo subido y varia por job
/// (`.keras`, `.h5`, `.onnx`, SavedModel, ...).
fn find_trained_model(products: &[Artifact]) -> Option<&Artifact> {
    products.iter().find(|artifact| {
        Path::new(&artifact.bucket_path)
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(TRAINED_MODEL_BASENAME_PREFIX))
            .unwrap_or(false)
    })
}

#[allow(clippy::too_many_arguments)]
fn build_model_component(
    fit_params: &FitParams,
    optional_params: &OptionalModelParams,
    metrics: &BTreeMap<String, f64>,
    architecture_summary: &str,
    trained_model: Option<&Artifact>,
    metrics_artifact: Option<&Artifact>,
) -> Component {
    let mut properties = vec![
        Property::new("Framework", optional_params.framework.clone().unwrap_or_else(|| "Unknown".to_string())),
        Property::new("License", optional_params.license_name.clone().unwrap_or_else(|| "Unknown".to_string())),
        Property::new(
            "Trained Model Path",
            trained_model.map(|a| a.bucket_path.as_str()).unwrap_or("Unknown"),
        ),
        Property::new("Architecture Summary", architecture_summary),
        Property::new("Optional Params Disclaimer", OPTIONAL_PARAMS_DISCLAIMER),
    ];

    let fit_params_json = serde_json::to_value(fit_params).expect("FitParams always serialises");
    if let serde_json::Value::Object(map) = fit_params_json {
        for (key, value) in map {
            properties.push(Property::new(format!("Fit Param: {key}"), value.to_string()));
        }
    }

    for (key, value) in &optional_params.extra {
        properties.push(Property::new(format!("Optional Param: {key}"), value.clone()));
    }

    for (key, value) in metrics {
        properties.push(Property::new(format!("Metric: {key}"), value.to_string()));
    }

    let hashes = [trained_model, metrics_artifact]
        .into_iter()
        .flatten()
        .map(|artifact| Hash::sha256(artifact.digest.sha256.clone()))
        .collect();

    Component {
        bom_ref: MODEL_COMPONENT_REF.to_string(),
        component_type: ComponentType::MachineLearningModel,
        name: optional_params.model_name.clone().unwrap_or_else(|| "Trained Model".to_string()),
        version: Some(optional_params.model_version.clone().unwrap_or_else(|| "1.0".to_string())),
        description: Some(
            optional_params
                .model_description
                .clone()
                .unwrap_or_else(|| "A trained machine learning model".to_string()),
        ),
        hashes,
        properties,
    }
}

/// Ejecuta los ocho pasos: metadata, componente de entorno,
/// componentes de material/producto, componente de modelo, referencia
/// de atestacion, grafo de dependencias y, paso 7, validacion contra
/// el esquema embebido antes de devolver el documento — un BOM que no
/// valida nunca llega a firmarse ni a publicarse.
pub fn assemble(input: BomAssemblyInput) -> Result<Bom, BomError> {
    let metadata = build_metadata();

    let environment_component = build_environment_component(&input.environment);

    let material_components: Vec<Component> = input
        .materials
        .iter()
        .enumerate()
        .map(|(index, artifact)| {
            build_artifact_component(
                format!("{DATA_COMPONENT_REF_PREFIX}-{index}"),
                artifact,
                "Input artifact used in training",
            )
        })
        .collect();

    let product_components: Vec<Component> = input
        .products
        .iter()
        .enumerate()
        .map(|(index, artifact)| {
            build_artifact_component(
                format!("{PRODUCT_COMPONENT_REF_PREFIX}-{index}"),
                artifact,
                "Output artifact generated from training",
            )
        })
        .collect();

    let trained_model = find_trained_model(&input.products);
    let metrics_artifact = find_by_suffix(&input.products, METRICS_SUFFIX);
    let model_component = build_model_component(
        &input.fit_params,
        &input.optional_params,
        &input.metrics,
        &input.architecture_summary,
        trained_model,
        metrics_artifact,
    );

    let external_references = input
        .attestation
        .as_ref()
        .map(|attestation| {
            vec![ExternalReference {
                reference_type: ExternalReferenceType::Attestation,
                url: attestation.bucket_path.clone(),
                comment: Some(attestation.description.clone()),
            }]
        })
        .unwrap_or_default();

    let mut model_dependencies: Vec<String> = vec![ENVIRONMENT_COMPONENT_REF.to_string()];
    model_dependencies.extend(material_components.iter().map(|c| c.bom_ref.clone()));

    let mut dependencies = vec![Dependency { component_ref: MODEL_COMPONENT_REF.to_string(), depends_on: model_dependencies }];
    for product in &product_components {
        dependencies.push(Dependency {
            component_ref: product.bom_ref.clone(),
            depends_on: vec![MODEL_COMPONENT_REF.to_string()],
        });
    }

    let mut components = vec![environment_component];
    components.extend(material_components);
    components.extend(product_components);
    components.push(model_component);

    let bom = Bom {
        bom_format: BOM_FORMAT.to_string(),
        spec_version: SPEC_VERSION.to_string(),
        version: 1,
        metadata,
        components,
        external_references,
        dependencies,
    };

    crate::schema::validate(&bom)?;
    Ok(bom)
}

#[cfg(test)]
impl BomAssemblyInput {
    pub fn sample_for_tests() -> Self {
        use aibom_core::{ArtifactDigest, ArtifactRole, ContainerSummary, GpuSummary, TaskSummary, VulnerabilitySummary};

        let environment = EnvironmentFacts {
            os: "Linux 6.1".into(),
            python_version: "Unknown".into(),
            tensorflow_version: "2.15.0".into(),
            cpu_count: "8".into(),
            memory_total_mb: "16384".into(),
            disk_usage_mb: "512000".into(),
            gpu_info: GpuSummary::NoneDetected,
            task_info: TaskSummary::NotRunningInTask,
            container_info: ContainerSummary::NotContainerized,
            vulnerability_scan: VulnerabilitySummary::BySeverity(Default::default()),
            request_time: "2026-01-01 00:00:00".into(),
            start_training_time: "2026-01-01 00:01:00".into(),
            start_aibom_time: "2026-01-01 00:05:00".into(),
            training_time_seconds: "240".into(),
            job_id: "job-1".into(),
            staging_dir: "job-1-abc".into(),
        };

        let materials = vec![Artifact {
            bucket_path: "job-1-abc/input/dataset.csv".into(),
            role: ArtifactRole::Material,
            digest: ArtifactDigest { sha256: "a".repeat(64) },
        }];

        let products = vec![Artifact {
            bucket_path: "job-1-abc/output/trained_model.keras".into(),
            role: ArtifactRole::Product,
            digest: ArtifactDigest { sha256: "b".repeat(64) },
        }];

        let mut metrics = BTreeMap::new();
        metrics.insert("accuracy".to_string(), 0.97);
        metrics.insert("loss".to_string(), 0.1);

        Self {
            environment,
            materials,
            products,
            fit_params: FitParams::default(),
            optional_params: OptionalModelParams {
                model_name: Some("digit-classifier".into()),
                model_version: Some("1.0".into()),
                model_description: None,
                framework: Some("TensorFlow".into()),
                license_name: Some("MIT".into()),
                extra: Default::default(),
            },
            attestation: Some(AttestationReference {
                bucket_path: "job-1-abc/output/training.abcdef0123456789.link".into(),
                description: "Attestation file for artifact integrity verification".into(),
            }),
            metrics,
            architecture_summary: "Sequential(dense x2)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_component_carries_the_verbatim_disclaimer() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let model = bom.components.iter().find(|c| c.component_type == ComponentType::MachineLearningModel).unwrap();
        assert!(model.properties.iter().any(|p| p.name == "Optional Params Disclaimer" && p.value == OPTIONAL_PARAMS_DISCLAIMER));
    }

    #[test]
    fn model_depends_on_environment_and_every_material() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let model_dep = bom.dependencies.iter().find(|d| d.component_ref == MODEL_COMPONENT_REF).unwrap();
        assert!(model_dep.depends_on.contains(&ENVIRONMENT_COMPONENT_REF.to_string()));
        assert!(model_dep.depends_on.iter().any(|r| r.starts_with(DATA_COMPONENT_REF_PREFIX)));
    }

    #[test]
    fn every_product_depends_on_the_model() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let product_deps: Vec<_> =
            bom.dependencies.iter().filter(|d| d.component_ref.starts_with(PRODUCT_COMPONENT_REF_PREFIX)).collect();
        assert!(!product_deps.is_empty());
        assert!(product_deps.iter().all(|d| d.depends_on == vec![MODEL_COMPONENT_REF.to_string()]));
    }

    #[test]
    fn trained_model_path_is_detected_from_product_suffix() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let model = bom.components.iter().find(|c| c.component_type == ComponentType::MachineLearningModel).unwrap();
        let path_property = model.properties.iter().find(|p| p.name == "Trained Model Path").unwrap();
        assert_eq!(path_property.value, "job-1-abc/output/trained_model.keras");
    }

    #[test]
    fn trained_model_is_detected_for_non_keras_extensions() {
        use aibom_core::{ArtifactDigest, ArtifactRole};

        let mut input = BomAssemblyInput::sample_for_tests();
        input.products = vec![Artifact {
            bucket_path: "job-1-abc/output/trained_model.h5".into(),
            role: ArtifactRole::Product,
            digest: ArtifactDigest { sha256: "c".repeat(64) },
        }];

        let bom = assemble(input).unwrap();
        let model = bom.components.iter().find(|c| c.component_type == ComponentType::MachineLearningModel).unwrap();
        let path_property = model.properties.iter().find(|p| p.name == "Trained Model Path").unwrap();
        assert_eq!(path_property.value, "job-1-abc/output/trained_model.h5");
        assert_eq!(model.hashes.len(), 1);
        assert_eq!(model.hashes[0].content, "c".repeat(64));
    }

    #[test]
    fn attestation_reference_becomes_an_external_reference() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let reference = bom.external_attestation_reference().unwrap();
        assert_eq!(reference.url, "job-1-abc/output/training.abcdef0123456789.link");
    }

    #[test]
    fn environment_component_carries_facts_as_flat_properties() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let environment = bom.components.iter().find(|c| c.bom_ref == ENVIRONMENT_COMPONENT_REF).unwrap();
        assert!(environment.properties.iter().any(|p| p.name == "OS" && p.value == "Linux 6.1"));
    }

    #[test]
    fn model_component_carries_metrics_architecture_and_trained_model_hash() {
        let bom = assemble(BomAssemblyInput::sample_for_tests()).unwrap();
        let model = bom.components.iter().find(|c| c.component_type == ComponentType::MachineLearningModel).unwrap();
        assert!(model.properties.iter().any(|p| p.name == "Metric: accuracy" && p.value == "0.97"));
        assert!(model.properties.iter().any(|p| p.name == "Architecture Summary" && p.value == "Sequential(dense x2)"));
        assert_eq!(model.hashes.len(), 1);
        assert_eq!(model.hashes[0].content, "b".repeat(64));
    }
}
