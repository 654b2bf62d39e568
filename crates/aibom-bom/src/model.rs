// [crates/aibom-bom/src/model.rs]
//! Subconjunto del esquema CycloneDX v1.6 que este sistema realmente
//! emite: metadata, componentes de tres tipos (entorno, datos, modelo),
//! una referencia externa de atestacion y un grafo de dependencias.

use serde::{Deserialize, Serialize};

pub const SPEC_VERSION: &str = "1.6";
pub const BOM_FORMAT: &str = "CycloneDX";

/// Disclaimer verbatim adjuntado a todo componente de modelo, tal como
/// el generador original lo fijaba.
pub const OPTIONAL_PARAMS_DISCLAIMER: &str =
    "The correctness of these optional parameters cannot be guaranteed by the platform as they are user-defined.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Container,
    File,
    Platform,
    MachineLearningModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Hash {
    pub alg: String,
    pub content: String,
}

impl Hash {
    pub fn sha256(hex_digest: impl Into<String>) -> Self {
        Self { alg: "SHA-256".to_string(), content: hex_digest.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Component {
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hashes: Vec<Hash>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OrganizationalContact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OrganizationalEntity {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub url: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ToolComponent {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Tools {
    pub components: Vec<ToolComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Metadata {
    /// El unico campo volatil: limpiado antes de firmar y restaurado
    /// despues, segun el contrato de canonicalizacion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    pub tools: Tools,
    pub authors: Vec<OrganizationalContact>,
    pub supplier: OrganizationalEntity,
    pub manufacturer: OrganizationalEntity,
    /// Propiedades a nivel de metadata; la firma embebida vive aqui
    /// bajo el nombre `BOM Signature`.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalReferenceType {
    Attestation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExternalReference {
    #[serde(rename = "type")]
    pub reference_type: ExternalReferenceType,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Dependency {
    #[serde(rename = "ref")]
    pub component_ref: String,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Bom {
    #[serde(rename = "bomFormat")]
    pub bom_format: String,
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    pub version: u32,
    pub metadata: Metadata,
    pub components: Vec<Component>,
    #[serde(rename = "externalReferences", skip_serializing_if = "Vec::is_empty", default)]
    pub external_references: Vec<ExternalReference>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<Dependency>,
}

pub const BOM_SIGNATURE_PROPERTY_NAME: &str = "BOM Signature";

impl Bom {
    pub fn find_bom_signature(&self) -> Option<&str> {
        self.metadata
            .properties
            .iter()
            .find(|p| p.name == BOM_SIGNATURE_PROPERTY_NAME)
            .map(|p| p.value.as_str())
    }

    pub fn external_attestation_reference(&self) -> Option<&ExternalReference> {
        self.external_references
            .iter()
            .find(|reference| reference.reference_type == ExternalReferenceType::Attestation)
    }
}
