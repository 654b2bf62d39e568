// [crates/aibom-bom/src/lib.rs]
//! Construccion, canonicalizacion, firma y validacion de documentos
//! CycloneDX v1.6 (C6): el unico crate que conoce el esquema del BOM
//! y el contrato de serializacion deterministico sobre el que se firma.

pub mod assembler;
pub mod canonical;
pub mod error;
pub mod model;
pub mod schema;
pub mod signing;

pub use assembler::{assemble, AttestationReference, BomAssemblyInput, OptionalModelParams};
pub use canonical::{canonical_bytes, embed_signature, strip_for_signing};
pub use error::BomError;
pub use model::{
    Bom, Component, ComponentType, Dependency, ExternalReference, ExternalReferenceType, Hash, Metadata,
    OrganizationalContact, OrganizationalEntity, Property, ToolComponent, Tools, BOM_FORMAT,
    BOM_SIGNATURE_PROPERTY_NAME, OPTIONAL_PARAMS_DISCLAIMER, SPEC_VERSION,
};
pub use schema::validate;
pub use signing::{sign_bom, verify_bom};
