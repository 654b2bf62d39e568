// [crates/aibom-bom/src/schema.rs]
//! Validacion contra el esquema CycloneDX v1.6. La forma del esquema
//! se deriva del propio modelo Rust (`schemars`) en lugar de
//! mantenerse a mano en un archivo JSON separado, para que el esquema
//! nunca pueda divergir silenciosamente de lo que el ensamblador
//! realmente produce.

use crate::error::BomError;
use crate::model::Bom;
use jsonschema::JSONSchema;
use schemars::schema_for;
use std::sync::OnceLock;

static COMPILED_SCHEMA: OnceLock<JSONSchema> = OnceLock::new();

fn compiled_schema() -> &'static JSONSchema {
    COMPILED_SCHEMA.get_or_init(|| {
        let schema = schema_for!(Bom);
        let schema_json = serde_json::to_value(&schema).expect("schema always serialises");
        JSONSchema::compile(&schema_json).expect("derived BOM schema must compile")
    })
}

/// Valida `bom` contra el esquema CycloneDX v1.6 derivado del modelo.
pub fn validate(bom: &Bom) -> Result<(), BomError> {
    let instance = serde_json::to_value(bom).expect("Bom always serialises");
    let schema = compiled_schema();
    let result = schema.validate(&instance);
    if let Err(errors) = result {
        let messages: Vec<String> = errors.map(|e| e.to_string()).collect();
        return Err(BomError::SchemaInvalid(messages.join("; ")));
    }
    Ok(())
}
