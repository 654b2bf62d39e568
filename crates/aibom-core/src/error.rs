// [crates/aibom-core/src/error.rs]
//! Taxonomia unificada de errores del sistema (spec §7).
//!
//! Cada variante es visible a exactamente una capa del sistema (cliente,
//! worker, o verificador) pero vive en un solo enum porque varias rutas
//! de codigo atraviesan esas fronteras (p. ej. el servicio de envio
//! necesita `InvalidInput` y tambien puede propagar `StoreUnavailable`).

use thiserror::Error;

/// Error de dominio compartido por el servicio de envio, el worker y el
/// verificador. Ver `spec.md` §7 para la tabla de mapeo HTTP.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Carga malformada, violacion de politica de zip, o campo de formulario
    /// ausente. Visible al cliente como 400.
    #[error("InvalidInput: {0}")]
    InvalidInput(String),

    /// El invocador no es el propietario del recurso solicitado. 401/403.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identificador de job o artefacto desconocido. 404.
    #[error("NotFound: {0}")]
    NotFound(String),

    /// Un material no pudo leerse durante la fase Fetching del worker.
    /// No reintentable.
    #[error("InputMissing: {0}")]
    InputMissing(String),

    /// La definicion del dataset no concuerda con los datos reales.
    #[error("SchemaMismatch: {0}")]
    SchemaMismatch(String),

    /// La forma de entrada/salida declarada no concuerda con el modelo.
    #[error("ShapeMismatch: {0}")]
    ShapeMismatch(String),

    /// Ningun dispositivo de computo (GPU o CPU) esta disponible.
    #[error("NoDeviceAvailable: {0}")]
    NoDeviceAvailable(String),

    /// El almacen de objetos no respondio; reintentable.
    #[error("StoreUnavailable: {0}")]
    StoreUnavailable(String),

    /// El almacen de objetos rechazo la operacion (credenciales, cuota).
    /// No reintentable.
    #[error("StoreRejected: {0}")]
    StoreRejected(String),

    /// El broker de colas no respondio; reintentable.
    #[error("BrokerUnavailable: {0}")]
    BrokerUnavailable(String),

    /// La firma no verifica contra la clave publica esperada.
    #[error("SignatureInvalid: {0}")]
    SignatureInvalid(String),

    /// El layout de verificacion firmado ha expirado.
    #[error("LayoutExpired: {0}")]
    LayoutExpired(String),

    /// El link de atestacion solicitado no existe.
    #[error("LinkMissing: {0}")]
    LinkMissing(String),

    /// El layout exige mas firmas funcionarias de las presentes.
    #[error("ThresholdUnmet: {0}")]
    ThresholdUnmet(String),

    /// Una regla material/producto del layout fue violada.
    #[error("RuleViolation: {0}")]
    RuleViolation(String),

    /// El documento BOM no valida contra el esquema CycloneDX v1.6.
    #[error("BomInvalid: {0}")]
    BomInvalid(String),

    /// Fallo interno sin mapeo especifico en la taxonomia.
    #[error("Internal: {0}")]
    Internal(String),
}

impl DomainError {
    /// Codigo de estado HTTP documentado para las variantes visibles al
    /// cliente. Las variantes exclusivamente internas (worker/verificador)
    /// colapsan a 500 si alguna vez cruzan al borde HTTP por error.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::InvalidInput(_) => 400,
            DomainError::Unauthorized(_) => 403,
            DomainError::NotFound(_) => 404,
            DomainError::StoreUnavailable(_) | DomainError::BrokerUnavailable(_) => 503,
            DomainError::SignatureInvalid(_)
            | DomainError::LayoutExpired(_)
            | DomainError::LinkMissing(_)
            | DomainError::ThresholdUnmet(_)
            | DomainError::RuleViolation(_)
            | DomainError::BomInvalid(_) => 422,
            _ => 500,
        }
    }

    /// Slug estable para el cuerpo de respuesta JSON (no cambia entre
    /// versiones de parche, a diferencia del mensaje humano).
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidInput(_) => "InvalidInput",
            DomainError::Unauthorized(_) => "Unauthorized",
            DomainError::NotFound(_) => "NotFound",
            DomainError::InputMissing(_) => "InputMissing",
            DomainError::SchemaMismatch(_) => "SchemaMismatch",
            DomainError::ShapeMismatch(_) => "ShapeMismatch",
            DomainError::NoDeviceAvailable(_) => "NoDeviceAvailable",
            DomainError::StoreUnavailable(_) => "StoreUnavailable",
            DomainError::StoreRejected(_) => "StoreRejected",
            DomainError::BrokerUnavailable(_) => "BrokerUnavailable",
            DomainError::SignatureInvalid(_) => "SignatureInvalid",
            DomainError::LayoutExpired(_) => "LayoutExpired",
            DomainError::LinkMissing(_) => "LinkMissing",
            DomainError::ThresholdUnmet(_) => "ThresholdUnmet",
            DomainError::RuleViolation(_) => "RuleViolation",
            DomainError::BomInvalid(_) => "BomInvalid",
            DomainError::Internal(_) => "Internal",
        }
    }

    /// True para los errores que un segundo intento razonablemente podria
    /// resolver (perdida de red transitoria, etc.).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable(_) | DomainError::BrokerUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_spec_table() {
        assert_eq!(DomainError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(DomainError::Unauthorized("x".into()).status_code(), 403);
        assert_eq!(DomainError::NotFound("x".into()).status_code(), 404);
    }

    #[test]
    fn only_store_and_broker_unavailable_are_retryable() {
        assert!(DomainError::StoreUnavailable("x".into()).is_retryable());
        assert!(DomainError::BrokerUnavailable("x".into()).is_retryable());
        assert!(!DomainError::StoreRejected("x".into()).is_retryable());
        assert!(!DomainError::BomInvalid("x".into()).is_retryable());
    }

    #[test]
    fn code_is_stable_slug_not_message() {
        let err = DomainError::SchemaMismatch("missing column quality".into());
        assert_eq!(err.code(), "SchemaMismatch");
    }
}
