// [crates/aibom-broker/src/constants.rs]
//! Constantes de enrutamiento de colas, fijadas verbatim desde la
//! configuracion original del broker. La especificacion no fija estos
//! valores por si misma, pero el sistema original si, asi que se
//! conservan tal cual en lugar de inventarse unos nuevos.

pub const TRAINING_QUEUE: &str = "training_queue";
pub const TRAINING_ROUTING_PREFIX: &str = "training.";
pub const SCANNER_QUEUE: &str = "scanner_queue";
pub const SCANNER_ROUTING_PREFIX: &str = "scanner.";

/// Reintentos maximos antes de que una tarea se de por fallida.
pub const TASK_MAX_RETRIES: u32 = 3;
/// Retraso base, en segundos, antes de reintentar una tarea fallida.
pub const TASK_DEFAULT_RETRY_DELAY_SECS: u64 = 60;
/// Tiempo limite de pared, en segundos, para una tarea de entrenamiento.
pub const TASK_TIME_LIMIT_SECS: u64 = 3600;
/// Cada worker procesa una tarea a la vez.
pub const WORKER_PREFETCH_MULTIPLIER: u32 = 1;
