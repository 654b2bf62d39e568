// [crates/aibom-telemetry/src/lib.rs]
//! Inicializacion de trazado estructurado compartida por los cuatro
//! binarios del workspace (envio, worker, verificador, escaner), mas un
//! hook de panico que asegura que un colapso en un hilo secundario del
//! worker quede registrado antes de que el proceso termine.

use std::panic;
use tracing::{error, info, instrument};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Inicializa el suscriptor global de trazas para `service_name`.
///
/// En depuracion emite un formato compacto legible por humanos; en
/// release emite JSON de una linea por evento, apto para ingesta por un
/// agregador de logs. Tambien instala un panic hook que registra la
/// ubicacion y el mensaje del panico antes de que el hilo termine.
///
/// # Panics
/// Entra en panico si ya existe un suscriptor global instalado.
#[instrument(skip_all)]
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},tower_http=warn,hyper=warn,libsql=error",
            service_name,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    }

    let service_id = service_name.to_string();
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("non-string panic payload");

        error!(
            target: "panic_monitor",
            service = %service_id,
            location = %location,
            "thread terminated on panic: {}",
            payload
        );
    }));

    info!(service = %service_name, "tracing initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_does_not_panic_on_first_call() {
        init_tracing("aibom-telemetry-tests");
    }
}
