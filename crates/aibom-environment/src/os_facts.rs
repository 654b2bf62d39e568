// [crates/aibom-environment/src/os_facts.rs]
//! Hechos de sistema operativo, CPU y memoria, recolectados via
//! `sysinfo`. Cada lectura que no resuelve cae a `"Unknown"` en vez de
//! abortar la recoleccion.

use aibom_core::environment::UNKNOWN;
use sysinfo::System;

pub struct OsFacts {
    pub os: String,
    pub cpu_count: String,
    pub memory_total_mb: String,
    pub disk_usage_mb: String,
}

pub fn collect() -> OsFacts {
    let mut system = System::new_all();
    system.refresh_all();

    let os = match (System::name(), System::os_version()) {
        (Some(name), Some(version)) => format!("{name} {version}"),
        (Some(name), None) => name,
        _ => UNKNOWN.to_string(),
    };

    let cpu_count = num_cpus::get().to_string();
    let memory_total_mb = (system.total_memory() / (1024 * 1024)).to_string();

    let disk_usage_mb = sysinfo::Disks::new_with_refreshed_list()
        .list()
        .first()
        .map(|disk| (disk.total_space() / (1024 * 1024)).to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    OsFacts { os, cpu_count, memory_total_mb, disk_usage_mb }
}

/// Version de TensorFlow anunciada por el entorno de ejecucion del
/// motor de entrenamiento; `"Unknown"` cuando no esta disponible, la
/// misma convencion que el resto de los sensores de este crate.
pub fn tensorflow_version() -> String {
    std::env::var("AIBOM_TENSORFLOW_VERSION").unwrap_or_else(|_| UNKNOWN.to_string())
}

pub fn python_version() -> String {
    std::env::var("AIBOM_PYTHON_VERSION").unwrap_or_else(|_| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_never_panics_and_populates_cpu_count() {
        let facts = collect();
        assert!(!facts.cpu_count.is_empty());
    }

    #[test]
    fn missing_env_vars_fall_back_to_unknown() {
        std::env::remove_var("AIBOM_TENSORFLOW_VERSION");
        assert_eq!(tensorflow_version(), UNKNOWN);
    }
}
