// [crates/aibom-environment/src/container.rs]
//! Identidad de contenedor: solo se intenta resolver cuando
//! `/.dockerenv` existe, igual que el extractor de referencia.

use aibom_core::{ContainerInfo, ContainerSummary};
use bollard::container::InspectContainerOptions;
use bollard::Docker;

const DOCKERENV_MARKER: &str = "/.dockerenv";

pub async fn collect() -> ContainerSummary {
    if !std::path::Path::new(DOCKERENV_MARKER).exists() {
        return ContainerSummary::NotContainerized;
    }

    let container_id = std::env::var("HOSTNAME").unwrap_or_else(|_| "Unknown".to_string());

    let docker = match Docker::connect_with_local_defaults() {
        Ok(docker) => docker,
        Err(err) => return ContainerSummary::Error { message: err.to_string() },
    };

    let options = Some(InspectContainerOptions { size: false });
    match docker.inspect_container(&container_id, options).await {
        Ok(details) => {
            let image_name = details
                .config
                .as_ref()
                .and_then(|c| c.image.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            let image_id = details.image.unwrap_or_else(|| "Unknown".to_string());
            ContainerSummary::Containerized(ContainerInfo { container_id, image_name, image_id })
        }
        Err(err) => ContainerSummary::Error { message: err.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_containerized_when_dockerenv_marker_is_absent() {
        if std::path::Path::new(DOCKERENV_MARKER).exists() {
            return;
        }
        assert!(matches!(collect().await, ContainerSummary::NotContainerized));
    }
}
