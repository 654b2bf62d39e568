// [crates/aibom-environment/src/vulnerability.rs]
//! Resumen de vulnerabilidades por severidad, producido invocando la
//! imagen oficial de Trivy como subproceso — el mismo enfoque que el
//! escaneo de referencia, reutilizado aqui tanto por la extraccion
//! puntual durante un job como por el escaneo periodico (C11).

use aibom_core::{ContainerSummary, VulnerabilitySummary};
use std::collections::BTreeMap;
use tokio::process::Command;

const TRIVY_IMAGE: &str = "aquasec/trivy:latest";

/// Interpreta un reporte Trivy ya almacenado (descargado por el
/// extractor desde el bucket de reportes periodicos) como el mismo
/// `VulnerabilitySummary` que un escaneo en vivo produciria.
pub fn parse_report(report_bytes: &[u8]) -> VulnerabilitySummary {
    match serde_json::from_slice::<serde_json::Value>(report_bytes) {
        Ok(report) => VulnerabilitySummary::BySeverity(summarize(&report)),
        Err(err) => VulnerabilitySummary::Error { error: format!("Could not parse Trivy report: {err}") },
    }
}

pub async fn scan(container: &ContainerSummary) -> VulnerabilitySummary {
    let image_name = match container {
        ContainerSummary::Containerized(info) if info.image_name != "Unknown" => info.image_name.clone(),
        _ => return VulnerabilitySummary::Error { error: "Docker image name is not available.".to_string() },
    };

    scan_image(&image_name).await
}

/// Ejecuta un escaneo Trivy en vivo contra `image_name`. Usado
/// exclusivamente por el escaner periodico (C11); el extractor de
/// entorno del worker (C7) nunca invoca Trivy directamente — lee el
/// reporte mas reciente ya publicado via [`parse_report`].
pub async fn scan_image(image_name: &str) -> VulnerabilitySummary {
    let output = Command::new("docker")
        .args([
            "run",
            "--rm",
            "-v",
            "/var/run/docker.sock:/var/run/docker.sock",
            TRIVY_IMAGE,
            "image",
            "--scanners",
            "vuln",
            "--format",
            "json",
            image_name,
        ])
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return VulnerabilitySummary::Error { error: "Docker CLI is not available.".to_string() }
        }
        Err(err) => return VulnerabilitySummary::Error { error: err.to_string() },
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return VulnerabilitySummary::Error { error: format!("Trivy scan failed: {stderr}") };
    }

    match serde_json::from_slice::<serde_json::Value>(&output.stdout) {
        Ok(report) => VulnerabilitySummary::BySeverity(summarize(&report)),
        Err(err) => VulnerabilitySummary::Error { error: format!("Could not parse Trivy report: {err}") },
    }
}

fn summarize(report: &serde_json::Value) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    let results = report.get("Results").and_then(|r| r.as_array()).cloned().unwrap_or_default();
    for result in results {
        let vulnerabilities = result.get("Vulnerabilities").and_then(|v| v.as_array()).cloned().unwrap_or_default();
        for vuln in vulnerabilities {
            let severity = vuln.get("Severity").and_then(|s| s.as_str()).unwrap_or("UNKNOWN").to_string();
            *counts.entry(severity).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarize_counts_vulnerabilities_by_severity() {
        let report = json!({
            "Results": [
                {"Vulnerabilities": [{"Severity": "HIGH"}, {"Severity": "HIGH"}, {"Severity": "LOW"}]}
            ]
        });
        let counts = summarize(&report);
        assert_eq!(counts.get("HIGH"), Some(&2));
        assert_eq!(counts.get("LOW"), Some(&1));
    }

    #[test]
    fn missing_results_yields_empty_summary() {
        let report = json!({});
        assert!(summarize(&report).is_empty());
    }

    #[tokio::test]
    async fn scan_without_a_containerized_image_reports_the_unavailable_error() {
        let summary = scan(&ContainerSummary::NotContainerized).await;
        assert!(matches!(summary, VulnerabilitySummary::Error { .. }));
    }

    #[test]
    fn parse_report_reads_a_stored_trivy_document() {
        let report = json!({"Results": [{"Vulnerabilities": [{"Severity": "CRITICAL"}]}]});
        let summary = parse_report(serde_json::to_vec(&report).unwrap().as_slice());
        match summary {
            VulnerabilitySummary::BySeverity(counts) => assert_eq!(counts.get("CRITICAL"), Some(&1)),
            VulnerabilitySummary::Error { .. } => panic!("expected a parsed summary"),
        }
    }

    #[test]
    fn parse_report_rejects_malformed_json() {
        let summary = parse_report(b"not json");
        assert!(matches!(summary, VulnerabilitySummary::Error { .. }));
    }
}
