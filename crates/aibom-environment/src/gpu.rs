// [crates/aibom-environment/src/gpu.rs]
//! Deteccion de GPU por invocacion best-effort de `nvidia-smi`, en
//! lugar de enlazar NVML directamente — el mismo patron de
//! subproceso que el escaneo de vulnerabilidades usa para Trivy.

use aibom_core::{GpuInfo, GpuSummary};
use tokio::process::Command;

const NVIDIA_SMI_QUERY: &[&str] = &[
    "--query-gpu=name,memory.total,memory.used",
    "--format=csv,noheader,nounits",
];

pub async fn collect() -> GpuSummary {
    let output = match Command::new("nvidia-smi").args(NVIDIA_SMI_QUERY).output().await {
        Ok(output) => output,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return GpuSummary::NoneDetected,
        Err(err) => return GpuSummary::Error { message: err.to_string() },
    };

    if !output.status.success() {
        return GpuSummary::Error { message: String::from_utf8_lossy(&output.stderr).trim().to_string() };
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let gpus: Vec<GpuInfo> = stdout.lines().filter_map(parse_gpu_line).collect();

    if gpus.is_empty() {
        GpuSummary::NoneDetected
    } else {
        GpuSummary::Detected { gpus }
    }
}

fn parse_gpu_line(line: &str) -> Option<GpuInfo> {
    let mut fields = line.split(',').map(str::trim);
    let name = fields.next()?.to_string();
    let memory_total_mb = fields.next()?.parse().ok()?;
    let memory_used_mb = fields.next()?.parse().ok()?;
    Some(GpuInfo { name, memory_total_mb, memory_used_mb })
}
