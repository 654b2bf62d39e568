// [crates/aibom-ml/src/device.rs]
//! Politica de seleccion de dispositivo: GPU si esta disponible, si no
//! CPU, si ninguna lo esta el job aborta antes de entrar a Training.

use crate::error::MlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Gpu,
    Cpu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceAvailability {
    pub gpu_available: bool,
    pub cpu_available: bool,
}

pub fn select_device(availability: DeviceAvailability) -> Result<Device, MlError> {
    if availability.gpu_available {
        Ok(Device::Gpu)
    } else if availability.cpu_available {
        Ok(Device::Cpu)
    } else {
        Err(MlError::NoDeviceAvailable("neither a GPU nor a CPU device is available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_gpu_over_cpu() {
        let device = select_device(DeviceAvailability { gpu_available: true, cpu_available: true }).unwrap();
        assert_eq!(device, Device::Gpu);
    }

    #[test]
    fn falls_back_to_cpu_when_no_gpu() {
        let device = select_device(DeviceAvailability { gpu_available: false, cpu_available: true }).unwrap();
        assert_eq!(device, Device::Cpu);
    }

    #[test]
    fn aborts_when_no_device_is_available() {
        let err = select_device(DeviceAvailability { gpu_available: false, cpu_available: false }).unwrap_err();
        assert!(matches!(err, MlError::NoDeviceAvailable(_)));
    }
}
