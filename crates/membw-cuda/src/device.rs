//! CUDA device selection and enumeration.

use std::sync::Arc;

use cudarc::driver::{CudaContext, CudaSlice, CudaStream};

use membw_core::{MembwError, Result};

/// Wrapper around a cudarc context with the identity the benchmark needs.
///
/// The context and its default stream are created once per run and shared
/// by reference across all three measurement passes.
pub struct GpuDevice {
    /// The underlying cudarc context.
    ctx: Arc<CudaContext>,
    /// Default stream all transfers are issued on.
    stream: Arc<CudaStream>,
    /// Device ordinal.
    ordinal: usize,
    /// Device name, owned.
    name: String,
    /// Compute capability (major, minor).
    compute_capability: (u32, u32),
}

impl GpuDevice {
    /// Create a new device wrapper for the given ordinal.
    pub fn new(ordinal: usize) -> Result<Self> {
        let ctx = CudaContext::new(ordinal).map_err(|e| {
            MembwError::Backend(format!("failed to create CUDA context {}: {}", ordinal, e))
        })?;

        let name = ctx
            .name()
            .map_err(|e| MembwError::Backend(format!("failed to get device name: {}", e)))?;

        let (major, minor) = ctx.compute_capability().map_err(|e| {
            MembwError::Backend(format!("failed to get compute capability: {}", e))
        })?;

        let stream = ctx.default_stream();

        Ok(Self {
            ctx,
            stream,
            ordinal,
            name,
            compute_capability: (major as u32, minor as u32),
        })
    }

    /// Get device ordinal.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Get device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get compute capability as (major, minor).
    pub fn compute_capability(&self) -> (u32, u32) {
        self.compute_capability
    }

    /// Get the underlying cudarc context.
    pub fn context(&self) -> &Arc<CudaContext> {
        &self.ctx
    }

    /// Get the default stream.
    pub fn stream(&self) -> &Arc<CudaStream> {
        &self.stream
    }

    /// Allocate uninitialized device memory.
    pub fn alloc(&self, size: usize) -> Result<CudaSlice<u8>> {
        // Safety: the memory is only ever written by transfers before it
        // is read, and its contents are never inspected.
        unsafe {
            self.stream
                .alloc::<u8>(size)
                .map_err(|e| MembwError::AllocationFailed {
                    size,
                    reason: e.to_string(),
                })
        }
    }
}

/// Number of CUDA devices visible to the driver.
///
/// This is the bound for `--device` validation and runs before any
/// context is created for the selected device.
pub fn device_count() -> Result<usize> {
    let count = CudaContext::device_count()
        .map_err(|e| MembwError::Backend(format!("failed to count CUDA devices: {}", e)))?;
    Ok(count as usize)
}

/// Identity of one enumerated device, for `--list-devices`.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device ordinal (the flat index `--device` selects by).
    pub ordinal: usize,
    /// Device name.
    pub name: String,
    /// Compute capability (major, minor).
    pub compute_capability: (u32, u32),
}

impl From<&GpuDevice> for DeviceInfo {
    fn from(device: &GpuDevice) -> Self {
        Self {
            ordinal: device.ordinal,
            name: device.name.clone(),
            compute_capability: device.compute_capability,
        }
    }
}

/// Enumerate all CUDA devices.
pub fn enumerate_devices() -> Result<Vec<DeviceInfo>> {
    let count = device_count()?;

    let mut devices = Vec::with_capacity(count);
    for i in 0..count {
        match GpuDevice::new(i) {
            Ok(device) => devices.push(DeviceInfo::from(&device)),
            Err(e) => {
                tracing::warn!("failed to enumerate device {}: {}", i, e);
            }
        }
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires CUDA hardware
    fn test_device_enumeration() {
        let devices = enumerate_devices().unwrap();
        for device in &devices {
            println!(
                "[{}] {} (CC {}.{})",
                device.ordinal,
                device.name,
                device.compute_capability.0,
                device.compute_capability.1
            );
        }
        assert_eq!(devices.len(), device_count().unwrap());
    }

    #[test]
    #[ignore] // Requires CUDA hardware
    fn test_device_identity() {
        let device = GpuDevice::new(0).unwrap();
        assert_eq!(device.ordinal(), 0);
        assert!(!device.name().is_empty());

        let (major, _minor) = device.compute_capability();
        assert!(major > 0);
    }
}
