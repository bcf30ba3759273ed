//! Buffer management for a benchmark run.

use cudarc::driver::{CudaSlice, PinnedHostSlice};

use membw_core::{MembwError, Result};

use crate::device::GpuDevice;

/// The three memory regions one benchmark run owns: a pinned
/// (page-locked) host buffer and two device-resident buffers, all of
/// identical byte size.
///
/// The set is allocated once, used by all three measurement passes, and
/// released together when dropped. No handle to an individual region
/// escapes the set, so nothing can touch a region after release.
pub struct BufferSet {
    /// Pinned host region, CPU-addressable for the pattern fill.
    host: PinnedHostSlice<u8>,
    /// First device region: destination of writes, source of reads and
    /// copies.
    dev_src: CudaSlice<u8>,
    /// Second device region: destination of device-to-device copies.
    dev_dst: CudaSlice<u8>,
    /// Region size in bytes.
    size: usize,
}

impl BufferSet {
    /// Allocate the full set on the given device.
    pub fn allocate(device: &GpuDevice, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(MembwError::AllocationFailed {
                size: 0,
                reason: "cannot allocate zero-length buffers".to_string(),
            });
        }

        // Safety: the pinned region is fully written by fill_host before
        // any transfer reads it.
        let host = unsafe { device.context().alloc_pinned::<u8>(size) }.map_err(|e| {
            MembwError::AllocationFailed {
                size,
                reason: format!("pinned host allocation failed: {}", e),
            }
        })?;

        let dev_src = device.alloc(size)?;
        let dev_dst = device.alloc(size)?;

        tracing::debug!(size, "allocated buffer set");

        Ok(Self {
            host,
            dev_src,
            dev_dst,
            size,
        })
    }

    /// Region size in bytes (identical for all three regions).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Fill the host region with a fixed byte pattern.
    pub fn fill_host(&mut self, byte: u8) -> Result<()> {
        self.host
            .as_mut_slice()
            .map_err(|e| MembwError::Backend(format!("failed to map host buffer: {}", e)))?
            .fill(byte);
        Ok(())
    }

    /// Host source and device destination for a host-to-device transfer.
    pub fn host_to_device(&mut self) -> (&PinnedHostSlice<u8>, &mut CudaSlice<u8>) {
        (&self.host, &mut self.dev_src)
    }

    /// Device source and host destination for a device-to-host transfer.
    pub fn device_to_host(&mut self) -> (&CudaSlice<u8>, &mut PinnedHostSlice<u8>) {
        (&self.dev_src, &mut self.host)
    }

    /// Device source and device destination for a device-to-device copy.
    pub fn device_to_device(&mut self) -> (&CudaSlice<u8>, &mut CudaSlice<u8>) {
        (&self.dev_src, &mut self.dev_dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires CUDA hardware
    fn test_buffer_set_allocation() {
        let device = GpuDevice::new(0).unwrap();
        let mut buffers = BufferSet::allocate(&device, 4096).unwrap();
        assert_eq!(buffers.size(), 4096);

        buffers.fill_host(0xA5).unwrap();
        let (host, _) = buffers.host_to_device();
        assert!(host.as_slice().unwrap().iter().all(|&b| b == 0xA5));
    }

    #[test]
    #[ignore] // Requires CUDA hardware
    fn test_zero_length_allocation_is_rejected() {
        let device = GpuDevice::new(0).unwrap();
        let result = BufferSet::allocate(&device, 0);
        assert!(matches!(
            result,
            Err(MembwError::AllocationFailed { size: 0, .. })
        ));
    }
}
