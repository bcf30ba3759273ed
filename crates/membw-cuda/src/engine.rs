//! The timed transfer engine.

use membw_core::{MeasurementResult, MembwError, Result, TransferKind, TransferSample};

use crate::device::GpuDevice;
use crate::event::TransferTimer;
use crate::memory::BufferSet;

/// Issues repeated transfers of one [`TransferKind`] and reduces the
/// per-transfer device timings into a [`MeasurementResult`].
///
/// Each iteration is fully waited on before the next is issued: the point
/// of the tool is one clean timing sample per transfer, not pipelined
/// throughput. Any driver failure aborts the whole run.
pub struct TransferEngine {
    device: GpuDevice,
}

impl TransferEngine {
    /// Create an engine for the given device.
    pub fn new(device: GpuDevice) -> Self {
        Self { device }
    }

    /// Run one measurement pass: `iterations` sequential transfers of
    /// `kind` over `buffers`, each timed by a device-side event pair.
    ///
    /// Produces exactly `iterations` samples or fails.
    pub fn measure(
        &self,
        kind: TransferKind,
        buffers: &mut BufferSet,
        iterations: u32,
    ) -> Result<MeasurementResult> {
        if iterations == 0 {
            return Err(MembwError::InvalidIterations);
        }

        let size = buffers.size();
        let mut timer = TransferTimer::new()?;
        let mut samples = Vec::with_capacity(iterations as usize);

        for _ in 0..iterations {
            // Safety: the device context is active for the lifetime of
            // self.device, and the copy is enqueued on the same (default)
            // stream the events are recorded on.
            let elapsed_ms = unsafe {
                timer.start_default()?;
                self.issue(kind, buffers)?;
                timer.stop_default()?;
                timer.elapsed_ms()?
            };

            tracing::debug!(kind = %kind, elapsed_ms, "transfer sample");
            samples.push(TransferSample::from_elapsed_ms(f64::from(elapsed_ms)));
            timer.reset();
        }

        MeasurementResult::from_samples(kind, size as u64, samples)
    }

    /// Enqueue one asynchronous copy of `kind` on the device stream.
    fn issue(&self, kind: TransferKind, buffers: &mut BufferSet) -> Result<()> {
        let stream = self.device.stream();

        let copied = match kind {
            TransferKind::HostToDevice => {
                let (host, dev) = buffers.host_to_device();
                stream.memcpy_htod(host, dev)
            }
            TransferKind::DeviceToHost => {
                let (dev, host) = buffers.device_to_host();
                stream.memcpy_dtoh(dev, host)
            }
            TransferKind::DeviceToDevice => {
                let (src, dst) = buffers.device_to_device();
                stream.memcpy_dtod(src, dst)
            }
        };

        copied.map_err(|e| MembwError::TransferFailed(format!("{} copy failed: {}", kind, e)))
    }
}
