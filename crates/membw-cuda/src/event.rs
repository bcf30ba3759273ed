//! CUDA event wrappers for device-side transfer timing.
//!
//! A [`TransferTimer`] is the benchmark's timing token: a start/stop event
//! pair recorded on the transfer stream around one copy. The elapsed time
//! between the events is measured by the device itself, so the sample
//! reflects the transfer and not host-side call overhead.

use std::ptr;

use cudarc::driver::result as cuda_result;
use cudarc::driver::sys as cuda_sys;

use membw_core::{MembwError, Result};

/// A CUDA event with timing enabled.
pub struct CudaEvent {
    event: cuda_sys::CUevent,
}

impl CudaEvent {
    /// Create a new CUDA event.
    pub fn new() -> Result<Self> {
        let event = cuda_result::event::create(cuda_sys::CUevent_flags::CU_EVENT_DEFAULT)
            .map_err(|e| MembwError::Backend(format!("failed to create CUDA event: {:?}", e)))?;
        Ok(Self { event })
    }

    /// Record this event on a stream.
    ///
    /// All work submitted to the stream before this call completes before
    /// the event.
    ///
    /// # Safety
    ///
    /// The stream must be valid and belong to the current CUDA context.
    pub unsafe fn record(&self, stream: cuda_sys::CUstream) -> Result<()> {
        cuda_result::event::record(self.event, stream)
            .map_err(|e| MembwError::Backend(format!("failed to record CUDA event: {:?}", e)))
    }

    /// Record this event on the default (null) stream.
    ///
    /// # Safety
    ///
    /// A CUDA context must be active on the current thread.
    pub unsafe fn record_default(&self) -> Result<()> {
        self.record(ptr::null_mut())
    }

    /// Block until all work captured by this event has completed.
    ///
    /// # Safety
    ///
    /// The event must have been recorded on a stream.
    pub unsafe fn synchronize(&self) -> Result<()> {
        cuda_result::event::synchronize(self.event)
            .map_err(|e| MembwError::Backend(format!("failed to synchronize CUDA event: {:?}", e)))
    }
}

impl Drop for CudaEvent {
    fn drop(&mut self) {
        // Safety: we own this event and it is being destroyed.
        unsafe {
            let _ = cuda_result::event::destroy(self.event);
        }
    }
}

// Safety: CUDA events can be used from any thread within the same context.
unsafe impl Send for CudaEvent {}
unsafe impl Sync for CudaEvent {}

/// Start/stop event pair timing one transfer on the device clock.
///
/// The pair is reusable: `reset` releases the previous measurement so the
/// same events can time the next iteration.
pub struct TransferTimer {
    start: CudaEvent,
    stop: CudaEvent,
    started: bool,
    stopped: bool,
}

impl TransferTimer {
    /// Create a new timer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            start: CudaEvent::new()?,
            stop: CudaEvent::new()?,
            started: false,
            stopped: false,
        })
    }

    /// Record the start event on the default (null) stream.
    ///
    /// # Safety
    ///
    /// A CUDA context must be active on the current thread.
    pub unsafe fn start_default(&mut self) -> Result<()> {
        self.start.record_default()?;
        self.started = true;
        self.stopped = false;
        Ok(())
    }

    /// Record the stop event on the default (null) stream.
    ///
    /// # Safety
    ///
    /// A CUDA context must be active on the current thread, and `start_default`
    /// must have been called.
    pub unsafe fn stop_default(&mut self) -> Result<()> {
        if !self.started {
            return Err(MembwError::Backend(
                "transfer timer stopped before it was started".to_string(),
            ));
        }
        self.stop.record_default()?;
        self.stopped = true;
        Ok(())
    }

    /// Elapsed time between the start and stop events in milliseconds.
    ///
    /// Blocks until the stop event has completed, which is also the
    /// engine's "wait for this specific transfer" point.
    ///
    /// # Safety
    ///
    /// `start_default` and `stop_default` must have been called.
    pub unsafe fn elapsed_ms(&self) -> Result<f32> {
        if !self.stopped {
            return Err(MembwError::Backend(
                "transfer timer queried before it was stopped".to_string(),
            ));
        }

        self.stop.synchronize()?;

        cuda_result::event::elapsed(self.start.event, self.stop.event)
            .map_err(|e| MembwError::Backend(format!("failed to get elapsed time: {:?}", e)))
    }

    /// Release the current measurement so the event pair can be reused.
    pub fn reset(&mut self) {
        self.started = false;
        self.stopped = false;
    }

    /// Whether the timer has been started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the timer has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
