//! CUDA backend for the membw bandwidth benchmark, built on cudarc.
//!
//! Provides device enumeration and selection, the pinned-host/device
//! buffer set a run owns, CUDA-event transfer timing, and the timed
//! transfer engine that produces one [`membw_core::MeasurementResult`]
//! per measured path.
//!
//! # Requirements
//!
//! - An NVIDIA GPU and a working CUDA driver
//!
//! # Example
//!
//! ```ignore
//! use membw_core::TransferKind;
//! use membw_cuda::{BufferSet, GpuDevice, TransferEngine};
//!
//! let device = GpuDevice::new(0)?;
//! let mut buffers = BufferSet::allocate(&device, 1024 * 1024)?;
//! buffers.fill_host(0xA5)?;
//!
//! let engine = TransferEngine::new(device);
//! let result = engine.measure(TransferKind::HostToDevice, &mut buffers, 10)?;
//! println!("{:.2} GB/s", result.bandwidth_bytes_per_sec() / 1e9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod device;
mod engine;
mod event;
mod memory;

pub use device::{device_count, enumerate_devices, DeviceInfo, GpuDevice};
pub use engine::TransferEngine;
pub use event::{CudaEvent, TransferTimer};
pub use memory::BufferSet;
