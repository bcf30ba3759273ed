//! The benchmark command: three measurement passes over one buffer set.

use membw_core::{format_bytes, MembwError, Result, RunConfig, TransferKind};
use membw_cuda::{device_count, BufferSet, GpuDevice, TransferEngine};

use crate::output;

/// Byte pattern the host buffer is filled with before any measurement.
const FILL_PATTERN: u8 = 0xA5;

pub fn execute(config: &RunConfig) -> Result<()> {
    // Validation happens before any context or buffer exists; an
    // out-of-range index never touches the device.
    let count = device_count()?;
    config.validate(count)?;

    let device = GpuDevice::new(config.device_index)?;
    tracing::debug!(
        ordinal = device.ordinal(),
        name = device.name(),
        "selected device"
    );

    println!("Using device: {}", device.name());
    println!(
        "Transfer size: {} bytes ({}), Iterations: {}",
        config.transfer_size,
        format_bytes(config.transfer_size),
        config.iterations
    );

    let size = usize::try_from(config.transfer_size).map_err(|_| MembwError::InvalidSize {
        input: config.transfer_size.to_string(),
        reason: "size exceeds the addressable range on this platform".to_string(),
    })?;

    let mut buffers = BufferSet::allocate(&device, size)?;
    buffers.fill_host(FILL_PATTERN)?;

    let engine = TransferEngine::new(device);

    println!("Measuring memory bandwidth (per-transfer timing)...");
    for kind in TransferKind::ALL {
        let result = engine.measure(kind, &mut buffers, config.iterations)?;
        println!("{}", output::render_result(&result));
    }

    Ok(())
}
