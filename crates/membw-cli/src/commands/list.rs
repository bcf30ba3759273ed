//! `--list-devices`: print the enumerated CUDA devices and exit.

use membw_core::Result;
use membw_cuda::enumerate_devices;

use crate::output;

pub fn execute() -> Result<()> {
    let devices = enumerate_devices()?;

    if devices.is_empty() {
        println!("No CUDA devices found.");
        return Ok(());
    }

    for device in &devices {
        println!("{}", output::render_device_line(device));
    }

    Ok(())
}
