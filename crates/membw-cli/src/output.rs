//! Console rendering of measurement results and device listings.

use membw_core::{format_rate, MeasurementResult};
use membw_cuda::DeviceInfo;

/// One report line per measurement pass: scaled bandwidth, total elapsed
/// time, and mean ± population standard deviation per iteration.
pub fn render_result(result: &MeasurementResult) -> String {
    format!(
        "{:<18}{} ({:.3} ms total, {:.3} (+/- {:.3}) ms/iter)",
        format!("{}:", result.kind()),
        format_rate(result.bandwidth_bytes_per_sec()),
        result.total_ms(),
        result.mean_ms(),
        result.stddev_ms()
    )
}

/// One line per enumerated device for `--list-devices`.
pub fn render_device_line(device: &DeviceInfo) -> String {
    format!(
        "[{}] {} (CC {}.{})",
        device.ordinal, device.name, device.compute_capability.0, device.compute_capability.1
    )
}
