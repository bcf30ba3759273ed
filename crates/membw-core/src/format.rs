//! Human-readable scaling of byte counts and transfer rates.
//!
//! Binary (1024-based) units throughout, two decimals.

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const RATE_UNITS: [&str; 5] = ["B/s", "KB/s", "MB/s", "GB/s", "TB/s"];

fn scale(value: f64, units: &[&str; 5]) -> String {
    let mut value = value;
    let mut unit = 0;
    while value >= 1024.0 && unit < units.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, units[unit])
}

/// Format a byte count with a scaled binary unit, e.g. `1.00 GB`.
pub fn format_bytes(bytes: u64) -> String {
    scale(bytes as f64, &SIZE_UNITS)
}

/// Format a transfer rate in bytes per second with a scaled binary unit,
/// e.g. `976.56 GB/s`.
pub fn format_rate(bytes_per_sec: f64) -> String {
    scale(bytes_per_sec, &RATE_UNITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_one_kib_stay_in_bytes() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
    }

    #[test]
    fn bytes_scale_at_binary_boundaries() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
        assert_eq!(format_bytes(1024u64.pow(4)), "1.00 TB");
    }

    #[test]
    fn bytes_above_tib_keep_tib_unit() {
        assert_eq!(format_bytes(2048 * 1024u64.pow(4)), "2048.00 TB");
    }

    #[test]
    fn fractional_scaling() {
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(512 * 1024 * 1024), "512.00 MB");
    }

    #[test]
    fn rates_use_per_second_units() {
        assert_eq!(format_rate(512.0), "512.00 B/s");
        assert_eq!(format_rate(2048.0), "2.00 KB/s");
        // 4 MiB moved in 4 ms: 1_048_576_000_000 B/s.
        assert_eq!(format_rate(1_048_576_000_000.0), "976.56 GB/s");
    }
}
