//! End-to-end bandwidth measurement tests.
//!
//! Run with: cargo test -p membw-cuda --release -- --nocapture --ignored

use membw_core::{format_rate, TransferKind};
use membw_cuda::{BufferSet, GpuDevice, TransferEngine};

#[test]
#[ignore] // Requires CUDA hardware
fn test_full_run_over_all_three_paths() {
    let device = GpuDevice::new(0).expect("failed to create device");
    println!("Using device: {}", device.name());

    // 1 MiB, 2 iterations: the smallest configuration that still
    // exercises the aggregate statistics.
    let size = 1024 * 1024;
    let iterations = 2;

    let mut buffers = BufferSet::allocate(&device, size).expect("failed to allocate buffers");
    buffers.fill_host(0xA5).expect("failed to fill host buffer");

    let engine = TransferEngine::new(device);

    let mut results = Vec::new();
    for kind in TransferKind::ALL {
        let result = engine
            .measure(kind, &mut buffers, iterations)
            .expect("measurement pass failed");
        println!(
            "{}: {} ({:.3} ms total)",
            result.kind(),
            format_rate(result.bandwidth_bytes_per_sec()),
            result.total_ms()
        );
        results.push(result);
    }

    assert_eq!(results.len(), 3);
    for result in &results {
        assert_eq!(result.sample_count(), iterations as usize);
        assert_eq!(result.bytes_per_transfer(), size as u64);
        assert!(result.bandwidth_bytes_per_sec() > 0.0);
        assert!(result.total_ms() > 0.0);
        assert!(result.mean_ms() <= result.total_ms());
    }
}

#[test]
#[ignore] // Requires CUDA hardware
fn test_passes_share_one_buffer_set() {
    let device = GpuDevice::new(0).expect("failed to create device");
    let mut buffers = BufferSet::allocate(&device, 256 * 1024).expect("failed to allocate");
    buffers.fill_host(0xA5).expect("failed to fill");

    let engine = TransferEngine::new(device);

    // The same set backs consecutive passes without reallocation.
    let first = engine
        .measure(TransferKind::HostToDevice, &mut buffers, 1)
        .expect("write pass failed");
    let second = engine
        .measure(TransferKind::DeviceToHost, &mut buffers, 1)
        .expect("read pass failed");

    assert_eq!(first.bytes_per_transfer(), second.bytes_per_transfer());
}
