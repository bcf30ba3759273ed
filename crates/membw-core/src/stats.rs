//! Statistics reduction for one measurement pass.

use crate::error::{MembwError, Result};
use crate::types::{TransferKind, TransferSample};

/// Aggregate result of one measurement pass: `iterations` repeated
/// transfers of a single [`TransferKind`], reduced once and immutable
/// afterwards.
///
/// Bandwidth is aggregate bytes moved over aggregate elapsed time for the
/// whole pass, not an average of per-sample rates.
#[derive(Debug, Clone)]
pub struct MeasurementResult {
    kind: TransferKind,
    bytes_per_transfer: u64,
    samples: Vec<TransferSample>,
    total_ms: f64,
    mean_ms: f64,
    stddev_ms: f64,
    bandwidth_bytes_per_sec: f64,
}

impl MeasurementResult {
    /// Reduce an ordered sample sequence into aggregate statistics.
    ///
    /// The standard deviation uses the population divisor N (not N - 1):
    /// the pass is the entire population of interest, not a sample drawn
    /// from one.
    pub fn from_samples(
        kind: TransferKind,
        bytes_per_transfer: u64,
        samples: Vec<TransferSample>,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(MembwError::EmptySamples);
        }

        let n = samples.len() as f64;
        let total_ms: f64 = samples.iter().map(TransferSample::elapsed_ms).sum();
        let mean_ms = total_ms / n;
        let variance = samples
            .iter()
            .map(|s| {
                let diff = s.elapsed_ms() - mean_ms;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let stddev_ms = variance.sqrt();

        let total_bytes = samples.len() as f64 * bytes_per_transfer as f64;
        let bandwidth_bytes_per_sec = total_bytes / (total_ms / 1000.0);

        Ok(Self {
            kind,
            bytes_per_transfer,
            samples,
            total_ms,
            mean_ms,
            stddev_ms,
            bandwidth_bytes_per_sec,
        })
    }

    /// Which path this pass measured.
    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    /// Bytes moved by each individual transfer.
    pub fn bytes_per_transfer(&self) -> u64 {
        self.bytes_per_transfer
    }

    /// Number of samples in the pass (equals the configured iteration
    /// count).
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// The ordered samples.
    pub fn samples(&self) -> &[TransferSample] {
        &self.samples
    }

    /// Sum of all sample times in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Arithmetic mean per-transfer time in milliseconds.
    pub fn mean_ms(&self) -> f64 {
        self.mean_ms
    }

    /// Population standard deviation of per-transfer times in
    /// milliseconds.
    pub fn stddev_ms(&self) -> f64 {
        self.stddev_ms
    }

    /// Aggregate bandwidth in bytes per second.
    pub fn bandwidth_bytes_per_sec(&self) -> f64 {
        self.bandwidth_bytes_per_sec
    }
}
