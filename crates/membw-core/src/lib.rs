//! # membw-core
//!
//! Device-independent core of the `membw` memory bandwidth benchmark:
//! the transfer data model, the statistics reduction that turns repeated
//! timing samples into bandwidth figures, size-argument parsing, and
//! human-readable formatting.
//!
//! The CUDA-facing half of the benchmark (device selection, buffer
//! management, the timed transfer engine) lives in `membw-cuda`; the
//! binary lives in `membw-cli`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod format;
pub mod stats;
pub mod types;

pub use config::{parse_size, RunConfig};
pub use error::{MembwError, Result};
pub use format::{format_bytes, format_rate};
pub use stats::MeasurementResult;
pub use types::{TransferKind, TransferSample};
