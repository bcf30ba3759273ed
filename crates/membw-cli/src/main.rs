//! membw - GPU memory transfer bandwidth benchmark.
//!
//! Measures host→device, device→host, and device→device transfer
//! bandwidth with per-transfer device-side timing.
//!
//! # Examples
//!
//! ```bash
//! # List available CUDA devices
//! membw --list-devices
//!
//! # Benchmark device 0 with the default 1 GiB transfer
//! membw
//!
//! # 512 MiB transfers, 10 timed iterations per path, on device 1
//! membw --device 1 --size 512M --iter 10
//! ```

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use membw_core::{parse_size, RunConfig};

mod commands;
mod output;

/// GPU memory transfer bandwidth benchmark
#[derive(Parser, Debug)]
#[command(name = "membw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// List all CUDA devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Select CUDA device by index
    #[arg(long, default_value_t = 0, value_name = "N")]
    device: usize,

    /// Transfer size (e.g. 512M, 1.25G)
    #[arg(long, default_value = "1G", value_name = "VALUE")]
    size: String,

    /// Number of iterations per transfer path
    #[arg(long, default_value_t = 1, value_name = "N")]
    iter: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> membw_core::Result<()> {
    if cli.list_devices {
        return commands::list::execute();
    }

    let config = RunConfig {
        device_index: cli.device,
        transfer_size: parse_size(&cli.size)?,
        iterations: cli.iter,
    };

    commands::bench::execute(&config)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version exit 0; any argument error exits 1
            // (clap's default usage-error code is 2).
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if e.is_validation() {
                eprintln!("Run 'membw --help' for usage.");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::try_parse_from(["membw"]).unwrap();
        assert!(!cli.list_devices);
        assert_eq!(cli.device, 0);
        assert_eq!(cli.size, "1G");
        assert_eq!(cli.iter, 1);
    }

    #[test]
    fn all_flags_parse() {
        let cli = Cli::try_parse_from([
            "membw", "--device", "1", "--size", "512M", "--iter", "10", "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.device, 1);
        assert_eq!(cli.size, "512M");
        assert_eq!(cli.iter, 10);
        assert!(cli.verbose);
    }

    #[test]
    fn list_devices_flag() {
        let cli = Cli::try_parse_from(["membw", "--list-devices"]).unwrap();
        assert!(cli.list_devices);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["membw", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["membw", "--device"]).is_err());
    }

    #[test]
    fn non_numeric_iter_is_rejected() {
        assert!(Cli::try_parse_from(["membw", "--iter", "many"]).is_err());
    }
}
