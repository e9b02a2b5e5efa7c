//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `rate_probe` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit-code mapping and user-facing output formatting
//!
//! Exit codes: 0 = a safe rate was found and reported; 1 = invalid
//! arguments, or throttling was observed before any rate was confirmed
//! safe. All probing logic lives in the library crate.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::process;

use rate_probe::initialization::init_logger_with;
use rate_probe::{run_probe, Opt, ProbeConfig, ProbeFailure};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments. clap exits with code 2 by default on
    // bad arguments; the probe's contract is exit 1, so handle it here.
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    // Validate and convert into the library configuration
    let config = match ProbeConfig::try_from(opt) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("rate_probe: {}", err);
            eprintln!("Try 'rate_probe --help' for usage.");
            process::exit(1);
        }
    };

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    if let Err(err) = init_logger_with(log_level.into(), log_format) {
        eprintln!("rate_probe: {}", err);
        process::exit(1);
    }

    // Run the probe using the library
    match run_probe(config).await {
        Ok(report) => {
            // Distinguished, greppable verdict line
            println!("\nLast safe rate limit: \n\n >>>>>>> {} <<<<<<\n\n", report.safe_rate);
            println!(
                "✅ Confirmed {} requests/minute safe in {} burst{} ({:.1}s); throttling began at {} requests/minute",
                report.safe_rate,
                report.bursts,
                if report.bursts == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.throttled_at
            );
            Ok(())
        }
        Err(e) => {
            if e.downcast_ref::<ProbeFailure>().is_some() {
                // Business-level verdict: the starting rate was already throttled
                eprintln!("{:#}", e);
            } else {
                eprintln!("rate_probe error: {:#}", e);
            }
            process::exit(1);
        }
    }
}
