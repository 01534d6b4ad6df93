#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod args;
pub mod handlers;

use crate::args::{Cli, Command};

use anyhow::{Context, Result};
use clap::Parser;
use nodelock::CustodyError;
use nodelock_logger::{LogFile, Logger};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let _log = init_logger(&cli)?;
    debug!(config = %cli.config.display(), "Loading configuration");

    let custody = nodelock::open(Some(&cli.config))
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Command::Provision { credential, stdin } => handlers::provision(&custody, credential, stdin),
        Command::Enroll {} => handlers::enroll(&custody),
        Command::Recover { reveal } => handlers::recover(&custody, reveal),
        Command::Status {} => handlers::status(&custody),
        Command::Probe {} => handlers::probe(&custody),
    }
}

fn init_logger(cli: &Cli) -> Result<Logger> {
    Logger::builder(env!("CARGO_BIN_NAME"))
        .verbosity(cli.verbose)
        .file(cli.log_dir.as_deref().map(LogFile::new))
        .init()
        .context("Failed to initialize logging")
}

/// Process exit status for a failed command, one per custody error kind.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CustodyError>() {
        Some(CustodyError::Configuration { .. }) => 2,
        Some(CustodyError::NotProvisioned { .. }) => 3,
        Some(CustodyError::NotEnrolled { .. }) => 4,
        Some(CustodyError::HardwareMismatch { .. }) => 5,
        Some(CustodyError::SecretMismatch { .. }) => 6,
        _ => 1,
    }
}
