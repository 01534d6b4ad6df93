//! # CLI Argument Definitions
//!
//! Global flags configure where settings come from and how much gets logged; each subcommand
//! maps onto one custody workflow.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nodelock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Split a credential across a shared store and a hardware-bound local key")]
pub struct Cli {
    /// Configuration file (JSON, TOML or YAML)
    #[arg(short, long, global = true, env = "NODELOCK_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write rolling log files into this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a credential and write both sealed shares to the shared store
    Provision {
        /// The credential to protect
        #[arg(conflicts_with = "stdin", required_unless_present = "stdin")]
        credential: Option<String>,

        /// Read the credential from the first line of standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Bind Share B to this machine
    Enroll {},
    /// Reassemble the credential on an enrolled machine
    Recover {
        /// Print the credential instead of its length
        #[arg(long)]
        reveal: bool,
    },
    /// Show which artifacts exist
    Status {},
    /// Show which bound attributes this machine can read
    Probe {},
}
