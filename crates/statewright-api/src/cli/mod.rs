//! CLI command definitions for the `swright` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Declare workflow state machines and run instances of them.
#[derive(Parser)]
#[command(name = "swright", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "STATEWRIGHT_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log directives for the chosen verbosity (`RUST_LOG` still wins).
    pub fn log_directives(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,statewright=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Path to the TOML config file (default: $STATEWRIGHT_CONFIG or ./config.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a workflow definition JSON file without starting a server.
    Validate {
        /// Path to the definition file.
        file: PathBuf,
    },
}
