// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::EnumerationBackend;

/// Command-line arguments for `wingbridge`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wingbridge",
    version,
    about = "Send code from the editor to a running creative application.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Wingbridge.toml` in the current working directory if it
    /// exists, built-in defaults otherwise.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WINGBRIDGE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Force the process enumeration backend (native, fallback-cli,
    /// unavailable) instead of probing.
    #[arg(long, value_name = "BACKEND", global = true)]
    pub backend: Option<EnumerationBackend>,

    /// Load the config and print the adapters, but don't look at processes
    /// or run anything.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show which adapters can currently dispatch.
    Status,

    /// Print the PID and executable paths of processes with this exact name.
    Locate {
        name: String,
    },

    /// Print the executable path of a process.
    ExePath {
        pid: u32,
    },

    /// Send a selection, or a module/file reference, to the target.
    Send(SendArgs),

    /// Run a raw command string inside the target.
    Exec {
        #[command(flatten)]
        target: TargetArgs,

        /// The command string.
        command: String,
    },

    /// Write text to the adapter's temp file and print its path.
    WriteTemp {
        #[command(flatten)]
        target: TargetArgs,

        /// Text to write. Read from stdin when omitted.
        text: Option<String>,
    },
}

/// How to pick the adapter.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Use this adapter instead of auto-detecting one.
    #[arg(long, value_name = "NAME")]
    pub adapter: Option<String>,

    /// PID of an externally connected process; the adapter that owns it
    /// becomes active.
    #[arg(long, value_name = "PID")]
    pub pid: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Highlighted text to send verbatim.
    #[arg(long, value_name = "TEXT", conflicts_with = "stdin")]
    pub text: Option<String>,

    /// Read the highlighted text from stdin.
    #[arg(long)]
    pub stdin: bool,

    /// Module to import/reload in the target when no text is sent.
    #[arg(long = "module", value_name = "MODULE", default_value = "")]
    pub module_path: String,

    /// File executed by the target when the module cannot be imported.
    #[arg(long = "file", value_name = "PATH", default_value = "")]
    pub file_path: String,

    /// Editor document type (informational).
    #[arg(long, value_name = "TYPE", default_value = "")]
    pub doc_type: String,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
