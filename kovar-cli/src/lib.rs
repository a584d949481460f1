//! # Kovar CLI
//!
//! Command-line host for the Kovar designer.
//!
//! ## Usage
//!
//! ```bash
//! kovar export login.snapshot.json --out-dir build/
//! kovar name login.snapshot.json
//! kovar check login.snapshot.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved command plus export configuration
//! - [`commands`] - One function per subcommand, returning a summary

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kovar_core::ExportConfig;

pub use commands::{run, CheckReport, ExportOutcome, NameOutcome};

/// Command-line arguments for kovar.
#[derive(Debug, Clone, Parser)]
#[command(name = "kovar")]
#[command(about = "Kovar designer: export schemas and markup from design snapshots")]
#[command(version)]
pub struct CliArgs {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Indentation unit for markup output
    #[arg(long, global = true, env = "KOVAR_INDENT", default_value = "  ")]
    pub indent: String,

    /// Maximum object nesting depth accepted on export
    #[arg(long, global = true, env = "KOVAR_MAX_DEPTH", default_value_t = kovar_core::tree::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write `<stem>.kovar.json` and `<stem>.html` for a snapshot.
    Export {
        /// Snapshot document to export
        snapshot: PathBuf,

        /// Directory receiving the output files
        #[arg(long, env = "KOVAR_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Output file stem (default: snapshot file name up to its first dot)
        #[arg(long)]
        name: Option<String>,

        /// JSON object mapping asset references to sources
        #[arg(long, env = "KOVAR_ASSETS")]
        assets: Option<PathBuf>,
    },

    /// Give every object a unique public name and save the snapshot.
    Name {
        /// Snapshot document to update
        snapshot: PathBuf,

        /// Where to write the result (default: overwrite the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Verify that a snapshot loads, names are unique, and it exports.
    Check {
        /// Snapshot document to verify
        snapshot: PathBuf,
    },
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Subcommand to run.
    pub command: Command,
    /// Export settings shared by all subcommands.
    pub export: ExportConfig,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            command: args.command,
            export: ExportConfig {
                indent: args.indent,
                max_depth: args.max_depth,
                ..ExportConfig::default()
            },
        }
    }
}
