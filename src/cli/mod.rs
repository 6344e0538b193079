//! # RosetteCAM CLI Module
//!
//! ## Available Commands
//!
//! - `export` - Run a job file through the pipeline and write G-code plus bundle
//! - `machines` - List built-in machine profiles
//! - `materials` - List built-in feed rules

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use commands::*;

/// RosetteCAM - rosette ring CNC output
///
/// Turns a segmented rosette ring into safety-checked G-code.
#[derive(Parser, Debug)]
#[command(name = "rosettecam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one ring from a JSON or TOML job file
    Export {
        /// Job file (.json or .toml); relative paths also resolve under the config dir's jobs/
        job: PathBuf,

        /// Directory for <ring_id>.nc and <ring_id>.bundle.json
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Write output even when the safety decision is block
        #[arg(long)]
        allow_blocked: bool,
    },

    /// List machine profiles
    Machines,

    /// List material feed rules
    Materials,
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Export {
            job,
            out_dir,
            allow_blocked,
        } => cmd_export(&job, &out_dir, cli.json, allow_blocked),
        Commands::Machines => cmd_machines(cli.json).map(|_| ExitCode::SUCCESS),
        Commands::Materials => cmd_materials(cli.json).map(|_| ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_arguments() {
        let cli = Cli::try_parse_from([
            "rosettecam",
            "export",
            "ring.toml",
            "--out-dir",
            "out",
            "--json",
            "--allow-blocked",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Export {
                job,
                out_dir,
                allow_blocked,
            } => {
                assert_eq!(job, PathBuf::from("ring.toml"));
                assert_eq!(out_dir, PathBuf::from("out"));
                assert!(allow_blocked);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_export_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["rosettecam", "export", "ring.json"]).unwrap();
        match cli.command {
            Commands::Export { out_dir, allow_blocked, .. } => {
                assert_eq!(out_dir, PathBuf::from("."));
                assert!(!allow_blocked);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::try_parse_from(["rosettecam", "machines", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Machines));
    }

    #[test]
    fn test_export_requires_job() {
        assert!(Cli::try_parse_from(["rosettecam", "export"]).is_err());
    }
}
