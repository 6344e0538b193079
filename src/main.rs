//! # RosetteCAM
//!
//! ```bash
//! rosettecam export ring3.toml --out-dir out/
//! rosettecam machines
//! rosettecam --json materials
//! ```

mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    rosettecam::init_logging(cli.verbose)?;
    tracing::debug!(
        version = rosettecam::VERSION,
        build = rosettecam::BUILD_DATE,
        "starting"
    );
    cli::run(cli)
}
