//! # RosetteCAM
//!
//! CNC output for segmented rosette rings: toolpaths, safety evaluation,
//! runtime estimates, G-code and export bundles.
//!
//! ## Architecture
//!
//! RosetteCAM is organized as a workspace with multiple crates:
//!
//! 1. **rosettecam-core** - Ring, slice, jig, envelope and toolpath types; material feed rules
//! 2. **rosettecam-devicedb** - Machine profiles and post-processor precedence
//! 3. **rosettecam-camtools** - Kerf physics, toolpaths, safety, simulation, G-code, bundles
//! 4. **rosettecam-settings** - JSON/TOML job files
//! 5. **rosettecam** - Command-line binary that ties the crates together

pub use rosettecam_camtools as camtools;
pub use rosettecam_core::{data, toolpath};
pub use rosettecam_devicedb as devicedb;
pub use rosettecam_settings as settings;

pub use rosettecam_camtools::{export_ring, RingExportRequest, RingExportResult};
pub use rosettecam_settings::JobConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Environment variable selecting the log format (`json` or text)
pub const LOG_FORMAT_ENV: &str = "ROSETTECAM_LOG_FORMAT";

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for command output
/// - RUST_LOG environment variable support (default `info`, `debug` when verbose)
/// - JSON lines when `ROSETTECAM_LOG_FORMAT=json`
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
