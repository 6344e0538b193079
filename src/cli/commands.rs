//! # CLI Command Implementations

use anyhow::{anyhow, Context};
use rosettecam_camtools::{export_ring, RingExportResult, SafetyDecision};
use rosettecam_core::{builtin_feed_rules, fallback_feed_rule};
use rosettecam_devicedb::list_machine_configs;
use rosettecam_settings::{locate_job_file, JobConfig};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status for a job the safety check blocked.
pub const EXIT_BLOCKED: u8 = 2;

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Load a job file, run the pipeline and write its artifacts.
pub fn cmd_export(
    job: &Path,
    out_dir: &Path,
    json_output: bool,
    allow_blocked: bool,
) -> anyhow::Result<ExitCode> {
    let path = locate_job_file(job)
        .ok_or_else(|| anyhow!("job file not found: {}", job.display()))?;
    let config = JobConfig::load_from_file(&path)
        .with_context(|| format!("failed to load job file {}", path.display()))?;

    let result = export_ring(&config.into_request());
    let blocked = result.bundle.safety.decision == SafetyDecision::Block;

    let written = if blocked && !allow_blocked {
        tracing::warn!(
            ring_id = result.bundle.ring_id,
            "export blocked, nothing written"
        );
        None
    } else {
        let paths = result
            .write_to_dir(out_dir)
            .with_context(|| format!("cannot write export to {}", out_dir.display()))?;
        Some((paths.gcode, paths.bundle))
    };

    if json_output {
        let summary = export_summary(&result, written.as_ref());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_export_summary(&result, written.as_ref());
    }

    if blocked && !allow_blocked {
        Ok(ExitCode::from(EXIT_BLOCKED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn export_summary(
    result: &RingExportResult,
    written: Option<&(PathBuf, PathBuf)>,
) -> serde_json::Value {
    let safety = &result.bundle.safety;
    json!({
        "ring_id": result.bundle.ring_id,
        "segments": result.bundle.toolpaths.len(),
        "passes": result.simulation.passes,
        "estimated_runtime_sec": result.simulation.estimated_runtime_sec,
        "dialect": result.post.dialect.to_string(),
        "safety": {
            "decision": safety.decision.as_str(),
            "risk_level": safety.risk_level.as_str(),
            "requires_override": safety.requires_override,
            "reasons": safety.reasons,
        },
        "gcode_path": written.map(|(g, _)| g.display().to_string()),
        "bundle_path": written.map(|(_, b)| b.display().to_string()),
    })
}

fn print_export_summary(result: &RingExportResult, written: Option<&(PathBuf, PathBuf)>) {
    let safety = &result.bundle.safety;
    println!("Ring {}", result.bundle.ring_id);
    println!("  Segments:  {}", result.bundle.toolpaths.len());
    println!("  Passes:    {}", result.simulation.passes);
    println!(
        "  Runtime:   {:.1} s (estimate)",
        result.simulation.estimated_runtime_sec
    );
    println!("  Dialect:   {}", result.post.dialect);
    println!(
        "  Safety:    {} ({} risk)",
        safety.decision, safety.risk_level
    );
    for reason in &safety.reasons {
        println!("    - {}", reason);
    }
    match written {
        Some((gcode, bundle)) => {
            println!("  G-code:    {}", gcode.display());
            println!("  Bundle:    {}", bundle.display());
        }
        None => println!("  Nothing written; pass --allow-blocked to write anyway"),
    }
}

// =============================================================================
// LISTING COMMANDS
// =============================================================================

/// List machine profiles.
pub fn cmd_machines(json_output: bool) -> anyhow::Result<()> {
    let machines = list_machine_configs();
    if json_output {
        println!("{}", serde_json::to_string_pretty(&machines)?);
        return Ok(());
    }

    println!(
        "{:<14} {:<8} {:>7} {:>5} {:>8}  Name",
        "ID", "Dialect", "Safe Z", "Tool", "Program"
    );
    for m in machines {
        let program = m
            .program_number
            .map_or_else(|| "-".to_string(), |p| format!("O{:04}", p));
        println!(
            "{:<14} {:<8} {:>7.1} {:>5} {:>8}  {}",
            m.machine_id,
            m.dialect.to_string(),
            m.default_safe_z_mm,
            m.default_tool_id,
            program,
            m.name
        );
    }
    Ok(())
}

/// List material feed rules, including the fallback.
pub fn cmd_materials(json_output: bool) -> anyhow::Result<()> {
    let mut rules = builtin_feed_rules();
    rules.push(fallback_feed_rule());
    if json_output {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!(
        "{:<10} {:>10} {:>10} {:>7} {:>10}",
        "Material", "Feed", "Max feed", "RPM", "Max step"
    );
    for r in rules {
        println!(
            "{:<10} {:>10.1} {:>10.1} {:>7} {:>10.2}",
            r.material, r.recommended_feed_mm_min, r.max_feed_mm_min, r.spindle_rpm, r.max_z_step_mm
        );
    }
    Ok(())
}
