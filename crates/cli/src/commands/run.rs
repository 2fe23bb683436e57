//! Scenario command

use anyhow::{Context, Result};
use banco_scenario::{Scenario, ScenarioRunner};
use std::path::Path;
use tracing::info;

use crate::OutputFormat;

/// Load, run and print a scenario
pub fn run_scenario(path: &Path, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))?;
    info!(path = %path.display(), steps = scenario.steps.len(), "scenario loaded");

    let report = ScenarioRunner::run(&scenario).context("Scenario run failed")?;
    info!(
        applied = report.applied_count(),
        rejected = report.rejected_count(),
        "scenario report ready"
    );

    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }
    Ok(())
}
