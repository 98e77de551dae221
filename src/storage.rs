//! Results Storage Module

use crate::types::ScoredApplication;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const RESULTS_FILE: &str = "ranking_results.json";

/// Write the full scored records next to the run, for audit and manual
/// inspection. The simplified projection goes to the ranking store instead.
pub fn save_results(root: &str, applications: &[ScoredApplication]) -> Result<()> {
    let path = PathBuf::from(root).join(RESULTS_FILE);
    let json = serde_json::to_string_pretty(applications)?;
    fs::write(&path, json).with_context(|| format!("Failed to write results to {:?}", path))?;
    Ok(())
}

/// Load a previous run's results; an absent file is an empty run.
pub fn load_results(root: &str) -> Result<Vec<ScoredApplication>> {
    let path = PathBuf::from(root).join(RESULTS_FILE);

    if !path.exists() {
        return Ok(vec![]);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read results from {:?}", path))?;

    let applications: Vec<ScoredApplication> =
        serde_json::from_str(&content).unwrap_or_else(|_| vec![]);

    Ok(applications)
}
