mod file;

use crate::error::{CliError, Result};
use file::FilePlan;
use pdbgraft::engine::plan::Plan;
use std::path::Path;
use tracing::debug;

/// Reads a TOML plan file into the core plan tree.
///
/// Structure and output locations are kept exactly as written; relative paths
/// resolve against the working directory of the process.
pub fn load_plan(path: &Path) -> Result<Plan> {
    debug!("Loading plan from file: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    parse_plan(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn parse_plan(content: &str) -> std::result::Result<Plan, toml::de::Error> {
    let file_plan: FilePlan = toml::from_str(content)?;
    debug!(
        "Plan declares {} structure(s), {} operation(s), {} output(s).",
        file_plan.structures.len(),
        file_plan.operations.len(),
        file_plan.outputs.len()
    );
    Ok(file_plan.into())
}
