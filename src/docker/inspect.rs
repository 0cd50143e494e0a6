use thiserror::Error;
use tracing::{Level, debug};

use super::types::ContainerStatus;
use crate::proc::{ProcError, ProcessRunner, RunOptions};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("could not query container state")]
    Query(#[source] ProcError),

    #[error("container listing failed (exit {exit_code})")]
    Failed { exit_code: i32 },

    #[error("unreadable container listing")]
    Parse(#[source] serde_json::Error),
}

/// Read-only view of container state.
pub trait ContainerInspector {
    /// Containers whose name matches `name`. An empty list means nothing
    /// matched; it is not an error.
    fn ps(&self, name: &str) -> Result<Vec<ContainerStatus>, InspectError>;
}

/// Asks the engine CLI for a JSON listing.
pub struct EngineInspector<'a> {
    runner: &'a dyn ProcessRunner,
    engine: &'a str,
}

impl<'a> EngineInspector<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, engine: &'a str) -> Self {
        Self { runner, engine }
    }
}

impl ContainerInspector for EngineInspector<'_> {
    fn ps(&self, name: &str) -> Result<Vec<ContainerStatus>, InspectError> {
        let argv = ps_command(self.engine, name);
        let options = RunOptions::default().log_stdout(Level::TRACE);
        let result = self.runner.run(&argv, &options).map_err(InspectError::Query)?;

        if !result.success() {
            return Err(InspectError::Failed {
                exit_code: result.exit_code,
            });
        }

        let records = parse_listing(result.output.as_deref().unwrap_or_default())
            .map_err(InspectError::Parse)?;
        debug!(name, matches = records.len(), "container listing");
        Ok(records)
    }
}

/// `ps` form listing every container (stopped ones too) whose name is
/// exactly `name`, one JSON object per line.
pub fn ps_command(engine: &str, name: &str) -> Vec<String> {
    vec![
        engine.to_string(),
        "ps".into(),
        "--all".into(),
        "--filter".into(),
        format!("name=^/?{}$", name.replace('.', "\\.")),
        "--format".into(),
        "{{json .}}".into(),
    ]
}

/// Accepts newline-delimited objects as well as a single JSON array.
pub fn parse_listing(raw: &str) -> Result<Vec<ContainerStatus>, serde_json::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }
    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<ContainerStatus>)
        .collect()
}
