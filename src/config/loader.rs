use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

pub const CONFIG_FILE: &str = ".algorun.yaml";
pub const CONTAINER_ENV: &str = "ALGORUN_CONTAINER";

/// Load config from `.algorun.yaml` in `dir`, or defaults when absent.
pub fn load(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_from(&path)
}

/// Load config from an explicit file, which must exist.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    // An empty file deserializes to unit, not a map.
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid config {}", path.display()))
}

/// Apply environment overrides; `lookup` is `std::env::var` outside tests.
pub fn apply_env(mut cfg: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(container) = lookup(CONTAINER_ENV).filter(|v| !v.trim().is_empty()) {
        cfg.container = container;
    }
    cfg
}
