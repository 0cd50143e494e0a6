use serde::{Deserialize, Serialize};

/// Where the node lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the container running the node.
    pub container: String,
    /// Container engine binary.
    pub engine: String,
    /// Executable inside the container that commands are forwarded to.
    pub executable: String,
    /// Shell opened by `--console`.
    pub shell: String,
    /// Working directory of the console session.
    pub console_workdir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container: "mainnet-container".to_string(),
            engine: "docker".to_string(),
            executable: "goal".to_string(),
            shell: "bash".to_string(),
            console_workdir: "/root".to_string(),
        }
    }
}
