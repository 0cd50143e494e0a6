use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One container as reported by the engine's JSON listing.
///
/// Only the fields this tool reads are typed; everything else the engine
/// emits is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerStatus {
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Names", alias = "Name", default)]
    pub name: String,
    #[serde(rename = "Service", default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContainerStatus {
    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }
}

/// True only when the listing is exactly one container and it is running.
///
/// Zero matches, several matches, or any other state all count as "not
/// confirmed running".
pub fn is_running(records: &[ContainerStatus]) -> bool {
    records.len() == 1 && records[0].is_running()
}
