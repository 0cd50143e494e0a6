// Container engine CLI: health check, exec command lines, state queries.

pub mod engine;
pub mod inspect;
pub mod types;

pub use engine::{ENGINE_NOT_RUNNING, console_command, ensure_available, exec_command};
pub use inspect::{ContainerInspector, EngineInspector, InspectError};
pub use types::{ContainerStatus, is_running};
