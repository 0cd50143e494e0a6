mod loader;
mod types;

pub use loader::{CONFIG_FILE, CONTAINER_ENV, apply_env, load, load_from};
pub use types::Config;
