pub mod cli;
pub mod config;
pub mod docker;
pub mod logging;
pub mod proc;
