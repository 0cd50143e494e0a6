// Command-line surface.

pub mod goal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// algorun - operate an Algorand node running in a container
///
/// Options go before the subcommand; everything after `goal` belongs to goal.
#[derive(Debug, Parser)]
#[command(name = "algorun")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ./.algorun.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the Algorand goal CLI against your mainnet node.
    Goal(goal::GoalArgs),
}

/// Map a child's exit code to one this process can exit with.
///
/// On Unix, signal deaths (`-signal`) become `128 + signal`, as a shell
/// reports them. Elsewhere negative codes are real statuses (NTSTATUS on
/// Windows) and pass through unchanged.
#[cfg(unix)]
pub fn exit_status(code: i32) -> i32 {
    if code < 0 { 128 - code } else { code }
}

#[cfg(not(unix))]
pub fn exit_status(code: i32) -> i32 {
    code
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn goal_arguments_pass_through_including_flags() {
        let cli = parse(&["algorun", "goal", "node", "status", "-d", "/data", "--help"]);
        let Commands::Goal(args) = cli.command;
        assert!(!args.console);
        assert_eq!(args.goal_args, vec!["node", "status", "-d", "/data", "--help"]);
    }

    #[test]
    fn leading_hyphen_argument_is_forwarded() {
        let cli = parse(&["algorun", "goal", "-v"]);
        let Commands::Goal(args) = cli.command;
        assert_eq!(args.goal_args, vec!["-v"]);
        assert!(!cli.verbose);
    }

    #[test]
    fn console_flag_and_container_override() {
        let cli = parse(&["algorun", "--verbose", "goal", "--console", "--container", "x"]);
        let Commands::Goal(args) = cli.command;
        assert!(cli.verbose);
        assert!(args.console);
        assert_eq!(args.container.as_deref(), Some("x"));
        assert!(args.goal_args.is_empty());
    }

    #[test]
    fn options_after_goal_arguments_are_forwarded() {
        let cli = parse(&["algorun", "goal", "node", "status", "--console"]);
        let Commands::Goal(args) = cli.command;
        assert!(!args.console);
        assert_eq!(args.goal_args, vec!["node", "status", "--console"]);
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_maps_signals_like_a_shell() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(1), 1);
        assert_eq!(exit_status(137), 137);
        assert_eq!(exit_status(-9), 137);
        assert_eq!(exit_status(-2), 130);
    }

    #[cfg(not(unix))]
    #[test]
    fn exit_status_passes_codes_through() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(42), 42);
        // STATUS_ACCESS_VIOLATION
        assert_eq!(exit_status(0xC000_0005_u32 as i32), 0xC000_0005_u32 as i32);
    }
}
