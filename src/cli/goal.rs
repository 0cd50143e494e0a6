//! `algorun goal`: forward a command to `goal` inside the node container,
//! or open a console there.

use clap::Args;
use thiserror::Error;
use tracing::Level;

use crate::config::Config;
use crate::docker::{self, ContainerInspector};
use crate::logging::Logger;
use crate::proc::{ProcError, ProcessRunner, RunOptions};

/// Run the Algorand goal CLI against your mainnet node.
///
/// See https://developer.algorand.org/docs/clis/goal/goal/ for the commands
/// goal understands.
#[derive(Debug, Clone, Default, Args)]
pub struct GoalArgs {
    /// Open a Bash console so you can execute multiple goal commands and/or
    /// interact with a filesystem
    #[arg(long)]
    pub console: bool,

    /// Target container instead of the configured one
    #[arg(long)]
    pub container: Option<String>,

    /// Arguments passed to goal unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub goal_args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum GoalError {
    #[error(
        "Docker not found; please install Docker and add to path.\n\
         See https://docs.docker.com/get-docker/ for more information."
    )]
    EngineMissing(#[source] ProcError),

    #[error(transparent)]
    Process(#[from] ProcError),
}

/// Run the command and return the exit code this process should exit with.
///
/// A failing forwarded command is not an error: its exit code is returned
/// as-is, after a warning if the container does not look up.
pub fn execute(
    args: &GoalArgs,
    cfg: &Config,
    runner: &dyn ProcessRunner,
    inspector: &dyn ContainerInspector,
    logger: &dyn Logger,
) -> Result<i32, GoalError> {
    docker::ensure_available(runner, &cfg.engine).map_err(|err| {
        if err.is_launch() {
            GoalError::EngineMissing(err)
        } else {
            GoalError::Process(err)
        }
    })?;

    let container = args.container.as_deref().unwrap_or(&cfg.container);

    let result = if args.console {
        if !args.goal_args.is_empty() {
            logger.log(
                Level::WARN,
                "--console opens an interactive shell, remaining arguments are being ignored",
            );
        }
        logger.log(
            Level::INFO,
            &format!(
                "Opening {} console on the algod node; execute `exit` to return to original console",
                shell_label(&cfg.shell)
            ),
        );
        let argv =
            docker::console_command(&cfg.engine, container, &cfg.console_workdir, &cfg.shell);
        runner.run_interactive(&argv)?
    } else {
        let argv = docker::exec_command(&cfg.engine, container, &cfg.executable, &args.goal_args);
        let options = RunOptions::default()
            .log_stdout(Level::INFO)
            .unprefixed()
            .with_stdin();
        runner.run(&argv, &options)?
    };

    if !result.success() {
        logger.log(
            Level::DEBUG,
            &format!(
                "`{}` exited with {}",
                shell_words::join(&result.command),
                result.exit_code
            ),
        );
        warn_if_down(inspector, container, logger);
    }
    Ok(result.exit_code)
}

/// Display name of the console shell: `Bash` for bash, the path's file name
/// otherwise.
fn shell_label(shell: &str) -> &str {
    let name = shell.rsplit('/').next().unwrap_or(shell);
    if name == "bash" { "Bash" } else { name }
}

/// Best effort: an inspection failure is logged and treated as "down" so it
/// never replaces the forwarded exit code.
fn warn_if_down(inspector: &dyn ContainerInspector, container: &str, logger: &dyn Logger) {
    let running = match inspector.ps(container) {
        Ok(records) => docker::is_running(&records),
        Err(err) => {
            logger.log(
                Level::DEBUG,
                &format!("could not inspect {container}: {err}"),
            );
            false
        }
    };

    if !running {
        logger.log(
            Level::WARN,
            &format!(
                "{container} does not appear to be running, \
                 ensure mainnet node is started by executing `algorun start`"
            ),
        );
    }
}
