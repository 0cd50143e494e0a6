use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use algorun::cli::{self, Cli, Commands, goal};
use algorun::config;
use algorun::docker::EngineInspector;
use algorun::logging::{self, TracingLogger};
use algorun::proc::HostRunner;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match run(cli) {
        Ok(code) => cli::exit_status(code),
        Err(err) => {
            tracing::error!("{err}");
            for cause in err.chain().skip(1) {
                tracing::debug!("caused by: {cause}");
            }
            1
        }
    };
    process::exit(code);
}

/// Returns the exit code of the forwarded command.
fn run(cli: Cli) -> Result<i32> {
    let cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to resolve working directory")?;
            config::load(&cwd)?
        }
    };
    let cfg = config::apply_env(cfg, |key| std::env::var(key).ok());

    let logger = TracingLogger;
    let runner = HostRunner::new(&logger);
    let inspector = EngineInspector::new(&runner, &cfg.engine);

    match cli.command {
        Commands::Goal(args) => Ok(goal::execute(&args, &cfg, &runner, &inspector, &logger)?),
    }
}
