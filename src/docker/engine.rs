use tracing::Level;

use crate::proc::{ProcError, ProcessRunner, RunOptions};

pub const ENGINE_NOT_RUNNING: &str = "Docker engine isn't running; please start it.";

/// Verify that the container engine answers `version`.
///
/// A missing binary surfaces as a launch error; a daemon that does not
/// respond surfaces as an execution error carrying [`ENGINE_NOT_RUNNING`].
pub fn ensure_available(runner: &dyn ProcessRunner, engine: &str) -> Result<(), ProcError> {
    let argv = vec![engine.to_string(), "version".to_string()];
    let options = RunOptions::default()
        .log_stdout(Level::DEBUG)
        .checked(ENGINE_NOT_RUNNING);
    runner.run(&argv, &options).map(|_| ())
}

/// `exec` form that runs `executable` inside `container` with stdin attached.
pub fn exec_command(
    engine: &str,
    container: &str,
    executable: &str,
    args: &[String],
) -> Vec<String> {
    let mut argv = vec![
        engine.to_string(),
        "exec".into(),
        "--interactive".into(),
        container.to_string(),
        executable.to_string(),
    ];
    argv.extend(args.iter().cloned());
    argv
}

/// `exec` form that opens a TTY-backed `shell` in `workdir` inside `container`.
pub fn console_command(engine: &str, container: &str, workdir: &str, shell: &str) -> Vec<String> {
    vec![
        engine.to_string(),
        "exec".into(),
        "-it".into(),
        "-w".into(),
        workdir.to_string(),
        container.to_string(),
        shell.to_string(),
    ]
}
