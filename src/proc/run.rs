use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::types::{CommandResult, ProcError, RunOptions, exit_code};
use crate::logging::Logger;

/// Run `argv` to completion and report its exit code.
///
/// Arguments reach the child as-is; nothing goes through a shell. stderr is
/// always inherited. stdout is inherited unless `options.stdout_log_level`
/// is set, in which case each line is handed to `logger` and collected into
/// [`CommandResult::output`].
pub fn run(
    argv: &[String],
    options: &RunOptions,
    logger: &dyn Logger,
) -> Result<CommandResult, ProcError> {
    let (program, args) = argv.split_first().ok_or(ProcError::EmptyCommand)?;
    debug!(command = %shell_words::join(argv), "running");

    let stdin = if options.pass_stdin {
        Stdio::inherit()
    } else {
        Stdio::null()
    };
    let stdout = if options.stdout_log_level.is_some() {
        Stdio::piped()
    } else {
        Stdio::inherit()
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ProcError::Launch {
            program: program.clone(),
            source,
        })?;

    let mut output = None;
    let mut read_error = None;

    if let (Some(level), Some(pipe)) = (options.stdout_log_level, child.stdout.take()) {
        let prefix = options.prefix_process.then(|| process_label(program));
        let mut captured = String::new();

        // Read raw lines so non-UTF-8 output is relayed lossily instead of aborting.
        for line in BufReader::new(pipe).split(b'\n') {
            match line {
                Ok(bytes) => {
                    let line = String::from_utf8_lossy(&bytes);
                    let text = line.strip_suffix('\r').unwrap_or(&line);
                    match &prefix {
                        Some(label) => logger.log(level, &format!("{label}: {text}")),
                        None => logger.log(level, text),
                    }
                    captured.push_str(text);
                    captured.push('\n');
                }
                Err(err) => {
                    read_error = Some(err);
                    break;
                }
            }
        }
        // The pipe is closed here; a child still writing gets EPIPE and exits.
        output = Some(captured);
    }

    let status = child.wait().map_err(|source| ProcError::Io {
        program: program.clone(),
        source,
    })?;

    if let Some(source) = read_error {
        return Err(ProcError::Io {
            program: program.clone(),
            source,
        });
    }

    let exit_code = exit_code(status);
    debug!(exit_code, "{program} finished");

    if exit_code != 0
        && let Some(message) = &options.bad_return_code_error_message
    {
        return Err(ProcError::Execution {
            message: message.clone(),
            exit_code,
        });
    }

    Ok(CommandResult {
        command: argv.to_vec(),
        exit_code,
        output,
    })
}

/// Short name used to prefix logged output: the file name of the program.
fn process_label(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}
