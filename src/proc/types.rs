use std::io;
use std::process::ExitStatus;

use thiserror::Error;
use tracing::Level;

/// Outcome of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub command: Vec<String>,
    /// Exit code as reported by the platform; `-signal` when killed by a
    /// signal on Unix.
    pub exit_code: i32,
    /// Captured stdout, present only when stdout was logged rather than
    /// inherited.
    pub output: Option<String>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Stream wiring and failure policy for [`run`](super::run).
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// When set, a non-zero exit becomes [`ProcError::Execution`] with this message.
    pub bad_return_code_error_message: Option<String>,
    /// When set, stdout is captured and re-logged line by line at this level.
    pub stdout_log_level: Option<Level>,
    /// Prefix logged lines with the program name.
    pub prefix_process: bool,
    /// Connect the parent's stdin; otherwise the child reads from the null device.
    pub pass_stdin: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            bad_return_code_error_message: None,
            stdout_log_level: None,
            prefix_process: true,
            pass_stdin: false,
        }
    }
}

impl RunOptions {
    pub fn checked(mut self, message: impl Into<String>) -> Self {
        self.bad_return_code_error_message = Some(message.into());
        self
    }

    pub fn log_stdout(mut self, level: Level) -> Self {
        self.stdout_log_level = Some(level);
        self
    }

    pub fn unprefixed(mut self) -> Self {
        self.prefix_process = false;
        self
    }

    pub fn with_stdin(mut self) -> Self {
        self.pass_stdin = true;
        self
    }
}

#[derive(Debug, Error)]
pub enum ProcError {
    #[error("no command given")]
    EmptyCommand,

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Execution { message: String, exit_code: i32 },

    #[error("lost track of `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ProcError {
    /// True when the program never started (missing, not executable, ...).
    pub fn is_launch(&self) -> bool {
        matches!(self, Self::EmptyCommand | Self::Launch { .. })
    }
}

/// Platform exit code of a finished child, keeping signal deaths distinct.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    // Neither a code nor a signal (not produced by a plain wait); report a
    // generic failure rather than something that reads as a signal.
    1
}
