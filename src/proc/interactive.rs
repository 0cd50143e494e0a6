use std::process::{Command, Stdio};

use tracing::debug;

use super::types::{CommandResult, ProcError, exit_code};

/// Hand the terminal to `argv` until it exits.
///
/// All three standard streams are inherited, so raw mode, job control and
/// window resizes are handled by the child directly. Terminal interrupts
/// reach the whole foreground process group; while the child runs this
/// process catches SIGINT and SIGQUIT so it survives to collect the exit code.
pub fn run_interactive(argv: &[String]) -> Result<CommandResult, ProcError> {
    let (program, args) = argv.split_first().ok_or(ProcError::EmptyCommand)?;
    debug!(command = %shell_words::join(argv), "attaching terminal");

    let _guard = signals::ForegroundGuard::install();

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ProcError::Launch {
            program: program.clone(),
            source,
        })?;

    let exit_code = exit_code(status);
    debug!(exit_code, "interactive session ended");

    Ok(CommandResult {
        command: argv.to_vec(),
        exit_code,
        output: None,
    })
}

#[cfg(unix)]
mod signals {
    const FORWARDED: [libc::c_int; 2] = [libc::SIGINT, libc::SIGQUIT];

    extern "C" fn swallow(_: libc::c_int) {}

    /// Catches terminal signals for its lifetime and restores the previous
    /// dispositions on drop.
    ///
    /// A caught handler (unlike `SIG_IGN`) is reset to the default by
    /// `execve`, so the child still reacts to the signal normally.
    pub(super) struct ForegroundGuard {
        previous: [(libc::c_int, libc::sighandler_t); 2],
    }

    impl ForegroundGuard {
        pub(super) fn install() -> Self {
            let handler = swallow as extern "C" fn(libc::c_int) as libc::sighandler_t;
            // SAFETY: `swallow` is async-signal-safe (it does nothing) and
            // signal() only swaps the process-wide disposition.
            let previous = FORWARDED.map(|signal| (signal, unsafe { libc::signal(signal, handler) }));
            Self { previous }
        }
    }

    impl Drop for ForegroundGuard {
        fn drop(&mut self) {
            for (signal, handler) in self.previous {
                if handler != libc::SIG_ERR {
                    // SAFETY: restores a disposition previously returned by signal().
                    unsafe {
                        libc::signal(signal, handler);
                    }
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod signals {
    /// Console control events are delivered to the child by the OS.
    pub(super) struct ForegroundGuard;

    impl ForegroundGuard {
        pub(super) fn install() -> Self {
            Self
        }
    }
}
