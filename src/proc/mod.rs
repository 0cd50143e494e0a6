// Child process execution: forwarded commands and interactive sessions.

mod interactive;
mod run;
mod types;

pub use interactive::run_interactive;
pub use run::run;
pub use types::{CommandResult, ProcError, RunOptions};

use crate::logging::Logger;

/// Seam between command orchestration and the operating system.
pub trait ProcessRunner {
    fn run(&self, argv: &[String], options: &RunOptions) -> Result<CommandResult, ProcError>;

    fn run_interactive(&self, argv: &[String]) -> Result<CommandResult, ProcError>;
}

/// Spawns real child processes, logging captured output through `logger`.
pub struct HostRunner<'a> {
    logger: &'a dyn Logger,
}

impl<'a> HostRunner<'a> {
    pub fn new(logger: &'a dyn Logger) -> Self {
        Self { logger }
    }
}

impl ProcessRunner for HostRunner<'_> {
    fn run(&self, argv: &[String], options: &RunOptions) -> Result<CommandResult, ProcError> {
        run(argv, options, self.logger)
    }

    fn run_interactive(&self, argv: &[String]) -> Result<CommandResult, ProcError> {
        run_interactive(argv)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// One recorded invocation.
    #[derive(Debug, Clone)]
    pub(crate) struct Call {
        pub argv: Vec<String>,
        pub interactive: bool,
        pub options: Option<RunOptions>,
    }

    /// Replays queued outcomes in order and records every call.
    #[derive(Default)]
    pub(crate) struct ScriptedRunner {
        replies: RefCell<VecDeque<Result<CommandResult, ProcError>>>,
        calls: RefCell<Vec<Call>>,
    }

    impl ScriptedRunner {
        pub(crate) fn exits(self, exit_code: i32) -> Self {
            self.replies.borrow_mut().push_back(Ok(CommandResult {
                command: Vec::new(),
                exit_code,
                output: None,
            }));
            self
        }

        pub(crate) fn prints(self, output: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(CommandResult {
                command: Vec::new(),
                exit_code: 0,
                output: Some(output.to_string()),
            }));
            self
        }

        pub(crate) fn fails(self, err: ProcError) -> Self {
            self.replies.borrow_mut().push_back(Err(err));
            self
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn reply(&self, argv: &[String]) -> Result<CommandResult, ProcError> {
            let reply = self
                .replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected call: {argv:?}"));
            reply.map(|mut result| {
                result.command = argv.to_vec();
                result
            })
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, argv: &[String], options: &RunOptions) -> Result<CommandResult, ProcError> {
            self.calls.borrow_mut().push(Call {
                argv: argv.to_vec(),
                interactive: false,
                options: Some(options.clone()),
            });
            self.reply(argv)
        }

        fn run_interactive(&self, argv: &[String]) -> Result<CommandResult, ProcError> {
            self.calls.borrow_mut().push(Call {
                argv: argv.to_vec(),
                interactive: true,
                options: None,
            });
            self.reply(argv)
        }
    }
}
