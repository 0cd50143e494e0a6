//! Console logging: the `Logger` capability handed to the core and the
//! `tracing` subscriber the binary installs behind it.

use std::fmt;

use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

/// Sink for operator-facing messages.
pub trait Logger {
    fn log(&self, level: Level, message: &str);
}

/// Target of INFO messages meant for the operator, relayed node output
/// included. [`filter`] never lets it drop below INFO.
pub const CONSOLE_TARGET: &str = "algorun::console";

/// Forwards every message to the global `tracing` dispatcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{message}"),
            Level::WARN => tracing::warn!("{message}"),
            Level::INFO => tracing::info!(target: CONSOLE_TARGET, "{message}"),
            Level::DEBUG => tracing::debug!("{message}"),
            _ => tracing::trace!("{message}"),
        }
    }
}

/// Build the event filter from `RUST_LOG` (or `debug` when `verbose`).
///
/// Directives default to INFO and unparsable ones are skipped. Whatever they
/// say, [`CONSOLE_TARGET`] stays at INFO so forwarded output is never lost.
pub fn filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let directives = if verbose {
        "debug"
    } else {
        rust_log.unwrap_or_default()
    };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives);

    match format!("{CONSOLE_TARGET}=info").parse() {
        Ok(console) => filter.add_directive(console),
        Err(_) => filter,
    }
}

/// Install the console subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout so relayed
/// node output stays on stdout.
pub fn init(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter(verbose, rust_log.as_deref());

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    // A second init (e.g. from tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ConsoleFormat)
                .with_writer(writer),
        )
        .try_init();
}

/// Bare messages for INFO, a lowercase level tag for everything else.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if let Some(tag) = level_tag(*event.metadata().level()) {
            write!(writer, "{tag}: ")?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_tag(level: Level) -> Option<&'static str> {
    match level {
        Level::ERROR => Some("error"),
        Level::WARN => Some("warning"),
        Level::INFO => None,
        Level::DEBUG => Some("debug"),
        _ => Some("trace"),
    }
}

/// Captures messages in memory for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    entries: std::cell::RefCell<Vec<(Level, String)>>,
}

#[cfg(test)]
impl RecordingLogger {
    pub(crate) fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub(crate) fn at(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[cfg(test)]
impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_is_untagged() {
        assert_eq!(level_tag(Level::INFO), None);
        assert_eq!(level_tag(Level::WARN), Some("warning"));
        assert_eq!(level_tag(Level::ERROR), Some("error"));
    }

    #[test]
    fn tracing_logger_does_not_panic() {
        TracingLogger.log(Level::DEBUG, "forwarded to whatever subscriber is installed");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap_or_else(|e| e.into_inner())).into_owned()
        }
    }

    fn printed_under(verbose: bool, rust_log: Option<&str>) -> String {
        let out = Captured::default();
        let make = {
            let out = out.clone();
            move || out.clone()
        };
        let subscriber = tracing_subscriber::registry()
            .with(filter(verbose, rust_log))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormat)
                    .with_writer(make),
            );
        tracing::subscriber::with_default(subscriber, || {
            TracingLogger.log(Level::INFO, "Last committed block: 42");
            TracingLogger.log(Level::WARN, "node looks down");
            tracing::info!("library chatter");
            tracing::debug!("library detail");
        });
        out.text()
    }

    #[test]
    fn default_filter_shows_info() {
        let text = printed_under(false, None);
        assert!(text.contains("Last committed block: 42\n"));
        assert!(text.contains("warning: node looks down\n"));
        assert!(text.contains("library chatter"));
        assert!(!text.contains("library detail"));
    }

    #[test]
    fn quiet_rust_log_keeps_console_output() {
        for rust_log in ["warn", "error", "off", "hyper=debug", "not a directive"] {
            let text = printed_under(false, Some(rust_log));
            assert!(
                text.contains("Last committed block: 42"),
                "RUST_LOG={rust_log} hid relayed output: {text:?}"
            );
        }
        assert!(!printed_under(false, Some("warn")).contains("library chatter"));
    }

    #[test]
    fn verbose_overrides_rust_log() {
        let text = printed_under(true, Some("error"));
        assert!(text.contains("debug: library detail"));
        assert!(text.contains("Last committed block: 42"));
    }

    #[test]
    fn recording_logger_keeps_order() {
        let logger = RecordingLogger::default();
        logger.log(Level::INFO, "first");
        logger.log(Level::WARN, "second");
        assert_eq!(
            logger.entries(),
            vec![
                (Level::INFO, "first".to_string()),
                (Level::WARN, "second".to_string())
            ]
        );
        assert_eq!(logger.at(Level::WARN), vec!["second".to_string()]);
    }
}
