//! Log setup. The level comes from the `LOGLEVEL` environment variable (default INFO) and
//! every event is written as a single `LEVEL:target: message` line on stderr.

use std::fmt;
use thiserror::Error;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

pub const LOG_LEVEL_ENV: &str = "LOGLEVEL";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid LOGLEVEL value '{0}'. Use DEBUG, INFO, WARNING, ERROR or CRITICAL.")]
    UnknownLevel(String),

    #[error("logging already initialized: {0}")]
    Init(String),
}

/// Map a level name to a filter. Accepts the usual logging names, case-insensitive.
pub fn parse_log_level(name: &str) -> Result<LevelFilter, LogError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "NOTSET" | "TRACE" => Ok(LevelFilter::TRACE),
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARNING" | "WARN" => Ok(LevelFilter::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Ok(LevelFilter::ERROR),
        "OFF" => Ok(LevelFilter::OFF),
        _ => Err(LogError::UnknownLevel(name.to_string())),
    }
}

/// Level for a `LOGLEVEL` value; unset or blank means INFO.
pub fn level_from_value(value: Option<&str>) -> Result<LevelFilter, LogError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_log_level(v),
        _ => Ok(LevelFilter::INFO),
    }
}

/// Level from the `LOGLEVEL` environment variable.
pub fn level_from_env() -> Result<LevelFilter, LogError> {
    level_from_value(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}

/// Install the global subscriber.
pub fn init(level: LevelFilter) -> Result<(), LogError> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .event_format(OneLineFormat)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))
}

/// Join the lines of a multi-line message with ` | `, dropping blank lines.
pub fn collapse_lines(s: &str) -> String {
    s.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `LEVEL:target: message`, with embedded newlines (error chains, converter output) folded.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneLineFormat;

impl<S, N> FormatEvent<S, N> for OneLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = String::new();
        ctx.field_format()
            .format_fields(format::Writer::new(&mut fields), event)?;
        writeln!(
            writer,
            "{}:{}: {}",
            meta.level(),
            meta.target(),
            collapse_lines(&fields)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(level: LevelFilter, f: impl FnOnce()) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(move || writer.clone())
            .event_format(OneLineFormat)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn parse_standard_names() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_log_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_log_level("WARNING").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_log_level("ERROR").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_log_level("CRITICAL").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_log_level("NOTSET").unwrap(), LevelFilter::TRACE);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(parse_log_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_log_level(" Warn ").unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn parse_unknown_errors() {
        match parse_log_level("LOUD") {
            Err(LogError::UnknownLevel(v)) => assert_eq!(v, "LOUD"),
            other => panic!("expected UnknownLevel, got {:?}", other),
        }
    }

    #[test]
    fn unset_or_blank_value_defaults_to_info() {
        assert_eq!(level_from_value(None).unwrap(), LevelFilter::INFO);
        assert_eq!(level_from_value(Some("")).unwrap(), LevelFilter::INFO);
        assert_eq!(level_from_value(Some("  ")).unwrap(), LevelFilter::INFO);
    }

    #[test]
    fn set_value_is_parsed() {
        assert_eq!(level_from_value(Some("debug")).unwrap(), LevelFilter::DEBUG);
        assert!(matches!(
            level_from_value(Some("verbose")),
            Err(LogError::UnknownLevel(_))
        ));
    }

    #[test]
    fn collapse_joins_lines() {
        assert_eq!(collapse_lines("one line"), "one line");
        assert_eq!(
            collapse_lines("Traceback:\n  frame 1\r\n\n  frame 2\n"),
            "Traceback: |   frame 1 |   frame 2"
        );
    }

    #[test]
    fn event_is_written_on_one_line() {
        let out = capture(LevelFilter::INFO, || {
            tracing::error!("render failed:\nExit with code 1\ndue to network error");
        });
        assert_eq!(
            out,
            "ERROR:docs2pdf::logging::tests: render failed: | Exit with code 1 | due to network error\n"
        );
    }

    #[test]
    fn level_filter_is_applied() {
        let out = capture(LevelFilter::WARN, || {
            tracing::info!("hidden");
            tracing::warn!("shown");
        });
        assert!(!out.contains("hidden"));
        assert!(out.starts_with("WARN:"));
        assert_eq!(out.lines().count(), 1);
    }
}
