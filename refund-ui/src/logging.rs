//! Logging setup for the calculator binary.
//!
//! Records go to stderr so they never mix with the summary on stdout, and
//! optionally to a log file. Both sinks are fixed once at startup.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Where and how much to log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSettings<'a> {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub directive: &'a str,
    /// Drops console output. The log file still receives records.
    pub quiet: bool,
    /// Appended to, created if missing. Its directory must exist.
    pub file: Option<&'a Path>,
}

/// Local time with millisecond precision and the UTC offset.
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// `RUST_LOG` wins over the configured directive; an unusable directive
/// falls back to the default level.
fn level_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(settings: LogSettings<'_>) -> Result<()> {
    let console_level = if settings.quiet {
        LevelFilter::OFF
    } else {
        LevelFilter::TRACE
    };
    let console = tracing_subscriber::fmt::layer()
        .with_timer(LocalTimestamp)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_level);

    let file = settings
        .file
        .map(open_log_file)
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTimestamp)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(level_filter(settings.directive))
        .with(console)
        .with(file)
        .try_init()
        .context("logging is already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_rfc3339() {
        let mut out = String::new();

        LocalTimestamp
            .format_time(&mut Writer::new(&mut out))
            .unwrap();

        assert!(
            chrono::DateTime::parse_from_rfc3339(&out).is_ok(),
            "not RFC 3339: {out}"
        );
    }

    #[test]
    fn open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refund.log");

        open_log_file(&path).unwrap();
        std::fs::write(&path, "first\n").unwrap();
        drop(open_log_file(&path).unwrap());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn open_log_file_reports_missing_directory() {
        let err = open_log_file(Path::new("/nonexistent/dir/refund.log")).unwrap_err();

        assert!(err.to_string().contains("cannot open log file"));
    }
}
