//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: job failures, validation errors in written files
//! - `warn`: template fallbacks, undeclared SQL parameters, sanitization
//! - `info`: one line per generated report, batch totals
//! - `debug`: query normalization, validation counts
//! - `trace`: skeleton parsing and serialization internals

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events are shown at the configured level.
const WORKSPACE_TARGETS: [&str; 5] = [
    "rpt_cli",
    "rpt_design",
    "rpt_model",
    "rpt_sql",
    "rpt_validate",
];

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// When set, logs are appended to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Filter directive for the workspace crates, other crates at `warn`.
    pub fn directive(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let mut directive = String::from("warn");
        for target in WORKSPACE_TARGETS {
            directive.push_str(&format!(",{target}={level}"));
        }
        directive
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer.
///
/// Events carry no timestamps or targets; JSON output also records span
/// close events with their timings.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(build_env_filter(config));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .without_time();

    match config.format {
        LogFormat::Json => registry
            .with(layer.json().with_span_events(fmt::format::FmtSpan::CLOSE))
            .init(),
        LogFormat::Compact => registry
            .with(layer.compact().with_ansi(config.with_ansi))
            .init(),
        LogFormat::Pretty => registry.with(layer.with_ansi(config.with_ansi)).init(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(config.directive());
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_covers_workspace_crates() {
        let config = LogConfig::default().with_level(LevelFilter::DEBUG);
        assert_eq!(
            config.directive(),
            "warn,rpt_cli=debug,rpt_design=debug,rpt_model=debug,rpt_sql=debug,rpt_validate=debug"
        );
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_shared_file_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rpt.log");
        let file = OpenOptions::new().create(true).append(true).open(&path).unwrap();
        let writer = SharedFileWriter::new(file);
        writer.make_writer().write_all(b"first\n").unwrap();
        let mut second = writer.make_writer();
        second.write_all(b"second\n").unwrap();
        second.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_off_level() {
        let config = LogConfig::default().with_level(LevelFilter::OFF);
        assert!(config.directive().ends_with("rpt_validate=off"));
    }
}
