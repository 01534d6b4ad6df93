//! # Logger
//!
//! Installs the global `tracing` subscriber for nodelock binaries.
//!
//! Console lines go to **stderr** so a command's stdout can be piped; colors are used only when
//! stderr is a terminal. A [`LogFile`] adds rolling files written off-thread. `RUST_LOG`
//! overrides the level unless explicit directives are given with [`LoggerBuilder::env_filter`].
//!
//! ```rust
//! use nodelock_logger::{LogFile, Logger};
//!
//! # fn main() -> Result<(), nodelock_logger::LoggerError> {
//! # let dir = std::env::temp_dir().join("nodelock-doc-logs");
//! let _log = Logger::builder("nodelock")
//!     .verbosity(2)
//!     .file(LogFile::new(dir).json(true))
//!     .init()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod file;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::file::LogFile;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::io::IsTerminal;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maps a `-v` count to a level: none is `WARN`, then `INFO`, `DEBUG`, `TRACE`.
#[must_use]
pub const fn level_for_verbosity(count: u8) -> LevelFilter {
    match count {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Collects subscriber settings; nothing is installed until [`LoggerBuilder::init`].
#[derive(Debug)]
#[must_use = "The builder does nothing until `init` is called."]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    file: Option<LogFile>,
}

impl LoggerBuilder {
    /// Default level when neither `RUST_LOG` nor explicit directives are set.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Shorthand for [`LoggerBuilder::level`] with [`level_for_verbosity`].
    pub const fn verbosity(self, count: u8) -> Self {
        self.level(level_for_verbosity(count))
    }

    /// Explicit filter directives such as `nodelock_custody=debug`. `RUST_LOG` is then ignored.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Adds (or with `None`, removes) rolling file output.
    pub fn file(mut self, file: impl Into<Option<LogFile>>) -> Self {
        self.file = file.into();
        self
    }

    /// Installs the subscriber for the rest of the process.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, no enabled output, bad
    ///   directives or a zero file limit.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(invalid("logger name is empty"));
        }
        if !self.console && self.file.is_none() {
            return Err(invalid("no output enabled, turn on the console or add a log file"));
        }

        let filter = self.filter()?;

        let mut layers = Vec::new();
        if self.console {
            layers.push(console_layer());
        }
        let guard = match &self.file {
            Some(file) => {
                let (file_layer, guard) = file.layer(&self.name)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger { guard })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::InvalidConfiguration {
                    message: e.to_string().into(),
                    context: Some(format!("filter `{directives}`").into()),
                }
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[must_use = "Dropping the handle stops file logging."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; `name` prefixes log file names. Defaults: `INFO`, console on, no file.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::INFO,
            directives: None,
            console: true,
            file: None,
        }
    }

    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

fn console_layer<S>() -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let ansi = std::io::stderr().is_terminal();
    layer().compact().with_writer(std::io::stderr).with_ansi(ansi).boxed()
}

const fn invalid(message: &'static str) -> LoggerError {
    LoggerError::InvalidConfiguration { message: std::borrow::Cow::Borrowed(message), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder("nodelock");
        assert!(builder.console);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert!(builder.directives.is_none());
        assert!(builder.file.is_none());
    }

    #[test]
    fn file_can_be_set_and_cleared() {
        let builder =
            Logger::builder("nodelock").file(LogFile::new("/var/log/nodelock").max_files(3));
        assert_eq!(
            builder.file.as_ref().map(LogFile::dir),
            Some(std::path::Path::new("/var/log/nodelock"))
        );

        let builder = builder.file(None);
        assert!(builder.file.is_none());
    }

    #[test]
    fn verbosity_sets_level() {
        assert_eq!(Logger::builder("n").verbosity(0).level, LevelFilter::WARN);
        assert_eq!(Logger::builder("n").verbosity(3).level, LevelFilter::TRACE);
        assert_eq!(level_for_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
    }

    #[test]
    fn invalid_settings_are_rejected_before_install() {
        let err = Logger::builder("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder("nodelock").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err =
            Logger::builder("nodelock").env_filter("nodelock=notalevel").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let dir = std::env::temp_dir().join("nodelock-zero-files");
        let err = Logger::builder("nodelock")
            .console(false)
            .file(LogFile::new(dir).max_files(0))
            .init()
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
