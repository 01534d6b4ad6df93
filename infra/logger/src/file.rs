use crate::error::{LoggerError, LoggerErrorExt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::registry::LookupSpan;

const SUFFIX: &str = "log";

/// Rolling log file output.
///
/// Files are named `<logger name>.<date>.log` inside `dir`. Lines are handed to a background
/// writer thread, so the [`crate::Logger`] handle must outlive the last event worth keeping.
#[derive(Debug, Clone)]
pub struct LogFile {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl LogFile {
    /// Daily rotation, ten files kept, plain text.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: 10, json: false }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Writes one JSON object per line instead of the text format.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn layer<S>(
        &self,
        prefix: &str,
    ) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard), LoggerError>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "a log file needs max_files of at least one".into(),
                context: Some(self.dir.display().to_string().into()),
            });
        }

        fs::create_dir_all(&self.dir).context(self.dir.display().to_string())?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(prefix)
            .filename_suffix(SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let text = layer().with_writer(writer).with_ansi(false);
        let layer = if self.json { text.json().boxed() } else { text.boxed() };
        Ok((layer, guard))
    }
}
