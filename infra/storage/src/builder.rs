use crate::engine::Storage;
use crate::error::{StorageError, StorageErrorExt};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Options for opening a [`Storage`], obtained from [`Storage::builder`].
#[derive(Debug, Clone)]
#[must_use = "Call .open() to get a store handle"]
pub struct StorageBuilder {
    root: PathBuf,
    create: bool,
    purge: bool,
}

impl StorageBuilder {
    pub(crate) const fn new(root: PathBuf) -> Self {
        Self { root, create: true, purge: true }
    }

    /// Whether a missing directory is created (the default) or reported as
    /// [`StorageError::DirectoryNotFound`].
    pub const fn create(mut self, enabled: bool) -> Self {
        self.create = enabled;
        self
    }

    /// Whether opening sweeps stale temp files (the default). Readers turn this off so that
    /// opening a store never changes it.
    pub const fn purge(mut self, enabled: bool) -> Self {
        self.purge = enabled;
        self
    }

    /// Opens the store.
    ///
    /// The directory is created if allowed, resolved to its canonical path and, unless
    /// `purge(false)` was set, swept of temp files left by interrupted writers. Sweep failures are
    /// logged only.
    ///
    /// # Errors
    ///
    /// * [`StorageError::DirectoryNotFound`] if the directory is missing and `create` is off.
    /// * [`StorageError::Io`] if it cannot be created or resolved.
    pub fn open(self) -> Result<Storage, StorageError> {
        if !self.root.is_dir() {
            if !self.create {
                return Err(StorageError::DirectoryNotFound {
                    message: self.root.display().to_string().into(),
                    context: None,
                });
            }
            fs::create_dir_all(&self.root)
                .context(format!("creating {}", self.root.display()))?;
            info!(path = %self.root.display(), "Created store directory");
        }

        let root =
            fs::canonicalize(&self.root).context(format!("resolving {}", self.root.display()))?;

        let storage = Storage::from_root(root);
        if self.purge {
            storage.purge_tmp();
        }
        Ok(storage)
    }
}
