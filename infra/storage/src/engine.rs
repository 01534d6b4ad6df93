//! Core storage engine providing sandboxed, atomic file I/O.
//!
//! This module contains the [`Storage`] handle. It owns the canonical root of one store
//! directory, enforces path resolution inside it, and implements the two write modes:
//! atomic replace ([`Storage::write`]) and atomic create-if-absent ([`Storage::create_new`]).

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::security;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// File name prefix of in-flight temp files.
pub(crate) const TMP_PREFIX: &str = ".nodelock-tmp.";

/// Who may read a file written by the store.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Access {
    /// Permissions follow the process umask.
    #[default]
    Shared,
    /// Owner read/write only (`0600`). Applied on Unix; elsewhere a warning is logged.
    OwnerOnly,
}

#[derive(Debug)]
struct Inner {
    root: PathBuf,
    tmp_counter: AtomicU64,
}

/// A handle to one store directory.
///
/// Entries are addressed by plain file name and checked against the canonical root. Writes never
/// leave an entry partially written: data goes to a unique temp file, is synced, then moved into
/// place. The handle is reference-counted and cheap to clone.
///
/// # Example
///
/// ```rust
/// use nodelock_storage::{Access, Storage, StorageError};
///
/// # fn main() -> Result<(), StorageError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// # let root = tmp.path().join("keys");
/// let storage = Storage::builder(&root).open()?;
///
/// storage.write("api_part2.json", b"{}", Access::Shared)?;
/// assert_eq!(storage.read("api_part2.json")?, b"{}");
///
/// storage.create_new("local_key.json", b"{}", Access::OwnerOnly)?;
/// assert!(matches!(
///     storage.create_new("local_key.json", b"[]", Access::OwnerOnly),
///     Err(StorageError::AlreadyExists { .. })
/// ));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    inner: Arc<Inner>,
}

impl Storage {
    /// Starts opening the store rooted at `root`.
    pub fn builder(root: impl Into<PathBuf>) -> StorageBuilder {
        StorageBuilder::new(root.into())
    }

    pub(crate) fn from_root(root: PathBuf) -> Self {
        Self { inner: Arc::new(Inner { root, tmp_counter: AtomicU64::new(1) }) }
    }

    /// The canonical store directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Maps an entry name to its physical path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidEntry`] for anything but a plain file name, or for a
    /// symlink that points outside the store.
    pub fn resolve(&self, name: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(self.root(), name)
    }

    /// Reads the entire contents of a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] if the path does not exist.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(path)?;

        match fs::read(&resolved) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", resolved.display()).into()),
            }),
        }
    }

    /// Writes data atomically, replacing any existing file.
    ///
    /// Data is written to a unique temp file, synced (`fsync`), then renamed over the target.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidEntry`] if the name is not a plain file name.
    /// Returns [`StorageError::Io`] if disk space is full or hardware failure occurs.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        data: &[u8],
        access: Access,
    ) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;
        let temp = self.stage(&resolved, data, access)?;

        if let Err(err) = fs::rename(temp.path(), &resolved) {
            if err.kind() == ErrorKind::AlreadyExists {
                fs::remove_file(&resolved)
                    .context(format!("Failed to replace existing file: {}", resolved.display()))?;
                fs::rename(temp.path(), &resolved).context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.path().display(),
                    resolved.display()
                ))?;
            } else {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!(
                            "Atomic swap failed: {} -> {}",
                            temp.path().display(),
                            resolved.display()
                        )
                        .into(),
                    ),
                });
            }
        }
        temp.disarm();

        if let Some(parent) = resolved.parent() {
            sync_dir(parent);
        }

        debug!(path = %resolved.display(), "File saved atomically");
        Ok(())
    }

    /// Writes data only if the target does not exist yet.
    ///
    /// The complete file is staged and synced under a temp name, then hard-linked to the target.
    /// Linking fails if the target exists, so concurrent callers cannot both succeed and the
    /// target is never observed partially written. On filesystems without hard links the target
    /// is opened with `O_EXCL` semantics instead.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AlreadyExists`] if the target is already present.
    /// Returns [`StorageError::Io`] on any other filesystem failure.
    pub fn create_new(
        &self,
        path: impl AsRef<Path>,
        data: &[u8],
        access: Access,
    ) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;
        if resolved.exists() {
            return Err(already_exists(&resolved));
        }

        let temp = self.stage(&resolved, data, access)?;

        match fs::hard_link(temp.path(), &resolved) {
            Ok(()) => {},
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(already_exists(&resolved));
            },
            Err(err)
                if matches!(err.kind(), ErrorKind::Unsupported | ErrorKind::PermissionDenied) =>
            {
                debug!(path = %resolved.display(), error = %err, "Hard link unavailable");
                drop(temp);
                create_exclusive(&resolved, data, access)?;
            },
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Failed to link: {}", resolved.display()).into()),
                });
            },
        }

        if let Some(parent) = resolved.parent() {
            sync_dir(parent);
        }

        debug!(path = %resolved.display(), "File created atomically");
        Ok(())
    }

    /// Checks if a file exists within the store.
    ///
    /// # Errors
    ///
    /// Returns an `Err` only if path resolution fails.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        let resolved = self.resolve(path)?;
        Ok(resolved.is_file())
    }

    /// Removes temp files older than five minutes.
    pub fn purge_tmp(&self) {
        maintenance::purge_tmp(self.root());
    }

    /// Writes `data` to a fresh temp file next to `target` and syncs it.
    fn stage(&self, target: &Path, data: &[u8], access: Access) -> Result<TempFile, StorageError> {
        let temp = TempFile::new(unique_tmp_path(target, &self.inner.tmp_counter));
        let mut file = open_new(temp.path(), access)
            .context(format!("Temp creation failed: {}", temp.path().display()))?;
        file.write_all(data).context("Write failed")?;
        file.sync_all().context("Hardware sync failed")?;

        Ok(temp)
    }
}

/// Removes the wrapped temp file on drop unless it was moved into place.
#[derive(Debug)]
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    const fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = fs::remove_file(&self.path) {
                if err.kind() != ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %err, "Failed to remove temp file");
                }
            }
        }
    }
}

fn already_exists(path: &Path) -> StorageError {
    StorageError::AlreadyExists { message: path.display().to_string().into(), context: None }
}

fn create_exclusive(path: &Path, data: &[u8], access: Access) -> Result<(), StorageError> {
    let mut file = match open_new(path, access) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => return Err(already_exists(path)),
        Err(err) => {
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Exclusive create failed: {}", path.display()).into()),
            });
        },
    };

    let written = file.write_all(data).and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(StorageError::Io {
            source: err,
            context: Some(format!("Write failed: {}", path.display()).into()),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn open_new(path: &Path, access: Access) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    if access == Access::OwnerOnly {
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(not(unix))]
fn open_new(path: &Path, access: Access) -> std::io::Result<File> {
    if access == Access::OwnerOnly {
        warn!(path = %path.display(), "Owner-only permissions are not enforced on this platform");
    }
    OpenOptions::new().write(true).create_new(true).open(path)
}

#[cfg(unix)]
fn sync_dir(path: &Path) {
    match File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) {}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.subsec_nanos());
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("storage");
    let tmp_name = format!("{TMP_PREFIX}{file_name}.{}.{counter}.{nanos}", std::process::id());
    target.with_file_name(tmp_name)
}
