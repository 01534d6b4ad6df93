//! Entry name checks.
//!
//! A store is a flat directory and every entry is a single file name. Separators, `.` / `..`
//! components, roots and the temp prefix are refused. An existing entry that is a symlink must
//! still resolve inside the store.

use crate::engine::TMP_PREFIX;
use crate::error::StorageError;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Maps an entry name to its physical path under the canonical `root`.
pub(crate) fn resolve_path(root: &Path, name: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let name = name.as_ref();
    let path = root.join(entry_name(name)?);
    ensure_contained(root, &path)?;
    Ok(path)
}

fn entry_name(name: &Path) -> Result<&OsStr, StorageError> {
    let mut components = name.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file)), None) => {
            if file.to_str().is_some_and(|f| f.starts_with(TMP_PREFIX)) {
                return Err(invalid(name, "temp file names are reserved"));
            }
            Ok(file)
        },
        (None, _) => Err(StorageError::FileNotFound {
            message: "empty entry name".into(),
            context: None,
        }),
        _ => Err(invalid(name, "entries are plain file names")),
    }
}

fn ensure_contained(root: &Path, path: &Path) -> Result<(), StorageError> {
    let is_link = fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink());
    if !is_link {
        return Ok(());
    }

    match fs::canonicalize(path) {
        Ok(target) if target.starts_with(root) => Ok(()),
        Ok(target) => Err(invalid(&target, "symlink leaves the store")),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(invalid(path, "dangling symlink")),
        Err(err) => Err(StorageError::Io {
            source: err,
            context: Some(format!("resolving {}", path.display()).into()),
        }),
    }
}

fn invalid(path: &Path, reason: &'static str) -> StorageError {
    StorageError::InvalidEntry {
        message: path.display().to_string().into(),
        context: Some(reason.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid(result: Result<PathBuf, StorageError>) -> bool {
        matches!(result, Err(StorageError::InvalidEntry { .. }))
    }

    #[test]
    fn plain_names_resolve_under_root() {
        let root = Path::new("/srv/keys");
        assert_eq!(resolve_path(root, "api_part1.json").unwrap(), root.join("api_part1.json"));
    }

    #[test]
    fn structured_names_are_refused() {
        let root = Path::new("/srv/keys");
        for name in ["../x", "a/b.json", "a/..", "./a", "/etc/passwd", ".."] {
            assert!(is_invalid(resolve_path(root, name)), "{name} accepted");
        }
    }

    #[test]
    fn temp_prefix_is_reserved() {
        let name = format!("{TMP_PREFIX}local_key.json.1");
        assert!(is_invalid(resolve_path(Path::new("/srv/keys"), name)));
    }

    #[test]
    fn empty_name_is_not_found() {
        assert!(matches!(
            resolve_path(Path::new("/srv/keys"), ""),
            Err(StorageError::FileNotFound { .. })
        ));
    }
}
