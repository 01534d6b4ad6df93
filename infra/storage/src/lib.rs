//! A sandboxed, synchronous blob store.
//!
//! Each [`Storage`] handle owns one flat directory. Callers address entries by plain file name;
//! the engine refuses nested paths and symlinks that lead outside the directory.
//!
//! # Core Features
//!
//! - **Flat Namespace**: [`Storage::resolve`] accepts single file names only.
//! - **Atomic Replace**: [`Storage::write`] writes a unique temp file, syncs it, then renames it.
//! - **Atomic Create**: [`Storage::create_new`] stages the same way and links the result into
//!   place only if the target is absent, so two concurrent creators cannot both win.
//! - **Owner-only Files**: [`Access::OwnerOnly`] creates files with mode `0600` on Unix.
//! - **Self-Healing**: Temp files orphaned by crashed writers are removed when a store is opened.
//!
//! # Examples
//!
//! ```rust
//! use nodelock_storage::{Access, Storage, StorageError};
//!
//! # fn main() -> Result<(), StorageError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let storage = Storage::builder(tmp.path().join("nfs")).create(true).open()?;
//!
//! storage.write("api_part1.json", b"{\"salt\":\"..\"}", Access::Shared)?;
//! assert!(storage.exists("api_part1.json")?);
//! assert!(storage.resolve("../escape.json").is_err());
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::StorageBuilder;
pub use engine::{Access, Storage};
pub use error::{StorageError, StorageErrorExt};
