use crate::hardware::{Attribute, OsType};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Raw configuration as read from disk and the environment.
///
/// Paths are kept unexpanded and the build secret stays hex-encoded here;
/// `nodelock_kernel::settings::Settings` turns this into the validated runtime value.
#[derive(Clone, Deserialize)]
pub struct NodelockConfig {
    /// Shared store directory (typically an NFS mount).
    pub nfs_dir: PathBuf,
    /// Per-machine store directory.
    pub local_dir: PathBuf,
    pub build_secret_hex: String,
    /// Ordered hardware attributes the local key is bound to.
    pub bind_attrs: Vec<Attribute>,
    #[serde(default)]
    pub os_type: OsType,
    #[serde(default)]
    pub kdf: KdfConfig,
}

impl fmt::Debug for NodelockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodelockConfig")
            .field("nfs_dir", &self.nfs_dir)
            .field("local_dir", &self.local_dir)
            .field("build_secret_hex", &"<redacted>")
            .field("bind_attrs", &self.bind_attrs)
            .field("os_type", &self.os_type)
            .field("kdf", &self.kdf)
            .finish()
    }
}

/// scrypt cost parameters.
///
/// Every blob is sealed and opened with the same parameters; changing them after provisioning
/// makes existing blobs unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    /// Work factor exponent, `N = 2^log_n`.
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelism.
    pub p: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self { log_n: 14, r: 8, p: 1 }
    }
}
