//! Validated, immutable runtime settings.
//!
//! [`Settings`] is built once from a [`NodelockConfig`] and then passed by reference into every
//! workflow. Nothing downstream reads process-global state.

use crate::config::ConfigError;
use nodelock_domain::config::{KdfConfig, NodelockConfig};
use nodelock_domain::hardware::{Attribute, Binding, OsType};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use zeroize::Zeroizing;

/// Runtime settings for the custody workflows.
#[derive(Clone)]
pub struct Settings {
    shared_dir: PathBuf,
    local_dir: PathBuf,
    build_secret: Zeroizing<Vec<u8>>,
    binding: Binding,
    kdf: KdfConfig,
}

impl Settings {
    /// Builds settings from already-resolved values.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if the build secret or the attribute list is empty.
    pub fn new(
        shared_dir: impl Into<PathBuf>,
        local_dir: impl Into<PathBuf>,
        build_secret: impl Into<Vec<u8>>,
        binding: Binding,
        kdf: KdfConfig,
    ) -> Result<Self, ConfigError> {
        let build_secret = Zeroizing::new(build_secret.into());

        if build_secret.is_empty() {
            return Err(ConfigError::Invalid {
                message: "build secret is empty".into(),
                context: Some("build_secret_hex".into()),
            });
        }
        if binding.attributes.is_empty() {
            return Err(ConfigError::Invalid {
                message: "at least one hardware attribute is required".into(),
                context: Some("bind_attrs".into()),
            });
        }

        Ok(Self {
            shared_dir: shared_dir.into(),
            local_dir: local_dir.into(),
            build_secret,
            binding,
            kdf,
        })
    }

    #[must_use]
    pub fn shared_dir(&self) -> &Path {
        &self.shared_dir
    }

    #[must_use]
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    #[must_use]
    pub fn build_secret(&self) -> &[u8] {
        &self.build_secret
    }

    #[must_use]
    pub const fn binding(&self) -> &Binding {
        &self.binding
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.binding.attributes
    }

    #[must_use]
    pub const fn os(&self) -> OsType {
        self.binding.os
    }

    #[must_use]
    pub const fn kdf(&self) -> KdfConfig {
        self.kdf
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("shared_dir", &self.shared_dir)
            .field("local_dir", &self.local_dir)
            .field("build_secret", &format_args!("<{} bytes>", self.build_secret.len()))
            .field("binding", &self.binding)
            .field("kdf", &self.kdf)
            .finish()
    }
}

impl TryFrom<NodelockConfig> for Settings {
    type Error = ConfigError;

    fn try_from(config: NodelockConfig) -> Result<Self, Self::Error> {
        let build_secret =
            Zeroizing::new(hex::decode(config.build_secret_hex.trim()).map_err(|e| {
                ConfigError::Invalid {
                    message: e.to_string().into(),
                    context: Some("build_secret_hex is not valid hex".into()),
                }
            })?);

        let shared_dir = expand_home(&config.nfs_dir)?;
        let local_dir = expand_home(&config.local_dir)?;
        debug!(shared = %shared_dir.display(), local = %local_dir.display(), "Resolved store paths");

        Self::new(
            shared_dir,
            local_dir,
            build_secret.to_vec(),
            Binding::new(config.bind_attrs, config.os_type),
            config.kdf,
        )
    }
}

/// Expands a leading `~` to the current user's home directory.
///
/// Only the bare `~` component is supported (`~user` is left untouched).
///
/// # Errors
/// Returns [`ConfigError::Invalid`] if the path starts with `~` and no home directory is set.
pub fn expand_home(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home_dir().ok_or_else(|| ConfigError::Invalid {
                message: format!("cannot expand {}", path.display()).into(),
                context: Some("home directory is not set".into()),
            })?;
            Ok(home.join(components.as_path()))
        },
        _ => Ok(path.to_path_buf()),
    }
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}
