//! Facade crate for nodelock.
//! Re-exports the domain, kernel and custody crates and wires configuration into a ready
//! [`Custody`] handle. Keep this crate thin: it composes other crates, it does not implement
//! protocol logic.
//!
//! ## Usage
//! ```rust,no_run
//! # fn main() -> Result<(), nodelock::CustodyError> {
//! let custody = nodelock::open(Some("config.json"))?;
//! let credential = custody.recover()?;
//! # drop(credential);
//! # Ok(())
//! # }
//! ```

pub use nodelock_custody::{Credential, Custody, CustodyError, Enrollment, Status};
pub use nodelock_domain as domain;
pub use nodelock_hwid as hwid;
pub use nodelock_kernel as kernel;
pub use nodelock_vault as vault;

use nodelock_domain::config::NodelockConfig;
use nodelock_kernel::config::{ConfigError, load_config};
use nodelock_kernel::settings::Settings;
use std::path::Path;
use tracing::debug;

/// Loads configuration and resolves it into [`Settings`].
///
/// `None` reads `config.json` from the working directory. `NODELOCK__*` environment variables
/// override file values.
///
/// # Errors
/// Returns [`CustodyError::Configuration`] if the file is missing or invalid.
pub fn settings(path: Option<impl AsRef<Path>>) -> Result<Settings, CustodyError> {
    let raw: NodelockConfig = load_config(path).map_err(configuration)?;
    let settings = Settings::try_from(raw).map_err(configuration)?;
    debug!(?settings, "Settings resolved");
    Ok(settings)
}

/// Loads configuration and builds a [`Custody`] handle that probes the running machine.
///
/// # Errors
/// Returns [`CustodyError::Configuration`] if the configuration or KDF parameters are invalid.
pub fn open(path: Option<impl AsRef<Path>>) -> Result<Custody, CustodyError> {
    Custody::new(settings(path)?)
}

fn configuration(err: ConfigError) -> CustodyError {
    CustodyError::Configuration { message: err.to_string().into(), context: None }
}
