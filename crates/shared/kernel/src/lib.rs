//! Kernel utilities shared across slices.
//! Keep this crate lightweight: it loads configuration and turns it into validated [`Settings`].
//!
//! ## Config loading
//! ```rust,no_run
//! use nodelock_kernel::config::load_config;
//! use nodelock_kernel::domain::config::NodelockConfig;
//! use nodelock_kernel::settings::Settings;
//!
//! # fn main() -> Result<(), nodelock_kernel::config::ConfigError> {
//! let raw: NodelockConfig = load_config(Some("config.json"))?;
//! let settings = Settings::try_from(raw)?;
//! println!("shared store: {}", settings.shared_dir().display());
//! # Ok(())
//! # }
//! ```
//!
//! [`Settings`]: settings::Settings

pub mod config;
pub mod settings;

pub use nodelock_domain as domain;
