use config::{Config, Environment, File};
use nodelock_domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Keys whose environment override is a comma separated list.
const LIST_KEYS: &[&str] = &["bind_attrs"];

/// Configuration loading and validation failures.
#[nodelock_derive::nodelock_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file with environment overrides layered on top.
///
/// 1. **Base File**: the given path, or `config.json` in the working directory. The format is
///    picked from the extension (JSON, TOML, YAML, ...).
/// 2. **Environment Overrides**: variables prefixed with `NODELOCK__`, nested with `__`
///    (e.g. `NODELOCK__KDF__LOG_N=12`). `NODELOCK__BIND_ATTRS` takes a comma separated list.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, unreadable, or does not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let mut env = Environment::with_prefix(ENV_PREFIX).separator("__").list_separator(",");
    for key in LIST_KEYS {
        env = env.with_list_parse_key(key);
    }

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(env);

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
