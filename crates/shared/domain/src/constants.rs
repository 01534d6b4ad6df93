//! Well-known names shared by the workflows, the CLI, and operators' tooling.

/// Share B sealed under the build-secret-derived key (shared store).
pub const SHARE_B_BLOB: &str = "api_part2.json";

/// Share A sealed under the Share-B-derived key (shared store).
pub const SHARE_A_BLOB: &str = "api_part1.json";

/// Share B sealed under the hardware-fingerprint-derived key (local store).
pub const LOCAL_KEY_BLOB: &str = "local_key.json";

/// Configuration file used when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Prefix for environment overrides, e.g. `NODELOCK__BUILD_SECRET_HEX`.
pub const ENV_PREFIX: &str = "NODELOCK";
