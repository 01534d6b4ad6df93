use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A hardware attribute a credential can be bound to.
///
/// The set is closed. Serialized names are the lowercase variant names used in configuration
/// files (`bind_attrs = ["mac", "hostname"]`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Attribute {
    Mac,
    Cpu,
    Hostname,
    Bios,
    Baseboard,
    Uuid,
    Tpm,
}

impl Attribute {
    /// Returns `true` for attributes whose probe branches on the [`OsType`].
    #[must_use]
    pub const fn is_os_dependent(self) -> bool {
        matches!(self, Self::Bios | Self::Baseboard | Self::Uuid | Self::Tpm)
    }
}

/// Platform family used to pick the OS-dependent probe implementation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OsType {
    Linux,
    Windows,
}

impl Default for OsType {
    /// The platform this binary was compiled for; non-Windows targets map to [`OsType::Linux`].
    fn default() -> Self {
        if cfg!(target_os = "windows") { Self::Windows } else { Self::Linux }
    }
}

/// The ordered attribute list plus OS tag a machine is bound with.
///
/// Order matters: `[mac, hostname]` and `[hostname, mac]` produce different fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub attributes: Vec<Attribute>,
    pub os: OsType,
}

impl Binding {
    #[must_use]
    pub const fn new(attributes: Vec<Attribute>, os: OsType) -> Self {
        Self { attributes, os }
    }
}
