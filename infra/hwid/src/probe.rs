use crate::error::ProbeError;
use fxhash::FxHashMap;
use nodelock_domain::hardware::{Attribute, OsType};

/// A source of raw hardware attribute values.
///
/// [`crate::SystemProbe`] reads the real machine. Tests and tooling plug in their own source,
/// typically a [`FixedProbe`].
pub trait Probe {
    /// Reads one attribute.
    ///
    /// # Errors
    /// Returns a [`ProbeError`] when the value cannot be obtained. The fingerprint replaces it with
    /// the sentinel, so implementations should fail rather than invent a value.
    fn read(&self, attribute: Attribute, os: OsType) -> Result<Vec<u8>, ProbeError>;
}

impl<P: Probe + ?Sized> Probe for &P {
    fn read(&self, attribute: Attribute, os: OsType) -> Result<Vec<u8>, ProbeError> {
        (**self).read(attribute, os)
    }
}

/// A probe answering from a fixed table, independent of the OS tag.
///
/// Attributes without an entry report [`ProbeError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    values: FxHashMap<Attribute, Vec<u8>>,
}

impl FixedProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: impl Into<Vec<u8>>) -> Self {
        self.values.insert(attribute, value.into());
        self
    }

    pub fn set(&mut self, attribute: Attribute, value: impl Into<Vec<u8>>) {
        self.values.insert(attribute, value.into());
    }

    pub fn remove(&mut self, attribute: Attribute) {
        self.values.remove(&attribute);
    }
}

impl Probe for FixedProbe {
    fn read(&self, attribute: Attribute, _os: OsType) -> Result<Vec<u8>, ProbeError> {
        self.values.get(&attribute).cloned().ok_or_else(|| ProbeError::Unavailable {
            message: attribute.to_string().into(),
            context: Some("no fixed value".into()),
        })
    }
}
