use crate::probe::Probe;
use nodelock_domain::hardware::{Attribute, Binding};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte placed between consecutive probe outputs.
pub const SEPARATOR: u8 = b'|';

/// Value substituted for a probe that fails or returns nothing.
pub const SENTINEL: &[u8] = b"none";

/// SHA-256 over the ordered, `|`-joined probe outputs of a [`Binding`].
///
/// Used as KDF input for the local key. Never persisted or logged.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Hashes already-collected probe outputs.
    #[must_use]
    pub fn from_parts<I, B>(parts: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut hasher = Sha256::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                hasher.update([SEPARATOR]);
            }
            hasher.update(part.as_ref());
        }

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fingerprint(<redacted>)")
    }
}

/// Whether a probe produced a real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Value,
    Sentinel,
}

/// Computes fingerprints for one [`Binding`] from a [`Probe`].
#[derive(Debug, Clone)]
pub struct Fingerprinter<P> {
    probe: P,
    binding: Binding,
}

impl<P: Probe> Fingerprinter<P> {
    pub const fn new(probe: P, binding: Binding) -> Self {
        Self { probe, binding }
    }

    #[must_use]
    pub const fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Probes every bound attribute in order and hashes the results.
    #[must_use]
    pub fn compute(&self) -> Fingerprint {
        Fingerprint::from_parts(self.binding.attributes.iter().map(|attr| self.sample(*attr).0))
    }

    /// Reports, per bound attribute, whether its probe produced a real value.
    ///
    /// Raw values are not returned.
    #[must_use]
    pub fn inspect(&self) -> Vec<(Attribute, Reading)> {
        self.binding.attributes.iter().map(|attr| (*attr, self.sample(*attr).1)).collect()
    }

    fn sample(&self, attribute: Attribute) -> (Vec<u8>, Reading) {
        // Only platform-specific readers care which OS the binding names.
        let os = attribute.is_os_dependent().then_some(self.binding.os);
        match self.probe.read(attribute, self.binding.os) {
            Ok(value) if !value.is_empty() => (value, Reading::Value),
            Ok(_) => {
                debug!(%attribute, ?os, "Probe returned nothing, using sentinel");
                (SENTINEL.to_vec(), Reading::Sentinel)
            },
            Err(err) => {
                debug!(%attribute, ?os, error = %err, "Probe failed, using sentinel");
                (SENTINEL.to_vec(), Reading::Sentinel)
            },
        }
    }
}
