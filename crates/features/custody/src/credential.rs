use std::fmt;
use zeroize::Zeroizing;

/// The protected credential, held in memory only and wiped on drop.
///
/// `Debug` prints the length, never the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<Vec<u8>>);

impl Credential {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits at `len / 2` (floor) into `(share_a, share_b)`.
    ///
    /// For odd lengths Share A is the shorter half.
    #[must_use]
    pub fn split(&self) -> (&[u8], &[u8]) {
        self.0.split_at(self.0.len() / 2)
    }

    /// Concatenates `share_a || share_b`.
    #[must_use]
    pub fn join(share_a: &[u8], share_b: &[u8]) -> Self {
        let mut bytes = Zeroizing::new(Vec::with_capacity(share_a.len() + share_b.len()));
        bytes.extend_from_slice(share_a);
        bytes.extend_from_slice(share_b);
        Self(bytes)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} bytes>)", self.0.len())
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}
