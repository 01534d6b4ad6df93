use crate::blob::SealedBlob;
use crate::cipher::{self, random_bytes};
use crate::error::VaultError;
use crate::kdf::{Kdf, SALT_LEN};
use tracing::trace;
use zeroize::Zeroizing;

/// Password-based sealing: every [`Vault::seal`] draws a fresh salt, derives a key from the
/// caller's secret and encrypts under a fresh nonce.
///
/// The vault holds no key material, only the KDF parameters. It is cheap to clone.
///
/// ### Example
/// ```rust
/// use nodelock_vault::prelude::*;
///
/// # fn main() -> Result<(), VaultError> {
/// let vault = Vault::new(Kdf::new(10, 8, 1)?);
///
/// let blob = vault.seal(b"build-secret", b"share")?;
/// let json = blob.to_json()?;
///
/// let restored = vault.open(b"build-secret", &SealedBlob::from_json(&json)?)?;
/// assert_eq!(restored.as_slice(), b"share");
/// assert!(vault.open(b"other-secret", &blob).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Vault {
    kdf: Kdf,
}

impl Vault {
    #[must_use]
    pub const fn new(kdf: Kdf) -> Self {
        Self { kdf }
    }

    #[must_use]
    pub const fn kdf(&self) -> &Kdf {
        &self.kdf
    }

    /// Seals `plaintext` under a key derived from `secret` and a fresh 16-byte salt.
    ///
    /// # Errors
    /// * [`VaultError::Random`] if the system RNG is unavailable.
    /// * [`VaultError::Encryption`] if the AEAD encryption fails.
    pub fn seal(&self, secret: &[u8], plaintext: &[u8]) -> Result<SealedBlob, VaultError> {
        let salt = random_bytes::<SALT_LEN>()?;
        let key = self.kdf.derive(secret, &salt)?;
        let sealed = cipher::seal(&key, plaintext)?;
        trace!(len = plaintext.len(), "Sealed payload");
        Ok(SealedBlob::encode(&salt, &sealed))
    }

    /// Re-derives the key from `secret` and the blob's salt, then opens the blob.
    ///
    /// # Errors
    /// Returns [`VaultError::Authentication`] for a wrong secret, tampered fields or fields that
    /// are not valid base64.
    pub fn open(&self, secret: &[u8], blob: &SealedBlob) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        let decoded = blob.decode()?;
        let key = self.kdf.derive(secret, &decoded.salt)?;
        cipher::open(&key, &decoded.nonce, &decoded.ct)
    }
}
