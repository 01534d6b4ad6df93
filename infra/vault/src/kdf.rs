use crate::error::VaultError;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of every derived key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the random salt stored next to each ciphertext.
pub const SALT_LEN: usize = 16;

/// A 32-byte symmetric key produced by [`Kdf::derive`].
///
/// Never persisted. The bytes are wiped when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// scrypt key derivation with fixed cost parameters.
///
/// The same parameters must be used to seal and to open a blob; nothing in the blob records them.
#[derive(Debug, Clone)]
pub struct Kdf {
    params: scrypt::Params,
}

impl Kdf {
    /// Default work factor exponent (`N = 2^14`).
    pub const DEFAULT_LOG_N: u8 = 14;
    /// Default block size.
    pub const DEFAULT_R: u32 = 8;
    /// Default parallelism.
    pub const DEFAULT_P: u32 = 1;

    /// Builds a KDF with the default cost parameters.
    ///
    /// # Errors
    /// Never fails in practice; the signature mirrors [`Kdf::new`].
    pub fn standard() -> Result<Self, VaultError> {
        Self::new(Self::DEFAULT_LOG_N, Self::DEFAULT_R, Self::DEFAULT_P)
    }

    /// Builds a KDF with explicit scrypt parameters.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if scrypt rejects the combination.
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self, VaultError> {
        let params = scrypt::Params::new(log_n, r, p, KEY_LEN).map_err(|e| {
            VaultError::InvalidConfiguration {
                message: e.to_string().into(),
                context: Some(format!("scrypt log_n={log_n} r={r} p={p}").into()),
            }
        })?;
        Ok(Self { params })
    }

    /// Derives a key from `secret` and `salt`.
    ///
    /// Deterministic for identical inputs. Deliberately slow.
    ///
    /// # Errors
    /// Returns [`VaultError::Internal`] if scrypt refuses the output length, which cannot happen
    /// with parameters accepted by [`Kdf::new`].
    pub fn derive(&self, secret: &[u8], salt: &[u8]) -> Result<DerivedKey, VaultError> {
        let mut key = DerivedKey([0u8; KEY_LEN]);
        scrypt::scrypt(secret, salt, &self.params, &mut key.0).map_err(|e| VaultError::Internal {
            message: e.to_string().into(),
            context: Some("scrypt output".into()),
        })?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Kdf {
        Kdf::new(10, 8, 1).unwrap()
    }

    #[test]
    fn derivation_is_deterministic() {
        let kdf = fast();
        let a = kdf.derive(b"secret", b"0123456789abcdef").unwrap();
        let b = kdf.derive(b"secret", b"0123456789abcdef").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn salt_and_secret_change_the_key() {
        let kdf = fast();
        let base = kdf.derive(b"secret", b"0123456789abcdef").unwrap();
        let other_salt = kdf.derive(b"secret", b"fedcba9876543210").unwrap();
        let other_secret = kdf.derive(b"secreT", b"0123456789abcdef").unwrap();
        assert_ne!(base.as_bytes(), other_salt.as_bytes());
        assert_ne!(base.as_bytes(), other_secret.as_bytes());
    }

    #[test]
    fn oversized_work_factor_is_rejected() {
        // log_n must stay below 16 * r
        assert!(matches!(Kdf::new(20, 1, 1), Err(VaultError::InvalidConfiguration { .. })));
    }

    #[test]
    fn debug_is_redacted() {
        let key = fast().derive(b"s", b"0123456789abcdef").unwrap();
        assert_eq!(format!("{key:?}"), "DerivedKey(<redacted>)");
    }
}
