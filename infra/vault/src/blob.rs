use crate::cipher::Sealed;
use crate::error::{VaultError, VaultErrorExt};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// One sealed payload as persisted on disk.
///
/// Each field is standard base64 (with padding). The salt re-derives the key, the nonce and
/// `ct` (ciphertext followed by the 16-byte tag) feed the AEAD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedBlob {
    pub salt: String,
    pub nonce: String,
    pub ct: String,
}

/// The raw bytes of a [`SealedBlob`] after base64 decoding.
#[derive(Debug)]
pub(crate) struct DecodedBlob {
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    pub ct: Vec<u8>,
}

impl SealedBlob {
    pub(crate) fn encode(salt: &[u8], sealed: &Sealed) -> Self {
        Self {
            salt: STANDARD.encode(salt),
            nonce: STANDARD.encode(sealed.nonce),
            ct: STANDARD.encode(&sealed.ciphertext),
        }
    }

    /// Decodes all three fields.
    ///
    /// Invalid base64 is indistinguishable from a wrong key to the caller.
    pub(crate) fn decode(&self) -> Result<DecodedBlob, VaultError> {
        let field = |value: &str, name: &'static str| {
            STANDARD.decode(value).map_err(|_| VaultError::authentication(name))
        };
        Ok(DecodedBlob {
            salt: field(&self.salt, "salt is not valid base64")?,
            nonce: field(&self.nonce, "nonce is not valid base64")?,
            ct: field(&self.ct, "ct is not valid base64")?,
        })
    }

    /// Serializes the blob as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`VaultError::MalformedBlob`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, VaultError> {
        serde_json::to_vec_pretty(self).context("encoding sealed blob")
    }

    /// Parses a blob from JSON bytes.
    ///
    /// # Errors
    /// Returns [`VaultError::MalformedBlob`] if the bytes are not a `{salt, nonce, ct}` record.
    pub fn from_json(bytes: &[u8]) -> Result<Self, VaultError> {
        serde_json::from_slice(bytes).context("decoding sealed blob")
    }
}
