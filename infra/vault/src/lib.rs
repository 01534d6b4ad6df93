//! Key derivation and authenticated encryption for nodelock blobs.
//!
//! A blob is produced in three steps: draw a random 16-byte salt, derive a 32-byte key from the
//! caller's secret with scrypt, and encrypt with AES-256-GCM under a random 96-bit nonce and no
//! associated data. The persisted record is JSON:
//!
//! ```text
//! { "salt": base64(16), "nonce": base64(12), "ct": base64(ciphertext || tag(16)) }
//! ```
//!
//! ## Nonce Policy
//!
//! Nonces are random. Each seal also derives a fresh key through a fresh salt, so a key and nonce
//! pair is never reused.
//!
//! ## Failure Model
//!
//! Opening fails closed. A wrong secret, a tampered field, a truncated ciphertext or invalid
//! base64 all surface as [`VaultError::Authentication`]; a file that is not a blob at all
//! surfaces as [`VaultError::MalformedBlob`].

mod blob;
pub mod cipher;
mod engine;
mod error;
pub mod kdf;

pub use blob::SealedBlob;
pub use engine::Vault;
pub use error::{VaultError, VaultErrorExt};
pub use kdf::{DerivedKey, Kdf};

pub mod prelude {
    pub use crate::blob::SealedBlob;
    pub use crate::engine::Vault;
    pub use crate::error::{VaultError, VaultErrorExt};
    pub use crate::kdf::{DerivedKey, Kdf};
}
