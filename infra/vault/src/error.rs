//! # Vault Errors
//!
//! This module defines the [`VaultError`] enum used throughout the vault crate for reporting
//! key derivation, cryptographic and blob encoding failures.

use std::borrow::Cow;

/// A specialized [`VaultError`] enum for vault-related failures.
#[nodelock_derive::nodelock_error]
pub enum VaultError {
    /// A sealed payload could not be opened.
    ///
    /// Wrong key, tampered ciphertext, truncated input and undecodable base64 all collapse into
    /// this one variant. No partial plaintext is ever returned.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Authentication { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The stored blob is not a `{salt, nonce, ct}` JSON record.
    #[error("Malformed blob{}: {source}", format_context(.context))]
    MalformedBlob { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The system random source is unavailable.
    #[error("Random source unavailable{}: {message}", format_context(.context))]
    Random { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure when the key derivation parameters are rejected.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl VaultError {
    pub(crate) fn authentication(context: &'static str) -> Self {
        Self::Authentication {
            message: "AEAD authentication failed".into(),
            context: Some(context.into()),
        }
    }
}
