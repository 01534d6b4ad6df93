use nodelock_storage::StorageError;
use nodelock_vault::VaultError;
use std::borrow::Cow;

/// Error types of the custody workflows.
///
/// The first five variants are the protocol outcomes callers branch on; `Storage` and `Vault`
/// carry infrastructure failures that do not map to one of them.
#[nodelock_derive::nodelock_error]
pub enum CustodyError {
    /// Invalid settings, KDF parameters or credential input.
    #[error("Configuration error{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A share blob is missing from the shared store.
    #[error("Not provisioned{}: {message}", format_context(.context))]
    NotProvisioned { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// This machine has no local key.
    #[error("Not enrolled{}: {message}", format_context(.context))]
    NotEnrolled { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The local key exists but the current fingerprint does not open it.
    #[error("Hardware mismatch{}: {message}", format_context(.context))]
    HardwareMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A share blob does not open under the build secret or Share B.
    #[error("Secret mismatch{}: {message}", format_context(.context))]
    SecretMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Vault failure{}: {source}", format_context(.context))]
    Vault { source: VaultError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal custody error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
