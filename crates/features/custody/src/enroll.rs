use crate::error::{CustodyError, CustodyErrorExt};
use crate::{Custody, classify, load_blob, open_existing, open_or_create};
use nodelock_domain::constants::{LOCAL_KEY_BLOB, SHARE_B_BLOB};
use nodelock_hwid::Probe;
use nodelock_storage::{Access, StorageError};
use tracing::{info, warn};

/// Outcome of [`Custody::enroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrollment {
    /// A new local key was written.
    Enrolled,
    /// A local key was already present and was left untouched.
    AlreadyEnrolled,
}

impl<P: Probe> Custody<P> {
    /// Binds Share B to this machine.
    ///
    /// Opens Share B with the build secret and re-seals it under a key derived from the current
    /// hardware fingerprint. The local key is created with owner-only permissions and only if
    /// absent: a second call, or a concurrent one that loses the race, reports
    /// [`Enrollment::AlreadyEnrolled`] without rewriting the file.
    ///
    /// # Errors
    /// * [`CustodyError::NotProvisioned`] if the Share B blob is missing.
    /// * [`CustodyError::SecretMismatch`] if the build secret does not open Share B.
    /// * [`CustodyError::Storage`] or [`CustodyError::Vault`] on I/O or encoding failures.
    pub fn enroll(&self) -> Result<Enrollment, CustodyError> {
        let local = open_or_create(self.settings.local_dir())?;
        if local.exists(LOCAL_KEY_BLOB).context(LOCAL_KEY_BLOB)? {
            warn!(store = %local.root().display(), "Local key exists, skipping enrollment");
            return Ok(Enrollment::AlreadyEnrolled);
        }

        let not_provisioned = || CustodyError::NotProvisioned {
            message: SHARE_B_BLOB.into(),
            context: Some(self.settings.shared_dir().display().to_string().into()),
        };

        let shared = open_existing(self.settings.shared_dir())?.ok_or_else(not_provisioned)?;
        let blob_b = load_blob(&shared, SHARE_B_BLOB)?.ok_or_else(not_provisioned)?;

        let share_b = self.vault.open(self.settings.build_secret(), &blob_b).map_err(|e| {
            classify(e, CustodyError::SecretMismatch {
                message: "build secret does not open share B".into(),
                context: Some(SHARE_B_BLOB.into()),
            })
        })?;

        let fingerprint = self.fingerprint();
        let sealed = self.vault.seal(fingerprint.as_bytes(), &share_b).context(LOCAL_KEY_BLOB)?;

        match local.create_new(
            LOCAL_KEY_BLOB,
            &sealed.to_json().context(LOCAL_KEY_BLOB)?,
            Access::OwnerOnly,
        ) {
            Ok(()) => {
                info!(store = %local.root().display(), "Machine enrolled");
                Ok(Enrollment::Enrolled)
            },
            Err(StorageError::AlreadyExists { .. }) => {
                warn!(store = %local.root().display(), "Enrollment raced, keeping existing key");
                Ok(Enrollment::AlreadyEnrolled)
            },
            Err(e) => Err(e).context(LOCAL_KEY_BLOB),
        }
    }
}
