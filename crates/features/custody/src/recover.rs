use crate::credential::Credential;
use crate::error::CustodyError;
use crate::{Custody, classify, load_blob, open_existing};
use nodelock_domain::constants::{LOCAL_KEY_BLOB, SHARE_A_BLOB};
use nodelock_hwid::Probe;
use tracing::info;

impl<P: Probe> Custody<P> {
    /// Rebuilds the credential on an enrolled machine.
    ///
    /// Opens the local key with the current fingerprint to get Share B, then opens Share A with
    /// Share B and joins the halves.
    ///
    /// # Errors
    /// * [`CustodyError::NotEnrolled`] if there is no local key.
    /// * [`CustodyError::HardwareMismatch`] if the current fingerprint does not open it.
    /// * [`CustodyError::NotProvisioned`] if the Share A blob is missing.
    /// * [`CustodyError::SecretMismatch`] if Share B does not open Share A, which happens when
    ///   the credential was re-provisioned after this machine enrolled.
    pub fn recover(&self) -> Result<Credential, CustodyError> {
        let not_enrolled = || CustodyError::NotEnrolled {
            message: LOCAL_KEY_BLOB.into(),
            context: Some(self.settings.local_dir().display().to_string().into()),
        };
        let local = open_existing(self.settings.local_dir())?.ok_or_else(not_enrolled)?;
        let local_blob = load_blob(&local, LOCAL_KEY_BLOB)?.ok_or_else(not_enrolled)?;

        let fingerprint = self.fingerprint();
        let share_b = self.vault.open(fingerprint.as_bytes(), &local_blob).map_err(|e| {
            classify(e, CustodyError::HardwareMismatch {
                message: "hardware configuration changed since enrollment".into(),
                context: Some(LOCAL_KEY_BLOB.into()),
            })
        })?;

        let not_provisioned = || CustodyError::NotProvisioned {
            message: SHARE_A_BLOB.into(),
            context: Some(self.settings.shared_dir().display().to_string().into()),
        };
        let shared = open_existing(self.settings.shared_dir())?.ok_or_else(not_provisioned)?;
        let blob_a = load_blob(&shared, SHARE_A_BLOB)?.ok_or_else(not_provisioned)?;

        let share_a = self.vault.open(&share_b, &blob_a).map_err(|e| {
            classify(e, CustodyError::SecretMismatch {
                message: "share B does not open share A".into(),
                context: Some(SHARE_A_BLOB.into()),
            })
        })?;

        info!("Credential recovered");
        Ok(Credential::join(&share_a, &share_b))
    }
}
