use crate::credential::Credential;
use crate::error::{CustodyError, CustodyErrorExt};
use crate::{Custody, open_or_create};
use nodelock_domain::constants::{SHARE_A_BLOB, SHARE_B_BLOB};
use nodelock_hwid::Probe;
use nodelock_storage::Access;
use tracing::info;

impl<P: Probe> Custody<P> {
    /// Splits `credential` and writes both encrypted shares to the shared store.
    ///
    /// Share B is sealed under a key derived from the build secret; Share A under a key derived
    /// from Share B. Existing share files are replaced atomically, which invalidates every
    /// machine enrolled against the previous Share B.
    ///
    /// # Errors
    /// * [`CustodyError::Configuration`] if the credential is empty.
    /// * [`CustodyError::Storage`] if the shared store cannot be written.
    /// * [`CustodyError::Vault`] if sealing fails.
    pub fn provision(&self, credential: &Credential) -> Result<(), CustodyError> {
        if credential.is_empty() {
            return Err(CustodyError::Configuration {
                message: "credential is empty".into(),
                context: None,
            });
        }

        let (share_a, share_b) = credential.split();
        let shared = open_or_create(self.settings.shared_dir())?;

        let blob_b = self.vault.seal(self.settings.build_secret(), share_b).context("share B")?;
        let blob_a = self.vault.seal(share_b, share_a).context("share A")?;

        shared
            .write(SHARE_B_BLOB, &blob_b.to_json().context(SHARE_B_BLOB)?, Access::Shared)
            .context(SHARE_B_BLOB)?;
        shared
            .write(SHARE_A_BLOB, &blob_a.to_json().context(SHARE_A_BLOB)?, Access::Shared)
            .context(SHARE_A_BLOB)?;

        info!(store = %shared.root().display(), "Credential provisioned");
        Ok(())
    }
}
