//! # Node-locked Credential Custody
//!
//! Protects one credential so that rebuilding it needs both the build secret and one specific,
//! previously enrolled machine.
//!
//! ## Protocol
//!
//! The credential is split in half. Each half is sealed under a different derived key and the
//! results are spread over two stores:
//!
//! | File             | Store  | Plaintext | Key derived from |
//! |------------------|--------|-----------|------------------|
//! | `api_part2.json` | shared | Share B   | build secret     |
//! | `api_part1.json` | shared | Share A   | Share B          |
//! | `local_key.json` | local  | Share B   | machine fingerprint |
//!
//! 1. **Provision** ([`Custody::provision`]): run once by an operator holding the build secret.
//!    Writes both shared files.
//! 2. **Enroll** ([`Custody::enroll`]): run once per machine. Opens Share B with the build
//!    secret and re-seals it under the machine fingerprint into the local store.
//! 3. **Recover** ([`Custody::recover`]): run whenever the credential is needed. Opens the local
//!    key with the current fingerprint, then Share A with Share B, and joins the halves.
//!
//! Every blob is `{salt, nonce, ct}` JSON with a fresh random salt and nonce per seal.
//!
//! ## Failure Model
//!
//! Failures are reported as distinct [`CustodyError`] kinds and are never retried with weaker
//! parameters. A local key that no longer opens is a [`CustodyError::HardwareMismatch`], the
//! signal that the machine changed since enrollment. Enrolling an already enrolled machine is
//! not an error: it returns [`Enrollment::AlreadyEnrolled`] and leaves the file untouched.

mod credential;
mod enroll;
mod error;
mod provision;
mod recover;

pub use crate::credential::Credential;
pub use crate::enroll::Enrollment;
pub use crate::error::{CustodyError, CustodyErrorExt};

use nodelock_domain::constants::{LOCAL_KEY_BLOB, SHARE_A_BLOB, SHARE_B_BLOB};
use nodelock_domain::hardware::Attribute;
use nodelock_hwid::{Fingerprint, Fingerprinter, Probe, Reading, SystemProbe};
use nodelock_kernel::settings::Settings;
use nodelock_storage::{Storage, StorageError};
use nodelock_vault::{Kdf, SealedBlob, Vault, VaultError};
use std::path::Path;

/// Presence of the three protocol artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub share_b: bool,
    pub share_a: bool,
    pub local_key: bool,
}

impl Status {
    #[must_use]
    pub const fn is_provisioned(&self) -> bool {
        self.share_a && self.share_b
    }

    #[must_use]
    pub const fn is_enrolled(&self) -> bool {
        self.local_key
    }
}

/// Entry point to the workflows.
///
/// Holds the immutable [`Settings`], the vault built from their KDF parameters and the hardware
/// probe. Stores are opened per call.
#[derive(Debug)]
pub struct Custody<P = SystemProbe> {
    settings: Settings,
    vault: Vault,
    probe: P,
}

impl Custody<SystemProbe> {
    /// Builds a custody handle that probes the running machine.
    ///
    /// # Errors
    /// Returns [`CustodyError::Configuration`] if the KDF parameters are invalid.
    pub fn new(settings: Settings) -> Result<Self, CustodyError> {
        Self::with_probe(settings, SystemProbe)
    }
}

impl<P: Probe> Custody<P> {
    /// Builds a custody handle with a custom hardware probe.
    ///
    /// # Errors
    /// Returns [`CustodyError::Configuration`] if the KDF parameters are invalid.
    pub fn with_probe(settings: Settings, probe: P) -> Result<Self, CustodyError> {
        let kdf = settings.kdf();
        let kdf = Kdf::new(kdf.log_n, kdf.r, kdf.p).map_err(|e| CustodyError::Configuration {
            message: e.to_string().into(),
            context: Some("kdf".into()),
        })?;
        Ok(Self { settings, vault: Vault::new(kdf), probe })
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reports which artifacts exist. Missing store directories count as missing files.
    ///
    /// # Errors
    /// Returns [`CustodyError::Storage`] if a store cannot be inspected.
    pub fn status(&self) -> Result<Status, CustodyError> {
        let shared = open_existing(self.settings.shared_dir())?;
        let local = open_existing(self.settings.local_dir())?;

        let has = |store: &Option<Storage>, name: &str| -> Result<bool, CustodyError> {
            match store {
                Some(store) => Ok(store.exists(name)?),
                None => Ok(false),
            }
        };

        Ok(Status {
            share_b: has(&shared, SHARE_B_BLOB)?,
            share_a: has(&shared, SHARE_A_BLOB)?,
            local_key: has(&local, LOCAL_KEY_BLOB)?,
        })
    }

    /// Reports per bound attribute whether this machine yields a real value or the sentinel.
    #[must_use]
    pub fn inspect(&self) -> Vec<(Attribute, Reading)> {
        self.fingerprinter().inspect()
    }

    fn fingerprinter(&self) -> Fingerprinter<&P> {
        Fingerprinter::new(&self.probe, self.settings.binding().clone())
    }

    fn fingerprint(&self) -> Fingerprint {
        self.fingerprinter().compute()
    }
}

/// Opens a store for writing: creates its directory and sweeps stale temp files.
fn open_or_create(root: &Path) -> Result<Storage, CustodyError> {
    Storage::builder(root).open().context(format!("opening store {}", root.display()))
}

/// Opens a store for reading, only if its directory exists. Nothing on disk is touched.
fn open_existing(root: &Path) -> Result<Option<Storage>, CustodyError> {
    match Storage::builder(root).create(false).purge(false).open() {
        Ok(store) => Ok(Some(store)),
        Err(StorageError::DirectoryNotFound { .. }) => Ok(None),
        Err(e) => Err(e).context(format!("opening store {}", root.display())),
    }
}

/// Reads and parses a blob, returning `None` when the file is absent.
fn load_blob(store: &Storage, name: &'static str) -> Result<Option<SealedBlob>, CustodyError> {
    match store.read(name) {
        Ok(bytes) => Ok(Some(SealedBlob::from_json(&bytes).context(name)?)),
        Err(StorageError::FileNotFound { .. }) => Ok(None),
        Err(e) => Err(e).context(name),
    }
}

/// Maps an authentication failure to the protocol-level error, passing other failures through.
fn classify(err: VaultError, on_auth: CustodyError) -> CustodyError {
    match err {
        VaultError::Authentication { .. } => on_auth,
        other => CustodyError::Vault { source: other, context: None },
    }
}
