//! # Machine Fingerprints
//!
//! A fingerprint binds a key to a machine. It is computed from an ordered list of hardware
//! attributes (a [`Binding`](nodelock_domain::hardware::Binding)):
//!
//! ```text
//! SHA-256( probe(a1) | probe(a2) | ... | probe(an) )
//! ```
//!
//! - Order matters: `[mac, hostname]` and `[hostname, mac]` give different fingerprints.
//! - A probe that fails or returns nothing contributes the bytes `none`. Probing never fails the
//!   fingerprint as a whole, so a machine that loses an attribute after enrollment simply stops
//!   matching.
//! - The fingerprint is deterministic for a fixed probe and binding.
//!
//! ## Probes
//!
//! [`Probe`] is the seam between the hash and the hardware. [`SystemProbe`] reads the running
//! machine; [`FixedProbe`] answers from a table and makes every workflow testable without real
//! hardware.
//!
//! ## Security Notes
//!
//! Attribute values are identifiers, not secrets, and are low-entropy. The fingerprint only
//! becomes key material after it is stretched by the KDF. Neither raw values nor fingerprints
//! are logged.
//!
//! ## Compatibility
//!
//! [`SystemProbe`] does not return MAC address, CPU id or host name verbatim. Those three are
//! read through `machineid_rs` and come back as a salted SHA-256 digest (64 hex
//! characters). Fingerprints therefore differ from tools that hash the raw attribute strings,
//! and a local key enrolled by such a tool cannot be opened here. Affected machines have to be
//! enrolled again from the shared part and the credential.
//!
//! ```rust
//! use nodelock_domain::hardware::{Attribute, Binding, OsType};
//! use nodelock_hwid::{Fingerprint, Fingerprinter, FixedProbe};
//!
//! let probe = FixedProbe::new()
//!     .with(Attribute::Mac, b"\x00\x1a\x2b\x3c\x4d\x5e".to_vec())
//!     .with(Attribute::Hostname, "build-07");
//! let binding = Binding::new(vec![Attribute::Mac, Attribute::Hostname], OsType::Linux);
//!
//! let fp = Fingerprinter::new(probe, binding).compute();
//! assert_eq!(fp, Fingerprint::from_parts([&b"\x00\x1a\x2b\x3c\x4d\x5e"[..], b"build-07"]));
//! ```

mod error;
mod fingerprint;
mod probe;
mod system;

pub use error::{ProbeError, ProbeErrorExt};
pub use fingerprint::{Fingerprint, Fingerprinter, Reading, SENTINEL, SEPARATOR};
pub use probe::{FixedProbe, Probe};
pub use system::{AttributeProbe, SystemProbe};
