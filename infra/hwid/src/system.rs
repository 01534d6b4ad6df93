//! Probes against the running machine.
//!
//! MAC address, CPU id and host name go through `machineid_rs`, which returns a salted SHA-256
//! digest of the raw value rather than the value itself. Firmware attributes are read from
//! `/sys/class/dmi/id` on Linux and from `wmic` on Windows.

use crate::error::{ProbeError, ProbeErrorExt};
use crate::probe::Probe;
use machineid_rs::{Encryption, HWIDComponent, IdBuilder};
use nodelock_domain::hardware::{Attribute, OsType};
use std::path::Path;
use std::process::Command;

/// Salt passed to `machineid_rs`.
///
/// Changing it changes every fingerprint and strands all enrolled machines.
const KEY: &str = "nodelock-hwid";

const DMI_DIR: &str = "/sys/class/dmi/id";
const TPM_DIR: &str = "/sys/class/tpm/tpm0";

/// Dispatch from an [`Attribute`] to the routine that reads it on this machine.
pub trait AttributeProbe {
    /// Reads the attribute. `os` selects the implementation for firmware attributes and is
    /// ignored by the others.
    ///
    /// # Errors
    /// Returns a [`ProbeError`] when the value cannot be read or is empty.
    fn probe(self, os: OsType) -> Result<Vec<u8>, ProbeError>;
}

impl AttributeProbe for Attribute {
    fn probe(self, os: OsType) -> Result<Vec<u8>, ProbeError> {
        let value = match (self, os) {
            (Self::Mac, _) => machine_component(HWIDComponent::MacAddress)?,
            (Self::Cpu, _) => machine_component(HWIDComponent::CPUID)?,
            (Self::Hostname, _) => machine_component(HWIDComponent::MachineName)?,
            (Self::Bios, OsType::Linux) => read_sys(Path::new(DMI_DIR).join("bios_version"))?,
            (Self::Bios, OsType::Windows) => wmic(&["bios", "get", "serialnumber"])?,
            (Self::Baseboard, OsType::Linux) => read_sys(Path::new(DMI_DIR).join("board_serial"))?,
            (Self::Baseboard, OsType::Windows) => wmic(&["baseboard", "get", "serialnumber"])?,
            (Self::Uuid, OsType::Linux) => read_sys(Path::new(DMI_DIR).join("product_uuid"))?,
            (Self::Uuid, OsType::Windows) => wmic(&["csproduct", "get", "UUID"])?,
            (Self::Tpm, OsType::Linux) => {
                let dir = Path::new(TPM_DIR);
                if !dir.exists() {
                    return Err(ProbeError::Unavailable {
                        message: "no TPM device".into(),
                        context: Some(TPM_DIR.into()),
                    });
                }
                read_sys(dir.join("device").join("description"))?
            },
            (Self::Tpm, OsType::Windows) => {
                return Err(ProbeError::Unavailable {
                    message: "TPM probing is not implemented for windows".into(),
                    context: None,
                });
            },
        };

        if value.is_empty() {
            return Err(ProbeError::Unavailable {
                message: format!("{self} is empty").into(),
                context: None,
            });
        }
        Ok(value)
    }
}

/// The machine itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn read(&self, attribute: Attribute, os: OsType) -> Result<Vec<u8>, ProbeError> {
        attribute.probe(os)
    }
}

fn machine_component(component: HWIDComponent) -> Result<Vec<u8>, ProbeError> {
    IdBuilder::new(Encryption::SHA256)
        .add_component(component)
        .build(KEY)
        .map(String::into_bytes)
        .map_err(|e| ProbeError::MachineId {
            message: e.to_string().into(),
            context: Some("machineid_rs build failed".into()),
        })
}

fn read_sys(path: impl AsRef<Path>) -> Result<Vec<u8>, ProbeError> {
    let path = path.as_ref();
    let raw = std::fs::read(path).context(path.display().to_string())?;
    Ok(raw.trim_ascii().to_vec())
}

fn wmic(args: &[&str]) -> Result<Vec<u8>, ProbeError> {
    let output = Command::new("wmic").args(args).output().context("spawning wmic")?;
    if !output.status.success() {
        return Err(ProbeError::Unavailable {
            message: format!("wmic exited with {}", output.status).into(),
            context: Some(args.join(" ").into()),
        });
    }
    Ok(wmic_value(&output.stdout))
}

/// Drops the column header `wmic` prints and joins the remaining non-empty lines.
fn wmic_value(stdout: &[u8]) -> Vec<u8> {
    let lines: Vec<&[u8]> = stdout
        .split(|b| *b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .skip(1)
        .collect();
    lines.join(&b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmic_header_is_skipped() {
        let out = b"SerialNumber  \r\r\nABC123        \r\r\n\r\r\n";
        assert_eq!(wmic_value(out), b"ABC123");
        assert!(wmic_value(b"UUID\r\n\r\n").is_empty());
    }

    #[test]
    fn windows_tpm_is_unavailable() {
        assert!(matches!(
            Attribute::Tpm.probe(OsType::Windows),
            Err(ProbeError::Unavailable { .. })
        ));
    }

    #[test]
    fn machine_components_are_hex_digests() {
        if let Ok(value) = machine_component(HWIDComponent::MachineName) {
            assert_eq!(value.len(), 64);
            assert!(value.iter().all(u8::is_ascii_hexdigit));
        }
    }

    #[test]
    fn missing_sys_file_is_io_error() {
        let err = read_sys("/nonexistent/nodelock/probe").unwrap_err();
        assert!(matches!(err, ProbeError::Io { .. }));
    }
}
