use nodelock_kernel::config::{ConfigError, load_config};
use nodelock_kernel::domain::config::NodelockConfig;
use nodelock_kernel::domain::hardware::{Attribute, OsType};
use nodelock_kernel::settings::Settings;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

const JSON: &str = r#"{
    "nfs_dir": "/srv/nfs/keys",
    "local_dir": "/var/lib/nodelock",
    "build_secret_hex": "79656f6f6f6f6f6f",
    "bind_attrs": ["mac", "hostname"],
    "os_type": "linux"
}"#;

#[test]
#[serial]
fn loads_json_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("config.json");
    fs::write(&path, JSON)?;

    let cfg: NodelockConfig = load_config(Some(&path))?;
    assert_eq!(cfg.bind_attrs, vec![Attribute::Mac, Attribute::Hostname]);
    assert_eq!(cfg.os_type, OsType::Linux);
    assert_eq!(cfg.kdf.log_n, 14);

    let settings = Settings::try_from(cfg)?;
    assert_eq!(settings.build_secret(), b"yeoooooo");
    Ok(())
}

#[test]
#[serial]
fn loads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("nodelock.toml");
    fs::write(
        &path,
        r#"
nfs_dir = "/srv/nfs"
local_dir = "/var/lib/nodelock"
build_secret_hex = "00ff"
bind_attrs = ["uuid", "cpu"]

[kdf]
log_n = 12
"#,
    )?;

    let cfg: NodelockConfig = load_config(Some(&path))?;
    assert_eq!(cfg.bind_attrs, vec![Attribute::Uuid, Attribute::Cpu]);
    assert_eq!(cfg.kdf.log_n, 12);
    assert_eq!(cfg.kdf.r, 8);
    Ok(())
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_config::<NodelockConfig>(Some(dir.path().join("absent.json"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
}
