use nodelock_domain::config::{KdfConfig, NodelockConfig};
use nodelock_domain::hardware::{Attribute, OsType};
use serde_json::json;

#[test]
fn kdf_defaults_match_protocol() {
    let kdf = KdfConfig::default();
    assert_eq!(kdf.log_n, 14);
    assert_eq!(kdf.r, 8);
    assert_eq!(kdf.p, 1);
}

#[test]
fn config_deserializes() {
    let raw = json!({
        "nfs_dir": "~/nfs/keys",
        "local_dir": "/var/lib/nodelock",
        "build_secret_hex": "00112233445566778899aabbccddeeff",
        "bind_attrs": ["mac", "hostname", "uuid"],
        "os_type": "windows",
        "kdf": { "log_n": 10 }
    });

    let cfg: NodelockConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.bind_attrs, vec![Attribute::Mac, Attribute::Hostname, Attribute::Uuid]);
    assert_eq!(cfg.os_type, OsType::Windows);
    assert_eq!(cfg.kdf, KdfConfig { log_n: 10, r: 8, p: 1 });
    assert_eq!(cfg.nfs_dir, std::path::PathBuf::from("~/nfs/keys"));
}

#[test]
fn unknown_attribute_is_rejected() {
    let raw = json!({
        "nfs_dir": "/a",
        "local_dir": "/b",
        "build_secret_hex": "00",
        "bind_attrs": ["mac", "gpu"]
    });

    assert!(serde_json::from_value::<NodelockConfig>(raw).is_err());
}

#[test]
fn debug_output_redacts_secret() {
    let raw = json!({
        "nfs_dir": "/a",
        "local_dir": "/b",
        "build_secret_hex": "deadbeefcafef00d",
        "bind_attrs": ["cpu"]
    });

    let cfg: NodelockConfig = serde_json::from_value(raw).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("deadbeefcafef00d"));
    assert!(rendered.contains("<redacted>"));
}
