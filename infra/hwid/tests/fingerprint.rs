use hex_literal::hex;
use nodelock_domain::hardware::{Attribute, Binding, OsType};
use nodelock_hwid::*;
use proptest::prelude::*;

fn probe() -> FixedProbe {
    FixedProbe::new()
        .with(Attribute::Mac, hex!("001a2b3c4d5e").to_vec())
        .with(Attribute::Cpu, "x86_64")
        .with(Attribute::Hostname, "build-07")
}

fn binding(attrs: &[Attribute]) -> Binding {
    Binding::new(attrs.to_vec(), OsType::Linux)
}

#[test]
fn known_digest_for_joined_values() {
    let fp = Fingerprint::from_parts([b"abc", b"def"]);
    assert_eq!(
        fp.as_bytes(),
        &hex!("0def6826e591afbb7b4431daaa6f2a78c1e5af533cb94b6db1635efbf255cb16")
    );
}

#[test]
fn failed_probe_contributes_sentinel() {
    let fp =
        Fingerprinter::new(probe(), binding(&[Attribute::Tpm, Attribute::Hostname])).compute();
    assert_eq!(
        fp.as_bytes(),
        &hex!("a9d78eedaafecd20b1f632582a1e6d6fcdb4c6db07372c314d7d2b9cc5916e7a")
    );
}

#[test]
fn empty_value_is_treated_as_missing() {
    let empty = probe().with(Attribute::Bios, Vec::new());
    let with_empty = Fingerprinter::new(empty, binding(&[Attribute::Bios])).compute();
    let missing = Fingerprinter::new(probe(), binding(&[Attribute::Bios])).compute();
    assert_eq!(with_empty, missing);
    assert_eq!(missing, Fingerprint::from_parts([SENTINEL]));
}

#[test]
fn deterministic_for_same_inputs() {
    let attrs = [Attribute::Mac, Attribute::Cpu, Attribute::Hostname];
    let a = Fingerprinter::new(probe(), binding(&attrs)).compute();
    let b = Fingerprinter::new(probe(), binding(&attrs)).compute();
    assert_eq!(a, b);
}

#[test]
fn attribute_order_matters() {
    let forward = Fingerprinter::new(probe(), binding(&[Attribute::Mac, Attribute::Hostname]));
    let reverse = Fingerprinter::new(probe(), binding(&[Attribute::Hostname, Attribute::Mac]));
    assert_ne!(forward.compute(), reverse.compute());
}

#[test]
fn changed_attribute_changes_fingerprint() {
    let attrs = [Attribute::Mac, Attribute::Hostname];
    let before = Fingerprinter::new(probe(), binding(&attrs)).compute();

    let mut moved = probe();
    moved.set(Attribute::Hostname, "build-08");
    let after = Fingerprinter::new(moved, binding(&attrs)).compute();

    assert_ne!(before, after);
}

#[test]
fn inspect_reports_sentinels_without_values() {
    let fp = Fingerprinter::new(probe(), binding(&[Attribute::Mac, Attribute::Uuid]));
    assert_eq!(
        fp.inspect(),
        vec![(Attribute::Mac, Reading::Value), (Attribute::Uuid, Reading::Sentinel)]
    );
}

#[test]
fn debug_never_shows_digest() {
    let fp = Fingerprint::from_parts([b"abc"]);
    assert_eq!(format!("{fp:?}"), "Fingerprint(<redacted>)");
}

#[test]
fn system_probe_falls_back_to_sentinel() {
    let fp = Fingerprinter::new(SystemProbe, Binding::new(vec![Attribute::Tpm], OsType::Windows));
    assert_eq!(fp.inspect(), vec![(Attribute::Tpm, Reading::Sentinel)]);
    assert_eq!(fp.compute(), Fingerprint::from_parts([SENTINEL]));
}

proptest! {
    #[test]
    fn joined_parts_match_single_buffer(parts in proptest::collection::vec(
        proptest::collection::vec(any::<u8>(), 0..32), 1..6)
    ) {
        let joined = parts.join(&b'|');
        prop_assert_eq!(Fingerprint::from_parts(&parts), Fingerprint::from_parts([joined]));
    }
}
