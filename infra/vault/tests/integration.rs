use nodelock_vault::prelude::*;
use std::collections::HashSet;

fn vault() -> Vault {
    Vault::new(Kdf::new(10, 8, 1).expect("valid test parameters"))
}

#[test]
fn blob_roundtrip_through_json() {
    let vault = vault();
    let blob = vault.seal(b"build-secret", b"34567890").unwrap();

    let json = blob.to_json().unwrap();
    let parsed = SealedBlob::from_json(&json).unwrap();
    let plain = vault.open(b"build-secret", &parsed).unwrap();

    assert_eq!(plain.as_slice(), b"34567890");
}

#[test]
fn wrong_secret_is_an_authentication_failure() {
    let vault = vault();
    let blob = vault.seal(b"right", b"payload").unwrap();

    let result = vault.open(b"wrong", &blob);
    assert!(matches!(result, Err(VaultError::Authentication { .. })));
}

#[test]
fn different_kdf_parameters_do_not_open() {
    let blob = vault().seal(b"secret", b"payload").unwrap();
    let other = Vault::new(Kdf::new(11, 8, 1).unwrap());

    assert!(matches!(other.open(b"secret", &blob), Err(VaultError::Authentication { .. })));
}

#[test]
fn tampered_fields_fail_closed() {
    let vault = vault();
    let blob = vault.seal(b"secret", b"payload").unwrap();

    let mut bad_ct = blob.clone();
    bad_ct.ct = blob.ct.chars().rev().collect();
    assert!(vault.open(b"secret", &bad_ct).is_err());

    let mut short_nonce = blob.clone();
    short_nonce.nonce = "AAAA".into();
    assert!(matches!(vault.open(b"secret", &short_nonce), Err(VaultError::Authentication { .. })));

    let mut bad_salt = blob;
    bad_salt.salt = "!!not-base64!!".into();
    assert!(matches!(vault.open(b"secret", &bad_salt), Err(VaultError::Authentication { .. })));
}

#[test]
fn empty_plaintext_is_supported() {
    let vault = vault();
    let blob = vault.seal(b"secret", b"").unwrap();
    assert!(vault.open(b"secret", &blob).unwrap().is_empty());
}

#[test]
fn salts_and_nonces_never_repeat() {
    let vault = vault();
    let mut salts = HashSet::new();
    let mut nonces = HashSet::new();

    for _ in 0..64 {
        let blob = vault.seal(b"secret", b"same plaintext").unwrap();
        assert!(salts.insert(blob.salt));
        assert!(nonces.insert(blob.nonce));
    }
}
