use crate::error::VaultError;
use crate::kdf::DerivedKey;
use aead::inout::InOutBuf;
use aead::{AeadInOut, Key, KeyInit, Nonce, Tag};
use aes_gcm::Aes256Gcm;
use zeroize::Zeroizing;

/// AEAD nonce length (96-bit).
pub const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit), appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Output of [`seal`]: the nonce plus `ciphertext || tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

fn init_cipher(key: &DerivedKey) -> Result<Aes256Gcm, VaultError> {
    let key = Key::<Aes256Gcm>::try_from(&key.as_bytes()[..]).map_err(|_| {
        VaultError::InvalidConfiguration {
            message: "Invalid key length, must be 32 bytes".into(),
            context: Some("AES-256-GCM".into()),
        }
    })?;
    Ok(Aes256Gcm::new(&key))
}

pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N], VaultError> {
    let mut buf = [0u8; N];
    getrandom::fill(&mut buf).map_err(|e| VaultError::Random {
        message: e.to_string().into(),
        context: None,
    })?;
    Ok(buf)
}

/// Encrypts `plaintext` under `key` with a fresh random nonce and no associated data.
///
/// # Errors
/// * [`VaultError::Random`] if the system RNG is unavailable.
/// * [`VaultError::Encryption`] if the AEAD encryption fails.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<Sealed, VaultError> {
    let cipher = init_cipher(key)?;
    let nonce_bytes = random_bytes::<NONCE_LEN>()?;
    let nonce = Nonce::<Aes256Gcm>::from(nonce_bytes);

    let mut buf = Vec::with_capacity(plaintext.len() + TAG_LEN);
    buf.extend_from_slice(plaintext);

    let tag = cipher
        .encrypt_inout_detached(&nonce, &[], InOutBuf::from(buf.as_mut_slice()))
        .map_err(|_| VaultError::Encryption {
            message: "Encryption failed".into(),
            context: Some("AEAD encryption failed".into()),
        })?;

    buf.extend_from_slice(tag.as_slice());
    Ok(Sealed { nonce: nonce_bytes, ciphertext: buf })
}

/// Decrypts `ciphertext || tag` produced by [`seal`].
///
/// # Errors
/// Returns [`VaultError::Authentication`] on a wrong key, a tampered or truncated ciphertext,
/// or a nonce of the wrong length.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    let nonce = Nonce::<Aes256Gcm>::try_from(nonce)
        .map_err(|_| VaultError::authentication("nonce must be 12 bytes"))?;

    let Some(split) = ciphertext.len().checked_sub(TAG_LEN) else {
        return Err(VaultError::authentication("ciphertext shorter than tag"));
    };
    let (body, tag_slice) = ciphertext.split_at(split);
    let tag = Tag::<Aes256Gcm>::try_from(tag_slice)
        .map_err(|_| VaultError::authentication("tag must be 16 bytes"))?;

    let cipher = init_cipher(key)?;
    let mut buf = Zeroizing::new(body.to_vec());
    cipher
        .decrypt_inout_detached(&nonce, &[], InOutBuf::from(buf.as_mut_slice()), &tag)
        .map_err(|_| VaultError::authentication("tag mismatch"))?;

    Ok(buf)
}
