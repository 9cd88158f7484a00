//! # AES-256-GCM Encryption
//!
//! Authenticated encryption for wallet-to-wallet messages. The key comes
//! from ECDH between two secp256k1 accounts (see `account::messaging`);
//! this module only knows about 32-byte keys and opaque bytes.
//!
//! ## Nonce management
//!
//! Every call draws a fresh 96-bit nonce from the OS CSPRNG. There is no
//! API that takes a nonce from the caller. Reusing a GCM nonce under the
//! same key leaks the XOR of the plaintexts and lets an attacker forge tags,
//! and the ECDH key for a given pair of accounts never changes.
//!
//! ## Wire format
//!
//! ```text
//! nonce (12) || ciphertext (n) || tag (16)
//! ```
//!
//! [`encrypt`] returns this as one buffer, [`decrypt`] expects it back.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use thiserror::Error;

use crate::config::{AES_KEY_LENGTH, AES_NONCE_LENGTH, AES_TAG_LENGTH};
use crate::error::WalletError;

/// Errors from the AEAD layer.
///
/// Wrong key and corrupted ciphertext look the same.
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed -- wrong key or corrupted ciphertext")]
    DecryptFailed,

    #[error("sealed message too short: must be at least {} bytes", AES_NONCE_LENGTH + AES_TAG_LENGTH)]
    CiphertextTooShort,
}

impl From<EncryptionError> for WalletError {
    fn from(err: EncryptionError) -> Self {
        match err {
            EncryptionError::EncryptFailed => WalletError::KeyMaterial(err.to_string()),
            EncryptionError::DecryptFailed | EncryptionError::CiphertextTooShort => {
                WalletError::DecryptionFailed
            }
        }
    }
}

/// Encrypt `plaintext` under `key` with a random nonce.
///
/// Returns `nonce || ciphertext || tag`.
///
/// # Example
///
/// ```
/// use comhub_wallet::crypto::encryption::{decrypt, encrypt};
///
/// let key = [0x42u8; 32];
/// let sealed = encrypt(&key, b"meet at block 1200").unwrap();
/// assert_eq!(decrypt(&key, &sealed).unwrap(), b"meet at block 1200");
/// ```
pub fn encrypt(key: &[u8; AES_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::EncryptFailed)?;

    let mut nonce_bytes = [0u8; AES_NONCE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| EncryptionError::EncryptFailed)?;

    let mut out = Vec::with_capacity(AES_NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a buffer produced by [`encrypt`].
///
/// Any modification of nonce, ciphertext or tag fails authentication and
/// returns [`EncryptionError::DecryptFailed`].
pub fn decrypt(key: &[u8; AES_KEY_LENGTH], sealed: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    if sealed.len() < AES_NONCE_LENGTH + AES_TAG_LENGTH {
        return Err(EncryptionError::CiphertextTooShort);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(AES_NONCE_LENGTH);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::DecryptFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| EncryptionError::DecryptFailed)
}
