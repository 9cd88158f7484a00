//! Account-to-account message encryption.
//!
//! ECDH on secp256k1 gives both parties the same 32-byte key without ever
//! exchanging it; AES-256-GCM does the rest. The blob is
//! `0x || hex(nonce || ciphertext || tag)`.
//!
//! Sr25519 accounts can't take part. Ristretto keys have no ECDH defined by
//! the ledger, so both directions return `UnsupportedOperation`.

use crate::crypto::{encryption, from_hex, to_hex, Curve, CurveKeypair};
use crate::error::{WalletError, WalletResult};

use super::WalletAccount;

/// Encrypt `message` from `account` to the holder of `recipient_public_key_hex`.
pub fn encrypt(
    account: &WalletAccount,
    message: &str,
    recipient_public_key_hex: &str,
) -> WalletResult<String> {
    let keypair = ecdsa_keypair(account, "encryption")?;
    if message.is_empty() {
        return Err(WalletError::invalid("message is empty"));
    }
    let recipient = from_hex(recipient_public_key_hex, "recipient public key")?;

    let key = keypair.shared_secret(&recipient)?;
    let sealed = encryption::encrypt(&key, message.as_bytes())?;
    Ok(to_hex(sealed))
}

/// Decrypt a blob produced by [`encrypt`] from `sender_public_key_hex`.
///
/// Wrong key, tampering, truncation and non-UTF-8 plaintext all come back as
/// [`WalletError::DecryptionFailed`].
pub fn decrypt(
    account: &WalletAccount,
    blob_hex: &str,
    sender_public_key_hex: &str,
) -> WalletResult<String> {
    let keypair = ecdsa_keypair(account, "decryption")?;
    let sealed = from_hex(blob_hex, "encrypted message")?;
    let sender = from_hex(sender_public_key_hex, "sender public key")?;

    let key = keypair.shared_secret(&sender)?;
    let plaintext = encryption::decrypt(&key, &sealed)?;
    String::from_utf8(plaintext).map_err(|_| WalletError::DecryptionFailed)
}

fn ecdsa_keypair<'a>(
    account: &'a WalletAccount,
    operation: &'static str,
) -> WalletResult<&'a CurveKeypair> {
    match account.curve() {
        Curve::Ecdsa => Ok(account.keypair()),
        curve @ Curve::Sr25519 => Err(WalletError::UnsupportedOperation { operation, curve }),
    }
}

impl WalletAccount {
    /// See [`encrypt`].
    pub fn encrypt_message(&self, message: &str, recipient_public_key_hex: &str) -> WalletResult<String> {
        encrypt(self, message, recipient_public_key_hex)
    }

    /// See [`decrypt`].
    pub fn decrypt_message(&self, blob_hex: &str, sender_public_key_hex: &str) -> WalletResult<String> {
        decrypt(self, blob_hex, sender_public_key_hex)
    }
}
