//! Message signing and verification.
//!
//! Thin layer over [`CurveKeypair::sign`] and [`Curve::verify`] that speaks
//! the wallet's wire types: UTF-8 messages in, `0x` hex signatures and keys
//! across the API.
//!
//! The split between errors and `false` matters to callers:
//!
//! | input | result |
//! |---|---|
//! | empty message, signature or key | `Err(InvalidInput)` |
//! | signature or key that is not hex | `Err(InvalidInput)` |
//! | well-formed hex that does not verify | `Ok(false)` |
//!
//! [`CurveKeypair::sign`]: crate::crypto::CurveKeypair::sign

use std::fmt;

use crate::config::SIGNATURE_LENGTH;
use crate::crypto::{from_hex, to_hex, Curve};
use crate::error::{WalletError, WalletResult};

use super::WalletAccount;

/// A 64-byte signature from either curve.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Wrap raw signature bytes. Length is checked.
    pub fn from_bytes(bytes: Vec<u8>) -> WalletResult<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(WalletError::invalid(format!(
                "signature must be {SIGNATURE_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    /// Parse a hex-encoded signature.
    pub fn from_hex(hex: &str) -> WalletResult<Self> {
        Self::from_bytes(from_hex(hex, "signature")?)
    }

    /// Raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `0x`-prefixed hex.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Sign `message` with `account`'s key under its curve's rule.
pub fn sign(account: &WalletAccount, message: &str) -> WalletResult<Signature> {
    if message.is_empty() {
        return Err(WalletError::invalid("message is empty"));
    }
    sign_bytes(account, message.as_bytes())
}

/// Sign arbitrary bytes under the account's curve rule. Transaction payloads
/// go through here; they are not text.
pub fn sign_bytes(account: &WalletAccount, payload: &[u8]) -> WalletResult<Signature> {
    Signature::from_bytes(account.keypair().sign(payload)?)
}

/// Verify a hex signature over `message` against a hex public key.
pub fn verify(
    message: &str,
    signature_hex: &str,
    public_key_hex: &str,
    curve: Curve,
) -> WalletResult<bool> {
    if message.is_empty() {
        return Err(WalletError::invalid("message is empty"));
    }
    let signature = from_hex(signature_hex, "signature")?;
    let public_key = from_hex(public_key_hex, "public key")?;
    Ok(curve.verify(message.as_bytes(), &signature, &public_key))
}

impl WalletAccount {
    /// Sign a UTF-8 message. See [`sign`].
    pub fn sign(&self, message: &str) -> WalletResult<Signature> {
        sign(self, message)
    }

    /// Verify a signature. `curve` defaults to this account's curve; the
    /// public key is always the caller's.
    pub fn verify(
        &self,
        message: &str,
        signature_hex: &str,
        public_key_hex: &str,
        curve: Option<Curve>,
    ) -> WalletResult<bool> {
        verify(
            message,
            signature_hex,
            public_key_hex,
            curve.unwrap_or(self.curve()),
        )
    }
}
