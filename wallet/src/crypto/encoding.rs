//! Hex wire encoding.
//!
//! Every byte-valued field that crosses the API (keys, signatures,
//! ciphertext) is a lowercase `0x`-prefixed hex string. Decoding is lenient
//! about the prefix and about case; encoding is not.

use crate::error::{WalletError, WalletResult};

/// Encode bytes as lowercase `0x`-prefixed hex.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string, with or without the `0x` prefix.
///
/// `what` names the argument in the error message ("public key",
/// "signature", ...). The offending input is never echoed back, since it may
/// be a private key.
pub fn from_hex(input: &str, what: &str) -> WalletResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(WalletError::invalid(format!("{what} is empty")));
    }
    hex::decode(digits).map_err(|_| WalletError::invalid(format!("{what} is not valid hex")))
}
