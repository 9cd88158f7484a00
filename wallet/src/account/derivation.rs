//! Passphrase → seed.
//!
//! The seed is BLAKE2b-256 of the passphrase's UTF-8 bytes. No salt and no
//! stretching: the wallet is a pure function of its passphrase, and that
//! property is what lets users "log in" from any device. The strength of the
//! account is exactly the strength of the passphrase.

use zeroize::Zeroizing;

use crate::config::SEED_LENGTH;
use crate::crypto::blake2_256;
use crate::error::{WalletError, WalletResult};

/// A 32-byte seed, wiped on drop.
pub type Seed = Zeroizing<[u8; SEED_LENGTH]>;

/// Derive the account seed from a passphrase.
pub fn derive_seed(passphrase: &str) -> WalletResult<Seed> {
    if passphrase.is_empty() {
        return Err(WalletError::invalid("passphrase is empty"));
    }
    Ok(Zeroizing::new(blake2_256(passphrase.as_bytes())))
}

/// Derive the seed from the login form's username and password.
///
/// Hashes `"{username}:{password}"`, so `("alice", "hunter2")` and the
/// passphrase `"alice:hunter2"` land on the same account.
pub fn derive_seed_from_credentials(username: &str, password: &str) -> WalletResult<Seed> {
    if username.is_empty() {
        return Err(WalletError::invalid("username is empty"));
    }
    if password.is_empty() {
        return Err(WalletError::invalid("password is empty"));
    }
    let combined = Zeroizing::new(format!("{username}:{password}"));
    derive_seed(&combined)
}

/// Derive from raw bytes that must be UTF-8 text.
pub fn derive_seed_from_utf8(bytes: &[u8]) -> WalletResult<Seed> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| WalletError::invalid("passphrase is not text"))?;
    derive_seed(text)
}
