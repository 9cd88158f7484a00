//! # Wallet Accounts
//!
//! A [`WalletAccount`] is the identity the rest of the wallet acts as:
//! address, curve, public key and the private key it was built from.
//!
//! Accounts come from one of three places:
//!
//! - a passphrase ([`WalletAccount::from_password`]),
//! - a username/password pair ([`WalletAccount::from_credentials`]),
//! - a raw private key ([`WalletAccount::from_private_key`]).
//!
//! ## Security considerations
//!
//! - Fields are private and there are no setters. An account cannot drift
//!   away from its key.
//! - The private key sits in [`SecretBytes`] and is wiped on drop. Both
//!   curve keypair types wipe themselves too.
//! - `Debug` prints the address and curve only. There is no `Serialize`;
//!   use [`WalletAccount::info`] for the public view.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::{SEED_LENGTH, SS58_PREFIX};
use crate::crypto::{encode_address, from_hex, to_hex, Curve, CurveKeypair, SecretBytes};
use crate::error::{WalletError, WalletResult};

use super::derivation::{derive_seed, derive_seed_from_credentials};

/// Public, serializable view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// SS58 address.
    pub address: String,
    /// Signature scheme.
    pub curve: Curve,
    /// `0x`-prefixed public key.
    pub public_key: String,
}

/// A deterministic, immutable wallet account.
pub struct WalletAccount {
    address: String,
    curve: Curve,
    prefix: u16,
    public_key: Vec<u8>,
    private_key: SecretBytes,
    keypair: CurveKeypair,
}

impl WalletAccount {
    /// Derive an account from a passphrase under the default network prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use comhub_wallet::{Curve, WalletAccount};
    ///
    /// let account = WalletAccount::from_password("bro", Curve::Sr25519).unwrap();
    /// assert_eq!(account.address(), "5EUgRLKBt6WmKtr9QKNfYJcaL1vU3dTpQ4KLHYtQts3KwsWV");
    /// ```
    pub fn from_password(passphrase: &str, curve: Curve) -> WalletResult<Self> {
        Self::from_password_with_prefix(passphrase, curve, SS58_PREFIX)
    }

    /// Derive an account from a passphrase under an explicit SS58 prefix.
    pub fn from_password_with_prefix(
        passphrase: &str,
        curve: Curve,
        prefix: u16,
    ) -> WalletResult<Self> {
        let seed = derive_seed(passphrase)?;
        Self::from_seed(&seed, curve, prefix)
    }

    /// Derive an account from the login form's username and password.
    pub fn from_credentials(username: &str, password: &str, curve: Curve) -> WalletResult<Self> {
        let seed = derive_seed_from_credentials(username, password)?;
        Self::from_seed(&seed, curve, SS58_PREFIX)
    }

    /// Import an account from a hex-encoded private key.
    ///
    /// Sr25519 takes a 32-byte mini-secret or a 64-byte expanded secret.
    /// ECDSA takes a 32-byte scalar.
    pub fn from_private_key(private_key_hex: &str, curve: Curve) -> WalletResult<Self> {
        Self::from_private_key_with_prefix(private_key_hex, curve, SS58_PREFIX)
    }

    /// [`from_private_key`](Self::from_private_key) under an explicit prefix.
    pub fn from_private_key_with_prefix(
        private_key_hex: &str,
        curve: Curve,
        prefix: u16,
    ) -> WalletResult<Self> {
        let raw = SecretBytes::new(from_hex(private_key_hex, "private key")?);
        let keypair = CurveKeypair::from_secret_bytes(curve, raw.expose())?;
        Self::assemble(keypair, raw, prefix)
    }

    fn from_seed(seed: &[u8; SEED_LENGTH], curve: Curve, prefix: u16) -> WalletResult<Self> {
        let keypair = CurveKeypair::from_seed(curve, seed)?;
        Self::assemble(keypair, SecretBytes::from_slice(seed), prefix)
    }

    fn assemble(keypair: CurveKeypair, private_key: SecretBytes, prefix: u16) -> WalletResult<Self> {
        let public_key = keypair.public_key_bytes();
        let address = encode_address(&public_key, prefix)?;
        Ok(Self {
            address,
            curve: keypair.curve(),
            prefix,
            public_key,
            private_key,
            keypair,
        })
    }

    // -- Accessors -----------------------------------------------------------

    /// The account's SS58 address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Curve the keys live on.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// SS58 prefix the address was rendered under.
    pub fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Raw public key: 32 bytes (Sr25519) or 33 bytes (ECDSA, compressed).
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// `0x`-prefixed public key.
    pub fn public_key_hex(&self) -> String {
        to_hex(&self.public_key)
    }

    /// Public view, safe to serialize and hand to a UI.
    pub fn info(&self) -> AccountInfo {
        AccountInfo {
            address: self.address.clone(),
            curve: self.curve,
            public_key: self.public_key_hex(),
        }
    }

    /// Export the private key as `0x` hex for an explicit user backup.
    ///
    /// The returned string wipes itself on drop. Don't log it.
    pub fn export_private_key_hex(&self) -> Zeroizing<String> {
        self.private_key.to_hex()
    }

    pub(crate) fn keypair(&self) -> &CurveKeypair {
        &self.keypair
    }

    /// Re-derive the public key and address from the stored private key and
    /// check they still match.
    ///
    /// A mismatch means memory corruption or a bug. The account is unusable
    /// and has to be re-derived or re-imported.
    pub fn check_integrity(&self) -> WalletResult<()> {
        let rebuilt = CurveKeypair::from_secret_bytes(self.curve, self.private_key.expose())
            .map_err(|_| WalletError::KeyMaterial("stored private key no longer parses".into()))?;
        let public_key = rebuilt.public_key_bytes();
        if public_key != self.public_key || public_key != self.keypair.public_key_bytes() {
            return Err(WalletError::KeyMaterial(
                "public key does not match private key".into(),
            ));
        }
        if encode_address(&public_key, self.prefix)? != self.address {
            return Err(WalletError::KeyMaterial(
                "address does not match public key".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for WalletAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletAccount")
            .field("address", &self.address)
            .field("curve", &self.curve)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
