//! # Wallet Configuration & Constants
//!
//! Every magic number the wallet depends on lives here. Most of them are
//! dictated by the ledger we talk to, not by us: the address prefix, the
//! token's decimal places and the signing context are all consensus-level
//! facts. Change them and every address the wallet ever produced changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// SS58 network discriminator used for every address this wallet renders.
/// 42 is the generic Substrate prefix, and the only one observed in practice.
pub const SS58_PREFIX: u16 = 42;

/// Highest prefix the SS58 format can express (14 bits).
pub const SS58_MAX_PREFIX: u16 = 16_383;

/// Subnet id passed to staking calls.
pub const DEFAULT_NETUID: u16 = 0;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// Decimal places of the native token. One token = 10^9 base units.
pub const TOKEN_DECIMALS: u32 = 9;

/// Base units per whole token.
pub const BASE_UNITS_PER_TOKEN: u64 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Seed length produced by key derivation. Also the Sr25519 mini-secret
/// length and the secp256k1 scalar length.
pub const SEED_LENGTH: usize = 32;

/// Sr25519 expanded secret key length (`key || nonce`).
pub const SR25519_SECRET_KEY_LENGTH: usize = 64;

/// Sr25519 public key length.
pub const SR25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Compressed secp256k1 public key length.
pub const ECDSA_PUBLIC_KEY_LENGTH: usize = 33;

/// Both schemes produce 64-byte signatures (`R || s` and `r || s`).
pub const SIGNATURE_LENGTH: usize = 64;

/// Signing context for Sr25519. Must match the ledger's, byte for byte.
pub const SR25519_SIGNING_CONTEXT: &[u8] = b"substrate";

/// Signing payloads longer than this are hashed with BLAKE2b-256 before
/// signing, per the ledger's signed-extrinsic rule.
pub const PAYLOAD_HASH_THRESHOLD: usize = 256;

/// AES-256-GCM key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce length in bytes. Twelve, always.
pub const AES_NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

/// BLAKE2b output length used for seeds and message hashes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// How often the active account's balance is refreshed.
pub const BALANCE_POLL_INTERVAL: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// WalletConfig
// ---------------------------------------------------------------------------

/// Runtime tunables for a wallet session.
///
/// Defaults match the constants above. Embedders typically deserialize this
/// from their own config file and call [`validate`](Self::validate) once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// SS58 prefix for rendered addresses.
    pub ss58_prefix: u16,

    /// Subnet id for stake, unstake and restake calls.
    pub netuid: u16,

    /// Balance polling period in seconds.
    pub poll_interval_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            ss58_prefix: SS58_PREFIX,
            netuid: DEFAULT_NETUID,
            poll_interval_secs: BALANCE_POLL_INTERVAL.as_secs(),
        }
    }
}

impl WalletConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> WalletResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| WalletError::InvalidInput(format!("wallet config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce unusable addresses or a busy-looping
    /// poller.
    pub fn validate(&self) -> WalletResult<()> {
        if self.ss58_prefix > SS58_MAX_PREFIX {
            return Err(WalletError::InvalidInput(format!(
                "ss58 prefix {} exceeds {}",
                self.ss58_prefix, SS58_MAX_PREFIX
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(WalletError::InvalidInput(
                "poll interval must be at least one second".into(),
            ));
        }
        Ok(())
    }

    /// The polling period as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
