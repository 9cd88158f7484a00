//! Vocabulary of the submission pipeline.
//!
//! An [`Operation`] is what the user asked for. It becomes a [`Call`] (the
//! chain-level description), the chain turns that into a [`Payload`] to
//! sign, the signature makes it a [`SignedPayload`], and a successful
//! submission produces a [`SubmissionReceipt`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::account::Signature;
use crate::config::PAYLOAD_HASH_THRESHOLD;
use crate::crypto::blake2_256;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// A user-facing chain operation, minus its amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// Bond tokens to a validator.
    Stake { validator: String },
    /// Withdraw bonded tokens from a validator.
    Unstake { validator: String },
    /// Send free balance to another account.
    Transfer { to: String },
    /// Move stake from one validator to another without unbonding.
    Restake { from: String, to: String },
}

impl Operation {
    /// Short lowercase name, used in logs and notifications.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::Transfer { .. } => "transfer",
            Self::Restake { .. } => "restake",
        }
    }

    /// Every address the operation targets.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Stake { validator } | Self::Unstake { validator } => vec![validator.as_str()],
            Self::Transfer { to } => vec![to.as_str()],
            Self::Restake { from, to } => vec![from.as_str(), to.as_str()],
        }
    }

    /// Build the chain call for `amount_base` base units.
    ///
    /// Staking calls live in the subspace module and carry the subnet id;
    /// transfers are plain balance transfers.
    pub fn to_call(&self, amount_base: u64, netuid: u16) -> Call {
        match self {
            Self::Stake { validator } => Call::new(
                "subspaceModule",
                "addStake",
                json!([netuid, validator, amount_base]),
            ),
            Self::Unstake { validator } => Call::new(
                "subspaceModule",
                "removeStake",
                json!([netuid, validator, amount_base]),
            ),
            Self::Restake { from, to } => Call::new(
                "subspaceModule",
                "transferStake",
                json!([netuid, from, to, amount_base]),
            ),
            Self::Transfer { to } => {
                Call::new("balances", "transfer", json!([to, amount_base]))
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Call / Payload
// ---------------------------------------------------------------------------

/// Unsigned call description: `module.function(args...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub module: String,
    pub function: String,
    /// Positional arguments, in the order the chain expects them.
    pub args: serde_json::Value,
}

impl Call {
    /// A call to `module.function` with positional `args`.
    pub fn new(module: &str, function: &str, args: serde_json::Value) -> Self {
        Self {
            module: module.to_string(),
            function: function.to_string(),
            args,
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.function)
    }
}

/// The encoded payload the chain wants signed for a [`Call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub call: Call,
    /// Chain-encoded bytes, including era, nonce and genesis data.
    pub bytes: Vec<u8>,
}

impl Payload {
    /// Chain-encoded `bytes` for `call`.
    pub fn new(call: Call, bytes: Vec<u8>) -> Self {
        Self { call, bytes }
    }

    /// The bytes that actually get signed.
    ///
    /// Payloads longer than 256 bytes are replaced by their BLAKE2b-256
    /// digest; shorter ones are signed as-is.
    pub fn signing_bytes(&self) -> Vec<u8> {
        if self.bytes.len() > PAYLOAD_HASH_THRESHOLD {
            blake2_256(&self.bytes).to_vec()
        } else {
            self.bytes.clone()
        }
    }
}

/// A payload together with its signer and signature, ready to submit.
#[derive(Debug, Clone)]
pub struct SignedPayload {
    pub payload: Payload,
    /// SS58 address of the signing account.
    pub signer: String,
    pub signature: Signature,
}

/// What the chain reports when it accepts a submission.
///
/// Acceptance into the pool only. Not inclusion, not finality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionResult {
    pub tx_hash: String,
}

// ---------------------------------------------------------------------------
// SubmissionReceipt
// ---------------------------------------------------------------------------

/// Record of one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Correlation id, also present in every log line for the attempt.
    pub id: Uuid,
    pub operation: Operation,
    pub amount_base: u64,
    pub tx_hash: String,
    /// SS58 address that signed.
    pub signer: String,
    pub submitted_at: DateTime<Utc>,
}
