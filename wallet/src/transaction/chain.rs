//! Collaborator interfaces.
//!
//! The wallet core never opens a socket. Everything that talks to the
//! ledger or to a browser-extension signer sits behind one of these traits,
//! and embedders plug in their own RPC client.
//!
//! Collaborator errors are their own enums. They get mapped into
//! [`WalletError`] at the submission boundary, where we know whether a
//! failure happened while signing or while submitting.

use async_trait::async_trait;
use thiserror::Error;

use crate::account::Signature;
use crate::error::WalletError;

use super::types::{Call, InclusionResult, Payload, SignedPayload};

/// Failures reported by a [`ChainClient`].
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain unreachable: {0}")]
    Unavailable(String),

    #[error("chain rejected transaction: {0}")]
    Rejected(String),

    #[error("malformed chain response: {0}")]
    Decode(String),
}

/// Failures reported by an [`ExternalSigner`].
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("user rejected the signature request")]
    Rejected,

    #[error("no signer available for {0}")]
    UnknownAccount(String),

    #[error("signer failed: {0}")]
    Failed(String),
}

impl From<SignerError> for WalletError {
    fn from(err: SignerError) -> Self {
        WalletError::SigningRejected(err.to_string())
    }
}

/// Ledger RPC as seen by the wallet.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Free balance of `address`, in base units.
    async fn query_balance(&self, address: &str) -> Result<u64, ChainError>;

    /// Encode `call` for `signer` into the payload to be signed (era, nonce,
    /// genesis hash and so on are the client's business).
    async fn build_call(&self, call: &Call, signer: &str) -> Result<Payload, ChainError>;

    /// Submit a signed payload. `Ok` means accepted into the pool.
    async fn submit(&self, signed: &SignedPayload) -> Result<InclusionResult, ChainError>;
}

/// A signer that holds keys outside this process, such as a browser extension.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Ask the holder of `address` to sign `payload`. The user may refuse.
    async fn request_signature(
        &self,
        address: &str,
        payload: &Payload,
    ) -> Result<Signature, SignerError>;
}

/// Where user-facing success/failure messages go.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Report an accepted submission.
    async fn notify_success(&self, message: &str);

    /// Report a failed attempt with the error text.
    async fn notify_failure(&self, message: &str);
}
