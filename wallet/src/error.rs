//! Error types for the wallet core.
//!
//! Every fallible public operation returns a [`WalletError`]. The variants
//! track *who* has to act on the failure: the caller (bad input), the
//! curve (operation undefined), the user (declined a signature), or the
//! network (refused a payload). Signing rejection and submission failure are
//! separate variants.
//!
//! A failed signature verification is not an error. It is `Ok(false)`.

use thiserror::Error;

use crate::crypto::curve::Curve;

/// Convenience alias used throughout the crate.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors surfaced by the wallet core.
///
/// Messages never include key material, only the shape of the problem.
#[derive(Debug, Error)]
pub enum WalletError {
    /// A malformed or empty argument: passphrase, hex string, key length,
    /// message, address or amount.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The operation has no definition for this account's curve.
    #[error("{operation} is not supported for {curve} accounts")]
    UnsupportedOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The curve of the account it was attempted on.
        curve: Curve,
    },

    /// The external signer declined or failed to produce a signature.
    #[error("signing rejected: {0}")]
    SigningRejected(String),

    /// The chain refused the signed payload, or the transport failed while
    /// submitting it.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// Wrong key, corrupted ciphertext, or plaintext that is not UTF-8.
    /// We don't say which.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Stored key material no longer matches itself. Fatal for the session:
    /// the account must be re-derived or re-imported.
    #[error("corrupted key material: {0}")]
    KeyMaterial(String),

    /// A chain query or call construction failed outside of submission.
    #[error("chain error: {0}")]
    Chain(String),
}

impl WalletError {
    /// Shorthand for the common `InvalidInput` case.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_operation_names_curve() {
        let err = WalletError::UnsupportedOperation {
            operation: "encryption",
            curve: Curve::Sr25519,
        };
        assert_eq!(
            err.to_string(),
            "encryption is not supported for sr25519 accounts"
        );
    }

    #[test]
    fn signing_and_submission_are_distinct() {
        let rejected = WalletError::SigningRejected("user cancelled".into());
        let failed = WalletError::SubmissionFailed("priority too low".into());
        assert!(matches!(rejected, WalletError::SigningRejected(_)));
        assert!(matches!(failed, WalletError::SubmissionFailed(_)));
        assert_ne!(rejected.to_string(), failed.to_string());
    }
}
