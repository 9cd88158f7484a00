//! # Transaction Signer
//!
//! Turns a user request ("stake 1.5 on this validator") into an accepted
//! chain submission. Each attempt goes through the same five steps:
//!
//! 1. Convert the decimal amount to base units (truncating).
//! 2. Validate every target address and build the unsigned [`Call`].
//! 3. Ask the chain for the signing payload.
//! 4. Sign it, either in-process with a [`WalletAccount`] or through an
//!    [`ExternalSigner`].
//! 5. Submit. On acceptance, run the caller's callback and return a
//!    [`SubmissionReceipt`].
//!
//! Steps 1 and 2 are [`TransactionSigner::prepare`], a plain synchronous
//! call: callers that spawn the submission can validate first and surface
//! bad input immediately. They fail before anything touches the chain. A signer that says
//! no is [`WalletError::SigningRejected`]; a chain that says no is
//! [`WalletError::SubmissionFailed`]. There is no retry, and acceptance is
//! not finality: we don't wait for inclusion.
//!
//! Every attempt gets a UUID that shows up in each log line and in the
//! receipt, so one submission can be traced end to end.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::account::signing::sign_bytes;
use crate::account::{Signature, WalletAccount};
use crate::config::WalletConfig;
use crate::crypto::address::validate_address;
use crate::error::{WalletError, WalletResult};

use super::amount::parse_base_units;
use super::chain::{ChainClient, ExternalSigner, NotificationSink};
use super::types::{Call, Operation, Payload, SignedPayload, SubmissionReceipt};

/// Runs once, after the chain accepts the submission.
pub type Callback = Box<dyn FnOnce() + Send>;

/// Message shown when a submission is accepted.
pub const SUBMITTED_MESSAGE: &str = "Transaction Submitted";

// ---------------------------------------------------------------------------
// SignerSource
// ---------------------------------------------------------------------------

/// Who signs a submission.
pub enum SignerSource<'a> {
    /// An account held in this process.
    Local(&'a WalletAccount),
    /// An account whose keys live elsewhere (e.g. a browser extension).
    External {
        address: &'a str,
        signer: &'a dyn ExternalSigner,
    },
}

impl SignerSource<'_> {
    /// SS58 address of the signing account.
    pub fn address(&self) -> &str {
        match self {
            Self::Local(account) => account.address(),
            Self::External { address, .. } => address,
        }
    }

    async fn sign(&self, payload: &Payload) -> WalletResult<Signature> {
        match self {
            Self::Local(account) => sign_bytes(account, &payload.signing_bytes()),
            Self::External { address, signer } => Ok(signer.request_signature(address, payload).await?),
        }
    }
}

// ---------------------------------------------------------------------------
// PreparedCall
// ---------------------------------------------------------------------------

/// A validated operation: amount converted, targets checked, call built.
#[derive(Debug, Clone)]
pub struct PreparedCall {
    pub operation: Operation,
    pub amount_base: u64,
    pub call: Call,
}

// ---------------------------------------------------------------------------
// TransactionSigner
// ---------------------------------------------------------------------------

/// Builds, signs and submits staking and transfer operations.
pub struct TransactionSigner {
    chain: Arc<dyn ChainClient>,
    config: WalletConfig,
}

impl TransactionSigner {
    /// A signer submitting through `chain`, with prefix and netuid from `config`.
    pub fn new(chain: Arc<dyn ChainClient>, config: WalletConfig) -> Self {
        Self { chain, config }
    }

    /// Settings used for address checks and staking calls.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Stake `amount` tokens on `validator`.
    pub async fn stake(
        &self,
        source: &SignerSource<'_>,
        validator: &str,
        amount: &str,
        callback: Option<Callback>,
    ) -> WalletResult<SubmissionReceipt> {
        let operation = Operation::Stake {
            validator: validator.to_string(),
        };
        self.submit(source, operation, amount, callback).await
    }

    /// Unstake `amount` tokens from `validator`.
    pub async fn unstake(
        &self,
        source: &SignerSource<'_>,
        validator: &str,
        amount: &str,
        callback: Option<Callback>,
    ) -> WalletResult<SubmissionReceipt> {
        let operation = Operation::Unstake {
            validator: validator.to_string(),
        };
        self.submit(source, operation, amount, callback).await
    }

    /// Transfer `amount` tokens of free balance to `to`.
    pub async fn transfer(
        &self,
        source: &SignerSource<'_>,
        to: &str,
        amount: &str,
        callback: Option<Callback>,
    ) -> WalletResult<SubmissionReceipt> {
        let operation = Operation::Transfer { to: to.to_string() };
        self.submit(source, operation, amount, callback).await
    }

    /// Move `amount` staked tokens from validator `from` to validator `to`.
    pub async fn restake(
        &self,
        source: &SignerSource<'_>,
        from: &str,
        to: &str,
        amount: &str,
        callback: Option<Callback>,
    ) -> WalletResult<SubmissionReceipt> {
        let operation = Operation::Restake {
            from: from.to_string(),
            to: to.to_string(),
        };
        self.submit(source, operation, amount, callback).await
    }

    /// Run one submission attempt for `operation`.
    ///
    /// Same as [`prepare`](Self::prepare) followed by
    /// [`submit_prepared`](Self::submit_prepared).
    pub async fn submit(
        &self,
        source: &SignerSource<'_>,
        operation: Operation,
        amount: &str,
        callback: Option<Callback>,
    ) -> WalletResult<SubmissionReceipt> {
        let prepared = self.prepare(operation, amount)?;
        self.submit_prepared(source, prepared, callback).await
    }

    /// Validate `amount` and every target address, and build the call.
    ///
    /// Nothing here touches the chain.
    pub fn prepare(&self, operation: Operation, amount: &str) -> WalletResult<PreparedCall> {
        let amount_base = parse_base_units(amount)?;
        for target in operation.targets() {
            validate_address(target, self.config.ss58_prefix)?;
        }
        let call = operation.to_call(amount_base, self.config.netuid);
        Ok(PreparedCall {
            operation,
            amount_base,
            call,
        })
    }

    /// Sign and submit an already validated call.
    pub async fn submit_prepared(
        &self,
        source: &SignerSource<'_>,
        prepared: PreparedCall,
        callback: Option<Callback>,
    ) -> WalletResult<SubmissionReceipt> {
        let PreparedCall {
            operation,
            amount_base,
            call,
        } = prepared;
        let id = Uuid::new_v4();
        let signer = source.address().to_string();

        debug!(%id, %operation, %signer, amount_base, call = %call, "submission prepared");

        let payload = self
            .chain
            .build_call(&call, &signer)
            .await
            .map_err(|e| WalletError::Chain(e.to_string()))?;

        let signature = source.sign(&payload).await.map_err(|e| {
            warn!(%id, %operation, error = %e, "signature not obtained");
            e
        })?;

        let signed = SignedPayload {
            payload,
            signer: signer.clone(),
            signature,
        };
        let inclusion = self.chain.submit(&signed).await.map_err(|e| {
            warn!(%id, %operation, error = %e, "chain refused submission");
            WalletError::SubmissionFailed(e.to_string())
        })?;

        info!(%id, %operation, %signer, amount_base, tx_hash = %inclusion.tx_hash, "transaction submitted");

        if let Some(callback) = callback {
            callback();
        }

        Ok(SubmissionReceipt {
            id,
            operation,
            amount_base,
            tx_hash: inclusion.tx_hash,
            signer,
            submitted_at: Utc::now(),
        })
    }

    /// [`submit`](Self::submit), with the outcome routed to `sink` instead
    /// of returned as an error.
    ///
    /// Success notifies "Transaction Submitted"; failure notifies the error
    /// message. The receipt is still handed back when there is one.
    pub async fn submit_and_notify(
        &self,
        sink: &dyn NotificationSink,
        source: &SignerSource<'_>,
        operation: Operation,
        amount: &str,
        callback: Option<Callback>,
    ) -> Option<SubmissionReceipt> {
        match self.submit(source, operation, amount, callback).await {
            Ok(receipt) => {
                sink.notify_success(SUBMITTED_MESSAGE).await;
                Some(receipt)
            }
            Err(e) => {
                sink.notify_failure(&e.to_string()).await;
                None
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::crypto::Curve;
    use crate::transaction::chain::{ChainError, SignerError};
    use crate::transaction::types::InclusionResult;

    // -----------------------------------------------------------------------
    // Mocks
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct MockChain {
        reject: bool,
        payload_len: usize,
        built: Mutex<Vec<Call>>,
        submitted: Mutex<Vec<SignedPayload>>,
    }

    #[async_trait]
    impl ChainClient for MockChain {
        async fn query_balance(&self, _address: &str) -> Result<u64, ChainError> {
            Ok(0)
        }

        async fn build_call(&self, call: &Call, _signer: &str) -> Result<Payload, ChainError> {
            self.built.lock().unwrap().push(call.clone());
            Ok(Payload::new(call.clone(), vec![0x42; self.payload_len.max(1)]))
        }

        async fn submit(&self, signed: &SignedPayload) -> Result<InclusionResult, ChainError> {
            if self.reject {
                return Err(ChainError::Rejected("priority too low".into()));
            }
            self.submitted.lock().unwrap().push(signed.clone());
            Ok(InclusionResult {
                tx_hash: "0xfeed".into(),
            })
        }
    }

    struct RefusingSigner;

    #[async_trait]
    impl ExternalSigner for RefusingSigner {
        async fn request_signature(
            &self,
            _address: &str,
            _payload: &Payload,
        ) -> Result<Signature, SignerError> {
            Err(SignerError::Rejected)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        successes: Mutex<Vec<String>>,
        failures: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn notify_success(&self, message: &str) {
            self.successes.lock().unwrap().push(message.to_string());
        }
        async fn notify_failure(&self, message: &str) {
            self.failures.lock().unwrap().push(message.to_string());
        }
    }

    fn account() -> WalletAccount {
        WalletAccount::from_password("staker", Curve::Sr25519).unwrap()
    }

    fn validator() -> String {
        WalletAccount::from_password("validator", Curve::Sr25519)
            .unwrap()
            .address()
            .to_string()
    }

    fn signer_with(chain: Arc<MockChain>) -> TransactionSigner {
        TransactionSigner::new(chain, WalletConfig::default())
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_stake_submits_signed_payload() {
        let chain = Arc::new(MockChain::default());
        let signer = signer_with(chain.clone());
        let account = account();

        let receipt = signer
            .stake(&SignerSource::Local(&account), &validator(), "1.5", None)
            .await
            .unwrap();

        assert_eq!(receipt.amount_base, 1_500_000_000);
        assert_eq!(receipt.tx_hash, "0xfeed");
        assert_eq!(receipt.signer, account.address());

        let submitted = chain.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let signed = &submitted[0];
        assert!(Curve::Sr25519.verify(
            &signed.payload.signing_bytes(),
            signed.signature.as_bytes(),
            account.public_key()
        ));
    }

    #[tokio::test]
    async fn test_long_payload_is_signed_as_hash() {
        let chain = Arc::new(MockChain {
            payload_len: 300,
            ..MockChain::default()
        });
        let signer = signer_with(chain.clone());
        let account = WalletAccount::from_password("staker", Curve::Ecdsa).unwrap();

        signer
            .transfer(&SignerSource::Local(&account), &validator(), "2", None)
            .await
            .unwrap();

        let submitted = chain.submitted.lock().unwrap();
        let signed = &submitted[0];
        let digest = crate::crypto::blake2_256(&signed.payload.bytes);
        assert!(Curve::Ecdsa.verify(&digest, signed.signature.as_bytes(), account.public_key()));
    }

    #[tokio::test]
    async fn test_callback_runs_only_on_success() {
        let account = account();

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let ok = signer_with(Arc::new(MockChain::default()));
        ok.unstake(
            &SignerSource::Local(&account),
            &validator(),
            "1",
            Some(Box::new(move || flag.store(true, Ordering::SeqCst))),
        )
        .await
        .unwrap();
        assert!(ran.load(Ordering::SeqCst));

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let failing = signer_with(Arc::new(MockChain {
            reject: true,
            ..MockChain::default()
        }));
        let result = failing
            .unstake(
                &SignerSource::Local(&account),
                &validator(),
                "1",
                Some(Box::new(move || flag.store(true, Ordering::SeqCst))),
            )
            .await;
        assert!(matches!(result, Err(WalletError::SubmissionFailed(_))));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_rejection_and_failure_are_distinct() {
        let chain = Arc::new(MockChain::default());
        let signer = signer_with(chain.clone());
        let address = account().address().to_string();
        let source = SignerSource::External {
            address: &address,
            signer: &RefusingSigner,
        };

        let result = signer.stake(&source, &validator(), "1", None).await;
        assert!(matches!(result, Err(WalletError::SigningRejected(_))));
        assert!(chain.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_chain() {
        let chain = Arc::new(MockChain::default());
        let signer = signer_with(chain.clone());
        let account = account();
        let source = SignerSource::Local(&account);

        let bad_amount = signer.stake(&source, &validator(), "lots", None).await;
        assert!(matches!(bad_amount, Err(WalletError::InvalidInput(_))));

        let bad_target = signer.transfer(&source, "not-an-address", "1", None).await;
        assert!(matches!(bad_target, Err(WalletError::InvalidInput(_))));

        assert!(chain.built.lock().unwrap().is_empty());
    }

    #[test]
    fn test_prepare_validates_without_a_runtime() {
        let chain = Arc::new(MockChain::default());
        let signer = signer_with(chain.clone());

        let bad_amount = signer.prepare(
            Operation::Stake {
                validator: validator(),
            },
            "-3",
        );
        assert!(matches!(bad_amount, Err(WalletError::InvalidInput(_))));

        let bad_target = signer.prepare(
            Operation::Restake {
                from: validator(),
                to: "5Invalid".into(),
            },
            "1",
        );
        assert!(matches!(bad_target, Err(WalletError::InvalidInput(_))));

        let prepared = signer
            .prepare(Operation::Transfer { to: validator() }, "0.5")
            .unwrap();
        assert_eq!(prepared.amount_base, 500_000_000);
        assert_eq!(prepared.call.module, "balances");
        assert!(chain.built.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_prepared_uses_prepared_call() {
        let chain = Arc::new(MockChain::default());
        let signer = signer_with(chain.clone());
        let account = account();

        let prepared = signer
            .prepare(
                Operation::Unstake {
                    validator: validator(),
                },
                "2",
            )
            .unwrap();
        let call = prepared.call.clone();
        let receipt = signer
            .submit_prepared(&SignerSource::Local(&account), prepared, None)
            .await
            .unwrap();

        assert_eq!(receipt.amount_base, 2_000_000_000);
        assert_eq!(chain.built.lock().unwrap().as_slice(), [call]);
    }

    #[tokio::test]
    async fn test_restake_carries_netuid_and_both_validators() {
        let chain = Arc::new(MockChain::default());
        let config = WalletConfig {
            netuid: 5,
            ..WalletConfig::default()
        };
        let signer = TransactionSigner::new(chain.clone(), config);
        let account = account();
        let from = validator();
        let to = WalletAccount::from_password("other validator", Curve::Sr25519)
            .unwrap()
            .address()
            .to_string();

        signer
            .restake(&SignerSource::Local(&account), &from, &to, "0.25", None)
            .await
            .unwrap();

        let built = chain.built.lock().unwrap();
        assert_eq!(built[0].function, "transferStake");
        assert_eq!(
            built[0].args,
            serde_json::json!([5, from, to, 250_000_000u64])
        );
    }

    #[tokio::test]
    async fn test_submit_and_notify_routes_outcome() {
        let sink = RecordingSink::default();
        let account = account();
        let source = SignerSource::Local(&account);
        let op = Operation::Stake {
            validator: validator(),
        };

        let ok = signer_with(Arc::new(MockChain::default()));
        let receipt = ok.submit_and_notify(&sink, &source, op.clone(), "1", None).await;
        assert!(receipt.is_some());
        assert_eq!(sink.successes.lock().unwrap().as_slice(), [SUBMITTED_MESSAGE]);

        let failing = signer_with(Arc::new(MockChain {
            reject: true,
            ..MockChain::default()
        }));
        assert!(failing
            .submit_and_notify(&sink, &source, op, "1", None)
            .await
            .is_none());
        let failures = sink.failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("priority too low"));
    }

    #[tokio::test]
    async fn test_each_attempt_gets_its_own_id() {
        let signer = signer_with(Arc::new(MockChain::default()));
        let account = account();
        let source = SignerSource::Local(&account);
        let a = signer.stake(&source, &validator(), "1", None).await.unwrap();
        let b = signer.stake(&source, &validator(), "1", None).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
