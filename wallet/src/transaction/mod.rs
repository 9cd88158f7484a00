//! # Transactions
//!
//! Staking and transfer submission. The wallet builds and signs; the chain
//! collaborator encodes and broadcasts.
//!
//! - **amount**: decimal token amounts ↔ base units.
//! - **types**: operations, calls, payloads, receipts.
//! - **chain**: `ChainClient`, `ExternalSigner`, `NotificationSink`.
//! - **signer**: the submission pipeline.

pub mod amount;
pub mod chain;
pub mod signer;
pub mod types;

pub use amount::{from_base_units, parse_amount, parse_base_units, to_base_units};
pub use chain::{ChainClient, ChainError, ExternalSigner, NotificationSink, SignerError};
pub use signer::{Callback, PreparedCall, SignerSource, TransactionSigner, SUBMITTED_MESSAGE};
pub use types::{Call, InclusionResult, Operation, Payload, SignedPayload, SubmissionReceipt};
