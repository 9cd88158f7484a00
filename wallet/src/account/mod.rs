//! # Accounts
//!
//! Deterministic wallet identities and what they can do on their own, with
//! no chain involved:
//!
//! - **derivation**: passphrase or credentials → 32-byte seed.
//! - **wallet_account**: [`WalletAccount`] construction and accessors.
//! - **signing**: sign and verify text messages.
//! - **messaging**: ECDH + AES-GCM messages between ECDSA accounts.

pub mod derivation;
pub mod messaging;
pub mod signing;
pub mod wallet_account;

pub use derivation::{derive_seed, derive_seed_from_credentials, derive_seed_from_utf8, Seed};
pub use signing::Signature;
pub use wallet_account::{AccountInfo, WalletAccount};
