// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # ComHub Wallet Core
//!
//! The part of the ComHub stack that actually holds keys. Everything around
//! it (module directory, search, cards, the wallet-selection modal) is
//! presentation glue; this crate is where correctness and secrecy live.
//!
//! A wallet here is deterministic: the same passphrase always yields the
//! same account, so there is nothing to back up except the passphrase
//! itself. Two signature families are supported, Sr25519 for the ledger's
//! native accounts and ECDSA over secp256k1, behind one closed enum.
//!
//! ## Architecture
//!
//! - **crypto**: Primitives: hashing, SS58 addresses, curve keypairs,
//!   AES-256-GCM, zero-on-drop secrets, hex wire encoding.
//! - **account**: Seed derivation, [`WalletAccount`], message signing and
//!   ECDH-based message encryption.
//! - **transaction**: Stake/unstake/transfer/restake submission through
//!   external chain and signer collaborators.
//! - **session**: The active account and its single balance poller.
//! - **config**: Protocol constants and tunables.
//! - **logging**: `tracing` subscriber setup for embedding binaries.
//!
//! ## Ground rules
//!
//! 1. Private keys never leave the process. No `Serialize`, and `Debug` is redacted.
//! 2. Every random value that matters comes from the OS CSPRNG, per call.
//! 3. Chain-facing work is async; key work is synchronous and pure.

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod session;
pub mod transaction;

pub use account::{AccountInfo, WalletAccount};
pub use crypto::curve::Curve;
pub use error::{WalletError, WalletResult};
