//! # Cryptographic Primitives
//!
//! Everything security-related in the wallet flows through here. The rest
//! of the crate composes these; nothing outside this module touches
//! `schnorrkel`, `k256` or `aes-gcm` directly.
//!
//! - **Sr25519** (schnorrkel) for the ledger's native accounts.
//! - **ECDSA/secp256k1** (k256) for Ethereum-style accounts and ECDH.
//! - **AES-256-GCM** for message encryption.
//! - **BLAKE2b-256** for seeds, message hashes and SS58 checksums
//!   (BLAKE2b-512 there, as the format demands).
//!
//! We don't roll our own. These are thin, typed wrappers around audited
//! implementations.

pub mod address;
pub mod curve;
pub mod encoding;
pub mod encryption;
pub mod hash;
pub mod secret;

pub use address::{decode_address, encode_address};
pub use curve::{Curve, CurveKeypair};
pub use encoding::{from_hex, to_hex};
pub use hash::blake2_256;
pub use secret::SecretBytes;
