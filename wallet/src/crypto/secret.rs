//! Zero-on-drop container for private key material.
//!
//! `SecretBytes` is the only place a raw private key lives outside the
//! curve libraries' own key types. It:
//!
//! - wipes its buffer when dropped,
//! - has no `Serialize`, `Display` or `Clone`,
//! - prints as `SecretBytes(<redacted N bytes>)` under `Debug`.
//!
//! Getting the bytes out is an explicit `expose()` call, which makes every
//! use of the secret greppable.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::encoding::to_hex;

/// Owned secret bytes, zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    /// Take ownership of `bytes`. The caller's buffer is moved, not copied.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Copy from a slice. Prefer [`new`](Self::new) when you own the buffer.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Borrow the raw secret.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes. Not secret.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encode for an explicit export. The returned string is itself
    /// wiped on drop.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(to_hex(&self.0))
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes(<redacted {} bytes>)", self.0.len())
    }
}
