//! # Curve Keypairs
//!
//! The wallet speaks two signature schemes and nothing else:
//!
//! - **Sr25519**: Schnorr over Ristretto255, the ledger's native account
//!   type. Keypairs come from a 32-byte mini-secret expanded in Ed25519
//!   mode, so a given seed yields the same key as every other wallet on the
//!   network.
//! - **ECDSA/secp256k1**: the 32-byte seed *is* the secret scalar. Public
//!   keys are carried compressed (33 bytes).
//!
//! [`Curve`] is the tag, [`CurveKeypair`] holds live key material. Both are
//! closed enums, matched exhaustively everywhere.
//!
//! ## Message rules
//!
//! Sr25519 signs the message bytes as-is under the `substrate` context.
//! ECDSA signs BLAKE2b-256(message), never the raw bytes. Verification
//! mirrors this exactly; get it wrong and signatures stop cross-verifying
//! with every other wallet on the network.

use std::fmt;

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use schnorrkel::{ExpansionMode, MiniSecretKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::{
    AES_KEY_LENGTH, ECDSA_PUBLIC_KEY_LENGTH, SEED_LENGTH, SR25519_PUBLIC_KEY_LENGTH,
    SR25519_SECRET_KEY_LENGTH, SR25519_SIGNING_CONTEXT,
};
use crate::error::{WalletError, WalletResult};

use super::hash::blake2_256;

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// Which signature scheme an account uses.
///
/// Serialized as `"sr25519"` / `"ecdsa"`, the tags the rest of the stack
/// already uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    /// Schnorr signatures over Ristretto255 (the ledger's native scheme).
    Sr25519,
    /// ECDSA over secp256k1.
    Ecdsa,
}

impl Curve {
    /// Wire tag for this curve.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sr25519 => "sr25519",
            Self::Ecdsa => "ecdsa",
        }
    }

    /// Public key length in bytes.
    pub fn public_key_len(&self) -> usize {
        match self {
            Self::Sr25519 => SR25519_PUBLIC_KEY_LENGTH,
            Self::Ecdsa => ECDSA_PUBLIC_KEY_LENGTH,
        }
    }

    /// Parse a wire tag. Unknown tags are an error, never a default.
    pub fn parse(tag: &str) -> WalletResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "sr25519" => Ok(Self::Sr25519),
            "ecdsa" => Ok(Self::Ecdsa),
            _ => Err(WalletError::invalid(format!("unknown curve '{tag}'"))),
        }
    }

    /// Verify `signature` over `message` under this curve.
    ///
    /// Returns `false` for anything that does not verify, including keys and
    /// signatures of the wrong length or off the curve. Never errors.
    pub fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        match self {
            Self::Sr25519 => {
                let Ok(public) = schnorrkel::PublicKey::from_bytes(public_key) else {
                    return false;
                };
                let Ok(sig) = schnorrkel::Signature::from_bytes(signature) else {
                    return false;
                };
                let ctx = schnorrkel::signing_context(SR25519_SIGNING_CONTEXT);
                public.verify(ctx.bytes(message), &sig).is_ok()
            }
            Self::Ecdsa => {
                let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
                    return false;
                };
                let Ok(sig) = EcdsaSignature::from_slice(signature) else {
                    return false;
                };
                verifying_key
                    .verify_prehash(&blake2_256(message), &sig)
                    .is_ok()
            }
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CurveKeypair
// ---------------------------------------------------------------------------

/// Live key material for one of the two curves.
///
/// Both inner types wipe their secrets on drop. There is no `Clone`, no
/// `Serialize`; `Debug` prints only the curve and public key.
pub enum CurveKeypair {
    /// Sr25519 keypair (secret scalar, nonce seed, public point).
    Sr25519(schnorrkel::Keypair),
    /// secp256k1 signing key.
    Ecdsa(SigningKey),
}

impl CurveKeypair {
    /// Build a keypair from a 32-byte seed.
    ///
    /// For Sr25519 the seed is the mini-secret; for ECDSA it is the scalar.
    /// A seed that is not a valid secp256k1 scalar (zero, or ≥ the group
    /// order) is rejected. For hash-derived seeds that happens with
    /// probability ~2^-128.
    pub fn from_seed(curve: Curve, seed: &[u8; SEED_LENGTH]) -> WalletResult<Self> {
        match curve {
            Curve::Sr25519 => {
                let mini = MiniSecretKey::from_bytes(seed)
                    .map_err(|_| WalletError::invalid("invalid sr25519 seed"))?;
                Ok(Self::Sr25519(mini.expand_to_keypair(ExpansionMode::Ed25519)))
            }
            Curve::Ecdsa => {
                let key = SigningKey::from_slice(seed)
                    .map_err(|_| WalletError::invalid("seed is not a valid secp256k1 scalar"))?;
                Ok(Self::Ecdsa(key))
            }
        }
    }

    /// Rebuild a keypair from raw private key bytes.
    ///
    /// Sr25519 accepts a 32-byte mini-secret or a 64-byte expanded secret
    /// (`key || nonce`, Ed25519 byte order). ECDSA accepts a 32-byte scalar.
    pub fn from_secret_bytes(curve: Curve, secret: &[u8]) -> WalletResult<Self> {
        match (curve, secret.len()) {
            (Curve::Sr25519, SEED_LENGTH) | (Curve::Ecdsa, SEED_LENGTH) => {
                let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
                seed.copy_from_slice(secret);
                Self::from_seed(curve, &seed)
            }
            (Curve::Sr25519, SR25519_SECRET_KEY_LENGTH) => {
                let key = schnorrkel::SecretKey::from_ed25519_bytes(secret)
                    .map_err(|_| WalletError::invalid("invalid sr25519 secret key"))?;
                Ok(Self::Sr25519(key.to_keypair()))
            }
            (curve, len) => Err(WalletError::invalid(format!(
                "{curve} private key must be {} bytes, got {len}",
                match curve {
                    Curve::Sr25519 => "32 or 64",
                    Curve::Ecdsa => "32",
                }
            ))),
        }
    }

    /// The curve tag for this keypair.
    pub fn curve(&self) -> Curve {
        match self {
            Self::Sr25519(_) => Curve::Sr25519,
            Self::Ecdsa(_) => Curve::Ecdsa,
        }
    }

    /// Public key bytes: 32 for Sr25519, 33 (compressed) for ECDSA.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        match self {
            Self::Sr25519(kp) => kp.public.to_bytes().to_vec(),
            Self::Ecdsa(key) => key
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        }
    }

    /// Sign `message` under this curve's rule (raw for Sr25519, BLAKE2b-256
    /// prehash for ECDSA). Returns the 64-byte signature.
    ///
    /// Sr25519 signatures are randomized; ECDSA uses RFC 6979 nonces and
    /// low-S normalization, so it is deterministic.
    pub fn sign(&self, message: &[u8]) -> WalletResult<Vec<u8>> {
        match self {
            Self::Sr25519(kp) => {
                let ctx = schnorrkel::signing_context(SR25519_SIGNING_CONTEXT);
                Ok(kp.sign(ctx.bytes(message)).to_bytes().to_vec())
            }
            Self::Ecdsa(key) => {
                let sig: EcdsaSignature = key
                    .sign_prehash(&blake2_256(message))
                    .map_err(|_| WalletError::KeyMaterial("ecdsa signing failed".into()))?;
                Ok(sig.to_bytes().to_vec())
            }
        }
    }

    /// ECDH with a peer's compressed or uncompressed secp256k1 public key.
    ///
    /// Returns the 32-byte x-coordinate of the shared point, used directly as
    /// an AES-256 key. Undefined for Sr25519.
    pub fn shared_secret(
        &self,
        peer_public_key: &[u8],
    ) -> WalletResult<Zeroizing<[u8; AES_KEY_LENGTH]>> {
        match self {
            Self::Sr25519(_) => Err(WalletError::UnsupportedOperation {
                operation: "key agreement",
                curve: Curve::Sr25519,
            }),
            Self::Ecdsa(key) => {
                let peer = k256::PublicKey::from_sec1_bytes(peer_public_key)
                    .map_err(|_| WalletError::invalid("peer public key is not a secp256k1 point"))?;
                let shared = k256::ecdh::diffie_hellman(key.as_nonzero_scalar(), peer.as_affine());
                let mut out = Zeroizing::new([0u8; AES_KEY_LENGTH]);
                out.copy_from_slice(shared.raw_secret_bytes());
                Ok(out)
            }
        }
    }
}

impl fmt::Debug for CurveKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CurveKeypair({}, pub=0x{})",
            self.curve(),
            hex::encode(self.public_key_bytes())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_MINI_SECRET: &str =
        "e5be9a5092b81bca64be81d212e7f2f9eba183bb7a90954f7b76361f6edb5c0a";
    const ALICE_PUBLIC: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    fn seed(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn sr25519_expansion_matches_network() {
        let secret = hex::decode(ALICE_MINI_SECRET).unwrap();
        let kp = CurveKeypair::from_secret_bytes(Curve::Sr25519, &secret).unwrap();
        assert_eq!(hex::encode(kp.public_key_bytes()), ALICE_PUBLIC);
    }

    #[test]
    fn sr25519_expanded_secret_imports_to_same_key() {
        let mini = MiniSecretKey::from_bytes(&seed(9)).unwrap();
        let expanded = mini.expand(ExpansionMode::Ed25519).to_ed25519_bytes();
        let from_mini = CurveKeypair::from_seed(Curve::Sr25519, &seed(9)).unwrap();
        let from_expanded = CurveKeypair::from_secret_bytes(Curve::Sr25519, &expanded).unwrap();
        assert_eq!(from_mini.public_key_bytes(), from_expanded.public_key_bytes());
    }

    #[test]
    fn ecdsa_generator_point() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let kp = CurveKeypair::from_seed(Curve::Ecdsa, &one).unwrap();
        assert_eq!(
            hex::encode(kp.public_key_bytes()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn ecdsa_rejects_zero_scalar() {
        assert!(CurveKeypair::from_seed(Curve::Ecdsa, &[0u8; 32]).is_err());
    }

    #[test]
    fn public_key_lengths() {
        for curve in [Curve::Sr25519, Curve::Ecdsa] {
            let kp = CurveKeypair::from_seed(curve, &seed(3)).unwrap();
            assert_eq!(kp.public_key_bytes().len(), curve.public_key_len());
            assert_eq!(kp.curve(), curve);
        }
    }

    #[test]
    fn sign_verify_roundtrip_both_curves() {
        for curve in [Curve::Sr25519, Curve::Ecdsa] {
            let kp = CurveKeypair::from_seed(curve, &seed(5)).unwrap();
            let sig = kp.sign(b"stake 10 on validator").unwrap();
            assert_eq!(sig.len(), 64);
            assert!(curve.verify(b"stake 10 on validator", &sig, &kp.public_key_bytes()));
            assert!(!curve.verify(b"stake 11 on validator", &sig, &kp.public_key_bytes()));
        }
    }

    #[test]
    fn ecdsa_signs_hash_not_raw_message() {
        let kp = CurveKeypair::from_seed(Curve::Ecdsa, &seed(5)).unwrap();
        let CurveKeypair::Ecdsa(key) = &kp else {
            unreachable!()
        };
        let sig = kp.sign(b"hello").unwrap();
        let sig = EcdsaSignature::from_slice(&sig).unwrap();
        assert!(key
            .verifying_key()
            .verify_prehash(&blake2_256(b"hello"), &sig)
            .is_ok());
    }

    #[test]
    fn ecdsa_signing_is_deterministic() {
        let kp = CurveKeypair::from_seed(Curve::Ecdsa, &seed(5)).unwrap();
        assert_eq!(kp.sign(b"same").unwrap(), kp.sign(b"same").unwrap());
    }

    #[test]
    fn cross_curve_verification_fails() {
        let sr = CurveKeypair::from_seed(Curve::Sr25519, &seed(5)).unwrap();
        let sig = sr.sign(b"msg").unwrap();
        assert!(!Curve::Ecdsa.verify(b"msg", &sig, &sr.public_key_bytes()));
    }

    #[test]
    fn shared_secret_is_symmetric() {
        let a = CurveKeypair::from_seed(Curve::Ecdsa, &seed(1)).unwrap();
        let b = CurveKeypair::from_seed(Curve::Ecdsa, &seed(2)).unwrap();
        let ab = a.shared_secret(&b.public_key_bytes()).unwrap();
        let ba = b.shared_secret(&a.public_key_bytes()).unwrap();
        assert_eq!(*ab, *ba);
    }

    #[test]
    fn shared_secret_undefined_for_sr25519() {
        let sr = CurveKeypair::from_seed(Curve::Sr25519, &seed(1)).unwrap();
        let peer = CurveKeypair::from_seed(Curve::Ecdsa, &seed(2)).unwrap();
        assert!(matches!(
            sr.shared_secret(&peer.public_key_bytes()),
            Err(WalletError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn curve_tags_roundtrip() {
        assert_eq!(Curve::parse("SR25519").unwrap(), Curve::Sr25519);
        assert_eq!(Curve::parse("ecdsa").unwrap(), Curve::Ecdsa);
        assert!(Curve::parse("ed25519").is_err());
        assert_eq!(serde_json::to_string(&Curve::Ecdsa).unwrap(), "\"ecdsa\"");
    }

    #[test]
    fn debug_shows_only_public_half() {
        let kp = CurveKeypair::from_seed(Curve::Ecdsa, &seed(7)).unwrap();
        let printed = format!("{kp:?}");
        assert!(printed.starts_with("CurveKeypair(ecdsa, pub=0x"));
        assert!(!printed.contains(&hex::encode(seed(7))));
    }
}
