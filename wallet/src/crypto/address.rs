//! # SS58 Addresses
//!
//! The checksummed, network-prefixed rendering of a public key that users
//! copy around:
//!
//! ```text
//! payload  = prefix_bytes || public_key
//! checksum = BLAKE2b-512("SS58PRE" || payload)[..2]
//! address  = base58(payload || checksum)
//! ```
//!
//! Prefixes 0–63 take one byte. Prefixes 64–16383 take two, with the bits
//! shuffled the way the format specifies. Keys are either 32 bytes (Sr25519)
//! or 33 bytes (compressed secp256k1); both get a two-byte checksum.
//!
//! Both curves use the same encoding.

use crate::config::SS58_MAX_PREFIX;
use crate::error::{WalletError, WalletResult};

use super::hash::blake2_512;

const SS58_CONTEXT: &[u8] = b"SS58PRE";
const CHECKSUM_LENGTH: usize = 2;

/// Key lengths we know how to render.
const ACCEPTED_KEY_LENGTHS: [usize; 2] = [32, 33];

/// Encode `public_key` as an SS58 address under `prefix`.
///
/// # Example
///
/// ```
/// use comhub_wallet::crypto::encode_address;
///
/// let alice = hex::decode("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d").unwrap();
/// assert_eq!(
///     encode_address(&alice, 42).unwrap(),
///     "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
/// );
/// ```
pub fn encode_address(public_key: &[u8], prefix: u16) -> WalletResult<String> {
    if !ACCEPTED_KEY_LENGTHS.contains(&public_key.len()) {
        return Err(WalletError::invalid(format!(
            "cannot encode a {}-byte public key as an address",
            public_key.len()
        )));
    }

    let mut payload = prefix_bytes(prefix)?;
    payload.extend_from_slice(public_key);

    let checksum = blake2_512(&[SS58_CONTEXT, &payload]);
    payload.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);

    Ok(bs58::encode(payload).into_string())
}

/// Decode an SS58 address into `(prefix, public_key)`, verifying the
/// checksum.
pub fn decode_address(address: &str) -> WalletResult<(u16, Vec<u8>)> {
    let raw = bs58::decode(address.trim())
        .into_vec()
        .map_err(|_| WalletError::invalid("address is not valid base58"))?;

    let (prefix, prefix_len) = match raw.first() {
        Some(&b) if b < 64 => (b as u16, 1),
        Some(&b) if b < 128 => {
            let second = *raw
                .get(1)
                .ok_or_else(|| WalletError::invalid("address is truncated"))?;
            let lower = ((b << 2) | (second >> 6)) as u16;
            let upper = (second & 0x3f) as u16;
            (lower | (upper << 8), 2)
        }
        Some(_) => return Err(WalletError::invalid("address has a reserved prefix")),
        None => return Err(WalletError::invalid("address is empty")),
    };

    if raw.len() < prefix_len + CHECKSUM_LENGTH {
        return Err(WalletError::invalid("address is truncated"));
    }
    let key_len = raw.len() - prefix_len - CHECKSUM_LENGTH;
    if !ACCEPTED_KEY_LENGTHS.contains(&key_len) {
        return Err(WalletError::invalid(format!(
            "address carries a {key_len}-byte key"
        )));
    }

    let (body, checksum) = raw.split_at(raw.len() - CHECKSUM_LENGTH);
    let expected = blake2_512(&[SS58_CONTEXT, body]);
    if checksum != &expected[..CHECKSUM_LENGTH] {
        return Err(WalletError::invalid("address checksum mismatch"));
    }

    Ok((prefix, body[prefix_len..].to_vec()))
}

/// Check that `address` decodes and carries the expected prefix.
pub fn validate_address(address: &str, expected_prefix: u16) -> WalletResult<()> {
    let (prefix, _) = decode_address(address)?;
    if prefix != expected_prefix {
        return Err(WalletError::invalid(format!(
            "address is for network {prefix}, expected {expected_prefix}"
        )));
    }
    Ok(())
}

fn prefix_bytes(prefix: u16) -> WalletResult<Vec<u8>> {
    match prefix {
        0..=63 => Ok(vec![prefix as u8]),
        64..=SS58_MAX_PREFIX => {
            let first = ((prefix & 0b0000_0000_1111_1100) as u8 >> 2) | 0b0100_0000;
            let second = ((prefix >> 8) as u8) | (((prefix & 0b0000_0000_0000_0011) as u8) << 6);
            Ok(vec![first, second])
        }
        _ => Err(WalletError::invalid(format!(
            "ss58 prefix {prefix} is out of range"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_PUBLIC: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
    const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[test]
    fn encodes_well_known_account() {
        let key = hex::decode(ALICE_PUBLIC).unwrap();
        assert_eq!(encode_address(&key, 42).unwrap(), ALICE_ADDRESS);
    }

    #[test]
    fn encodes_compressed_secp256k1_key() {
        // Generator point G, compressed.
        let key =
            hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap();
        assert_eq!(
            encode_address(&key, 42).unwrap(),
            "KW5gH6Z3cp2mzjDiFvwx6H1omguqpg6UAacK7NYhKZf2ccVJk"
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let (prefix, key) = decode_address(ALICE_ADDRESS).unwrap();
        assert_eq!(prefix, 42);
        assert_eq!(hex::encode(key), ALICE_PUBLIC);
    }

    #[test]
    fn two_byte_prefix_survives_decode() {
        let key = hex::decode(ALICE_PUBLIC).unwrap();
        for prefix in [64u16, 255, 1284, SS58_MAX_PREFIX] {
            let address = encode_address(&key, prefix).unwrap();
            let (decoded, decoded_key) = decode_address(&address).unwrap();
            assert_eq!(decoded, prefix);
            assert_eq!(decoded_key, key);
        }
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut chars: Vec<char> = ALICE_ADDRESS.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'Y' { 'Z' } else { 'Y' };
        let tampered: String = chars.into_iter().collect();
        assert!(decode_address(&tampered).is_err());
    }

    #[test]
    fn rejects_wrong_key_length() {
        assert!(encode_address(&[0u8; 31], 42).is_err());
        assert!(encode_address(&[0u8; 64], 42).is_err());
    }

    #[test]
    fn rejects_out_of_range_prefix() {
        assert!(encode_address(&[0u8; 32], SS58_MAX_PREFIX + 1).is_err());
    }

    #[test]
    fn rejects_non_base58() {
        assert!(decode_address("0OIl").is_err());
        assert!(decode_address("").is_err());
    }

    #[test]
    fn validate_checks_network() {
        assert!(validate_address(ALICE_ADDRESS, 42).is_ok());
        assert!(validate_address(ALICE_ADDRESS, 0).is_err());
    }
}
