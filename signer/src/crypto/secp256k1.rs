//! # secp256k1 Recovery Primitives
//!
//! Byte-level wrappers around `k256`'s recoverable ECDSA. The signer layer
//! above speaks in compact 65-byte signatures (`R || S || recovery_id`) and
//! 65-byte uncompressed public keys (`0x04 || X || Y`); this module is the
//! only place those are converted to and from curve types.
//!
//! Errors from `k256` are passed through untouched. The signer decides
//! which of them are "invalid signature" and which are something else.

use alloy_primitives::{uint, Address, B256, U256};
use k256::ecdsa::{Error, RecoveryId, Signature, SigningKey, VerifyingKey};

use super::hash::keccak256;
use crate::config::{
    RECOVERY_ID_OFFSET, SIGNATURE_LENGTH, UNCOMPRESSED_PUBKEY_LENGTH, UNCOMPRESSED_PUBKEY_PREFIX,
};

/// A recovered secp256k1 public key.
pub type PublicKey = VerifyingKey;

/// Order of the secp256k1 group.
pub const SECP256K1_N: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// `SECP256K1_N / 2`, the upper bound for S under the low-S rule.
pub const SECP256K1_HALF_N: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Sign a 32-byte prehash and return the compact recoverable signature.
///
/// Signing is deterministic (RFC 6979) and always produces a low-S
/// signature, with the recovery id adjusted to match.
pub fn sign(hash: &B256, key: &SigningKey) -> Result<[u8; SIGNATURE_LENGTH], Error> {
    let (signature, recovery_id) = key.sign_prehash_recoverable(hash.as_slice())?;
    let mut out = [0u8; SIGNATURE_LENGTH];
    out[..RECOVERY_ID_OFFSET].copy_from_slice(&signature.to_bytes());
    out[RECOVERY_ID_OFFSET] = recovery_id.to_byte();
    Ok(out)
}

/// Recover the uncompressed public key that produced `sig` over `hash`.
///
/// Returns the SEC1 encoding as produced by the curve library. Callers are
/// expected to check the length and the `0x04` prefix themselves.
pub fn ecrecover(hash: &B256, sig: &[u8; SIGNATURE_LENGTH]) -> Result<Vec<u8>, Error> {
    let signature = Signature::from_slice(&sig[..RECOVERY_ID_OFFSET])?;
    let recovery_id = RecoveryId::from_byte(sig[RECOVERY_ID_OFFSET]).ok_or_else(Error::new)?;
    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id)?;
    Ok(key.to_encoded_point(false).as_bytes().to_vec())
}

/// Parse SEC1 public key bytes (compressed or uncompressed).
pub fn unmarshal_pubkey(bytes: &[u8]) -> Result<PublicKey, Error> {
    VerifyingKey::from_sec1_bytes(bytes)
}

/// Derive an address from uncompressed public key bytes: the low 20 bytes
/// of `keccak256(X || Y)`. The `0x04` prefix is skipped, not hashed.
///
/// Returns `None` unless `uncompressed` is a 65-byte `0x04 || X || Y`
/// encoding.
pub fn pubkey_to_address(uncompressed: &[u8]) -> Option<Address> {
    match uncompressed.split_first() {
        Some((&UNCOMPRESSED_PUBKEY_PREFIX, xy))
            if uncompressed.len() == UNCOMPRESSED_PUBKEY_LENGTH =>
        {
            Some(xy_to_address(xy))
        }
        _ => None,
    }
}

/// Derive the address of a parsed public key.
pub fn public_key_address(key: &PublicKey) -> Address {
    let point = key.to_encoded_point(false);
    xy_to_address(&point.as_bytes()[1..])
}

fn xy_to_address(xy: &[u8]) -> Address {
    let digest = keccak256(xy);
    Address::from_slice(&digest[12..])
}

/// Check the raw `(v, r, s)` components before attempting recovery.
///
/// `v` is the bare recovery id (0 or 1). With `homestead` set, S must lie in
/// the lower half of the curve order; the upper-half twin of every valid
/// signature is rejected.
pub fn validate_signature_values(v: u8, r: &U256, s: &U256, homestead: bool) -> bool {
    if *r < U256::from(1) || *s < U256::from(1) {
        return false;
    }
    if homestead && *s > SECP256K1_HALF_N {
        return false;
    }
    *r < SECP256K1_N && *s < SECP256K1_N && (v == 0 || v == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn random_key() -> SigningKey {
        SigningKey::random(&mut OsRng)
    }

    #[test]
    fn sign_then_recover_yields_signing_key() {
        let key = random_key();
        let hash = keccak256(b"recover me");
        let sig = sign(&hash, &key).unwrap();

        let recovered = ecrecover(&hash, &sig).unwrap();
        assert_eq!(recovered.len(), 65);
        assert_eq!(recovered[0], 0x04);

        let expected = key.verifying_key().to_encoded_point(false);
        assert_eq!(recovered.as_slice(), expected.as_bytes());
    }

    #[test]
    fn signatures_are_low_s() {
        for i in 0..16u8 {
            let key = random_key();
            let sig = sign(&keccak256([i]), &key).unwrap();
            let s = U256::from_be_slice(&sig[32..64]);
            assert!(s <= SECP256K1_HALF_N);
            assert!(sig[64] <= 1);
        }
    }

    #[test]
    fn recover_with_wrong_hash_gives_other_key() {
        let key = random_key();
        let sig = sign(&keccak256(b"one"), &key).unwrap();
        let expected = key.verifying_key().to_encoded_point(false);
        match ecrecover(&keccak256(b"two"), &sig) {
            Ok(other) => assert_ne!(other.as_slice(), expected.as_bytes()),
            Err(_) => {}
        }
    }

    #[test]
    fn ecrecover_rejects_zero_r() {
        let mut sig = [0u8; 65];
        sig[63] = 1;
        assert!(ecrecover(&keccak256(b"x"), &sig).is_err());
    }

    #[test]
    fn unmarshal_roundtrip() {
        let key = random_key();
        let encoded = key.verifying_key().to_encoded_point(false);
        let parsed = unmarshal_pubkey(encoded.as_bytes()).unwrap();
        assert_eq!(&parsed, key.verifying_key());
    }

    #[test]
    fn unmarshal_rejects_garbage() {
        assert!(unmarshal_pubkey(&[0x04; 65]).is_err());
        assert!(unmarshal_pubkey(&[]).is_err());
    }

    #[test]
    fn validate_bounds() {
        let one = U256::from(1);
        assert!(validate_signature_values(0, &one, &one, true));
        assert!(validate_signature_values(1, &one, &one, true));
        assert!(!validate_signature_values(2, &one, &one, true));
        assert!(!validate_signature_values(0, &U256::ZERO, &one, true));
        assert!(!validate_signature_values(0, &one, &U256::ZERO, true));
        assert!(!validate_signature_values(0, &SECP256K1_N, &one, true));
    }

    #[test]
    fn validate_low_s_rule() {
        let one = U256::from(1);
        let high_s = SECP256K1_HALF_N + one;
        assert!(validate_signature_values(0, &one, &SECP256K1_HALF_N, true));
        assert!(!validate_signature_values(0, &one, &high_s, true));
        // Without the rule, the upper half is fine as long as it is below n.
        assert!(validate_signature_values(0, &one, &high_s, false));
        assert!(!validate_signature_values(0, &one, &SECP256K1_N, false));
    }

    #[test]
    fn pubkey_to_address_matches_parsed_key() {
        let key = random_key();
        let encoded = key.verifying_key().to_encoded_point(false);
        assert_eq!(
            pubkey_to_address(encoded.as_bytes()),
            Some(public_key_address(key.verifying_key()))
        );
    }

    #[test]
    fn pubkey_to_address_rejects_malformed_input() {
        assert_eq!(pubkey_to_address(&[]), None);
        assert_eq!(pubkey_to_address(&[0x04]), None);
        assert_eq!(pubkey_to_address(&[0x04; 64]), None);
        assert_eq!(pubkey_to_address(&[0x02; 65]), None);
        assert_eq!(pubkey_to_address(&[0x04; 66]), None);
        assert!(pubkey_to_address(&[0x04; 65]).is_some());
    }

    #[test]
    fn half_n_is_half_n() {
        assert_eq!(SECP256K1_N >> 1, SECP256K1_HALF_N);
    }
}
