//! Signature-to-identity recovery shared by every scheme.

use alloy_primitives::{Address, B256};
use num_bigint::BigUint;

use super::error::SignerError;
use crate::config::{
    LEGACY_V_OFFSET, RECOVERY_ID_OFFSET, SIGNATURE_LENGTH, UNCOMPRESSED_PUBKEY_LENGTH,
    UNCOMPRESSED_PUBKEY_PREFIX,
};
use crate::crypto::{ecrecover, pubkey_to_address, unmarshal_pubkey, validate_signature_values, PublicKey};
use crate::transaction::TxSignature;

/// Recover the uncompressed public key bytes behind `sig`.
///
/// `normalize` maps the stored V back to `27 + recovery_id`; it returns
/// `None` when V cannot have come from this scheme.
fn recover_plain_common<F>(
    hash: &B256,
    sig: &TxSignature,
    normalize: F,
) -> Result<Vec<u8>, SignerError>
where
    F: Fn(&BigUint) -> Option<BigUint>,
{
    let v = normalize(&sig.v).ok_or(SignerError::InvalidSignature)?;
    let v = u8::try_from(&v).map_err(|_| SignerError::InvalidSignature)?;
    let recovery_id = v.wrapping_sub(LEGACY_V_OFFSET as u8);
    if !validate_signature_values(recovery_id, &sig.r, &sig.s, true) {
        return Err(SignerError::InvalidSignature);
    }

    let mut compact = [0u8; SIGNATURE_LENGTH];
    compact[..32].copy_from_slice(&sig.r.to_be_bytes::<32>());
    compact[32..RECOVERY_ID_OFFSET].copy_from_slice(&sig.s.to_be_bytes::<32>());
    compact[RECOVERY_ID_OFFSET] = recovery_id;

    let pubkey = ecrecover(hash, &compact)?;
    if pubkey.len() != UNCOMPRESSED_PUBKEY_LENGTH || pubkey[0] != UNCOMPRESSED_PUBKEY_PREFIX {
        return Err(SignerError::InvalidPublicKey);
    }
    Ok(pubkey)
}

/// Recover the address that signed `hash`.
pub(super) fn recover_plain<F>(
    hash: &B256,
    sig: &TxSignature,
    normalize: F,
) -> Result<Address, SignerError>
where
    F: Fn(&BigUint) -> Option<BigUint>,
{
    let pubkey = recover_plain_common(hash, sig, normalize)?;
    pubkey_to_address(&pubkey).ok_or(SignerError::InvalidPublicKey)
}

/// Recover the public key that signed `hash`.
pub(super) fn recover_plain_pubkey<F>(
    hash: &B256,
    sig: &TxSignature,
    normalize: F,
) -> Result<PublicKey, SignerError>
where
    F: Fn(&BigUint) -> Option<BigUint>,
{
    let pubkey = recover_plain_common(hash, sig, normalize)?;
    Ok(unmarshal_pubkey(&pubkey)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{keccak256, Keypair, SECP256K1_HALF_N, SECP256K1_N};
    use alloy_primitives::U256;

    // Identity on 27/28, the pre-chain-id encoding.
    fn plain(v: &BigUint) -> Option<BigUint> {
        Some(v.clone())
    }

    fn signed(kp: &Keypair, hash: &B256) -> TxSignature {
        let sig = kp.sign_hash(hash).unwrap();
        TxSignature {
            v: BigUint::from(u32::from(sig[64]) + 27),
            r: U256::from_be_slice(&sig[..32]),
            s: U256::from_be_slice(&sig[32..64]),
        }
    }

    #[test]
    fn recovers_address_and_key() {
        let kp = Keypair::generate();
        let hash = keccak256(b"tx");
        let sig = signed(&kp, &hash);
        assert_eq!(recover_plain(&hash, &sig, plain).unwrap(), kp.address());
        assert_eq!(recover_plain_pubkey(&hash, &sig, plain).unwrap(), kp.public_key());
    }

    #[test]
    fn rejects_high_s_twin() {
        let kp = Keypair::generate();
        let hash = keccak256(b"tx");
        let mut sig = signed(&kp, &hash);
        // (r, n - s) with the recovery id flipped is the same point, but
        // high-S.
        sig.s = SECP256K1_N - sig.s;
        sig.v = BigUint::from(55u32) - &sig.v;
        assert!(sig.s > SECP256K1_HALF_N);
        assert!(matches!(
            recover_plain(&hash, &sig, plain),
            Err(SignerError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_failed_normalization() {
        let kp = Keypair::generate();
        let hash = keccak256(b"tx");
        let sig = signed(&kp, &hash);
        assert!(matches!(
            recover_plain(&hash, &sig, |_| None),
            Err(SignerError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_v_wider_than_a_byte() {
        let kp = Keypair::generate();
        let hash = keccak256(b"tx");
        let mut sig = signed(&kp, &hash);
        sig.v = BigUint::from(27u32 + 256);
        assert!(matches!(
            recover_plain(&hash, &sig, plain),
            Err(SignerError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_out_of_range_recovery_id() {
        let kp = Keypair::generate();
        let hash = keccak256(b"tx");
        for v in [0u32, 26, 29, 255] {
            let mut sig = signed(&kp, &hash);
            sig.v = BigUint::from(v);
            assert!(
                matches!(recover_plain(&hash, &sig, plain), Err(SignerError::InvalidSignature)),
                "v = {v}"
            );
        }
    }

    #[test]
    fn rejects_zero_r_and_s() {
        let hash = keccak256(b"tx");
        let sig = TxSignature {
            v: BigUint::from(27u32),
            r: U256::ZERO,
            s: U256::from(1),
        };
        assert!(matches!(
            recover_plain(&hash, &sig, plain),
            Err(SignerError::InvalidSignature)
        ));
    }
}
