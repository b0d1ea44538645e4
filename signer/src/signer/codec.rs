//! Conversion between compact signatures and the `(R, S, V)` triple stored
//! on transactions.
//!
//! ```text
//! compact:  R (32 bytes) || S (32 bytes) || recovery_id (1 byte, 0 or 1)
//! stored:   V = recovery_id + 35 + chain_id * 2
//! ```
//!
//! Recovery goes the other way with `V - chain_id * 2 - 8`, which yields
//! `27 + recovery_id`: the same value a pre-chain-id signature would carry.

use alloy_primitives::U256;
use num_bigint::BigUint;

use crate::config::{EIP155_V_OFFSET, LEGACY_V_OFFSET, RECOVERY_ID_OFFSET, SIGNATURE_LENGTH, V_NORMALIZER};
use crate::transaction::types::TxSignature;

/// Split a compact signature into `(R, S, V)` under the given `chain_id * 2`.
///
/// # Panics
///
/// Panics if `sig` is not exactly 65 bytes. Signatures reaching this point
/// come from our own signing code, so a wrong length is a bug in the caller.
pub fn signature_values(sig: &[u8], chain_id_mul: &BigUint) -> TxSignature {
    if sig.len() != SIGNATURE_LENGTH {
        panic!(
            "wrong size for signature: got {}, want {}",
            sig.len(),
            SIGNATURE_LENGTH
        );
    }
    let r = U256::from_be_slice(&sig[..32]);
    let s = U256::from_be_slice(&sig[32..RECOVERY_ID_OFFSET]);
    let v = BigUint::from(u64::from(sig[RECOVERY_ID_OFFSET]) + EIP155_V_OFFSET) + chain_id_mul;
    TxSignature { v, r, s }
}

/// Undo the chain-id part of V: `v - chain_id * 2 - 8`.
///
/// Returns `None` when the subtraction would go negative; such a V cannot
/// have been produced for this chain.
pub fn normalize_v(v: &BigUint, chain_id_mul: &BigUint) -> Option<BigUint> {
    let offset = chain_id_mul + V_NORMALIZER;
    if *v < offset {
        return None;
    }
    Some(v - offset)
}

/// Recover the chain id a V value was produced for.
///
/// `27`/`28` predate chain ids and map to `0`. Anything from `35` upwards
/// maps to `(v - 35) / 2`, computed in arbitrary precision so synthetic
/// chain ids far beyond `u64` still work. Values in between encode nothing
/// and yield `None`.
pub fn derive_chain_id(v: &BigUint) -> Option<BigUint> {
    if *v == BigUint::from(LEGACY_V_OFFSET) || *v == BigUint::from(LEGACY_V_OFFSET + 1) {
        return Some(BigUint::default());
    }
    if *v < BigUint::from(EIP155_V_OFFSET) {
        return None;
    }
    Some((v - EIP155_V_OFFSET) / 2u32)
}
