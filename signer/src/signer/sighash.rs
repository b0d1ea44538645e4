//! Signing-hash pre-images.
//!
//! ```text
//! sender:     keccak256(rlp([body..., chain_id, 0, 0]))
//! fee payer:  keccak256(rlp([body..., fee_payer, chain_id, 0, 0]))
//! ```
//!
//! `body` is either the single byte envelope of types that sign one, or the
//! field list of [`TxInternalData::serialize_for_sign`]. The trailing zeros
//! sit where R and S go in the signed encoding.

use alloy_primitives::{Bytes, B256};
use num_bigint::BigUint;

use super::error::SignerError;
use crate::crypto::rlp_hash;
use crate::transaction::{RlpItem, TxInternalData};

/// The hash a sender signs for `chain_id`.
pub fn sender_hash(data: &TxInternalData, chain_id: &BigUint) -> B256 {
    let mut items = sign_body(data);
    push_chain_suffix(&mut items, chain_id);
    rlp_hash(&items)
}

/// The hash a fee payer signs for `chain_id`.
pub fn fee_payer_hash(data: &TxInternalData, chain_id: &BigUint) -> Result<B256, SignerError> {
    let fee_payer = data
        .fee_payer()
        .ok_or(SignerError::NotFeeDelegationTransaction)?;
    let mut items = sign_body(data);
    items.push(RlpItem::Address(fee_payer));
    push_chain_suffix(&mut items, chain_id);
    Ok(rlp_hash(&items))
}

fn sign_body(data: &TxInternalData) -> Vec<RlpItem> {
    match data.serialize_for_sign_to_bytes() {
        Some(bytes) => vec![RlpItem::Bytes(Bytes::from(bytes))],
        None => data.serialize_for_sign(),
    }
}

fn push_chain_suffix(items: &mut Vec<RlpItem>, chain_id: &BigUint) {
    items.push(RlpItem::BigInt(chain_id.clone()));
    items.push(RlpItem::Uint(0));
    items.push(RlpItem::Uint(0));
}
