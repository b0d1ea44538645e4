//! # Sender and Fee-Payer Lookup
//!
//! The entry points the pool, block execution and RPC use to ask a
//! transaction who it is from. Typed transactions that embed their sender
//! answer from the payload; everything else is recovered through the
//! [`Signer`] and memoized on the transaction under the signer's id.
//!
//! A cached identity is only served to a signer with the same id as the
//! one that produced it, so asking under the wrong chain never returns a
//! stale answer: it misses the cache and fails in the signer.

use alloy_primitives::Address;
use tracing::trace;

use super::builder::Transaction;
use crate::crypto::PublicKey;
use crate::signer::{Signer, SignerError};

/// The sender of `tx`.
///
/// Legacy-style transactions are recovered (and memoized). Typed ones
/// return their embedded `from` without checking the signature; use
/// [`sender_pubkey`] when the signature itself has to be validated.
pub fn sender<S: Signer + ?Sized>(signer: &S, tx: &Transaction) -> Result<Address, SignerError> {
    if tx.is_legacy() {
        return sender_from(signer, tx);
    }
    tx.from()
}

/// The address recovered from `tx`'s sender signature, memoized per signer.
pub fn sender_from<S: Signer + ?Sized>(
    signer: &S,
    tx: &Transaction,
) -> Result<Address, SignerError> {
    let id = signer.id();
    let slot = tx.identity_cache().sender();
    if let Some(addr) = slot.get(&id) {
        trace!(signer = %id, %addr, "sender cache hit");
        return Ok(addr);
    }

    let addr = signer.sender(tx)?;
    trace!(signer = %id, %addr, "sender cache miss, recovered");
    slot.put(id, addr);
    Ok(addr)
}

/// The public key(s) recovered from `tx`'s sender signatures, memoized per
/// signer.
pub fn sender_pubkey<S: Signer + ?Sized>(
    signer: &S,
    tx: &Transaction,
) -> Result<Vec<PublicKey>, SignerError> {
    let id = signer.id();
    let slot = tx.identity_cache().sender_pubkey();
    if let Some(keys) = slot.get(&id) {
        trace!(signer = %id, count = keys.len(), "sender pubkey cache hit");
        return Ok(keys);
    }

    let keys = signer.sender_pubkey(tx)?;
    trace!(signer = %id, count = keys.len(), "sender pubkey cache miss, recovered");
    slot.put(id, keys.clone());
    Ok(keys)
}

/// The account paying for `tx`'s gas.
///
/// That is the sender unless the transaction is fee-delegated, in which case
/// it is the embedded fee payer.
pub fn sender_fee_payer<S: Signer + ?Sized>(
    signer: &S,
    tx: &Transaction,
) -> Result<Address, SignerError> {
    match tx.fee_payer() {
        Some(fee_payer) => Ok(fee_payer),
        None => sender(signer, tx),
    }
}

/// The public key(s) recovered from `tx`'s fee-payer signatures, memoized
/// per signer.
pub fn sender_fee_payer_pubkey<S: Signer + ?Sized>(
    signer: &S,
    tx: &Transaction,
) -> Result<Vec<PublicKey>, SignerError> {
    let id = signer.id();
    let slot = tx.identity_cache().fee_payer();
    if let Some(keys) = slot.get(&id) {
        trace!(signer = %id, count = keys.len(), "fee payer pubkey cache hit");
        return Ok(keys);
    }

    let keys = signer.sender_fee_payer(tx)?;
    trace!(signer = %id, count = keys.len(), "fee payer pubkey cache miss, recovered");
    slot.put(id, keys.clone());
    Ok(keys)
}
