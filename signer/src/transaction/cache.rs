//! Per-transaction memoization of recovered identities.
//!
//! Recovering a sender costs an EC point multiplication, and the same
//! transaction is asked "who sent you?" by the pool, by block execution,
//! and by RPC, often concurrently. Each [`Transaction`](super::Transaction)
//! therefore owns an [`IdentityCache`]: one slot per role, each holding an
//! immutable `(SignerId, value)` snapshot.
//!
//! Slots are lock-free. A read is an atomic load followed by an id
//! comparison, and a write atomically swaps in a fresh snapshot; nothing is
//! ever updated in place. Two threads missing at once both recover, both
//! store, and whichever store lands last wins. Recovery is a pure function
//! of the transaction bytes and the signer, so both wrote the same value.

use alloy_primitives::Address;
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

use crate::crypto::PublicKey;
use crate::signer::SignerId;

struct Snapshot<T> {
    signer: SignerId,
    value: T,
}

/// A single memoization slot.
pub struct Slot<T> {
    inner: ArcSwapOption<Snapshot<T>>,
}

impl<T: Clone> Slot<T> {
    fn new() -> Self {
        Self {
            inner: ArcSwapOption::empty(),
        }
    }

    /// Return the cached value if it was derived by an equal signer.
    pub fn get(&self, signer: &SignerId) -> Option<T> {
        let snapshot = self.inner.load_full()?;
        (snapshot.signer == *signer).then(|| snapshot.value.clone())
    }

    /// Replace the slot's snapshot.
    pub fn put(&self, signer: SignerId, value: T) {
        self.inner.store(Some(Arc::new(Snapshot { signer, value })));
    }

    /// The signer the current snapshot was derived with, if any.
    pub fn signer(&self) -> Option<SignerId> {
        self.inner.load_full().map(|s| s.signer.clone())
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: ArcSwapOption::new(self.inner.load_full()),
        }
    }
}

/// The identity slots attached to one transaction.
#[derive(Clone)]
pub struct IdentityCache {
    sender: Slot<Address>,
    sender_pubkey: Slot<Vec<PublicKey>>,
    fee_payer: Slot<Vec<PublicKey>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self {
            sender: Slot::new(),
            sender_pubkey: Slot::new(),
            fee_payer: Slot::new(),
        }
    }

    /// Recovered sender address.
    pub fn sender(&self) -> &Slot<Address> {
        &self.sender
    }

    /// Recovered sender public key(s).
    pub fn sender_pubkey(&self) -> &Slot<Vec<PublicKey>> {
        &self.sender_pubkey
    }

    /// Recovered fee-payer public key(s).
    pub fn fee_payer(&self) -> &Slot<Vec<PublicKey>> {
        &self.fee_payer
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdentityCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityCache")
            .field("sender", &self.sender.signer())
            .field("sender_pubkey", &self.sender_pubkey.signer())
            .field("fee_payer", &self.fee_payer.signer())
            .finish()
    }
}
