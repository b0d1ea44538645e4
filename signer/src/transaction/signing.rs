//! Transaction signing with secp256k1 keypairs.
//!
//! Signing is a separate step from building because the keypair may not
//! be available at construction time (e.g., hardware wallet, remote signer).
//! The signed bytes are whatever the [`Signer`] says they are; this module
//! only glues the hash, the key and the resulting signature together.

use tracing::debug;

use super::builder::Transaction;
use crate::config::network_name;
use crate::crypto::Keypair;
use crate::signer::{Signer, SignerError};

/// Signs `tx` as its sender and returns the signed copy.
///
/// The procedure:
/// 1. Compute `signer.hash(tx)`, the chain-bound signing hash.
/// 2. Produce a recoverable secp256k1 signature over it.
/// 3. Encode it as `(V, R, S)` for the signer's chain and replace the
///    transaction's sender signatures with it.
///
/// # Example
///
/// ```
/// use nova_signer::crypto::Keypair;
/// use nova_signer::signer::Eip155Signer;
/// use nova_signer::transaction::{sign_tx, TransactionBuilder, TxType};
///
/// let keypair = Keypair::generate();
/// let signer = Eip155Signer::for_chain(1001u64);
/// let tx = TransactionBuilder::new(TxType::Legacy).nonce(1).gas(21_000).build();
///
/// let signed = sign_tx(&tx, &signer, &keypair).unwrap();
/// assert_eq!(signed.signatures().len(), 1);
/// ```
pub fn sign_tx<S: Signer + ?Sized>(
    tx: &Transaction,
    signer: &S,
    keypair: &Keypair,
) -> Result<Transaction, SignerError> {
    let hash = signer.hash(tx);
    let sig = keypair.sign_hash(&hash)?;
    debug!(
        tx_type = %tx.tx_type(),
        network = %network_name(signer.chain_id()),
        %hash,
        "signed transaction"
    );
    Ok(tx.with_signature(signer, &sig))
}

/// Signs `tx` as its fee payer and returns the signed copy.
///
/// Fails with [`SignerError::NotFeeDelegationTransaction`] if `tx` has no
/// fee payer. The sender signatures are left as they are.
pub fn sign_tx_as_fee_payer<S: Signer + ?Sized>(
    tx: &Transaction,
    signer: &S,
    keypair: &Keypair,
) -> Result<Transaction, SignerError> {
    let hash = signer.hash_fee_payer(tx)?;
    let sig = keypair.sign_hash(&hash)?;
    debug!(
        tx_type = %tx.tx_type(),
        network = %network_name(signer.chain_id()),
        %hash,
        "signed transaction as fee payer"
    );
    tx.with_fee_payer_signature(signer, &sig)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
