//! # Chain-Bound Signers
//!
//! A [`Signer`] fixes the rules for one chain: which bytes get signed, how
//! the recovery id and chain id are packed into V, and how a signature is
//! turned back into a public key or address. Signers are immutable and
//! cheap to share across threads.
//!
//! ```text
//! sighash.rs - signing-hash pre-images (sender and fee payer)
//! codec.rs   - compact signature <-> (V, R, S), chain id from V
//! recover.rs - (hash, V, R, S) -> public key / address
//! eip155.rs  - Eip155Signer, the only scheme in use
//! error.rs   - SignerError
//! ```
//!
//! Two signers are interchangeable exactly when their [`SignerId`]s are
//! equal. Recovered identities are cached per transaction under that id.

pub mod codec;
mod eip155;
pub mod error;
mod recover;
pub mod sighash;

use alloy_primitives::{Address, B256};
use num_bigint::BigUint;
use std::fmt;

use crate::config::ChainConfig;
use crate::crypto::PublicKey;
use crate::transaction::{Transaction, TxSignature};

pub use eip155::Eip155Signer;
pub use error::SignerError;

/// The signature schemes a signer can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerScheme {
    /// Chain id folded into V (`V = recovery_id + 35 + chain_id * 2`).
    Eip155,
}

/// Identity of a signer: scheme plus chain id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignerId {
    pub scheme: SignerScheme,
    pub chain_id: BigUint,
}

impl SignerId {
    pub fn new(scheme: SignerScheme, chain_id: BigUint) -> Self {
        Self { scheme, chain_id }
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.scheme, self.chain_id)
    }
}

/// Signing and recovery rules for one chain.
pub trait Signer: Send + Sync + fmt::Debug {
    fn id(&self) -> SignerId;

    fn chain_id(&self) -> &BigUint;

    /// The hash the sender signs.
    fn hash(&self, tx: &Transaction) -> B256;

    /// The hash the fee payer signs.
    fn hash_fee_payer(&self, tx: &Transaction) -> Result<B256, SignerError>;

    /// Split a 65-byte compact signature into `(V, R, S)` for this chain.
    ///
    /// # Panics
    ///
    /// Panics if `sig` is not 65 bytes long.
    fn signature_values(&self, sig: &[u8]) -> TxSignature;

    /// Recover the sender address from the first sender signature.
    fn sender(&self, tx: &Transaction) -> Result<Address, SignerError>;

    /// Recover one public key per sender signature.
    fn sender_pubkey(&self, tx: &Transaction) -> Result<Vec<PublicKey>, SignerError>;

    /// Recover one public key per fee-payer signature.
    fn sender_fee_payer(&self, tx: &Transaction) -> Result<Vec<PublicKey>, SignerError>;

    fn equal(&self, other: &dyn Signer) -> bool {
        self.id() == other.id()
    }
}

/// The signer for `config` at `block_number`.
///
/// Only one scheme has ever been active, so the height does not matter.
pub fn make_signer(config: &ChainConfig, _block_number: u64) -> Eip155Signer {
    Eip155Signer::new(config.chain_id.clone())
}

/// The most permissive signer for `config`: the one that accepts every
/// transaction type the chain may ever see.
pub fn latest_signer(config: &ChainConfig) -> Eip155Signer {
    Eip155Signer::new(config.chain_id.clone())
}

/// Like [`latest_signer`], for callers that only know the chain id.
pub fn latest_signer_for_chain_id(chain_id: impl Into<BigUint>) -> Eip155Signer {
    Eip155Signer::for_chain(chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET};

    #[test]
    fn constructors_agree() {
        let config = ChainConfig::new(BigUint::from(CHAIN_ID_TESTNET));
        let a = make_signer(&config, 0);
        let b = make_signer(&config, 1_000_000);
        let c = latest_signer(&config);
        let d = latest_signer_for_chain_id(CHAIN_ID_TESTNET);
        assert!(a.equal(&b));
        assert!(a.equal(&c));
        assert!(a.equal(&d));
        assert_eq!(a.chain_id(), &BigUint::from(CHAIN_ID_TESTNET));
    }

    #[test]
    fn different_chains_are_not_equal() {
        let a = latest_signer_for_chain_id(CHAIN_ID_MAINNET);
        let b = latest_signer_for_chain_id(CHAIN_ID_TESTNET);
        assert!(!a.equal(&b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn default_config_is_mainnet() {
        let signer = latest_signer(&ChainConfig::default());
        assert_eq!(signer.chain_id(), &BigUint::from(CHAIN_ID_MAINNET));
    }

    #[test]
    fn signer_id_display() {
        let id = SignerId::new(SignerScheme::Eip155, BigUint::from(8217u32));
        assert_eq!(id.to_string(), "Eip155/8217");
    }
}
