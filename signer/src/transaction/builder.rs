//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] assembles an unsigned [`Transaction`] of any
//! supported type. Fields that the chosen type has no slot for are
//! ignored, so one builder chain can be reused across types in tests.
//!
//! The builder does not sign. That happens in [`super::signing`], which
//! keeps construction testable without key material.

use alloy_primitives::{Address, Bytes, B256, U256};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::cache::IdentityCache;
use super::data::{
    AccessListTx, FeeDelegatedValueTransferTx, LegacyTx, TxInternalData, ValueTransferTx,
};
use super::types::{AccessTuple, TxSignature, TxType};
use crate::crypto::keccak256;
use crate::signer::{Signer, SignerError};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction plus the identities already recovered from it.
///
/// The payload is immutable: every signing operation returns a new
/// `Transaction` with an empty cache. Equality and serialization only look
/// at the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    data: TxInternalData,

    #[serde(skip)]
    cache: IdentityCache,
}

impl Transaction {
    pub fn new(data: TxInternalData) -> Self {
        Self {
            data,
            cache: IdentityCache::new(),
        }
    }

    pub fn data(&self) -> &TxInternalData {
        &self.data
    }

    pub fn tx_type(&self) -> TxType {
        self.data.tx_type()
    }

    /// The chain id the transaction claims. See [`TxInternalData::chain_id`].
    pub fn chain_id(&self) -> Option<BigUint> {
        self.data.chain_id()
    }

    /// `true` if the sender must be recovered from the signature.
    pub fn is_legacy(&self) -> bool {
        self.data.is_legacy()
    }

    pub fn fee_payer(&self) -> Option<Address> {
        self.data.fee_payer()
    }

    /// The embedded sender.
    ///
    /// Fails with [`SignerError::NotTxInternalDataFrom`] for types that
    /// only know their sender through the signature.
    pub fn from(&self) -> Result<Address, SignerError> {
        self.data.from().ok_or(SignerError::NotTxInternalDataFrom)
    }

    pub fn signatures(&self) -> &[TxSignature] {
        self.data.signatures()
    }

    pub fn fee_payer_signatures(&self) -> Option<&[TxSignature]> {
        self.data.fee_payer_signatures()
    }

    /// Transaction hash: `keccak256` of the signed encoding.
    ///
    /// Unlike the signing hash this covers the signatures, so it identifies
    /// the transaction.
    pub fn hash(&self) -> B256 {
        keccak256(self.data.encode_signed())
    }

    /// A copy carrying `sig` as its only sender signature.
    ///
    /// `sig` is the 65-byte `R || S || recovery_id` form; V is computed for
    /// `signer`'s chain.
    ///
    /// # Panics
    ///
    /// Panics if `sig` is not 65 bytes long.
    pub fn with_signature<S: Signer + ?Sized>(&self, signer: &S, sig: &[u8]) -> Transaction {
        self.with_signatures(vec![signer.signature_values(sig)])
    }

    /// A copy carrying `signatures` as its sender signatures.
    pub fn with_signatures(&self, signatures: Vec<TxSignature>) -> Transaction {
        let mut data = self.data.clone();
        data.set_signatures(signatures);
        Transaction::new(data)
    }

    /// A copy carrying `sig` as its only fee-payer signature.
    ///
    /// # Panics
    ///
    /// Panics if `sig` is not 65 bytes long.
    pub fn with_fee_payer_signature<S: Signer + ?Sized>(
        &self,
        signer: &S,
        sig: &[u8],
    ) -> Result<Transaction, SignerError> {
        let mut data = self.data.clone();
        if !data.set_fee_payer_signatures(vec![signer.signature_values(sig)]) {
            return Err(SignerError::NotFeeDelegationTransaction);
        }
        Ok(Transaction::new(data))
    }

    pub(crate) fn identity_cache(&self) -> &IdentityCache {
        &self.cache
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Transaction {}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`]s.
///
/// ```
/// use alloy_primitives::{Address, U256};
/// use nova_signer::transaction::{TransactionBuilder, TxType};
///
/// let tx = TransactionBuilder::new(TxType::ValueTransfer)
///     .nonce(1)
///     .gas_price(U256::from(25_000_000_000u64))
///     .gas(21_000)
///     .to(Address::repeat_byte(0x11))
///     .from(Address::repeat_byte(0x22))
///     .value(U256::from(1_000))
///     .build();
///
/// assert!(tx.signatures().is_empty());
/// ```
pub struct TransactionBuilder {
    tx_type: TxType,
    nonce: u64,
    gas_price: U256,
    gas: u64,
    to: Option<Address>,
    value: U256,
    input: Bytes,
    from: Address,
    fee_payer: Address,
    chain_id: BigUint,
    access_list: Vec<AccessTuple>,
}

impl TransactionBuilder {
    /// Creates a builder for `tx_type` with every field zeroed.
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            nonce: 0,
            gas_price: U256::ZERO,
            gas: 0,
            to: None,
            value: U256::ZERO,
            input: Bytes::new(),
            from: Address::ZERO,
            fee_payer: Address::ZERO,
            chain_id: BigUint::default(),
            access_list: Vec::new(),
        }
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    /// Sets the recipient. Leaving it unset on a legacy or access-list
    /// transaction creates a contract; value transfers use the zero address.
    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Call data. Ignored by value transfers.
    pub fn input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }

    /// Embedded sender. Only typed value transfers carry one.
    pub fn from(mut self, from: Address) -> Self {
        self.from = from;
        self
    }

    /// Only fee-delegated types carry a fee payer.
    pub fn fee_payer(mut self, fee_payer: Address) -> Self {
        self.fee_payer = fee_payer;
        self
    }

    /// Explicit chain id. Only access-list transactions carry one; the rest
    /// get theirs from V at signing time.
    pub fn chain_id(mut self, chain_id: impl Into<BigUint>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn access_list(mut self, access_list: Vec<AccessTuple>) -> Self {
        self.access_list = access_list;
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    pub fn build(self) -> Transaction {
        let data = match self.tx_type {
            TxType::Legacy => TxInternalData::Legacy(LegacyTx {
                nonce: self.nonce,
                gas_price: self.gas_price,
                gas: self.gas,
                to: self.to,
                value: self.value,
                input: self.input,
                signature: TxSignature::default(),
            }),
            TxType::ValueTransfer => TxInternalData::ValueTransfer(ValueTransferTx {
                nonce: self.nonce,
                gas_price: self.gas_price,
                gas: self.gas,
                to: self.to.unwrap_or_default(),
                value: self.value,
                from: self.from,
                signatures: Vec::new(),
            }),
            TxType::FeeDelegatedValueTransfer => {
                TxInternalData::FeeDelegatedValueTransfer(FeeDelegatedValueTransferTx {
                    nonce: self.nonce,
                    gas_price: self.gas_price,
                    gas: self.gas,
                    to: self.to.unwrap_or_default(),
                    value: self.value,
                    from: self.from,
                    signatures: Vec::new(),
                    fee_payer: self.fee_payer,
                    fee_payer_signatures: Vec::new(),
                })
            }
            TxType::EthereumAccessList => TxInternalData::EthereumAccessList(AccessListTx {
                chain_id: self.chain_id,
                nonce: self.nonce,
                gas_price: self.gas_price,
                gas: self.gas,
                to: self.to,
                value: self.value,
                input: self.input,
                access_list: self.access_list,
                signature: TxSignature::default(),
            }),
        };
        Transaction::new(data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
