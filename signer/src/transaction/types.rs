//! Core value types shared by every transaction variant.
//!
//! These are the vocabulary of the signing layer: the type discriminant,
//! the `(V, R, S)` triple, access-list tuples, and [`RlpItem`], the
//! heterogeneous field the signing-hash pre-images are built from.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rlp::{BufMut, Encodable, RlpEncodable, EMPTY_STRING_CODE};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    TX_TYPE_ETHEREUM_ACCESS_LIST, TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER, TX_TYPE_LEGACY,
    TX_TYPE_VALUE_TRANSFER,
};
use crate::signer::codec::derive_chain_id;

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the transaction variants the signer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    /// Pre-typed transaction. The sender is recovered from the signature.
    Legacy,
    /// Value transfer that names its sender in a `from` field.
    ValueTransfer,
    /// Value transfer whose gas is paid by a separately signing fee payer.
    FeeDelegatedValueTransfer,
    /// Ethereum EIP-2930 access-list transaction, signed over its own
    /// byte envelope.
    EthereumAccessList,
}

impl TxType {
    /// The numeric type id used on the wire and inside signing pre-images.
    pub fn id(&self) -> u16 {
        match self {
            Self::Legacy => TX_TYPE_LEGACY,
            Self::ValueTransfer => TX_TYPE_VALUE_TRANSFER,
            Self::FeeDelegatedValueTransfer => TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER,
            Self::EthereumAccessList => TX_TYPE_ETHEREUM_ACCESS_LIST,
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "Legacy"),
            Self::ValueTransfer => write!(f, "ValueTransfer"),
            Self::FeeDelegatedValueTransfer => write!(f, "FeeDelegatedValueTransfer"),
            Self::EthereumAccessList => write!(f, "EthereumAccessList"),
        }
    }
}

// ---------------------------------------------------------------------------
// TxSignature
// ---------------------------------------------------------------------------

/// The `(V, R, S)` triple of a transaction signature.
///
/// `V` is arbitrary precision because it embeds the chain id
/// (`V = recovery_id + 35 + chain_id * 2`), and chain ids are unbounded.
/// An all-zero triple means "not signed yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxSignature {
    pub v: BigUint,
    pub r: U256,
    pub s: U256,
}

impl TxSignature {
    /// `true` if all three components are zero.
    pub fn is_empty(&self) -> bool {
        self.v == BigUint::default() && self.r.is_zero() && self.s.is_zero()
    }

    /// The chain id this signature's V was produced for, if any.
    pub fn chain_id(&self) -> Option<BigUint> {
        derive_chain_id(&self.v)
    }
}

impl Encodable for TxSignature {
    fn encode(&self, out: &mut dyn BufMut) {
        self.fields().encode(out)
    }

    fn length(&self) -> usize {
        self.fields().length()
    }
}

impl TxSignature {
    fn fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::BigInt(self.v.clone()),
            RlpItem::Quantity(self.r),
            RlpItem::Quantity(self.s),
        ]
    }
}

// ---------------------------------------------------------------------------
// AccessTuple
// ---------------------------------------------------------------------------

/// One entry of an EIP-2930 access list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, RlpEncodable)]
pub struct AccessTuple {
    pub address: Address,
    pub storage_keys: Vec<B256>,
}

// ---------------------------------------------------------------------------
// RlpItem
// ---------------------------------------------------------------------------

/// A single field of a signing or hashing pre-image.
///
/// Pre-images mix integers, addresses, byte strings and nested lists; this
/// enum lets them be assembled as a plain `Vec` and RLP-encoded as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// Unsigned integer (nonce, gas, type id, the zeroed R/S slots).
    Uint(u64),
    /// 256-bit quantity (gas price, value, R, S).
    Quantity(U256),
    /// Arbitrary-precision integer (chain id, V).
    BigInt(BigUint),
    Address(Address),
    /// Recipient slot: `None` (contract creation) encodes as the empty string.
    To(Option<Address>),
    Bytes(Bytes),
    AccessList(Vec<AccessTuple>),
    Signatures(Vec<TxSignature>),
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Uint(v) => v.encode(out),
            Self::Quantity(v) => v.encode(out),
            Self::BigInt(v) => biguint_bytes(v).as_slice().encode(out),
            Self::Address(a) | Self::To(Some(a)) => a.encode(out),
            Self::To(None) => out.put_u8(EMPTY_STRING_CODE),
            Self::Bytes(b) => b.encode(out),
            Self::AccessList(list) => list.encode(out),
            Self::Signatures(sigs) => sigs.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Uint(v) => v.length(),
            Self::Quantity(v) => v.length(),
            Self::BigInt(v) => biguint_bytes(v).as_slice().length(),
            Self::Address(a) | Self::To(Some(a)) => a.length(),
            Self::To(None) => 1,
            Self::Bytes(b) => b.length(),
            Self::AccessList(list) => list.length(),
            Self::Signatures(sigs) => sigs.length(),
        }
    }
}

/// Minimal big-endian bytes of an integer; zero has no bytes at all.
fn biguint_bytes(v: &BigUint) -> Vec<u8> {
    if *v == BigUint::default() {
        Vec::new()
    } else {
        v.to_bytes_be()
    }
}

/// RLP-encode a field list into a fresh buffer.
pub fn encode_items(items: &[RlpItem]) -> Vec<u8> {
    let mut out = Vec::with_capacity(alloy_rlp::list_length::<RlpItem, RlpItem>(items));
    alloy_rlp::encode_list::<RlpItem, RlpItem>(items, &mut out);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
