//! The closed set of transaction payloads.
//!
//! The signing layer branches on three capabilities: does the sender have
//! to be recovered from the signature, is there a fee payer, and is the
//! signing body a ready-made byte envelope instead of a field list. Each
//! variant of [`TxInternalData`] fixes all three, and every accessor here
//! is an exhaustive `match`, so adding a variant means revisiting each
//! capability explicitly.

use alloy_primitives::{Address, Bytes, U256};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::types::{encode_items, AccessTuple, RlpItem, TxSignature, TxType};
use crate::config::ETHEREUM_ACCESS_LIST_ENVELOPE;

/// Pre-typed transaction. Signed over the EIP-155 field list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: u64,
    /// `None` creates a contract.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub signature: TxSignature,
}

/// Value transfer naming its sender explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTransferTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: u64,
    pub to: Address,
    pub value: U256,
    pub from: Address,
    pub signatures: Vec<TxSignature>,
}

/// Value transfer whose gas is paid by `fee_payer`, who co-signs the
/// transaction over a separate hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDelegatedValueTransferTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: u64,
    pub to: Address,
    pub value: U256,
    pub from: Address,
    pub signatures: Vec<TxSignature>,
    pub fee_payer: Address,
    pub fee_payer_signatures: Vec<TxSignature>,
}

/// EIP-2930 transaction. Carries its chain id explicitly and is signed
/// over `0x01 || rlp(fields)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListTx {
    pub chain_id: BigUint,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: Vec<AccessTuple>,
    pub signature: TxSignature,
}

/// Type-specific payload of a [`super::Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TxInternalData {
    Legacy(LegacyTx),
    ValueTransfer(ValueTransferTx),
    FeeDelegatedValueTransfer(FeeDelegatedValueTransferTx),
    EthereumAccessList(AccessListTx),
}

impl TxInternalData {
    pub fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::ValueTransfer(_) => TxType::ValueTransfer,
            Self::FeeDelegatedValueTransfer(_) => TxType::FeeDelegatedValueTransfer,
            Self::EthereumAccessList(_) => TxType::EthereumAccessList,
        }
    }

    /// `true` if the sender can only be learned by recovering it from the
    /// signature, because the payload has no `from` field.
    pub fn is_legacy(&self) -> bool {
        match self {
            Self::Legacy(_) | Self::EthereumAccessList(_) => true,
            Self::ValueTransfer(_) | Self::FeeDelegatedValueTransfer(_) => false,
        }
    }

    /// The chain id the transaction claims to be for.
    ///
    /// Explicit for access-list transactions, otherwise derived from the V of
    /// the first sender signature. `None` if there is nothing to derive it
    /// from.
    pub fn chain_id(&self) -> Option<BigUint> {
        match self {
            Self::EthereumAccessList(tx) => Some(tx.chain_id.clone()),
            Self::Legacy(_) | Self::ValueTransfer(_) | Self::FeeDelegatedValueTransfer(_) => {
                self.signatures().first().and_then(TxSignature::chain_id)
            }
        }
    }

    /// The embedded sender, for types that carry one.
    pub fn from(&self) -> Option<Address> {
        match self {
            Self::ValueTransfer(tx) => Some(tx.from),
            Self::FeeDelegatedValueTransfer(tx) => Some(tx.from),
            Self::Legacy(_) | Self::EthereumAccessList(_) => None,
        }
    }

    /// The designated fee payer, for fee-delegated types.
    pub fn fee_payer(&self) -> Option<Address> {
        match self {
            Self::FeeDelegatedValueTransfer(tx) => Some(tx.fee_payer),
            Self::Legacy(_) | Self::ValueTransfer(_) | Self::EthereumAccessList(_) => None,
        }
    }

    /// Sender signatures, in order.
    pub fn signatures(&self) -> &[TxSignature] {
        match self {
            Self::Legacy(tx) => std::slice::from_ref(&tx.signature),
            Self::ValueTransfer(tx) => &tx.signatures,
            Self::FeeDelegatedValueTransfer(tx) => &tx.signatures,
            Self::EthereumAccessList(tx) => std::slice::from_ref(&tx.signature),
        }
    }

    /// Fee-payer signatures, for fee-delegated types.
    pub fn fee_payer_signatures(&self) -> Option<&[TxSignature]> {
        match self {
            Self::FeeDelegatedValueTransfer(tx) => Some(tx.fee_payer_signatures.as_slice()),
            Self::Legacy(_) | Self::ValueTransfer(_) | Self::EthereumAccessList(_) => None,
        }
    }

    /// Replace the sender signature(s).
    ///
    /// Single-signature types keep only the first element; an empty list
    /// resets them to the unsigned triple.
    pub(crate) fn set_signatures(&mut self, signatures: Vec<TxSignature>) {
        match self {
            Self::Legacy(tx) => tx.signature = signatures.into_iter().next().unwrap_or_default(),
            Self::ValueTransfer(tx) => tx.signatures = signatures,
            Self::FeeDelegatedValueTransfer(tx) => tx.signatures = signatures,
            Self::EthereumAccessList(tx) => {
                tx.signature = signatures.into_iter().next().unwrap_or_default()
            }
        }
    }

    /// Replace the fee-payer signature(s). Returns `false` if this type has
    /// no fee payer.
    pub(crate) fn set_fee_payer_signatures(&mut self, signatures: Vec<TxSignature>) -> bool {
        match self {
            Self::FeeDelegatedValueTransfer(tx) => {
                tx.fee_payer_signatures = signatures;
                true
            }
            Self::Legacy(_) | Self::ValueTransfer(_) | Self::EthereumAccessList(_) => false,
        }
    }

    /// The ordered field list a signing hash is built from, before the
    /// chain id and the zeroed R/S slots are appended.
    ///
    /// Typed value transfers collapse their fields into one RLP byte string
    /// so that the type id is bound into the signature.
    pub fn serialize_for_sign(&self) -> Vec<RlpItem> {
        match self {
            Self::Legacy(tx) => vec![
                RlpItem::Uint(tx.nonce),
                RlpItem::Quantity(tx.gas_price),
                RlpItem::Uint(tx.gas),
                RlpItem::To(tx.to),
                RlpItem::Quantity(tx.value),
                RlpItem::Bytes(tx.input.clone()),
            ],
            Self::ValueTransfer(tx) => vec![RlpItem::Bytes(
                encode_items(&transfer_fields(
                    TxType::ValueTransfer,
                    tx.nonce,
                    tx.gas_price,
                    tx.gas,
                    tx.to,
                    tx.value,
                    tx.from,
                ))
                .into(),
            )],
            Self::FeeDelegatedValueTransfer(tx) => vec![RlpItem::Bytes(
                encode_items(&transfer_fields(
                    TxType::FeeDelegatedValueTransfer,
                    tx.nonce,
                    tx.gas_price,
                    tx.gas,
                    tx.to,
                    tx.value,
                    tx.from,
                ))
                .into(),
            )],
            Self::EthereumAccessList(tx) => access_list_fields(tx),
        }
    }

    /// The byte envelope signed in place of [`Self::serialize_for_sign`], for
    /// types that define one.
    pub fn serialize_for_sign_to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::EthereumAccessList(tx) => {
                let body = encode_items(&access_list_fields(tx));
                let mut out = Vec::with_capacity(body.len() + 1);
                out.push(ETHEREUM_ACCESS_LIST_ENVELOPE);
                out.extend_from_slice(&body);
                Some(out)
            }
            Self::Legacy(_) | Self::ValueTransfer(_) | Self::FeeDelegatedValueTransfer(_) => None,
        }
    }

    /// The full signed encoding, the pre-image of the transaction hash.
    pub fn encode_signed(&self) -> Vec<u8> {
        match self {
            Self::Legacy(tx) => encode_items(&[
                RlpItem::Uint(tx.nonce),
                RlpItem::Quantity(tx.gas_price),
                RlpItem::Uint(tx.gas),
                RlpItem::To(tx.to),
                RlpItem::Quantity(tx.value),
                RlpItem::Bytes(tx.input.clone()),
                RlpItem::BigInt(tx.signature.v.clone()),
                RlpItem::Quantity(tx.signature.r),
                RlpItem::Quantity(tx.signature.s),
            ]),
            Self::ValueTransfer(tx) => {
                let mut fields = transfer_fields_untyped(
                    tx.nonce,
                    tx.gas_price,
                    tx.gas,
                    tx.to,
                    tx.value,
                    tx.from,
                );
                fields.push(RlpItem::Signatures(tx.signatures.clone()));
                typed_envelope(TxType::ValueTransfer, &fields)
            }
            Self::FeeDelegatedValueTransfer(tx) => {
                let mut fields = transfer_fields_untyped(
                    tx.nonce,
                    tx.gas_price,
                    tx.gas,
                    tx.to,
                    tx.value,
                    tx.from,
                );
                fields.push(RlpItem::Signatures(tx.signatures.clone()));
                fields.push(RlpItem::Address(tx.fee_payer));
                fields.push(RlpItem::Signatures(tx.fee_payer_signatures.clone()));
                typed_envelope(TxType::FeeDelegatedValueTransfer, &fields)
            }
            Self::EthereumAccessList(tx) => {
                let mut fields = access_list_fields(tx);
                fields.push(RlpItem::BigInt(tx.signature.v.clone()));
                fields.push(RlpItem::Quantity(tx.signature.r));
                fields.push(RlpItem::Quantity(tx.signature.s));
                let body = encode_items(&fields);
                let mut out = Vec::with_capacity(body.len() + 1);
                out.push(ETHEREUM_ACCESS_LIST_ENVELOPE);
                out.extend_from_slice(&body);
                out
            }
        }
    }
}

fn transfer_fields_untyped(
    nonce: u64,
    gas_price: U256,
    gas: u64,
    to: Address,
    value: U256,
    from: Address,
) -> Vec<RlpItem> {
    vec![
        RlpItem::Uint(nonce),
        RlpItem::Quantity(gas_price),
        RlpItem::Uint(gas),
        RlpItem::Address(to),
        RlpItem::Quantity(value),
        RlpItem::Address(from),
    ]
}

fn transfer_fields(
    tx_type: TxType,
    nonce: u64,
    gas_price: U256,
    gas: u64,
    to: Address,
    value: U256,
    from: Address,
) -> Vec<RlpItem> {
    let mut fields = Vec::with_capacity(7);
    fields.push(RlpItem::Uint(u64::from(tx_type.id())));
    fields.extend(transfer_fields_untyped(nonce, gas_price, gas, to, value, from));
    fields
}

fn access_list_fields(tx: &AccessListTx) -> Vec<RlpItem> {
    vec![
        RlpItem::BigInt(tx.chain_id.clone()),
        RlpItem::Uint(tx.nonce),
        RlpItem::Quantity(tx.gas_price),
        RlpItem::Uint(tx.gas),
        RlpItem::To(tx.to),
        RlpItem::Quantity(tx.value),
        RlpItem::Bytes(tx.input.clone()),
        RlpItem::AccessList(tx.access_list.clone()),
    ]
}

/// `type_id (1 byte) || rlp(fields)` for the single-byte typed transfers.
fn typed_envelope(tx_type: TxType, fields: &[RlpItem]) -> Vec<u8> {
    let body = encode_items(fields);
    let mut out = Vec::with_capacity(body.len() + 1);
    // Value-transfer ids fit in one byte.
    out.push(tx_type.id() as u8);
    out.extend_from_slice(&body);
    out
}
