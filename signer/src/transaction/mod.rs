//! # Transaction Module
//!
//! The transaction model as the signer sees it, plus the entry points for
//! signing transactions and asking them who they are from.
//!
//! ## Architecture
//!
//! ```text
//! types.rs   - Core value types (TxType, TxSignature, AccessTuple, RlpItem)
//! data.rs    - TxInternalData, the closed set of transaction payloads
//! builder.rs - Transaction and the fluent TransactionBuilder
//! cache.rs   - Per-transaction memoization of recovered identities
//! signing.rs - sign_tx / sign_tx_as_fee_payer
//! sender.rs  - sender / sender_pubkey / sender_fee_payer lookups
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** - Use [`TransactionBuilder`] to assemble the payload.
//! 2. **Sign** - Call [`sign_tx`] with the sender's keypair, and
//!    [`sign_tx_as_fee_payer`] with the fee payer's for fee-delegated types.
//! 3. **Identify** - Pool, execution and RPC call [`sender`] and friends.
//!    The first lookup per signer pays for recovery; the rest hit the cache.
//!
//! ## Design Decisions
//!
//! - Transactions are immutable. Signing returns a new transaction, so a
//!   cached identity can never outlive the bytes it was recovered from.
//! - The signing hash is not the transaction hash. [`Transaction::hash`]
//!   covers the signatures and identifies the transaction; the signing hash
//!   does not.
//! - Typed transfers that embed `from` are trusted for [`sender`]; validating
//!   their signatures is what [`sender_pubkey`] is for.

pub mod builder;
mod cache;
pub mod data;
pub mod sender;
pub mod signing;
pub mod types;

pub use builder::{Transaction, TransactionBuilder};
pub use data::TxInternalData;
pub use sender::{sender, sender_fee_payer, sender_fee_payer_pubkey, sender_from, sender_pubkey};
pub use signing::{sign_tx, sign_tx_as_fee_payer};
pub use types::{encode_items, AccessTuple, RlpItem, TxSignature, TxType};
