// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Signer - Transaction Signing & Sender Recovery
//!
//! Every transaction admitted to the pool and every transaction replayed
//! during block validation goes through this crate to answer one question:
//! *who signed this?* Two honest nodes must always agree on the answer, so
//! everything here is deterministic, chain-id bound, and boring on purpose.
//!
//! ## Architecture
//!
//! - **crypto** - secp256k1 sign/recover wrappers, Keccak-256, keypairs.
//! - **signer** - the chain-id bound signature scheme: signing hash,
//!   V encoding, and signature-to-address recovery.
//! - **transaction** - the transaction model, its per-transaction identity
//!   cache, and the `sender*` entry points used by pool/consensus/RPC.
//! - **config** - protocol constants and the chain configuration.
//! - **logging** - `tracing` subscriber setup.
//!
//! ## Quick tour
//!
//! ```
//! use nova_signer::crypto::Keypair;
//! use nova_signer::signer::Eip155Signer;
//! use nova_signer::transaction::{sender, sign_tx, TransactionBuilder, TxType};
//!
//! let keypair = Keypair::generate();
//! let signer = Eip155Signer::for_chain(1u64);
//! let tx = TransactionBuilder::new(TxType::Legacy).nonce(1).gas(21_000).build();
//!
//! let signed = sign_tx(&tx, &signer, &keypair).unwrap();
//! assert_eq!(sender(&signer, &signed).unwrap(), keypair.address());
//! ```

pub mod config;
pub mod crypto;
pub mod logging;
pub mod signer;
pub mod transaction;
