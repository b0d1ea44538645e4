//! # Cryptographic Primitives
//!
//! Everything the signer needs from elliptic-curve land, and nothing more:
//!
//! - **secp256k1** recoverable ECDSA (via `k256`) - sign a prehash, recover
//!   a public key from a compact signature, parse SEC1 keys.
//! - **Keccak-256** - address derivation and signing hashes.
//!
//! None of this is hand-rolled. The wrappers exist so there is exactly one
//! place to audit, and so callers get byte-level contracts (`[u8; 65]` in,
//! SEC1 bytes out) instead of curve types.

pub mod hash;
pub mod keys;
pub mod secp256k1;

pub use hash::{keccak256, rlp_hash};
pub use keys::{KeyError, Keypair};
pub use secp256k1::{
    ecrecover, pubkey_to_address, public_key_address, unmarshal_pubkey,
    validate_signature_values, PublicKey, SECP256K1_HALF_N, SECP256K1_N,
};
