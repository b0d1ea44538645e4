//! # Key Management
//!
//! secp256k1 keypairs for signing transactions as a sender or as a fee payer.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop by `k256`.
//! - Generation uses the OS RNG (`OsRng`).
//! - Key bytes are never logged, and `Debug` only prints the address.

use alloy_primitives::{Address, B256};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::secp256k1::{self, public_key_address, PublicKey};
use crate::config::SIGNATURE_LENGTH;

/// Errors that can occur while loading key material.
///
/// Deliberately vague about *why* a key was rejected.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid secret key encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A secp256k1 signing keypair.
///
/// `Keypair` intentionally does NOT implement `Serialize`. Exporting a
/// private key should be a conscious `to_bytes()` call.
///
/// # Examples
///
/// ```
/// use nova_signer::crypto::{keccak256, Keypair};
///
/// let kp = Keypair::generate();
/// let sig = kp.sign_hash(&keccak256(b"hello")).unwrap();
/// assert_eq!(sig.len(), 65);
/// ```
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Load a keypair from a 32-byte big-endian secret scalar.
    ///
    /// Rejects zero and values at or above the curve order.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, KeyError> {
        if secret.len() != 32 {
            return Err(KeyError::InvalidSecretKey);
        }
        let signing_key = SigningKey::from_slice(secret).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Load a keypair from a hex-encoded secret key, with or without `0x`.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(stripped)?;
        Self::from_bytes(&bytes)
    }

    /// Export the secret scalar. Handle with care.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// The public half.
    pub fn public_key(&self) -> PublicKey {
        *self.signing_key.verifying_key()
    }

    /// The account address controlled by this key.
    pub fn address(&self) -> Address {
        public_key_address(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash, returning `R || S || recovery_id`.
    pub fn sign_hash(&self, hash: &B256) -> Result<[u8; SIGNATURE_LENGTH], k256::ecdsa::Error> {
        secp256k1::sign(hash, &self.signing_key)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
