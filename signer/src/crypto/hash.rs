//! # Hashing Utilities
//!
//! Keccak-256 is the only hash the signer uses: for signing hashes, for
//! transaction hashes, and for turning public keys into addresses. The
//! implementation comes from `alloy-primitives`; this module just pins the
//! names the rest of the crate uses.

use alloy_primitives::B256;
use alloy_rlp::Encodable;

/// Compute the Keccak-256 digest of `data`.
///
/// Note: this is the original Keccak padding, *not* NIST SHA3-256. The two
/// disagree on every input.
///
/// # Example
///
/// ```
/// use nova_signer::crypto::keccak256;
///
/// let empty = keccak256(b"");
/// assert_eq!(
///     hex::encode(empty),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    alloy_primitives::keccak256(data)
}

/// RLP-encode `value` and hash the encoding.
pub fn rlp_hash<T: Encodable + ?Sized>(value: &T) -> B256 {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    keccak256(out)
}
