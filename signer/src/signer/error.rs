//! Error types for signing and sender recovery.

use thiserror::Error;

/// Errors returned by signers and the `sender*` lookups.
///
/// Every variant is a deterministic function of the transaction bytes and
/// the signer's configuration. Retrying will not help.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The transaction's claimed chain id differs from the signer's.
    #[error("invalid chain id for signer")]
    InvalidChainId,

    /// V is out of range, or (R, S, recovery id) fails curve-order or
    /// low-S validation.
    #[error("invalid transaction v, r, s values")]
    InvalidSignature,

    /// The recovered key is not an uncompressed `0x04`-prefixed point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// A fee-payer operation was requested on a transaction type without
    /// fee delegation.
    #[error("not a fee delegated transaction")]
    NotFeeDelegationTransaction,

    /// `from` was requested on a transaction type that does not carry it.
    #[error("transaction type has no from field")]
    NotTxInternalDataFrom,

    /// The transaction has no signature to recover from.
    #[error("transaction carries no signature")]
    MissingSignature,

    /// Error from the secp256k1 primitives, passed through as-is.
    #[error(transparent)]
    Secp256k1(#[from] k256::ecdsa::Error),
}
