//! # Protocol Configuration & Constants
//!
//! Every magic number the signer relies on lives here. Most of them are
//! consensus-critical: change one and your node disagrees with the rest of
//! the network about who signed what.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Chain Identifiers
// ---------------------------------------------------------------------------

/// Mainnet chain id.
pub const CHAIN_ID_MAINNET: u64 = 8217;

/// Public testnet chain id.
pub const CHAIN_ID_TESTNET: u64 = 1001;

/// Local devnet chain id. Reset whenever someone feels like it.
pub const CHAIN_ID_DEVNET: u64 = 2019;

// ---------------------------------------------------------------------------
// Signature Layout
// ---------------------------------------------------------------------------

/// Compact recoverable signature length: `R (32) || S (32) || recovery id (1)`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Offset of the recovery id inside a compact signature.
pub const RECOVERY_ID_OFFSET: usize = 64;

/// Length of an uncompressed SEC1 public key, prefix byte included.
pub const UNCOMPRESSED_PUBKEY_LENGTH: usize = 65;

/// Prefix byte of an uncompressed SEC1 public key.
pub const UNCOMPRESSED_PUBKEY_PREFIX: u8 = 0x04;

/// Offset added to the recovery id in chain-id bound V values
/// (`V = recovery_id + 35 + chain_id * 2`).
pub const EIP155_V_OFFSET: u64 = 35;

/// Offset of pre-chain-id V values (`V = recovery_id + 27`).
pub const LEGACY_V_OFFSET: u64 = 27;

/// Distance between the two V offsets. Recovery subtracts this after
/// removing `chain_id * 2`, which lands both encodings on `27 + recovery_id`.
pub const V_NORMALIZER: u64 = EIP155_V_OFFSET - LEGACY_V_OFFSET;

// ---------------------------------------------------------------------------
// Transaction Types
// ---------------------------------------------------------------------------

pub const TX_TYPE_LEGACY: u16 = 0x00;
pub const TX_TYPE_VALUE_TRANSFER: u16 = 0x08;
pub const TX_TYPE_FEE_DELEGATED_VALUE_TRANSFER: u16 = 0x09;

/// Ethereum access-list envelope. The high byte marks "Ethereum tx type",
/// the low byte is the EIP-2718 type it wraps.
pub const TX_TYPE_ETHEREUM_ACCESS_LIST: u16 = 0x7801;

/// EIP-2718 type byte prepended to the access-list signing body.
pub const ETHEREUM_ACCESS_LIST_ENVELOPE: u8 = 0x01;

// ---------------------------------------------------------------------------
// ChainConfig
// ---------------------------------------------------------------------------

/// The slice of chain configuration the signer cares about.
///
/// Node bootstrap owns the real config file; this is what it hands down
/// when it asks for a signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Chain id bound into every signature. `0` disables replay protection.
    pub chain_id: BigUint,
}

impl ChainConfig {
    /// Creates a config for the given chain id.
    pub fn new(chain_id: impl Into<BigUint>) -> Self {
        Self {
            chain_id: chain_id.into(),
        }
    }

    /// Parses a config from a JSON document such as `{"chainId": [8217]}`
    /// or whatever `serde_json` produced when the config was written out.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(CHAIN_ID_MAINNET)
    }
}

/// Returns a friendly name for a chain id, mainly for logging.
pub fn network_name(chain_id: &BigUint) -> String {
    match u64::try_from(chain_id) {
        Ok(CHAIN_ID_MAINNET) => "mainnet".to_string(),
        Ok(CHAIN_ID_TESTNET) => "testnet".to_string(),
        Ok(CHAIN_ID_DEVNET) => "devnet".to_string(),
        _ => format!("unknown({})", chain_id),
    }
}
