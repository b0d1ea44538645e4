//! The EIP-155 signer: chain id folded into V, low-S enforced.

use alloy_primitives::{Address, B256};
use num_bigint::BigUint;
use tracing::warn;

use super::codec::{normalize_v, signature_values};
use super::error::SignerError;
use super::recover::{recover_plain, recover_plain_pubkey};
use super::sighash::{fee_payer_hash, sender_hash};
use super::{Signer, SignerId, SignerScheme};
use crate::crypto::PublicKey;
use crate::transaction::{Transaction, TxSignature};

/// Signer that folds the chain id into V.
///
/// `V = recovery_id + 35 + chain_id * 2`, so a signature made for one chain
/// recovers to nothing useful on another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip155Signer {
    chain_id: BigUint,
    chain_id_mul: BigUint,
}

impl Eip155Signer {
    pub fn new(chain_id: BigUint) -> Self {
        let chain_id_mul = &chain_id * 2u32;
        Self {
            chain_id,
            chain_id_mul,
        }
    }

    /// Convenience constructor from any integer.
    pub fn for_chain(chain_id: impl Into<BigUint>) -> Self {
        Self::new(chain_id.into())
    }

    fn check_chain_id(&self, tx: &Transaction) -> Result<(), SignerError> {
        match tx.chain_id() {
            Some(chain_id) if chain_id == self.chain_id => Ok(()),
            _ => Err(SignerError::InvalidChainId),
        }
    }

    fn normalize(&self) -> impl Fn(&BigUint) -> Option<BigUint> + '_ {
        move |v| normalize_v(v, &self.chain_id_mul)
    }

    fn recover_pubkeys(
        &self,
        hash: &B256,
        signatures: &[TxSignature],
    ) -> Result<Vec<PublicKey>, SignerError> {
        if signatures.is_empty() {
            return Err(SignerError::MissingSignature);
        }
        signatures
            .iter()
            .map(|sig| recover_plain_pubkey(hash, sig, self.normalize()))
            .collect()
    }
}

impl Signer for Eip155Signer {
    fn id(&self) -> SignerId {
        SignerId::new(SignerScheme::Eip155, self.chain_id.clone())
    }

    fn chain_id(&self) -> &BigUint {
        &self.chain_id
    }

    fn hash(&self, tx: &Transaction) -> B256 {
        sender_hash(tx.data(), &self.chain_id)
    }

    fn hash_fee_payer(&self, tx: &Transaction) -> Result<B256, SignerError> {
        fee_payer_hash(tx.data(), &self.chain_id)
    }

    fn signature_values(&self, sig: &[u8]) -> TxSignature {
        signature_values(sig, &self.chain_id_mul)
    }

    fn sender(&self, tx: &Transaction) -> Result<Address, SignerError> {
        if !tx.is_legacy() {
            warn!(
                tx_type = %tx.tx_type(),
                "sender recovery requested for a transaction that carries its sender"
            );
        }
        self.check_chain_id(tx)?;
        let sig = tx.signatures().first().ok_or(SignerError::MissingSignature)?;
        recover_plain(&self.hash(tx), sig, self.normalize())
    }

    fn sender_pubkey(&self, tx: &Transaction) -> Result<Vec<PublicKey>, SignerError> {
        if tx.is_legacy() {
            warn!(
                tx_type = %tx.tx_type(),
                "public key recovery requested for a transaction that only needs an address"
            );
        }
        self.check_chain_id(tx)?;
        self.recover_pubkeys(&self.hash(tx), tx.signatures())
    }

    fn sender_fee_payer(&self, tx: &Transaction) -> Result<Vec<PublicKey>, SignerError> {
        if tx.is_legacy() {
            warn!(
                tx_type = %tx.tx_type(),
                "fee payer recovery requested for a transaction without a fee payer"
            );
        }
        self.check_chain_id(tx)?;
        let signatures = tx
            .fee_payer_signatures()
            .ok_or(SignerError::NotFeeDelegationTransaction)?;
        let hash = self.hash_fee_payer(tx)?;
        self.recover_pubkeys(&hash, signatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::transaction::{TransactionBuilder, TxType};
    use alloy_primitives::U256;

    fn transfer(tx_type: TxType, from: Address) -> Transaction {
        TransactionBuilder::new(tx_type)
            .nonce(7)
            .gas_price(U256::from(25_000_000_000u64))
            .gas(21_000)
            .to(Address::repeat_byte(0x11))
            .value(U256::from(1))
            .from(from)
            .fee_payer(Address::repeat_byte(0x99))
            .build()
    }

    fn sign(signer: &Eip155Signer, tx: &Transaction, kp: &Keypair) -> Transaction {
        let sig = kp.sign_hash(&signer.hash(tx)).unwrap();
        tx.with_signature(signer, &sig)
    }

    #[test]
    fn legacy_round_trip() {
        let signer = Eip155Signer::for_chain(1001u64);
        let kp = Keypair::generate();
        let signed = sign(&signer, &transfer(TxType::Legacy, Address::ZERO), &kp);
        assert_eq!(signer.sender(&signed).unwrap(), kp.address());
        assert_eq!(signer.sender_pubkey(&signed).unwrap(), vec![kp.public_key()]);
    }

    #[test]
    fn v_carries_chain_id() {
        let signer = Eip155Signer::for_chain(8217u64);
        let kp = Keypair::generate();
        let signed = sign(&signer, &transfer(TxType::Legacy, Address::ZERO), &kp);
        let v = &signed.signatures()[0].v;
        assert!(*v == BigUint::from(16469u32) || *v == BigUint::from(16470u32));
        assert_eq!(signed.chain_id(), Some(BigUint::from(8217u32)));
    }

    #[test]
    fn wrong_chain_is_rejected() {
        let kp = Keypair::generate();
        let signed = sign(
            &Eip155Signer::for_chain(100u64),
            &transfer(TxType::Legacy, Address::ZERO),
            &kp,
        );
        let other = Eip155Signer::for_chain(200u64);
        assert!(matches!(other.sender(&signed), Err(SignerError::InvalidChainId)));
        assert!(matches!(other.sender_pubkey(&signed), Err(SignerError::InvalidChainId)));
        assert!(matches!(other.sender_fee_payer(&signed), Err(SignerError::InvalidChainId)));
    }

    #[test]
    fn unsigned_transaction_has_no_chain() {
        let signer = Eip155Signer::for_chain(1u64);
        let tx = transfer(TxType::Legacy, Address::ZERO);
        assert!(matches!(signer.sender(&tx), Err(SignerError::InvalidChainId)));
    }

    #[test]
    fn chain_zero_round_trip() {
        let signer = Eip155Signer::for_chain(0u64);
        let kp = Keypair::generate();
        let signed = sign(&signer, &transfer(TxType::Legacy, Address::ZERO), &kp);
        // V = 35/36 for chain 0, which derives chain id 0.
        assert_eq!(signed.chain_id(), Some(BigUint::default()));
        assert_eq!(signer.sender(&signed).unwrap(), kp.address());
    }

    #[test]
    fn typed_transfer_recovers_from_signature() {
        let signer = Eip155Signer::for_chain(1001u64);
        let kp = Keypair::generate();
        let signed = sign(&signer, &transfer(TxType::ValueTransfer, kp.address()), &kp);
        assert_eq!(signer.sender(&signed).unwrap(), kp.address());
        assert_eq!(signer.sender_pubkey(&signed).unwrap(), vec![kp.public_key()]);
    }

    #[test]
    fn sender_fee_payer_requires_fee_delegation() {
        let signer = Eip155Signer::for_chain(1001u64);
        let kp = Keypair::generate();
        let signed = sign(&signer, &transfer(TxType::ValueTransfer, kp.address()), &kp);
        assert!(matches!(
            signer.sender_fee_payer(&signed),
            Err(SignerError::NotFeeDelegationTransaction)
        ));
        assert!(matches!(
            signer.hash_fee_payer(&signed),
            Err(SignerError::NotFeeDelegationTransaction)
        ));
    }

    #[test]
    fn fee_payer_without_signature_is_missing() {
        let signer = Eip155Signer::for_chain(1001u64);
        let kp = Keypair::generate();
        let signed = sign(
            &signer,
            &transfer(TxType::FeeDelegatedValueTransfer, kp.address()),
            &kp,
        );
        assert!(matches!(
            signer.sender_fee_payer(&signed),
            Err(SignerError::MissingSignature)
        ));
    }

    #[test]
    fn fee_payer_round_trip() {
        let signer = Eip155Signer::for_chain(1001u64);
        let sender = Keypair::generate();
        let payer = Keypair::generate();
        let signed = sign(
            &signer,
            &transfer(TxType::FeeDelegatedValueTransfer, sender.address()),
            &sender,
        );
        let sig = payer.sign_hash(&signer.hash_fee_payer(&signed).unwrap()).unwrap();
        let signed = signed.with_fee_payer_signature(&signer, &sig).unwrap();

        assert_eq!(signer.sender_fee_payer(&signed).unwrap(), vec![payer.public_key()]);
        assert_eq!(signer.sender_pubkey(&signed).unwrap(), vec![sender.public_key()]);
    }

    #[test]
    fn multiple_signatures_recover_in_order() {
        let signer = Eip155Signer::for_chain(1001u64);
        let a = Keypair::generate();
        let b = Keypair::generate();
        let tx = transfer(TxType::ValueTransfer, a.address());
        let hash = signer.hash(&tx);
        let sigs = vec![
            signer.signature_values(&a.sign_hash(&hash).unwrap()),
            signer.signature_values(&b.sign_hash(&hash).unwrap()),
        ];
        let multi = tx.with_signatures(sigs);
        assert_eq!(
            signer.sender_pubkey(&multi).unwrap(),
            vec![a.public_key(), b.public_key()]
        );
    }

    #[test]
    fn one_bad_signature_fails_the_batch() {
        let signer = Eip155Signer::for_chain(1001u64);
        let a = Keypair::generate();
        let tx = transfer(TxType::ValueTransfer, a.address());
        let good = signer.signature_values(&a.sign_hash(&signer.hash(&tx)).unwrap());
        let bad = TxSignature {
            s: U256::ZERO,
            ..good.clone()
        };
        let multi = tx.with_signatures(vec![good, bad]);
        assert!(matches!(
            signer.sender_pubkey(&multi),
            Err(SignerError::InvalidSignature)
        ));
    }

    #[test]
    #[should_panic(expected = "wrong size for signature")]
    fn signature_values_checks_length() {
        Eip155Signer::for_chain(1u64).signature_values(&[0u8; 66]);
    }
}
