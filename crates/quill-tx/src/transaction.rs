//! The four deployed transaction envelopes.
//!
//! Every envelope has two canonical encodings: the signing pre-image
//! (hashed into the sighash) and the signed wire form. Legacy transactions
//! are a bare RLP list with the chain id folded into `v` per EIP-155; typed
//! transactions prefix their RLP list with a type byte and carry a separate
//! `y_parity` field.

use alloy_primitives::{B256, U256};

use quill_crypto::{eip155_v, recover_address, PrivateKey, Signature};
use quill_primitives::{keccak256, Address};
use quill_rlp::{encode_bytes, encode_list, encode_u64, encode_uint};

use crate::blob::is_valid_versioned_hash;
use crate::error::TxError;

/// An EIP-2930 access list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<B256>,
}

/// A legacy transaction.
///
/// `chain_id` zero selects the pre-EIP-155 form: the signing pre-image
/// omits the trailing `[chain_id, 0, 0]` and `v` is encoded as `27/28`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// Recipient, or `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
}

impl LegacyTransaction {
    fn encode_body(&self, out: &mut Vec<u8>) {
        encode_u64(self.nonce, out);
        encode_uint(self.gas_price, out);
        encode_u64(self.gas_limit, out);
        encode_optional_address(&self.to, out);
        encode_uint(self.value, out);
        encode_bytes(&self.data, out);
    }

    /// `keccak256(rlp([nonce, gasPrice, gasLimit, to, value, data,
    /// chainId, 0, 0]))`, with the chain-id triplet omitted pre-EIP-155.
    pub fn signing_hash(&self) -> B256 {
        let mut buf = Vec::new();
        encode_list(&mut buf, |payload| {
            self.encode_body(payload);
            if self.chain_id != 0 {
                encode_u64(self.chain_id, payload);
                encode_u64(0, payload);
                encode_u64(0, payload);
            }
        });
        keccak256(&buf)
    }

    /// `rlp([nonce, gasPrice, gasLimit, to, value, data, v, r, s])` with
    /// `v = chainId * 2 + 35 + parity` (or `27 + parity` pre-EIP-155).
    pub fn signed_bytes(&self, signature: &Signature) -> Vec<u8> {
        let v = eip155_v(signature.y_parity(), self.chain_id);
        let mut buf = Vec::new();
        encode_list(&mut buf, |payload| {
            self.encode_body(payload);
            encode_u64(v, payload);
            encode_uint(signature.r_u256(), payload);
            encode_uint(signature.s_u256(), payload);
        });
        buf
    }
}

/// An EIP-2930 (type 1) access-list transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip2930Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}

impl Eip2930Transaction {
    pub const TX_TYPE: u8 = 0x01;

    fn encode_body(&self, out: &mut Vec<u8>) {
        encode_u64(self.chain_id, out);
        encode_u64(self.nonce, out);
        encode_uint(self.gas_price, out);
        encode_u64(self.gas_limit, out);
        encode_optional_address(&self.to, out);
        encode_uint(self.value, out);
        encode_bytes(&self.data, out);
        encode_access_list(&self.access_list, out);
    }

    /// `keccak256(0x01 ‖ rlp([chainId, nonce, gasPrice, gasLimit, to,
    /// value, data, accessList]))`.
    pub fn signing_hash(&self) -> B256 {
        let mut buf = vec![Self::TX_TYPE];
        encode_list(&mut buf, |payload| self.encode_body(payload));
        keccak256(&buf)
    }

    pub fn signed_bytes(&self, signature: &Signature) -> Vec<u8> {
        let mut buf = vec![Self::TX_TYPE];
        encode_list(&mut buf, |payload| {
            self.encode_body(payload);
            encode_u64(u64::from(signature.y_parity()), payload);
            encode_uint(signature.r_u256(), payload);
            encode_uint(signature.s_u256(), payload);
        });
        buf
    }
}

/// An EIP-1559 (type 2) fee-market transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip1559Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}

impl Eip1559Transaction {
    pub const TX_TYPE: u8 = 0x02;

    fn encode_body(&self, out: &mut Vec<u8>) {
        encode_u64(self.chain_id, out);
        encode_u64(self.nonce, out);
        encode_uint(self.max_priority_fee_per_gas, out);
        encode_uint(self.max_fee_per_gas, out);
        encode_u64(self.gas_limit, out);
        encode_optional_address(&self.to, out);
        encode_uint(self.value, out);
        encode_bytes(&self.data, out);
        encode_access_list(&self.access_list, out);
    }

    /// `keccak256(0x02 ‖ rlp([chainId, nonce, maxPriorityFeePerGas,
    /// maxFeePerGas, gasLimit, to, value, data, accessList]))`.
    pub fn signing_hash(&self) -> B256 {
        let mut buf = vec![Self::TX_TYPE];
        encode_list(&mut buf, |payload| self.encode_body(payload));
        keccak256(&buf)
    }

    pub fn signed_bytes(&self, signature: &Signature) -> Vec<u8> {
        let mut buf = vec![Self::TX_TYPE];
        encode_list(&mut buf, |payload| {
            self.encode_body(payload);
            encode_u64(u64::from(signature.y_parity()), payload);
            encode_uint(signature.r_u256(), payload);
            encode_uint(signature.s_u256(), payload);
        });
        buf
    }
}

/// An EIP-4844 (type 3) blob transaction.
///
/// Unlike the other envelopes, `to` is mandatory and at least one blob
/// versioned hash must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip4844Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<B256>,
}

impl Eip4844Transaction {
    pub const TX_TYPE: u8 = 0x03;

    fn encode_body(&self, out: &mut Vec<u8>) {
        encode_u64(self.chain_id, out);
        encode_u64(self.nonce, out);
        encode_uint(self.max_priority_fee_per_gas, out);
        encode_uint(self.max_fee_per_gas, out);
        encode_u64(self.gas_limit, out);
        encode_bytes(self.to.as_bytes(), out);
        encode_uint(self.value, out);
        encode_bytes(&self.data, out);
        encode_access_list(&self.access_list, out);
        encode_uint(self.max_fee_per_blob_gas, out);
        encode_list(out, |payload| {
            for hash in &self.blob_versioned_hashes {
                encode_bytes(hash.as_slice(), payload);
            }
        });
    }

    /// Rejects an empty blob list and hashes without the KZG version byte.
    pub fn validate(&self) -> Result<(), TxError> {
        if self.blob_versioned_hashes.is_empty() {
            return Err(TxError::EmptyBlobList);
        }
        for hash in &self.blob_versioned_hashes {
            if !is_valid_versioned_hash(hash) {
                return Err(TxError::InvalidVersionedHash(*hash));
            }
        }
        Ok(())
    }

    /// `keccak256(0x03 ‖ rlp([chainId, nonce, maxPriorityFeePerGas,
    /// maxFeePerGas, gasLimit, to, value, data, accessList,
    /// maxFeePerBlobGas, blobVersionedHashes]))`.
    pub fn signing_hash(&self) -> B256 {
        let mut buf = vec![Self::TX_TYPE];
        encode_list(&mut buf, |payload| self.encode_body(payload));
        keccak256(&buf)
    }

    pub fn signed_bytes(&self, signature: &Signature) -> Vec<u8> {
        let mut buf = vec![Self::TX_TYPE];
        encode_list(&mut buf, |payload| {
            self.encode_body(payload);
            encode_u64(u64::from(signature.y_parity()), payload);
            encode_uint(signature.r_u256(), payload);
            encode_uint(signature.s_u256(), payload);
        });
        buf
    }
}

/// Any of the four transaction envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Legacy(LegacyTransaction),
    Eip2930(Eip2930Transaction),
    Eip1559(Eip1559Transaction),
    Eip4844(Eip4844Transaction),
}

impl Transaction {
    /// The envelope's type byte; `None` for legacy.
    pub fn tx_type(&self) -> Option<u8> {
        match self {
            Transaction::Legacy(_) => None,
            Transaction::Eip2930(_) => Some(Eip2930Transaction::TX_TYPE),
            Transaction::Eip1559(_) => Some(Eip1559Transaction::TX_TYPE),
            Transaction::Eip4844(_) => Some(Eip4844Transaction::TX_TYPE),
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Transaction::Legacy(tx) => tx.chain_id,
            Transaction::Eip2930(tx) => tx.chain_id,
            Transaction::Eip1559(tx) => tx.chain_id,
            Transaction::Eip4844(tx) => tx.chain_id,
        }
    }

    /// The 32-byte digest the signer commits to.
    pub fn signing_hash(&self) -> B256 {
        match self {
            Transaction::Legacy(tx) => tx.signing_hash(),
            Transaction::Eip2930(tx) => tx.signing_hash(),
            Transaction::Eip1559(tx) => tx.signing_hash(),
            Transaction::Eip4844(tx) => tx.signing_hash(),
        }
    }

    /// The signed wire encoding (`rlp(list)`, or `type ‖ rlp(list)`).
    pub fn signed_bytes(&self, signature: &Signature) -> Vec<u8> {
        match self {
            Transaction::Legacy(tx) => tx.signed_bytes(signature),
            Transaction::Eip2930(tx) => tx.signed_bytes(signature),
            Transaction::Eip1559(tx) => tx.signed_bytes(signature),
            Transaction::Eip4844(tx) => tx.signed_bytes(signature),
        }
    }

    /// The transaction hash under a given signature.
    pub fn hash(&self, signature: &Signature) -> B256 {
        keccak256(self.signed_bytes(signature))
    }

    /// Validates, computes the sighash, signs it, and assembles the final
    /// wire bytes and transaction hash.
    pub fn sign(self, key: &PrivateKey) -> Result<SignedTransaction, TxError> {
        if let Transaction::Eip4844(tx) = &self {
            tx.validate()?;
        }

        let signature = key.sign_hash(self.signing_hash())?;
        let raw = self.signed_bytes(&signature);
        let hash = keccak256(&raw);

        Ok(SignedTransaction { transaction: self, signature, raw, hash })
    }
}

/// A signed, immutable transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
    /// The wire bytes.
    pub raw: Vec<u8>,
    /// `keccak256(raw)`.
    pub hash: B256,
}

impl SignedTransaction {
    /// Recovers the sender address from the embedded signature.
    pub fn recover_signer(&self) -> Result<Address, TxError> {
        Ok(recover_address(self.transaction.signing_hash(), &self.signature)?)
    }
}

fn encode_optional_address(address: &Option<Address>, out: &mut Vec<u8>) {
    match address {
        Some(address) => encode_bytes(address.as_bytes(), out),
        // Contract creation: the empty byte string.
        None => encode_bytes(&[], out),
    }
}

fn encode_access_list(access_list: &[AccessListEntry], out: &mut Vec<u8>) {
    encode_list(out, |payload| {
        for entry in access_list {
            encode_list(payload, |item| {
                encode_bytes(entry.address.as_bytes(), item);
                encode_list(item, |keys| {
                    for key in &entry.storage_keys {
                        encode_bytes(key.as_slice(), keys);
                    }
                });
            });
        }
    });
}
