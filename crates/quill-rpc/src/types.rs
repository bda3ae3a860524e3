//! Passive JSON-RPC value types.
//!
//! These carry no invariants beyond field presence; they exist so a
//! Provider can marshal node responses into typed values. Quantities use
//! the minimal `0x` hex form, byte strings the even-length `0x` form.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use quill_primitives::{quantity, Address, U256};

/// The block selector accepted by state-reading RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
}

/// A log entry emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    #[serde(with = "quantity::hex_bytes")]
    pub data: Vec<u8>,
    #[serde(with = "quantity::u64_hex_opt", default)]
    pub block_number: Option<u64>,
    pub block_hash: Option<B256>,
    pub transaction_hash: Option<B256>,
    #[serde(with = "quantity::u64_hex_opt", default)]
    pub transaction_index: Option<u64>,
    #[serde(with = "quantity::u64_hex_opt", default)]
    pub log_index: Option<u64>,
    #[serde(default)]
    pub removed: bool,
}

/// A transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    #[serde(with = "quantity::u64_hex")]
    pub transaction_index: u64,
    pub block_hash: B256,
    #[serde(with = "quantity::u64_hex")]
    pub block_number: u64,
    pub from: Address,
    pub to: Option<Address>,
    #[serde(with = "quantity::u64_hex")]
    pub cumulative_gas_used: u64,
    #[serde(with = "quantity::u64_hex")]
    pub gas_used: u64,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
    /// `0x1` for success, `0x0` for revert.
    #[serde(with = "quantity::u64_hex")]
    pub status: u64,
    #[serde(with = "quantity::u256_hex")]
    pub effective_gas_price: U256,
    #[serde(with = "quantity::u64_hex", rename = "type", default)]
    pub transaction_type: u64,
}

/// Block metadata with transaction hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(with = "quantity::u64_hex_opt", default)]
    pub number: Option<u64>,
    /// `None` while pending.
    pub hash: Option<B256>,
    pub parent_hash: B256,
    #[serde(with = "quantity::u64_hex")]
    pub timestamp: u64,
    pub miner: Address,
    #[serde(with = "quantity::u64_hex")]
    pub gas_limit: u64,
    #[serde(with = "quantity::u64_hex")]
    pub gas_used: u64,
    #[serde(with = "quantity::u64_hex_opt", default)]
    pub base_fee_per_gas: Option<u64>,
    #[serde(default)]
    pub transactions: Vec<B256>,
}
