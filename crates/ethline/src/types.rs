//! Domain types for the Ethereum JSON-RPC surface.
//!
//! Inbound records (`Transaction`, `Log`, `TransactionReceipt`, `Block`,
//! `SyncStatus`) are immutable once decoded and owned solely by the caller.
//! Outbound shapes (`CallRequest`, `FilterParams`, `BlockTag`) control their
//! own wire encoding. Addresses, hashes and call data stay `0x`-prefixed
//! strings end to end; they are opaque byte-data, never numbers.

use primitive_types::U256;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::quantity::{encode_big_quantity, encode_quantity};

// ==============================================================================
// Inbound records
// ==============================================================================

/// A transaction as reported by the node.
///
/// `block_hash`, `block_number` and `transaction_index` are `None` while the
/// transaction is pending; they are never zero-filled. `to` is `None` for
/// contract creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub hash: String,
    pub nonce: u64,
    pub block_hash: Option<String>,
    pub block_number: Option<u64>,
    pub transaction_index: Option<u64>,
    pub from: String,
    pub to: Option<String>,
    pub value: U256,
    pub gas: u64,
    pub gas_price: U256,
    pub input: String,
}

/// An event log entry.
///
/// Topic order is the protocol's topic order and is semantically
/// significant; the list may be shorter than the protocol maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Log {
    pub removed: bool,
    pub log_index: u64,
    pub transaction_index: u64,
    pub transaction_hash: String,
    pub block_number: u64,
    pub block_hash: String,
    pub address: String,
    pub data: String,
    pub topics: Vec<String>,
}

/// The receipt of a mined transaction.
///
/// `contract_address` is `None` unless the transaction created a contract;
/// it is never the zero address. `root` and `status` carry through as
/// opaque byte-data because which one a node emits depends on its protocol
/// version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub transaction_index: u64,
    pub block_hash: String,
    pub block_number: u64,
    pub cumulative_gas_used: u64,
    pub gas_used: u64,
    pub contract_address: Option<String>,
    pub logs: Vec<Log>,
    pub logs_bloom: String,
    pub root: String,
    pub status: String,
}

/// A block.
///
/// `nonce` is the proof-of-work nonce and stays opaque byte-data despite
/// the name. Header fields that post-merge or pending blocks omit
/// (`difficulty`, `total_difficulty`, `nonce`, a pending block's `number`)
/// decode to their zero/empty defaults. The shape of `transactions` is
/// fixed by the request variant, see
/// [`BlockTransactions`](crate::rpc::BlockTransactions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    pub nonce: String,
    pub sha3_uncles: String,
    pub logs_bloom: String,
    pub transactions_root: String,
    pub state_root: String,
    pub miner: String,
    pub difficulty: U256,
    pub total_difficulty: U256,
    pub extra_data: String,
    pub size: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub uncles: Vec<String>,
    pub transactions: Vec<Transaction>,
}

/// Node synchronisation state.
///
/// The wire shape is a tagged union on JSON type: the node answers
/// `eth_syncing` with the boolean `false` when idle and with an object of
/// progress quantities while syncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    NotSyncing,
    Syncing {
        starting_block: u64,
        current_block: u64,
        highest_block: u64,
    },
}

impl SyncStatus {
    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing { .. })
    }

    /// Starting block of the sync run; zero when not syncing.
    pub fn starting_block(&self) -> u64 {
        match self {
            SyncStatus::NotSyncing => 0,
            SyncStatus::Syncing { starting_block, .. } => *starting_block,
        }
    }

    /// Block the node is currently at; zero when not syncing.
    pub fn current_block(&self) -> u64 {
        match self {
            SyncStatus::NotSyncing => 0,
            SyncStatus::Syncing { current_block, .. } => *current_block,
        }
    }

    /// Highest block known to the node; zero when not syncing.
    pub fn highest_block(&self) -> u64 {
        match self {
            SyncStatus::NotSyncing => 0,
            SyncStatus::Syncing { highest_block, .. } => *highest_block,
        }
    }
}

// ==============================================================================
// Outbound shapes
// ==============================================================================

/// Transaction-like input for `eth_sendTransaction`, `eth_call` and
/// `eth_estimateGas`.
///
/// The wire object carries a field only when it is set, except `from`,
/// which is always present (possibly as an empty string). Integers encode
/// as hex quantities; addresses and data pass through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRequest {
    pub from: String,
    pub to: Option<String>,
    pub gas: Option<u64>,
    pub gas_price: Option<U256>,
    pub value: Option<U256>,
    pub data: Option<String>,
    pub nonce: Option<u64>,
}

impl Serialize for CallRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("from", &self.from)?;
        if let Some(to) = &self.to {
            map.serialize_entry("to", to)?;
        }
        if let Some(gas) = self.gas {
            map.serialize_entry("gas", &encode_quantity(gas))?;
        }
        if let Some(gas_price) = self.gas_price {
            map.serialize_entry("gasPrice", &encode_big_quantity(gas_price))?;
        }
        if let Some(value) = self.value {
            map.serialize_entry("value", &encode_big_quantity(value))?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        if let Some(nonce) = self.nonce {
            map.serialize_entry("nonce", &encode_quantity(nonce))?;
        }
        map.end()
    }
}

/// Filter criteria for `eth_newFilter` and `eth_getLogs`.
///
/// A `None` position inside `topics` serializes as JSON `null`, the
/// protocol's wildcard for that topic slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    #[serde(rename = "fromBlock", skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockTag>,
    #[serde(rename = "toBlock", skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Option<Vec<String>>>>,
}

/// Block selector: a symbolic tag or an explicit number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Earliest,
    Pending,
    Number(u64),
}

impl BlockTag {
    /// Wire form: the tag name, or the number as a hex quantity.
    pub fn as_param(&self) -> String {
        match self {
            BlockTag::Latest => "latest".to_owned(),
            BlockTag::Earliest => "earliest".to_owned(),
            BlockTag::Pending => "pending".to_owned(),
            BlockTag::Number(n) => encode_quantity(*n),
        }
    }
}

impl From<u64> for BlockTag {
    fn from(number: u64) -> Self {
        BlockTag::Number(number)
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_param())
    }
}

/// One ether, in wei.
pub fn one_ether() -> U256 {
    U256::from(1_000_000_000_000_000_000u64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn call_request_omits_unset_fields() {
        let request = CallRequest {
            from: "0x3cc1a3c082944b9dba70e490e481dd56".to_owned(),
            to: Some("0x1bf21cb1dc384d019a885a06973f7308".to_owned()),
            gas: Some(24_900),
            gas_price: Some(U256::from(5_000_000_000u64)),
            value: Some(one_ether()),
            data: Some("some data".to_owned()),
            nonce: Some(98_384),
        };

        let encoded = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(
            encoded,
            json!({
                "from": "0x3cc1a3c082944b9dba70e490e481dd56",
                "to": "0x1bf21cb1dc384d019a885a06973f7308",
                "gas": "0x6144",
                "gasPrice": "0x12a05f200",
                "value": "0xde0b6b3a7640000",
                "data": "some data",
                "nonce": "0x18050"
            })
        );
    }

    #[test]
    fn empty_call_request_still_carries_from() {
        let encoded = serde_json::to_value(CallRequest::default()).expect("should serialize");
        assert_eq!(encoded, json!({ "from": "" }));
    }

    #[test]
    fn block_tag_wire_forms() {
        assert_eq!(BlockTag::Latest.as_param(), "latest");
        assert_eq!(BlockTag::Earliest.as_param(), "earliest");
        assert_eq!(BlockTag::Pending.as_param(), "pending");
        assert_eq!(BlockTag::Number(3_274_863).as_param(), "0x31f86f");
        assert_eq!(BlockTag::from(0).as_param(), "0x0");
    }

    #[test]
    fn filter_params_topic_wildcard_serializes_as_null() {
        let params = FilterParams {
            from_block: Some(BlockTag::Number(1)),
            to_block: Some(BlockTag::Number(16)),
            address: Some(vec!["0x8888f1f195afa192cfee860698584c030f4c9db1".to_owned()]),
            topics: Some(vec![Some(vec!["0x111".to_owned()]), None]),
        };

        let encoded = serde_json::to_value(&params).expect("should serialize");
        assert_eq!(
            encoded,
            json!({
                "fromBlock": "0x1",
                "toBlock": "0x10",
                "address": ["0x8888f1f195afa192cfee860698584c030f4c9db1"],
                "topics": [["0x111"], null]
            })
        );
    }

    #[test]
    fn sync_status_progress_reads_zero_when_idle() {
        let status = SyncStatus::NotSyncing;
        assert!(!status.is_syncing());
        assert_eq!(status.starting_block(), 0);
        assert_eq!(status.current_block(), 0);
        assert_eq!(status.highest_block(), 0);
    }
}
