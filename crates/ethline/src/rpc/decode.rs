//! Field-by-field decoders from raw `result` JSON into domain records.
//!
//! Every numeric hex field goes through the quantity codec. There is no
//! blanket `Deserialize` pass: each entity maps its fields explicitly, so
//! a shape mismatch names the field that broke and optional fields decode
//! to "no value" instead of zero.

use primitive_types::U256;
use serde_json::Value;

use crate::error::ClientError;
use crate::quantity::{decode_big_quantity, decode_quantity};
use crate::types::{Block, Log, SyncStatus, Transaction, TransactionReceipt};

/// Shape of a block's `transactions` list.
///
/// Fixed by the request variant the caller issued (the boolean flag on
/// `eth_getBlockByHash`/`eth_getBlockByNumber`); the decoder never sniffs
/// element types, which would be fragile if a hash string could be
/// mistaken for an object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTransactions {
    /// The list carries bare transaction hashes.
    Hashes,
    /// The list carries full transaction objects.
    Full,
}

// ==============================================================================
// Field helpers
// ==============================================================================

fn missing(field: &str) -> ClientError {
    ClientError::Decode(format!("missing {field}"))
}

fn str_required(value: Option<&Value>, field: &str) -> Result<String, ClientError> {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| missing(field))
}

/// Absent or JSON `null` becomes `None`; byte-data strings pass through
/// verbatim.
fn str_optional(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

fn str_or_default(value: Option<&Value>) -> String {
    str_optional(value).unwrap_or_default()
}

fn bool_or_default(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or_default()
}

/// A quantity-valued field: a hex string, or the bare JSON number some
/// filter endpoints emit (read as decimal).
fn quantity_value(value: &Value, field: &str) -> Result<u64, ClientError> {
    match value {
        Value::String(text) => decode_quantity(text)
            .map_err(|e| ClientError::Decode(format!("invalid {field}: {e}"))),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| ClientError::Decode(format!("invalid {field}: {n}"))),
        other => Err(ClientError::Decode(format!(
            "invalid {field}: expected quantity, got {other}"
        ))),
    }
}

fn quantity_required(value: Option<&Value>, field: &str) -> Result<u64, ClientError> {
    match value {
        None | Some(Value::Null) => Err(missing(field)),
        Some(v) => quantity_value(v, field),
    }
}

/// Absent or null decodes to `None`, never to zero; a present but
/// malformed value is still an error.
fn quantity_optional(value: Option<&Value>, field: &str) -> Result<Option<u64>, ClientError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => quantity_value(v, field).map(Some),
    }
}

fn quantity_or_default(value: Option<&Value>, field: &str) -> Result<u64, ClientError> {
    Ok(quantity_optional(value, field)?.unwrap_or_default())
}

fn big_value(value: &Value, field: &str) -> Result<U256, ClientError> {
    match value {
        Value::String(text) => decode_big_quantity(text)
            .map_err(|e| ClientError::Decode(format!("invalid {field}: {e}"))),
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| ClientError::Decode(format!("invalid {field}: {n}"))),
        other => Err(ClientError::Decode(format!(
            "invalid {field}: expected quantity, got {other}"
        ))),
    }
}

fn big_required(value: Option<&Value>, field: &str) -> Result<U256, ClientError> {
    match value {
        None | Some(Value::Null) => Err(missing(field)),
        Some(v) => big_value(v, field),
    }
}

fn big_or_default(value: Option<&Value>, field: &str) -> Result<U256, ClientError> {
    match value {
        None | Some(Value::Null) => Ok(U256::zero()),
        Some(v) => big_value(v, field),
    }
}

/// A list of byte-data strings (topics, uncle hashes). Absent decodes to
/// an empty list; a present non-array or non-string element is an error.
fn str_list(value: Option<&Value>, field: &str) -> Result<Vec<String>, ClientError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    if value.is_null() {
        return Ok(Vec::new());
    }
    let items = value
        .as_array()
        .ok_or_else(|| ClientError::Decode(format!("{field} is not an array")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| ClientError::Decode(format!("{field} element is not a string")))
        })
        .collect()
}

fn object<'a>(raw: &'a Value, what: &str) -> Result<&'a serde_json::Map<String, Value>, ClientError> {
    raw.as_object()
        .ok_or_else(|| ClientError::Decode(format!("{what} is not an object: {raw}")))
}

// ==============================================================================
// Scalar results
// ==============================================================================

pub(super) fn result_str(raw: &Value, what: &str) -> Result<String, ClientError> {
    raw.as_str()
        .map(str::to_owned)
        .ok_or_else(|| ClientError::Decode(format!("{what} is not a string: {raw}")))
}

pub(super) fn result_bool(raw: &Value, what: &str) -> Result<bool, ClientError> {
    raw.as_bool()
        .ok_or_else(|| ClientError::Decode(format!("{what} is not a boolean: {raw}")))
}

pub(super) fn result_str_list(raw: &Value, what: &str) -> Result<Vec<String>, ClientError> {
    str_list(Some(raw), what)
}

pub(super) fn result_quantity(raw: &Value, what: &str) -> Result<u64, ClientError> {
    quantity_required(Some(raw), what)
}

pub(super) fn result_big_quantity(raw: &Value, what: &str) -> Result<U256, ClientError> {
    big_required(Some(raw), what)
}

// ==============================================================================
// Entities
// ==============================================================================

pub(super) fn decode_transaction(raw: &Value) -> Result<Transaction, ClientError> {
    let raw = object(raw, "transaction")?;
    Ok(Transaction {
        hash: str_required(raw.get("hash"), "hash")?,
        nonce: quantity_required(raw.get("nonce"), "nonce")?,
        block_hash: str_optional(raw.get("blockHash")),
        block_number: quantity_optional(raw.get("blockNumber"), "blockNumber")?,
        transaction_index: quantity_optional(raw.get("transactionIndex"), "transactionIndex")?,
        from: str_required(raw.get("from"), "from")?,
        to: str_optional(raw.get("to")),
        value: big_required(raw.get("value"), "value")?,
        gas: quantity_required(raw.get("gas"), "gas")?,
        gas_price: big_required(raw.get("gasPrice"), "gasPrice")?,
        input: str_or_default(raw.get("input")),
    })
}

/// Logs are lenient across the board: filter endpoints omit placement
/// fields for pending logs, so absence means zero/empty, never an error.
pub(super) fn decode_log(raw: &Value) -> Result<Log, ClientError> {
    let raw = object(raw, "log")?;
    Ok(Log {
        removed: bool_or_default(raw.get("removed")),
        log_index: quantity_or_default(raw.get("logIndex"), "logIndex")?,
        transaction_index: quantity_or_default(raw.get("transactionIndex"), "transactionIndex")?,
        transaction_hash: str_or_default(raw.get("transactionHash")),
        block_number: quantity_or_default(raw.get("blockNumber"), "blockNumber")?,
        block_hash: str_or_default(raw.get("blockHash")),
        address: str_or_default(raw.get("address")),
        data: str_or_default(raw.get("data")),
        topics: str_list(raw.get("topics"), "topics")?,
    })
}

pub(super) fn decode_logs(raw: &Value) -> Result<Vec<Log>, ClientError> {
    let items = raw
        .as_array()
        .ok_or_else(|| ClientError::Decode(format!("log list is not an array: {raw}")))?;
    items.iter().map(decode_log).collect()
}

pub(super) fn decode_transaction_receipt(raw: &Value) -> Result<TransactionReceipt, ClientError> {
    let raw = object(raw, "transaction receipt")?;
    let logs = match raw.get("logs") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => decode_logs(value)?,
    };
    Ok(TransactionReceipt {
        transaction_hash: str_required(raw.get("transactionHash"), "transactionHash")?,
        transaction_index: quantity_required(raw.get("transactionIndex"), "transactionIndex")?,
        block_hash: str_required(raw.get("blockHash"), "blockHash")?,
        block_number: quantity_required(raw.get("blockNumber"), "blockNumber")?,
        cumulative_gas_used: quantity_required(
            raw.get("cumulativeGasUsed"),
            "cumulativeGasUsed",
        )?,
        gas_used: quantity_required(raw.get("gasUsed"), "gasUsed")?,
        // `null` means "did not create a contract"; this must stay distinct
        // from the zero address.
        contract_address: str_optional(raw.get("contractAddress")),
        logs,
        logs_bloom: str_or_default(raw.get("logsBloom")),
        root: str_or_default(raw.get("root")),
        status: str_or_default(raw.get("status")),
    })
}

/// Decode a non-null block result. The `mode` is the caller's request-time
/// choice; a `null` result is mapped to "not found" by the façade before
/// this runs.
pub(super) fn decode_block(raw: &Value, mode: BlockTransactions) -> Result<Block, ClientError> {
    let raw = object(raw, "block")?;

    // Pending blocks carry null `number`/`hash`; keep them around as
    // options so full-mode back-fill does not invent a zero placement.
    let number = quantity_optional(raw.get("number"), "number")?;
    let hash = str_optional(raw.get("hash"));

    let raw_txs: &[Value] = match raw.get("transactions") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(other) => {
            return Err(ClientError::Decode(format!(
                "transactions is not an array: {other}"
            )))
        }
    };

    let transactions = match mode {
        BlockTransactions::Hashes => raw_txs
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|tx_hash| Transaction {
                        hash: tx_hash.to_owned(),
                        ..Transaction::default()
                    })
                    .ok_or_else(|| {
                        ClientError::Decode(format!(
                            "transactions element is not a hash string: {item}"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        BlockTransactions::Full => {
            let mut transactions = raw_txs
                .iter()
                .map(decode_transaction)
                .collect::<Result<Vec<_>, _>>()?;
            // Some nodes omit the placement fields inside embedded
            // transaction objects since they repeat the parent block's.
            for tx in &mut transactions {
                if tx.block_hash.is_none() {
                    tx.block_hash = hash.clone();
                }
                if tx.block_number.is_none() {
                    tx.block_number = number;
                }
            }
            transactions
        }
    };

    Ok(Block {
        number: number.unwrap_or_default(),
        hash: hash.unwrap_or_default(),
        parent_hash: str_or_default(raw.get("parentHash")),
        // Proof-of-work nonce: opaque byte-data despite the name.
        nonce: str_or_default(raw.get("nonce")),
        sha3_uncles: str_or_default(raw.get("sha3Uncles")),
        logs_bloom: str_or_default(raw.get("logsBloom")),
        transactions_root: str_or_default(raw.get("transactionsRoot")),
        state_root: str_or_default(raw.get("stateRoot")),
        miner: str_or_default(raw.get("miner")),
        difficulty: big_or_default(raw.get("difficulty"), "difficulty")?,
        total_difficulty: big_or_default(raw.get("totalDifficulty"), "totalDifficulty")?,
        extra_data: str_or_default(raw.get("extraData")),
        size: quantity_or_default(raw.get("size"), "size")?,
        gas_limit: quantity_or_default(raw.get("gasLimit"), "gasLimit")?,
        gas_used: quantity_or_default(raw.get("gasUsed"), "gasUsed")?,
        timestamp: quantity_or_default(raw.get("timestamp"), "timestamp")?,
        uncles: str_list(raw.get("uncles"), "uncles")?,
        transactions,
    })
}

/// `eth_syncing` answers with the boolean `false` when idle and an object
/// while syncing; the branch is on JSON type, not field presence.
pub(super) fn decode_sync_status(raw: &Value) -> Result<SyncStatus, ClientError> {
    match raw {
        Value::Bool(false) => Ok(SyncStatus::NotSyncing),
        Value::Object(fields) => Ok(SyncStatus::Syncing {
            starting_block: quantity_or_default(fields.get("startingBlock"), "startingBlock")?,
            current_block: quantity_or_default(fields.get("currentBlock"), "currentBlock")?,
            highest_block: quantity_or_default(fields.get("highestBlock"), "highestBlock")?,
        }),
        other => Err(ClientError::Decode(format!(
            "unexpected eth_syncing result: {other}"
        ))),
    }
}
