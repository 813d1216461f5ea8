use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use primitive_types::U256;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::ClientError;
use crate::types::{
    Block, BlockTag, CallRequest, FilterParams, Log, SyncStatus, Transaction, TransactionReceipt,
};

use super::decode::{
    decode_block, decode_logs, decode_sync_status, decode_transaction,
    decode_transaction_receipt, result_big_quantity, result_bool, result_quantity, result_str,
    result_str_list, BlockTransactions,
};
use super::protocol::{parse_response, JsonRpcRequest};
use super::transport::{HttpTransport, Transport};

/// Ethereum JSON-RPC client.
///
/// Holds only immutable configuration (endpoint, transport, id counter),
/// so one client can serve concurrent independent calls as long as the
/// transport is itself concurrency-safe. Every method is one request, one
/// response: no retries, no caching, no batching.
///
/// The per-method surface is thin sugar over [`EthClient::call`], which is
/// the only contract it depends on: a method name plus pre-encoded
/// parameters in, a raw decoded-or-classified outcome out.
pub struct EthClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
    next_id: AtomicU64,
}

impl EthClient<HttpTransport> {
    /// Create a client for an HTTP(S) endpoint with the bundled transport.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_transport(endpoint, HttpTransport::new())
    }
}

impl<T: Transport> EthClient<T> {
    /// Create a client over a caller-supplied transport.
    pub fn with_transport(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(initial_request_id()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Issue one RPC call and return the raw `result` JSON.
    ///
    /// `params` of `None` goes on the wire as the literal `null`, which is
    /// what zero-argument methods expect. The result may itself be
    /// `Value::Null`; entity-returning wrappers map that to "not found".
    pub async fn call(
        &self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<Value, ClientError> {
        let id = self.next_request_id();
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.as_ref().map_or(0, Vec::len),
            "rpc call"
        );
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: params.as_deref(),
        };
        let body = serde_json::to_string(&request)
            .expect("JSON-RPC request serialization uses only JSON-safe types");

        let body = self
            .transport
            .post(&self.endpoint, body)
            .await
            .map_err(ClientError::Transport)?;
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        parse_response(&body)
    }

    /// Like [`EthClient::call`], for methods whose result may be `null`
    /// because the entity legitimately does not exist.
    async fn call_nullable(
        &self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<Option<Value>, ClientError> {
        match self.call(method, params).await? {
            Value::Null => Ok(None),
            raw => Ok(Some(raw)),
        }
    }

    // ── web3 / net ───────────────────────────────────────────────

    /// `web3_clientVersion`.
    pub async fn client_version(&self) -> Result<String, ClientError> {
        let raw = self.call("web3_clientVersion", None).await?;
        result_str(&raw, "client version")
    }

    /// `web3_sha3`: Keccak-256 of `data`, computed by the node.
    pub async fn sha3(&self, data: &[u8]) -> Result<String, ClientError> {
        let param = format!("0x{}", hex::encode(data));
        let raw = self.call("web3_sha3", Some(vec![json!(param)])).await?;
        result_str(&raw, "sha3 digest")
    }

    /// `net_version`.
    pub async fn net_version(&self) -> Result<String, ClientError> {
        let raw = self.call("net_version", None).await?;
        result_str(&raw, "network version")
    }

    /// `net_listening`.
    pub async fn net_listening(&self) -> Result<bool, ClientError> {
        let raw = self.call("net_listening", None).await?;
        result_bool(&raw, "listening flag")
    }

    /// `net_peerCount`.
    pub async fn net_peer_count(&self) -> Result<u64, ClientError> {
        let raw = self.call("net_peerCount", None).await?;
        result_quantity(&raw, "peer count")
    }

    // ── node state ───────────────────────────────────────────────

    /// `eth_protocolVersion`.
    pub async fn protocol_version(&self) -> Result<String, ClientError> {
        let raw = self.call("eth_protocolVersion", None).await?;
        result_str(&raw, "protocol version")
    }

    /// `eth_syncing`.
    pub async fn syncing(&self) -> Result<SyncStatus, ClientError> {
        let raw = self.call("eth_syncing", None).await?;
        decode_sync_status(&raw)
    }

    /// `eth_coinbase`.
    pub async fn coinbase(&self) -> Result<String, ClientError> {
        let raw = self.call("eth_coinbase", None).await?;
        result_str(&raw, "coinbase address")
    }

    /// `eth_mining`.
    pub async fn mining(&self) -> Result<bool, ClientError> {
        let raw = self.call("eth_mining", None).await?;
        result_bool(&raw, "mining flag")
    }

    /// `eth_hashrate`.
    pub async fn hashrate(&self) -> Result<u64, ClientError> {
        let raw = self.call("eth_hashrate", None).await?;
        result_quantity(&raw, "hashrate")
    }

    /// `eth_gasPrice`, in wei.
    pub async fn gas_price(&self) -> Result<U256, ClientError> {
        let raw = self.call("eth_gasPrice", None).await?;
        result_big_quantity(&raw, "gas price")
    }

    /// `eth_accounts`.
    pub async fn accounts(&self) -> Result<Vec<String>, ClientError> {
        let raw = self.call("eth_accounts", None).await?;
        result_str_list(&raw, "accounts")
    }

    /// `eth_blockNumber`.
    pub async fn block_number(&self) -> Result<u64, ClientError> {
        let raw = self.call("eth_blockNumber", None).await?;
        result_quantity(&raw, "block number")
    }

    /// `eth_getCompilers`.
    pub async fn compilers(&self) -> Result<Vec<String>, ClientError> {
        let raw = self.call("eth_getCompilers", None).await?;
        result_str_list(&raw, "compilers")
    }

    // ── account state ────────────────────────────────────────────

    /// `eth_getBalance`, in wei.
    pub async fn balance(&self, address: &str, block: BlockTag) -> Result<U256, ClientError> {
        let raw = self
            .call("eth_getBalance", Some(vec![json!(address), json!(block)]))
            .await?;
        result_big_quantity(&raw, "balance")
    }

    /// `eth_getStorageAt`. The value comes back as opaque byte-data.
    pub async fn storage_at(
        &self,
        address: &str,
        position: u64,
        block: BlockTag,
    ) -> Result<String, ClientError> {
        let raw = self
            .call(
                "eth_getStorageAt",
                Some(vec![
                    json!(address),
                    json!(crate::quantity::encode_quantity(position)),
                    json!(block),
                ]),
            )
            .await?;
        result_str(&raw, "storage value")
    }

    /// `eth_getTransactionCount` (the account nonce).
    pub async fn transaction_count(
        &self,
        address: &str,
        block: BlockTag,
    ) -> Result<u64, ClientError> {
        let raw = self
            .call(
                "eth_getTransactionCount",
                Some(vec![json!(address), json!(block)]),
            )
            .await?;
        result_quantity(&raw, "transaction count")
    }

    /// `eth_getCode`.
    pub async fn code(&self, address: &str, block: BlockTag) -> Result<String, ClientError> {
        let raw = self
            .call("eth_getCode", Some(vec![json!(address), json!(block)]))
            .await?;
        result_str(&raw, "code")
    }

    // ── block & uncle counts ─────────────────────────────────────

    /// `eth_getBlockTransactionCountByHash`.
    pub async fn block_transaction_count_by_hash(&self, hash: &str) -> Result<u64, ClientError> {
        let raw = self
            .call("eth_getBlockTransactionCountByHash", Some(vec![json!(hash)]))
            .await?;
        result_quantity(&raw, "transaction count")
    }

    /// `eth_getBlockTransactionCountByNumber`.
    pub async fn block_transaction_count_by_number(
        &self,
        block: BlockTag,
    ) -> Result<u64, ClientError> {
        let raw = self
            .call("eth_getBlockTransactionCountByNumber", Some(vec![json!(block)]))
            .await?;
        result_quantity(&raw, "transaction count")
    }

    /// `eth_getUncleCountByBlockHash`.
    pub async fn uncle_count_by_block_hash(&self, hash: &str) -> Result<u64, ClientError> {
        let raw = self
            .call("eth_getUncleCountByBlockHash", Some(vec![json!(hash)]))
            .await?;
        result_quantity(&raw, "uncle count")
    }

    /// `eth_getUncleCountByBlockNumber`.
    pub async fn uncle_count_by_block_number(&self, block: BlockTag) -> Result<u64, ClientError> {
        let raw = self
            .call("eth_getUncleCountByBlockNumber", Some(vec![json!(block)]))
            .await?;
        result_quantity(&raw, "uncle count")
    }

    // ── transactions ─────────────────────────────────────────────

    /// `eth_sign`.
    pub async fn sign(&self, address: &str, data: &str) -> Result<String, ClientError> {
        let raw = self
            .call("eth_sign", Some(vec![json!(address), json!(data)]))
            .await?;
        result_str(&raw, "signature")
    }

    /// `eth_sendTransaction`; returns the transaction hash.
    pub async fn send_transaction(&self, request: CallRequest) -> Result<String, ClientError> {
        let raw = self
            .call("eth_sendTransaction", Some(vec![json!(request)]))
            .await?;
        result_str(&raw, "transaction hash")
    }

    /// `eth_sendRawTransaction`; returns the transaction hash.
    pub async fn send_raw_transaction(&self, data: &str) -> Result<String, ClientError> {
        let raw = self
            .call("eth_sendRawTransaction", Some(vec![json!(data)]))
            .await?;
        result_str(&raw, "transaction hash")
    }

    /// `eth_call`: execute a read-only call against `block`'s state.
    pub async fn call_contract(
        &self,
        request: CallRequest,
        block: BlockTag,
    ) -> Result<String, ClientError> {
        let raw = self
            .call("eth_call", Some(vec![json!(request), json!(block)]))
            .await?;
        result_str(&raw, "call result")
    }

    /// `eth_estimateGas`.
    pub async fn estimate_gas(&self, request: CallRequest) -> Result<u64, ClientError> {
        let raw = self
            .call("eth_estimateGas", Some(vec![json!(request)]))
            .await?;
        result_quantity(&raw, "gas estimate")
    }

    /// `eth_getTransactionByHash`. `Ok(None)` when the node does not know
    /// the transaction.
    pub async fn transaction_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<Transaction>, ClientError> {
        match self
            .call_nullable("eth_getTransactionByHash", Some(vec![json!(hash)]))
            .await?
        {
            Some(raw) => decode_transaction(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// `eth_getTransactionByBlockHashAndIndex`.
    pub async fn transaction_by_block_hash_and_index(
        &self,
        block_hash: &str,
        index: u64,
    ) -> Result<Option<Transaction>, ClientError> {
        match self
            .call_nullable(
                "eth_getTransactionByBlockHashAndIndex",
                Some(vec![
                    json!(block_hash),
                    json!(crate::quantity::encode_quantity(index)),
                ]),
            )
            .await?
        {
            Some(raw) => decode_transaction(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// `eth_getTransactionByBlockNumberAndIndex`.
    pub async fn transaction_by_block_number_and_index(
        &self,
        block: BlockTag,
        index: u64,
    ) -> Result<Option<Transaction>, ClientError> {
        match self
            .call_nullable(
                "eth_getTransactionByBlockNumberAndIndex",
                Some(vec![
                    json!(block),
                    json!(crate::quantity::encode_quantity(index)),
                ]),
            )
            .await?
        {
            Some(raw) => decode_transaction(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// `eth_getTransactionReceipt`. `Ok(None)` while the transaction is
    /// not yet mined.
    pub async fn transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionReceipt>, ClientError> {
        match self
            .call_nullable("eth_getTransactionReceipt", Some(vec![json!(hash)]))
            .await?
        {
            Some(raw) => decode_transaction_receipt(&raw).map(Some),
            None => Ok(None),
        }
    }

    // ── blocks ───────────────────────────────────────────────────

    /// `eth_getBlockByHash`. The `txs` mode picks the wire shape of the
    /// transaction list and the decode path; `Ok(None)` when the block is
    /// unknown.
    pub async fn block_by_hash(
        &self,
        hash: &str,
        txs: BlockTransactions,
    ) -> Result<Option<Block>, ClientError> {
        let full = matches!(txs, BlockTransactions::Full);
        match self
            .call_nullable("eth_getBlockByHash", Some(vec![json!(hash), json!(full)]))
            .await?
        {
            Some(raw) => decode_block(&raw, txs).map(Some),
            None => Ok(None),
        }
    }

    /// `eth_getBlockByNumber`; see [`EthClient::block_by_hash`].
    pub async fn block_by_number(
        &self,
        block: BlockTag,
        txs: BlockTransactions,
    ) -> Result<Option<Block>, ClientError> {
        let full = matches!(txs, BlockTransactions::Full);
        match self
            .call_nullable("eth_getBlockByNumber", Some(vec![json!(block), json!(full)]))
            .await?
        {
            Some(raw) => decode_block(&raw, txs).map(Some),
            None => Ok(None),
        }
    }

    // ── filters ──────────────────────────────────────────────────

    /// `eth_newFilter`; returns the filter id.
    pub async fn new_filter(&self, params: FilterParams) -> Result<String, ClientError> {
        let raw = self.call("eth_newFilter", Some(vec![json!(params)])).await?;
        result_str(&raw, "filter id")
    }

    /// `eth_newBlockFilter`.
    pub async fn new_block_filter(&self) -> Result<String, ClientError> {
        let raw = self.call("eth_newBlockFilter", None).await?;
        result_str(&raw, "filter id")
    }

    /// `eth_newPendingTransactionFilter`.
    pub async fn new_pending_transaction_filter(&self) -> Result<String, ClientError> {
        let raw = self.call("eth_newPendingTransactionFilter", None).await?;
        result_str(&raw, "filter id")
    }

    /// `eth_getFilterChanges`.
    pub async fn filter_changes(&self, filter_id: &str) -> Result<Vec<Log>, ClientError> {
        let raw = self
            .call("eth_getFilterChanges", Some(vec![json!(filter_id)]))
            .await?;
        decode_logs(&raw)
    }

    /// `eth_getFilterLogs`.
    pub async fn filter_logs(&self, filter_id: &str) -> Result<Vec<Log>, ClientError> {
        let raw = self
            .call("eth_getFilterLogs", Some(vec![json!(filter_id)]))
            .await?;
        decode_logs(&raw)
    }

    /// `eth_getLogs`.
    pub async fn logs(&self, params: FilterParams) -> Result<Vec<Log>, ClientError> {
        let raw = self.call("eth_getLogs", Some(vec![json!(params)])).await?;
        decode_logs(&raw)
    }

    /// `eth_uninstallFilter`.
    pub async fn uninstall_filter(&self, filter_id: &str) -> Result<bool, ClientError> {
        let raw = self
            .call("eth_uninstallFilter", Some(vec![json!(filter_id)]))
            .await?;
        result_bool(&raw, "uninstall flag")
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
