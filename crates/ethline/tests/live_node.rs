use std::env;
use std::sync::Once;

use ethline::{BlockTag, BlockTransactions, EthClient, SyncStatus};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ethline=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a reachable Ethereum JSON-RPC node; set ETHLINE_TEST_RPC_URL"]
async fn live_node_answers_read_only_queries() {
    init_tracing();

    let rpc_url = env::var("ETHLINE_TEST_RPC_URL").expect("ETHLINE_TEST_RPC_URL must be set");
    let client = EthClient::new(&rpc_url);

    eprintln!("[itest] checking node identity against {rpc_url}");
    let version = client
        .client_version()
        .await
        .expect("web3_clientVersion must succeed");
    assert!(!version.is_empty(), "client version must not be empty");

    let net = client.net_version().await.expect("net_version must succeed");
    assert!(!net.is_empty(), "network id must not be empty");

    let head = client
        .block_number()
        .await
        .expect("eth_blockNumber must succeed");
    assert!(head > 0, "node must know a nonzero head block");
    eprintln!("[itest] head block is {head}");

    match client.syncing().await.expect("eth_syncing must succeed") {
        SyncStatus::NotSyncing => {}
        SyncStatus::Syncing { highest_block, .. } => {
            assert!(
                highest_block >= head,
                "highest known block must not trail the reported head"
            );
        }
    }

    eprintln!("[itest] fetching latest block with hashes, then full bodies");
    let by_tag = client
        .block_by_number(BlockTag::Latest, BlockTransactions::Hashes)
        .await
        .expect("eth_getBlockByNumber must succeed")
        .expect("latest block must exist");
    assert!(!by_tag.hash.is_empty(), "block hash must be present");

    let by_hash = client
        .block_by_hash(&by_tag.hash, BlockTransactions::Full)
        .await
        .expect("eth_getBlockByHash must succeed")
        .expect("block fetched by its own hash must exist");
    assert_eq!(
        by_hash.number, by_tag.number,
        "hash and number lookups must agree on the block"
    );
    for tx in &by_hash.transactions {
        assert_eq!(
            tx.block_number,
            Some(by_hash.number),
            "full transactions must carry their containing block number"
        );
        assert!(!tx.hash.is_empty(), "full transactions must carry a hash");
    }

    if let Some(tx) = by_hash.transactions.first() {
        eprintln!("[itest] validating transaction and receipt lookups");
        let fetched = client
            .transaction_by_hash(&tx.hash)
            .await
            .expect("eth_getTransactionByHash must succeed")
            .expect("transaction from a mined block must be known");
        assert_eq!(fetched.hash, tx.hash);

        let receipt = client
            .transaction_receipt(&tx.hash)
            .await
            .expect("eth_getTransactionReceipt must succeed")
            .expect("mined transaction must have a receipt");
        assert_eq!(receipt.transaction_hash, tx.hash);
    }

    let price = client.gas_price().await.expect("eth_gasPrice must succeed");
    eprintln!("[itest] gas price is {price} wei");

    let missing = client
        .transaction_receipt(
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        )
        .await
        .expect("receipt lookup for an unknown hash must not error");
    assert!(missing.is_none(), "unknown transaction must report not found");

    eprintln!("[itest] integration test completed");
}
