pub mod error;
pub mod quantity;
pub mod rpc;
pub mod types;

pub use error::ClientError;
pub use rpc::{BlockTransactions, EthClient, HttpTransport, Transport};
pub use types::{
    one_ether, Block, BlockTag, CallRequest, FilterParams, Log, SyncStatus, Transaction,
    TransactionReceipt,
};
