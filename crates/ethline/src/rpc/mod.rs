//! JSON-RPC client plumbing: the HTTP transport seam, the request/response
//! envelope, wire decoding, and the [`EthClient`] façade.

mod client;
mod decode;
#[cfg(test)]
pub(crate) mod mock;
mod protocol;
mod transport;

pub use client::EthClient;
pub use decode::BlockTransactions;
pub use transport::{HttpTransport, Transport};
