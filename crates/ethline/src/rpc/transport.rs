use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::debug;

use crate::error::BoxError;

/// Minimal contract for delivering a JSON-RPC request body to a node.
///
/// Implementations own everything below the envelope: connections,
/// timeouts, authentication, TLS. A failure here surfaces to callers as
/// [`ClientError::Transport`](crate::error::ClientError::Transport) and no
/// response parsing happens. Implementations must be safe for concurrent
/// use; the client issues independent calls without ordering them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the raw response body.
    async fn post(&self, url: &str, body: String) -> Result<String, BoxError>;
}

/// HTTP(S) transport over a pooled `reqwest` client.
///
/// Returns the response body for any HTTP status: nodes routinely ship a
/// valid JSON-RPC error envelope alongside a non-2xx status, so status
/// policy stays out of the envelope layer. The status is logged per
/// request.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client builder uses valid static config");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, BoxError> {
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();

        let body = response.text().await?;
        debug!(%status, body_len = body.len(), "http response");
        Ok(body)
    }
}
