//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::BoxError;

use super::transport::Transport;

/// In-memory [`Transport`] that replays queued responses and records every
/// request body it was handed. Clones share the same queue, so a test can
/// keep one handle after moving another into the client.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<Value>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response whose `result` field is `result`.
    pub(crate) fn push_result(&self, result: Value) {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": result});
        self.push_body(body.to_string());
    }

    /// Queue a raw response body, valid JSON or not.
    pub(crate) fn push_body(&self, body: impl Into<String>) {
        self.inner
            .responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(Ok(body.into()));
    }

    /// Queue a transport-level failure.
    pub(crate) fn push_failure(&self, message: impl Into<String>) {
        self.inner
            .responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(Err(message.into()));
    }

    /// The `index`-th request envelope, parsed.
    pub(crate) fn request(&self, index: usize) -> Value {
        self.inner
            .requests
            .lock()
            .expect("mock lock poisoned")
            .get(index)
            .cloned()
            .unwrap_or_else(|| panic!("no request recorded at index {index}"))
    }

    pub(crate) fn method(&self, index: usize) -> String {
        self.request(index)["method"]
            .as_str()
            .expect("method is a string")
            .to_owned()
    }

    pub(crate) fn params(&self, index: usize) -> Value {
        self.request(index)["params"].clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, _url: &str, body: String) -> Result<String, BoxError> {
        let envelope: Value = serde_json::from_str(&body).expect("request body is valid JSON");
        self.inner
            .requests
            .lock()
            .expect("mock lock poisoned")
            .push(envelope);
        self.inner
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .expect("no queued response for request")
            .map_err(Into::into)
    }
}
