/// Boxed error produced by a [`Transport`](crate::rpc::Transport)
/// implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything a call through the client can fail with.
///
/// The four kinds are disjoint so callers can branch on them: a transport
/// failure never carries node output, a protocol error always does, and the
/// two shape errors tell apart a broken envelope from a broken entity.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport collaborator failed before a response body was
    /// produced (connectivity, timeout if the transport enforces one).
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The response body did not parse as a JSON-RPC envelope, or parsed
    /// but carried neither a `result` nor an `error` field.
    #[error("malformed JSON-RPC response: {0}")]
    MalformedResponse(String),

    /// The node explicitly reported an error. Code and message are carried
    /// verbatim from the payload.
    #[error("node error {code}: {message}")]
    Protocol { code: i64, message: String },

    /// The envelope was valid but the `result` did not match the expected
    /// entity shape (missing required field, malformed quantity).
    #[error("decode error: {0}")]
    Decode(String),
}
