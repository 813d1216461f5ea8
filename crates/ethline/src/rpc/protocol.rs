//! JSON-RPC 2.0 envelope: request serialization and response
//! classification.

use crate::error::ClientError;

/// Outbound request object.
///
/// `params` serializes as a JSON array, or as the literal `null` for
/// methods that take no parameters (the protocol wants `null` there, not
/// `[]`).
#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Option<&'a [serde_json::Value]>,
}

/// Classify a raw response body into one of: raw `result` value, protocol
/// error, malformed response.
///
/// `result: null` is a meaningful outcome (entity not found) and flows
/// through as `Value::Null`; only a body carrying neither `result` nor
/// `error` is malformed. Some nodes emit an explicit `"error": null` next
/// to a successful result, which counts as no error.
pub(super) fn parse_response(body: &str) -> Result<serde_json::Value, ClientError> {
    let decoded: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        ClientError::MalformedResponse(format!("decode JSON-RPC response: {e}; body={body}"))
    })?;

    let serde_json::Value::Object(mut envelope) = decoded else {
        return Err(ClientError::MalformedResponse(format!(
            "JSON-RPC response is not an object: {body}"
        )));
    };

    if let Some(err) = envelope.remove("error") {
        if !err.is_null() {
            return Err(parse_protocol_error(err));
        }
    }

    envelope.remove("result").ok_or_else(|| {
        ClientError::MalformedResponse(format!(
            "JSON-RPC response carries neither result nor error: {body}"
        ))
    })
}

/// Parse a JSON-RPC error value into a structured `ClientError`.
///
/// The spec shape is `{"code": <int>, "message": <string>}`; anything else
/// is a malformed response, not a protocol error, so callers branching on
/// error codes never see an invented code.
fn parse_protocol_error(err: serde_json::Value) -> ClientError {
    #[derive(serde::Deserialize)]
    struct WireError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<WireError>(err.clone()) {
        Ok(parsed) => ClientError::Protocol {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => {
            ClientError::MalformedResponse(format!("non-standard JSON-RPC error: {err}"))
        }
    }
}
