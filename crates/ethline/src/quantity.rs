//! Hex-quantity codec for the Ethereum JSON-RPC wire format.
//!
//! Quantities travel as `0x`-prefixed hex strings with no leading zeros
//! (`"0x0"` for zero). Decoding also accepts the prefix-less form, which
//! older node fields emit. Two widths share the grammar: machine-word
//! quantities (block numbers, counts, gas) and 256-bit quantities
//! (balances, values, difficulty).

use primitive_types::U256;

use crate::error::ClientError;

/// A string that does not satisfy the hex-quantity grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed quantity `{0}`")]
pub struct MalformedQuantity(pub String);

impl From<MalformedQuantity> for ClientError {
    fn from(err: MalformedQuantity) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Strip an optional `0x`/`0X` prefix and validate the remaining digits.
///
/// An empty string, or a bare prefix with nothing after it, is malformed
/// rather than zero: "absent" and "zero" must stay distinguishable.
fn hex_digits(text: &str) -> Result<&str, MalformedQuantity> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MalformedQuantity(text.to_owned()));
    }
    Ok(digits)
}

/// Decode a machine-width quantity.
///
/// A value wider than 64 bits is malformed at this width; balances and
/// difficulty go through [`decode_big_quantity`] instead.
pub fn decode_quantity(text: &str) -> Result<u64, MalformedQuantity> {
    let digits = hex_digits(text)?;
    u64::from_str_radix(digits, 16).map_err(|_| MalformedQuantity(text.to_owned()))
}

/// Decode a 256-bit quantity. Same grammar, wider range.
pub fn decode_big_quantity(text: &str) -> Result<U256, MalformedQuantity> {
    let digits = hex_digits(text)?;
    U256::from_str_radix(digits, 16).map_err(|_| MalformedQuantity(text.to_owned()))
}

/// Encode a machine-width quantity in canonical form: lowercase hex, no
/// leading zeros, `"0x0"` for zero.
pub fn encode_quantity(value: u64) -> String {
    format!("0x{value:x}")
}

/// Encode a 256-bit quantity in canonical form.
pub fn encode_big_quantity(value: U256) -> String {
    format!("0x{value:x}")
}
