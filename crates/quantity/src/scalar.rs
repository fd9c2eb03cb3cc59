//! Hex scalar decoding and encoding, parameterized over a [QuantityKind].

use crate::{Index, Quantity, QuantityError, QuantityKind, QuantityResult, SafeIndex};
use alloc::{format, string::String};
use alloy_primitives::U256;
use tracing::trace;

/// Maximum number of significant hex digits in a [U256].
const MAX_DIGITS: usize = 64;

/// Strips an optional `0x` / `0X` prefix.
pub(crate) fn strip_hex_prefix(input: &str) -> &str {
    input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input)
}

/// Decodes a wire scalar into the application value of kind `K`.
///
/// The input is case-insensitive, the `0x` prefix is optional and leading zeros are accepted.
/// An empty digit string is malformed.
pub fn decode<K: QuantityKind>(input: &str) -> QuantityResult<K::Value> {
    let digits = strip_hex_prefix(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QuantityError::MalformedHex(input.into()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > MAX_DIGITS {
        trace!(target: "quantity", "Rejecting {input}: more than {MAX_DIGITS} significant digits");
        return Err(QuantityError::Overflow { kind: K::NAME, input: input.into() });
    }

    let value = if significant.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(significant, 16)
            .map_err(|_| QuantityError::Overflow { kind: K::NAME, input: input.into() })?
    };

    K::from_u256(value).ok_or_else(|| {
        trace!(target: "quantity", "Rejecting {input}: out of range for {}", K::NAME);
        QuantityError::Overflow { kind: K::NAME, input: input.into() }
    })
}

/// Encodes an application value of kind `K` into its canonical wire form: lowercase, `0x`
/// prefixed, no leading zeros (zero is `0x0`).
pub fn encode<K: QuantityKind>(value: &K::Value) -> String {
    format!("{:#x}", K::to_u256(value))
}

/// Returns the canonical wire form of a scalar.
pub fn canonicalize(input: &str) -> QuantityResult<String> {
    decode::<Quantity>(input).map(|value| encode::<Quantity>(&value))
}

/// Decodes a [Quantity].
pub fn decode_quantity(input: &str) -> QuantityResult<U256> {
    decode::<Quantity>(input)
}

/// Encodes a [Quantity].
pub fn encode_quantity(value: U256) -> String {
    encode::<Quantity>(&value)
}

/// Decodes an [Index].
pub fn decode_index(input: &str) -> QuantityResult<u64> {
    decode::<Index>(input)
}

/// Decodes a [SafeIndex].
pub fn decode_safe_index(input: &str) -> QuantityResult<u64> {
    decode::<SafeIndex>(input)
}

/// Encodes an [Index]. [SafeIndex] values share the same encoding.
pub fn encode_index(value: u64) -> String {
    encode::<Index>(&value)
}
