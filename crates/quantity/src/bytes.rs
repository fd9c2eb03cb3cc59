//! Byte sequence normalization: variable-length payloads and fixed-length identifiers.

use crate::{scalar::strip_hex_prefix, QuantityError, QuantityResult};
use alloc::string::String;
use alloy_primitives::{hex, Address, Bloom, Bytes, FixedBytes, B256};

/// Decodes a variable-length byte sequence. `0x` decodes to an empty sequence; an odd number of
/// digits is malformed.
pub fn decode_bytes(input: &str) -> QuantityResult<Bytes> {
    hex::decode(strip_hex_prefix(input))
        .map(Bytes::from)
        .map_err(|_| QuantityError::MalformedHex(input.into()))
}

/// Decodes a byte sequence of exactly `N` bytes. Shorter or longer inputs are rejected, never
/// padded or truncated.
pub fn decode_fixed<const N: usize>(input: &str) -> QuantityResult<FixedBytes<N>> {
    let bytes = decode_bytes(input)?;
    if bytes.len() != N {
        return Err(QuantityError::InvalidLength { expected: N, got: bytes.len() });
    }
    Ok(FixedBytes::from_slice(&bytes))
}

/// Decodes a 32 byte hash.
pub fn decode_hash(input: &str) -> QuantityResult<B256> {
    decode_fixed::<32>(input)
}

/// Decodes a 20 byte address. Checksums are not verified.
pub fn decode_address(input: &str) -> QuantityResult<Address> {
    decode_fixed::<20>(input).map(|bytes| Address::new(bytes.0))
}

/// Decodes a 256 byte logs bloom.
pub fn decode_bloom(input: &str) -> QuantityResult<Bloom> {
    decode_fixed::<256>(input).map(|bytes| Bloom::new(bytes.0))
}

/// Encodes bytes as lowercase, `0x` prefixed hex.
pub fn encode_bytes(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}
