//! Quantity kinds: the application-side targets of scalar decoding.

use alloy_primitives::U256;

/// Largest integer exactly representable by an IEEE-754 double, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// A target kind for scalar normalization.
///
/// A kind names the application-format integer a wire scalar decodes into and the range it
/// accepts. Wire digits are always parsed into a [U256] first and then narrowed through
/// [QuantityKind::from_u256], so every kind shares the same hex handling and the same overflow
/// semantics.
pub trait QuantityKind {
    /// The application-format value.
    type Value;

    /// Human readable name of the kind, used in errors.
    const NAME: &'static str;

    /// Narrows a parsed value into this kind, returning `None` if it is out of range.
    fn from_u256(value: U256) -> Option<Self::Value>;

    /// Widens an application value back into a [U256].
    fn to_u256(value: &Self::Value) -> U256;
}

/// Arbitrary precision values: balances, prices and gas amounts. Bounded by 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity;

impl QuantityKind for Quantity {
    type Value = U256;

    const NAME: &'static str = "quantity";

    fn from_u256(value: U256) -> Option<Self::Value> {
        Some(value)
    }

    fn to_u256(value: &Self::Value) -> U256 {
        *value
    }
}

/// Bounded counters: block numbers, indices, nonces and chain IDs. Bounded by `2^64 - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index;

impl QuantityKind for Index {
    type Value = u64;

    const NAME: &'static str = "index";

    fn from_u256(value: U256) -> Option<Self::Value> {
        narrow(value, u64::MAX)
    }

    fn to_u256(value: &Self::Value) -> U256 {
        U256::from(*value)
    }
}

/// Bounded counters for consumers that hold indices in a double, bounded by
/// [MAX_SAFE_INTEGER].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIndex;

impl QuantityKind for SafeIndex {
    type Value = u64;

    const NAME: &'static str = "safe index";

    fn from_u256(value: U256) -> Option<Self::Value> {
        narrow(value, MAX_SAFE_INTEGER)
    }

    fn to_u256(value: &Self::Value) -> U256 {
        U256::from(*value)
    }
}

fn narrow(value: U256, max: u64) -> Option<u64> {
    (value <= U256::from(max)).then(|| value.to::<u64>())
}
