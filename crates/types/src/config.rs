//! Decoding policy.

use crate::ShapeError;
use alloy_primitives::U256;
use txwire_quantity::{
    decode_index, decode_safe_index, encode_quantity, Index, QuantityError, QuantityKind,
    QuantityResult, SafeIndex,
};

/// Policy knobs for decoding raw field sets.
///
/// Deserializes from camelCase keys; every key is optional:
///
/// ```json
/// { "feeOrdering": "ignore", "indexLimit": "safeInteger" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default, deny_unknown_fields))]
pub struct DecodeConfig {
    /// Whether the fee-market ordering invariant is checked.
    pub fee_ordering: FeeOrdering,
    /// The range accepted for index fields.
    pub index_limit: IndexLimit,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self { fee_ordering: FeeOrdering::Enforce, index_limit: IndexLimit::U64 }
    }

    /// Sets the [FeeOrdering] policy.
    pub const fn with_fee_ordering(mut self, fee_ordering: FeeOrdering) -> Self {
        self.fee_ordering = fee_ordering;
        self
    }

    /// Sets the [IndexLimit].
    pub const fn with_index_limit(mut self, index_limit: IndexLimit) -> Self {
        self.index_limit = index_limit;
        self
    }
}

/// Policy for the `maxPriorityFeePerGas <= maxFeePerGas` invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FeeOrdering {
    /// Reject fee-market values whose priority fee exceeds the fee cap.
    #[default]
    Enforce,
    /// Pass fee-market values through; the caller enforces the invariant.
    Ignore,
}

impl FeeOrdering {
    /// Checks a pair of fee-market values against this policy.
    pub fn check(
        &self,
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    ) -> Result<(), ShapeError> {
        match self {
            Self::Enforce if max_priority_fee_per_gas > max_fee_per_gas => {
                Err(ShapeError::FeeOrdering { max_fee_per_gas, max_priority_fee_per_gas })
            }
            _ => Ok(()),
        }
    }
}

/// Upper bound for index fields: block numbers, transaction and log indices, nonces and chain IDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum IndexLimit {
    /// `2^64 - 1`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "u64"))]
    U64,
    /// `2^53 - 1`, for consumers that hold indices in a double.
    SafeInteger,
}

impl IndexLimit {
    /// Decodes an index field under this limit.
    pub fn decode(&self, input: &str) -> QuantityResult<u64> {
        match self {
            Self::U64 => decode_index(input),
            Self::SafeInteger => decode_safe_index(input),
        }
    }

    /// Narrows an index computed from another field under this limit.
    pub fn narrow(&self, value: U256) -> QuantityResult<u64> {
        let (narrowed, kind) = match self {
            Self::U64 => (Index::from_u256(value), Index::NAME),
            Self::SafeInteger => (SafeIndex::from_u256(value), SafeIndex::NAME),
        };
        narrowed.ok_or_else(|| QuantityError::Overflow { kind, input: encode_quantity(value) })
    }
}
