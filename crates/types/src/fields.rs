//! Raw wire field sets and typed access to their fields.

use crate::{DecodeResult, FieldContext, IndexLimit, ShapeError};
use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use serde_json::{Map, Value};
use txwire_quantity::{
    decode_address, decode_bloom, decode_bytes, decode_hash, decode_quantity, QuantityResult,
};

pub(crate) const TYPE: &str = "type";
pub(crate) const HASH: &str = "hash";
pub(crate) const FROM: &str = "from";
pub(crate) const TO: &str = "to";
pub(crate) const NONCE: &str = "nonce";
pub(crate) const GAS: &str = "gas";
pub(crate) const VALUE: &str = "value";
pub(crate) const INPUT: &str = "input";
pub(crate) const DATA: &str = "data";
pub(crate) const CHAIN_ID: &str = "chainId";
pub(crate) const V: &str = "v";
pub(crate) const R: &str = "r";
pub(crate) const S: &str = "s";
pub(crate) const BLOCK_HASH: &str = "blockHash";
pub(crate) const BLOCK_NUMBER: &str = "blockNumber";
pub(crate) const TRANSACTION_INDEX: &str = "transactionIndex";
pub(crate) const GAS_PRICE: &str = "gasPrice";
pub(crate) const MAX_FEE_PER_GAS: &str = "maxFeePerGas";
pub(crate) const MAX_PRIORITY_FEE_PER_GAS: &str = "maxPriorityFeePerGas";
pub(crate) const ACCESS_LIST: &str = "accessList";
pub(crate) const TRANSACTION_HASH: &str = "transactionHash";
pub(crate) const CONTRACT_ADDRESS: &str = "contractAddress";
pub(crate) const CUMULATIVE_GAS_USED: &str = "cumulativeGasUsed";
pub(crate) const GAS_USED: &str = "gasUsed";
pub(crate) const EFFECTIVE_GAS_PRICE: &str = "effectiveGasPrice";
pub(crate) const LOGS: &str = "logs";
pub(crate) const LOGS_BLOOM: &str = "logsBloom";
pub(crate) const STATUS: &str = "status";
pub(crate) const ADDRESS: &str = "address";
pub(crate) const TOPICS: &str = "topics";
pub(crate) const LOG_INDEX: &str = "logIndex";
pub(crate) const REMOVED: &str = "removed";

/// A bag of fields received over the wire, keyed by their JSON-RPC names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct RawFields(Map<String, Value>);

impl RawFields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the field named `name`.
    pub fn get(&self, name: &str) -> Field<'_> {
        Field::of(self.0.get(name))
    }

    /// Sets the field named `name`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Removes the field named `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Returns the underlying JSON object.
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the field set, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawFields> for Value {
    fn from(fields: RawFields) -> Self {
        Self::Object(fields.0)
    }
}

impl TryFrom<Value> for RawFields {
    type Error = Value;

    /// Accepts a JSON object, handing any other value back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// The state of a single wire field.
///
/// Absent and null are distinct on the wire. Non-nullable fields treat both as "not provided";
/// nullable fields give null its own meaning (pending, contract creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// The key is not in the field set.
    Absent,
    /// The key is present with a JSON `null`.
    Null,
    /// The key is present with a non-null value.
    Present(&'a Value),
}

impl<'a> Field<'a> {
    /// Classifies an optional JSON value.
    pub const fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Null,
            Some(value) => Self::Present(value),
        }
    }

    /// Returns `true` if the field carries a non-null value.
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns the non-null value, if any.
    pub const fn value(self) -> Option<&'a Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

/// Typed access to the fields of one JSON object, attaching field context to every error.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    context: FieldContext,
    index_limit: IndexLimit,
}

impl<'a> FieldReader<'a> {
    pub(crate) const fn new(
        map: &'a Map<String, Value>,
        context: FieldContext,
        index_limit: IndexLimit,
    ) -> Self {
        Self { map, context, index_limit }
    }

    pub(crate) const fn context(&self) -> FieldContext {
        self.context
    }

    pub(crate) fn field(&self, name: &str) -> Field<'a> {
        Field::of(self.map.get(name))
    }

    /// Returns the string value of `name`, or `None` if it is absent or null.
    pub(crate) fn string(&self, name: &'static str) -> DecodeResult<Option<&'a str>> {
        match self.field(name).value() {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self
                .context
                .malformed(ShapeError::UnexpectedValue { field: name, expected: "a hex string" })),
        }
    }

    /// Returns the array value of `name`, or `None` if it is absent or null.
    pub(crate) fn array(
        &self,
        name: &'static str,
        expected: &'static str,
    ) -> DecodeResult<Option<&'a Vec<Value>>> {
        match self.field(name).value() {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => {
                Err(self.context.malformed(ShapeError::UnexpectedValue { field: name, expected }))
            }
        }
    }

    fn decode<T>(
        &self,
        name: &'static str,
        decode: impl FnOnce(&str) -> QuantityResult<T>,
    ) -> DecodeResult<Option<T>> {
        self.string(name)?
            .map(|s| decode(s).map_err(|err| self.context.reject(name, err)))
            .transpose()
    }

    /// Unwraps an optional value, reporting `name` as missing.
    pub(crate) fn require<T>(&self, name: &'static str, value: Option<T>) -> DecodeResult<T> {
        value.ok_or_else(|| self.context.missing(name))
    }

    pub(crate) fn quantity(&self, name: &'static str) -> DecodeResult<Option<U256>> {
        self.decode(name, decode_quantity)
    }

    pub(crate) fn index(&self, name: &'static str) -> DecodeResult<Option<u64>> {
        let limit = self.index_limit;
        self.decode(name, |s| limit.decode(s))
    }

    pub(crate) fn address(&self, name: &'static str) -> DecodeResult<Option<Address>> {
        self.decode(name, decode_address)
    }

    pub(crate) fn hash(&self, name: &'static str) -> DecodeResult<Option<B256>> {
        self.decode(name, decode_hash)
    }

    pub(crate) fn bytes(&self, name: &'static str) -> DecodeResult<Option<Bytes>> {
        self.decode(name, decode_bytes)
    }

    pub(crate) fn bloom(&self, name: &'static str) -> DecodeResult<Option<Bloom>> {
        self.decode(name, decode_bloom)
    }

    pub(crate) fn required_quantity(&self, name: &'static str) -> DecodeResult<U256> {
        self.quantity(name).and_then(|value| self.require(name, value))
    }

    pub(crate) fn required_index(&self, name: &'static str) -> DecodeResult<u64> {
        self.index(name).and_then(|value| self.require(name, value))
    }

    pub(crate) fn required_address(&self, name: &'static str) -> DecodeResult<Address> {
        self.address(name).and_then(|value| self.require(name, value))
    }

    pub(crate) fn required_hash(&self, name: &'static str) -> DecodeResult<B256> {
        self.hash(name).and_then(|value| self.require(name, value))
    }

    pub(crate) fn required_bytes(&self, name: &'static str) -> DecodeResult<Bytes> {
        self.bytes(name).and_then(|value| self.require(name, value))
    }
}
