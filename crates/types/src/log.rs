//! Receipt logs.

use crate::{fields::*, DecodeResult, FieldContext, IndexLimit, ShapeError};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, B256};
use serde_json::{json, Value};
use txwire_quantity::{decode_hash, encode_bytes, encode_index};

/// The most topics a single `LOG` opcode can emit.
const MAX_TOPICS: usize = 4;

/// A log entry emitted during execution, embedded by value in its receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Log {
    /// The emitting contract.
    pub address: Address,
    /// Indexed topics, at most four.
    pub topics: Vec<B256>,
    /// Non-indexed data.
    pub data: Bytes,
    /// Hash of the including block.
    pub block_hash: B256,
    /// Number of the including block.
    pub block_number: u64,
    /// Hash of the emitting transaction.
    pub transaction_hash: B256,
    /// Position of the emitting transaction within the block.
    pub transaction_index: u64,
    /// Position of the log within the block.
    pub log_index: u64,
    /// `true` if the log was removed by a chain reorganization.
    pub removed: bool,
}

impl Log {
    /// Decodes the log at position `index` of a receipt's `logs` array.
    pub(crate) fn decode(
        value: &Value,
        index: usize,
        index_limit: IndexLimit,
    ) -> DecodeResult<Self> {
        let context = FieldContext::Log(index);
        let Value::Object(map) = value else {
            return Err(context.malformed(ShapeError::UnexpectedValue {
                field: LOGS,
                expected: "an array of log objects",
            }));
        };
        let reader = FieldReader::new(map, context, index_limit);

        let topics = reader
            .array(TOPICS, "an array of 32-byte hashes")
            .and_then(|topics| reader.require(TOPICS, topics))?;
        if topics.len() > MAX_TOPICS {
            return Err(context.malformed(ShapeError::TooManyTopics { index, count: topics.len() }));
        }
        let topics = topics
            .iter()
            .map(|topic| match topic {
                Value::String(topic) => {
                    decode_hash(topic).map_err(|err| context.reject(TOPICS, err))
                }
                _ => Err(context.malformed(ShapeError::UnexpectedValue {
                    field: TOPICS,
                    expected: "an array of 32-byte hashes",
                })),
            })
            .collect::<DecodeResult<Vec<_>>>()?;

        let removed = match reader.field(REMOVED).value() {
            None => false,
            Some(Value::Bool(removed)) => *removed,
            Some(_) => {
                return Err(context.malformed(ShapeError::UnexpectedValue {
                    field: REMOVED,
                    expected: "a boolean",
                }))
            }
        };

        Ok(Self {
            address: reader.required_address(ADDRESS)?,
            topics,
            data: reader.required_bytes(DATA)?,
            block_hash: reader.required_hash(BLOCK_HASH)?,
            block_number: reader.required_index(BLOCK_NUMBER)?,
            transaction_hash: reader.required_hash(TRANSACTION_HASH)?,
            transaction_index: reader.required_index(TRANSACTION_INDEX)?,
            log_index: reader.required_index(LOG_INDEX)?,
            removed,
        })
    }

    /// Encodes the log into its wire form.
    pub fn to_value(&self) -> Value {
        json!({
            "address": encode_bytes(self.address),
            "topics": self.topics.iter().map(encode_bytes).collect::<Vec<_>>(),
            "data": encode_bytes(&self.data),
            "blockHash": encode_bytes(self.block_hash),
            "blockNumber": encode_index(self.block_number),
            "transactionHash": encode_bytes(self.transaction_hash),
            "transactionIndex": encode_index(self.transaction_index),
            "logIndex": encode_index(self.log_index),
            "removed": self.removed,
        })
    }
}
