//! Shared test fixtures.
//!
//! One transaction of each variant, all included in the same block, plus the receipt of the legacy
//! transaction and the ERC-20 transfer log it emitted. [CollectingLayer] captures emitted events
//! so tests can assert on warnings.

use crate::RawFields;
use alloc::{format, string::String, sync::Arc, vec::Vec};
use alloy_primitives::{b256, B256};
use serde_json::{json, Value};
use spin::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, Layer};

/// Hash of the transaction in [legacy_fields], referenced by [receipt_fields].
pub(crate) const LEGACY_HASH: B256 =
    b256!("88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b");
const LEGACY_HASH_HEX: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

const BLOCK_HASH: &str = "0x1d59ff54b1eb26b013ce3cb5fc9dab3705b415a67127a003c3e61eb445bb8df2";
const SENDER: &str = "0xa7d9ddbe1f17865597fbd27ec712455208b6b76d";
const RECIPIENT: &str = "0xf02c1c8e6114b1dbe8937a39260b5b0a374432bb";

fn fields(value: Value) -> RawFields {
    RawFields::try_from(value).expect("fixture is an object")
}

/// An included, EIP-155 signed legacy transaction without an explicit `chainId`.
pub(crate) fn legacy_fields() -> RawFields {
    fields(json!({
        "type": "0x0",
        "hash": LEGACY_HASH_HEX,
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "transactionIndex": "0x41",
        "from": SENDER,
        "to": RECIPIENT,
        "nonce": "0x15",
        "gas": "0xc350",
        "gasPrice": "0x4a817c800",
        "value": "0xf3dbb76162000",
        "input": "0x68656c6c6f21",
        "v": "0x25",
        "r": "0x1b5e176d927f8e9ab405058b2d2457392da3e20f328b16ddabcebc33eaac5fea",
        "s": "0x4ba69724e8f69de52f0125ad8b3c5c2cef33019bac3249e2c0a2192766d1721c"
    }))
}

/// An included access list transaction with one entry.
pub(crate) fn eip2930_fields() -> RawFields {
    fields(json!({
        "type": "0x1",
        "hash": "0x2a5b6c7a2ac5ca3a8f2d1a2f3e1e7e8b1c3a5b9d0e4f6a7b8c9d0e1f2a3b4c5d",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "transactionIndex": "0x42",
        "chainId": "0x1",
        "from": SENDER,
        "to": RECIPIENT,
        "nonce": "0x16",
        "gas": "0x7a120",
        "gasPrice": "0x3b9aca00",
        "value": "0x0",
        "input": "0x",
        "accessList": [{
            "address": "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae",
            "storageKeys": [
                "0x0000000000000000000000000000000000000000000000000000000000000003",
                "0x0000000000000000000000000000000000000000000000000000000000000007"
            ]
        }],
        "v": "0x1",
        "r": "0x3ea2c2a7e1a1b7d6c5f4e3d2c1b0a9f8e7d6c5b4a3928170f6e5d4c3b2a19080",
        "s": "0x5d1f2e3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0"
    }))
}

/// An included fee-market transaction with fees 100 / 50 and an empty access list.
pub(crate) fn eip1559_fields() -> RawFields {
    fields(json!({
        "type": "0x2",
        "hash": "0xd7b65dc6cdffd2d6e0a1ac4d1f30d4a4ec49d7db90bb1e5c5a88fa52ef2b5ad3",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "transactionIndex": "0x43",
        "chainId": "0x1",
        "from": SENDER,
        "to": RECIPIENT,
        "nonce": "0x17",
        "gas": "0xc350",
        "maxFeePerGas": "0x64",
        "maxPriorityFeePerGas": "0x32",
        "value": "0x2386f26fc10000",
        "input": "0xa9059cbb",
        "accessList": [],
        "v": "0x0",
        "r": "0x8a3f5e2c1d0b9a8f7e6d5c4b3a29180706f5e4d3c2b1a09f8e7d6c5b4a392817",
        "s": "0x1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d"
    }))
}

/// A canonical ERC-20 transfer log emitted by the transaction in [legacy_fields].
pub(crate) fn log_value() -> Value {
    json!({
        "address": "0xb59f67a8bff5d8cd03f6ac17265c550ed8f33907",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x000000000000000000000000a7d9ddbe1f17865597fbd27ec712455208b6b76d"
        ],
        "data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "transactionHash": LEGACY_HASH_HEX,
        "transactionIndex": "0x41",
        "logIndex": "0x7",
        "removed": false
    })
}

/// A canonical successful receipt for the transaction in [legacy_fields].
pub(crate) fn receipt_fields() -> RawFields {
    fields(json!({
        "type": "0x0",
        "transactionHash": LEGACY_HASH_HEX,
        "transactionIndex": "0x41",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5daf3b",
        "from": SENDER,
        "to": RECIPIENT,
        "contractAddress": null,
        "cumulativeGasUsed": "0x33bc",
        "gasUsed": "0x4dc",
        "effectiveGasPrice": "0x4a817c800",
        "logs": [log_value()],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "status": "0x1"
    }))
}

/// The storage for the collected traces.
#[derive(Debug, Default, Clone)]
pub(crate) struct TraceStorage(pub(crate) Arc<Mutex<Vec<(Level, String)>>>);

impl TraceStorage {
    /// Returns the items in the storage that match the specified level.
    pub(crate) fn get_by_level(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .filter_map(|(l, message)| (*l == level).then(|| message.clone()))
            .collect()
    }
}

/// A subscriber layer that collects traces and their log levels.
#[derive(Debug, Default)]
pub(crate) struct CollectingLayer {
    storage: TraceStorage,
}

impl CollectingLayer {
    pub(crate) const fn new(storage: TraceStorage) -> Self {
        Self { storage }
    }
}

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        let message = format!("{event:?}");
        self.storage.0.lock().push((level, message));
    }
}
