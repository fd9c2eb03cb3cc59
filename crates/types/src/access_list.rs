//! [EIP-2930] access lists.
//!
//! [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930

use crate::{DecodeResult, FieldContext, ShapeError};
use alloc::vec::Vec;
use alloy_primitives::{Address, B256};
use serde_json::{json, Value};
use txwire_quantity::{decode_address, decode_hash, encode_bytes};

const EXPECTED: &str = "an array of `{ address, storageKeys }` entries";

/// A single access list entry: an address and the storage slots it touches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccessListItem {
    /// The accessed account.
    pub address: Address,
    /// The accessed storage keys, in wire order.
    pub storage_keys: Vec<B256>,
}

/// An ordered access list. Entry order and key order are preserved exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, derive_more::Deref, derive_more::From)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    /// Decodes the wire form of an access list.
    pub(crate) fn decode(value: &Value, context: FieldContext) -> DecodeResult<Self> {
        let malformed = || {
            context.malformed(ShapeError::UnexpectedValue {
                field: "accessList",
                expected: EXPECTED,
            })
        };

        let Value::Array(entries) = value else {
            return Err(malformed());
        };

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let (Some(Value::String(address)), Some(Value::Array(keys))) =
                (entry.get("address"), entry.get("storageKeys"))
            else {
                return Err(malformed());
            };

            let address = decode_address(address)
                .map_err(|err| context.reject("accessList.address", err))?;
            let storage_keys = keys
                .iter()
                .map(|key| {
                    key.as_str().ok_or_else(malformed).and_then(|key| {
                        decode_hash(key)
                            .map_err(|err| context.reject("accessList.storageKeys", err))
                    })
                })
                .collect::<DecodeResult<Vec<_>>>()?;

            items.push(AccessListItem { address, storage_keys });
        }
        Ok(Self(items))
    }

    /// Encodes the access list into its wire form.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|item| {
                    let storage_keys =
                        item.storage_keys.iter().map(encode_bytes).collect::<Vec<_>>();
                    json!({
                        "address": encode_bytes(item.address),
                        "storageKeys": storage_keys,
                    })
                })
                .collect(),
        )
    }

    /// Returns the total number of storage keys across all entries.
    pub fn storage_key_count(&self) -> usize {
        self.0.iter().map(|item| item.storage_keys.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeError, TxType};
    use alloy_primitives::{address, b256};

    const CONTEXT: FieldContext = FieldContext::Transaction(TxType::Eip2930);

    #[test]
    fn test_decode_preserves_order() {
        let value = json!([
            {
                "address": "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae",
                "storageKeys": [
                    "0x0000000000000000000000000000000000000000000000000000000000000007",
                    "0x0000000000000000000000000000000000000000000000000000000000000003"
                ]
            },
            {
                "address": "0xbb9bc244d798123fde783fcc1c72d3bb8c189413",
                "storageKeys": []
            }
        ]);

        let list = AccessList::decode(&value, CONTEXT).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].address, address!("de0b295669a9fd93d5f28d9ec85e40f4cb697bae"));
        assert_eq!(
            list[0].storage_keys,
            vec![
                b256!("0000000000000000000000000000000000000000000000000000000000000007"),
                b256!("0000000000000000000000000000000000000000000000000000000000000003"),
            ]
        );
        assert!(list[1].storage_keys.is_empty());
        assert_eq!(list.storage_key_count(), 2);
        assert_eq!(list.to_value(), value);
    }

    #[test]
    fn test_decode_empty() {
        assert!(AccessList::decode(&json!([]), CONTEXT).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        for value in [
            json!({}),
            json!([{ "address": "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae" }]),
            json!([{ "storageKeys": [] }]),
            json!([{
                "address": "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae",
                "storageKeys": [7]
            }]),
        ] {
            assert!(matches!(
                AccessList::decode(&value, CONTEXT),
                Err(DecodeError::MalformedTransaction(ShapeError::UnexpectedValue {
                    field: "accessList",
                    ..
                }))
            ));
        }
    }

    #[test]
    fn test_decode_rejects_short_storage_key() {
        let value = json!([{
            "address": "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae",
            "storageKeys": ["0x07"]
        }]);
        assert_eq!(
            AccessList::decode(&value, CONTEXT),
            Err(DecodeError::MalformedTransaction(ShapeError::InvalidLength {
                field: "accessList.storageKeys",
                expected: 32,
                got: 1,
            }))
        );
    }
}
