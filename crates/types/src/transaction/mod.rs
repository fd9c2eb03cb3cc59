//! The transaction variant model.

use crate::{fields::*, AccessList, FeeValues, RawFields, TxType};
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use serde_json::Value;
use txwire_quantity::{encode_bytes, encode_index, encode_quantity};

mod classify;
pub use classify::{classify, TxShape};

mod validate;
pub use validate::{required_fields, validate};

mod decode;
pub(crate) use decode::{decode_inclusion, decode_transaction};

/// Where a transaction sits in the chain.
///
/// The wire carries this as three nullable fields that are either all null (pending) or all set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockInclusion {
    /// Not yet included in a block.
    #[default]
    Pending,
    /// Included in a block.
    Included {
        /// Hash of the including block.
        block_hash: B256,
        /// Number of the including block.
        block_number: u64,
        /// Position within the including block.
        transaction_index: u64,
    },
}

impl BlockInclusion {
    /// Returns `true` if the transaction is not yet included.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the including block's hash.
    pub const fn block_hash(&self) -> Option<B256> {
        match self {
            Self::Pending => None,
            Self::Included { block_hash, .. } => Some(*block_hash),
        }
    }

    /// Returns the including block's number.
    pub const fn block_number(&self) -> Option<u64> {
        match self {
            Self::Pending => None,
            Self::Included { block_number, .. } => Some(*block_number),
        }
    }

    /// Returns the position within the including block.
    pub const fn transaction_index(&self) -> Option<u64> {
        match self {
            Self::Pending => None,
            Self::Included { transaction_index, .. } => Some(*transaction_index),
        }
    }

    fn write_fields(&self, fields: &mut RawFields) {
        fields.insert(
            BLOCK_HASH,
            self.block_hash().map_or(Value::Null, |h| encode_bytes(h).into()),
        );
        fields.insert(
            BLOCK_NUMBER,
            self.block_number().map_or(Value::Null, |n| encode_index(n).into()),
        );
        fields.insert(
            TRANSACTION_INDEX,
            self.transaction_index().map_or(Value::Null, |i| encode_index(i).into()),
        );
    }
}

/// Fields shared by every transaction variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionBase {
    /// Block inclusion, [BlockInclusion::Pending] until mined.
    pub inclusion: BlockInclusion,
    /// Chain ID. Always set for typed transactions; `None` only for pre-[EIP-155] legacy
    /// transactions.
    ///
    /// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
    pub chain_id: Option<u64>,
    /// Sender.
    pub from: Address,
    /// Gas limit.
    pub gas: U256,
    /// Transaction hash.
    pub hash: B256,
    /// Call data or contract init code.
    pub input: Bytes,
    /// Sender nonce.
    pub nonce: u64,
    /// Signature `r`.
    pub r: U256,
    /// Signature `s`.
    pub s: U256,
    /// Signature `v` (or y-parity for typed transactions).
    pub v: U256,
    /// Recipient, or [TxKind::Create] for contract creation.
    pub to: TxKind,
    /// Value transferred, in wei.
    pub value: U256,
}

impl TransactionBase {
    fn write_fields(&self, fields: &mut RawFields) {
        fields.insert(HASH, encode_bytes(self.hash));
        self.inclusion.write_fields(fields);
        if let Some(chain_id) = self.chain_id {
            fields.insert(CHAIN_ID, encode_index(chain_id));
        }
        fields.insert(FROM, encode_bytes(self.from));
        fields.insert(TO, self.to.to().map_or(Value::Null, |to| encode_bytes(to).into()));
        fields.insert(NONCE, encode_index(self.nonce));
        fields.insert(GAS, encode_quantity(self.gas));
        fields.insert(VALUE, encode_quantity(self.value));
        fields.insert(INPUT, encode_bytes(&self.input));
        fields.insert(V, encode_quantity(self.v));
        fields.insert(R, encode_quantity(self.r));
        fields.insert(S, encode_quantity(self.s));
    }
}

/// A legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxLegacy {
    /// Shared fields.
    pub base: TransactionBase,
    /// Price per unit of gas.
    pub gas_price: U256,
}

/// An [EIP-2930] access list transaction.
///
/// [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxEip2930 {
    /// Shared fields.
    pub base: TransactionBase,
    /// Price per unit of gas.
    pub gas_price: U256,
    /// Pre-declared accounts and storage slots. May be empty.
    pub access_list: AccessList,
}

/// An [EIP-1559] fee-market transaction.
///
/// [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxEip1559 {
    /// Shared fields.
    pub base: TransactionBase,
    /// Maximum total fee per unit of gas.
    pub max_fee_per_gas: U256,
    /// Maximum priority fee per unit of gas.
    pub max_priority_fee_per_gas: U256,
    /// Pre-declared accounts and storage slots. May be empty.
    pub access_list: AccessList,
}

/// A decoded transaction, tagged by its variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Transaction {
    /// A [TxLegacy].
    Legacy(TxLegacy),
    /// A [TxEip2930].
    Eip2930(TxEip2930),
    /// A [TxEip1559].
    Eip1559(TxEip1559),
}

impl From<TxLegacy> for Transaction {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip2930> for Transaction {
    fn from(tx: TxEip2930) -> Self {
        Self::Eip2930(tx)
    }
}

impl From<TxEip1559> for Transaction {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

impl Transaction {
    /// Return the [TxType] of the inner txn.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::Eip2930(_) => TxType::Eip2930,
            Self::Eip1559(_) => TxType::Eip1559,
        }
    }

    /// Returns the fields shared by every variant.
    pub const fn base(&self) -> &TransactionBase {
        match self {
            Self::Legacy(tx) => &tx.base,
            Self::Eip2930(tx) => &tx.base,
            Self::Eip1559(tx) => &tx.base,
        }
    }

    /// Returns the transaction hash.
    pub const fn hash(&self) -> B256 {
        self.base().hash
    }

    /// Returns `true` if the transaction is not yet included in a block.
    pub const fn is_pending(&self) -> bool {
        self.base().inclusion.is_pending()
    }

    /// Returns the pricing fields.
    pub const fn fees(&self) -> FeeValues {
        match self {
            Self::Legacy(TxLegacy { gas_price, .. })
            | Self::Eip2930(TxEip2930 { gas_price, .. }) => {
                FeeValues::Legacy { gas_price: *gas_price }
            }
            Self::Eip1559(tx) => FeeValues::FeeMarket {
                max_fee_per_gas: tx.max_fee_per_gas,
                max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
            },
        }
    }

    /// Returns the access list, or `None` for legacy transactions.
    pub const fn access_list(&self) -> Option<&AccessList> {
        match self {
            Self::Legacy(_) => None,
            Self::Eip2930(tx) => Some(&tx.access_list),
            Self::Eip1559(tx) => Some(&tx.access_list),
        }
    }

    /// Encodes the transaction into canonical wire fields, with the EIP-2718 `type` tag.
    pub fn to_fields(&self) -> RawFields {
        let mut fields = RawFields::new();
        fields.insert(TYPE, self.tx_type().to_tag());
        self.base().write_fields(&mut fields);
        match self.fees() {
            FeeValues::Legacy { gas_price } => {
                fields.insert(GAS_PRICE, encode_quantity(gas_price));
            }
            FeeValues::FeeMarket { max_fee_per_gas, max_priority_fee_per_gas } => {
                fields.insert(MAX_FEE_PER_GAS, encode_quantity(max_fee_per_gas));
                fields.insert(MAX_PRIORITY_FEE_PER_GAS, encode_quantity(max_priority_fee_per_gas));
            }
        }
        if let Some(access_list) = self.access_list() {
            fields.insert(ACCESS_LIST, access_list.to_value());
        }
        fields
    }
}
