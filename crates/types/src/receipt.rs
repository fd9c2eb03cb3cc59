//! Transaction receipts.

use crate::{
    fields::*, transaction::decode_inclusion, BlockInclusion, DecodeConfig, DecodeError,
    DecodeResult, FieldContext, Log, RawFields, ShapeError, TxType,
};
use alloc::{string::ToString, vec::Vec};
use alloy_primitives::{Address, Bloom, B256, U256};
use serde_json::Value;
use tracing::{debug, warn};
use txwire_quantity::{decode_index, encode_bytes, encode_index, encode_quantity};

/// The execution outcome of an included transaction.
#[derive(derive_more::Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReceiptStatus {
    /// Execution reverted.
    #[display("reverted")]
    Reverted,
    /// Execution succeeded.
    #[display("success")]
    Success,
}

impl ReceiptStatus {
    /// Normalizes a wire status flag.
    ///
    /// Accepts the hex flags `"0x0"` and `"0x1"` (with any zero padding), JSON booleans, the JSON
    /// integers `0` and `1`, and the names `"reverted"` and `"success"`.
    pub fn from_wire(value: &Value) -> Result<Self, ShapeError> {
        let flag = match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.as_str() {
                "success" => Some(true),
                "reverted" => Some(false),
                s => match decode_index(s) {
                    Ok(0) => Some(false),
                    Ok(1) => Some(true),
                    _ => None,
                },
            },
            _ => None,
        };

        match flag {
            Some(true) => Ok(Self::Success),
            Some(false) => Ok(Self::Reverted),
            None => Err(ShapeError::InvalidStatus(match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })),
        }
    }

    /// Returns the canonical wire flag.
    pub const fn to_wire(self) -> &'static str {
        match self {
            Self::Reverted => "0x0",
            Self::Success => "0x1",
        }
    }

    /// Returns `true` for [ReceiptStatus::Success].
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// The post-execution record of an included transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionReceipt {
    /// Hash of the including block.
    pub block_hash: B256,
    /// Number of the including block.
    pub block_number: u64,
    /// The created contract, for contract creations only.
    pub contract_address: Option<Address>,
    /// Gas used by this and all preceding transactions in the block.
    pub cumulative_gas_used: U256,
    /// Price per unit of gas actually paid.
    pub effective_gas_price: U256,
    /// Sender.
    pub from: Address,
    /// Gas used by this transaction.
    pub gas_used: U256,
    /// Logs emitted by this transaction, in emission order.
    pub logs: Vec<Log>,
    /// Bloom filter over the logs.
    pub logs_bloom: Bloom,
    /// Execution outcome.
    pub status: ReceiptStatus,
    /// Recipient, or `None` for contract creations.
    pub to: Option<Address>,
    /// Hash of the transaction.
    pub transaction_hash: B256,
    /// Position of the transaction within the block.
    pub transaction_index: u64,
    /// Type of the originating transaction.
    pub tx_type: TxType,
}

impl TransactionReceipt {
    /// Returns the block inclusion the receipt reports.
    pub const fn inclusion(&self) -> BlockInclusion {
        BlockInclusion::Included {
            block_hash: self.block_hash,
            block_number: self.block_number,
            transaction_index: self.transaction_index,
        }
    }

    /// Returns `true` if execution succeeded.
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Encodes the receipt into canonical wire fields.
    pub fn to_fields(&self) -> RawFields {
        let mut fields = RawFields::new();
        fields.insert(TYPE, self.tx_type.to_tag());
        fields.insert(TRANSACTION_HASH, encode_bytes(self.transaction_hash));
        fields.insert(TRANSACTION_INDEX, encode_index(self.transaction_index));
        fields.insert(BLOCK_HASH, encode_bytes(self.block_hash));
        fields.insert(BLOCK_NUMBER, encode_index(self.block_number));
        fields.insert(FROM, encode_bytes(self.from));
        fields.insert(TO, self.to.map_or(Value::Null, |to| encode_bytes(to).into()));
        fields.insert(
            CONTRACT_ADDRESS,
            self.contract_address.map_or(Value::Null, |address| encode_bytes(address).into()),
        );
        fields.insert(CUMULATIVE_GAS_USED, encode_quantity(self.cumulative_gas_used));
        fields.insert(GAS_USED, encode_quantity(self.gas_used));
        fields.insert(EFFECTIVE_GAS_PRICE, encode_quantity(self.effective_gas_price));
        fields.insert(LOGS, self.logs.iter().map(Log::to_value).collect::<Vec<_>>());
        fields.insert(LOGS_BLOOM, encode_bytes(self.logs_bloom));
        fields.insert(STATUS, self.status.to_wire());
        fields
    }
}

/// Decodes a raw receipt field set for a transaction of type `originating`.
pub(crate) fn decode_receipt(
    raw: &RawFields,
    originating: TxType,
    config: &DecodeConfig,
) -> DecodeResult<TransactionReceipt> {
    let context = FieldContext::Receipt(Some(originating));
    let reader = FieldReader::new(raw.as_map(), context, config.index_limit);
    let transaction_hash = reader.required_hash(TRANSACTION_HASH)?;

    let declared = match reader.field(TYPE).value() {
        None => None,
        Some(Value::String(tag)) => Some(
            TxType::from_tag(tag)
                .ok_or_else(|| context.malformed(ShapeError::UnknownType(tag.clone())))?,
        ),
        Some(other) => return Err(context.malformed(ShapeError::UnknownType(other.to_string()))),
    };
    if let Some(declared) = declared.filter(|declared| *declared != originating) {
        warn!(
            target: "receipt_decode",
            "Receipt for {transaction_hash} has type {declared}, expected {originating}"
        );
        return Err(DecodeError::CorrelationMismatch {
            hash: transaction_hash,
            receipt: declared,
            transaction: originating,
        });
    }

    let BlockInclusion::Included { block_hash, block_number, transaction_index } =
        decode_inclusion(&reader)?
    else {
        return Err(context.missing(BLOCK_HASH));
    };

    let status = reader.require(STATUS, reader.field(STATUS).value())?;
    let status = ReceiptStatus::from_wire(status).map_err(|err| context.malformed(err))?;

    let to = reader.address(TO)?;
    let contract_address = reader.address(CONTRACT_ADDRESS)?;
    if let (Some(to), Some(_)) = (to, contract_address) {
        return Err(context.malformed(ShapeError::ContractAddressOnCall(to)));
    }

    let logs = reader
        .array(LOGS, "an array of log objects")
        .and_then(|logs| reader.require(LOGS, logs))?
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let log = Log::decode(value, index, config.index_limit)?;
            let field = if log.transaction_hash != transaction_hash {
                TRANSACTION_HASH
            } else if log.block_hash != block_hash {
                BLOCK_HASH
            } else if log.block_number != block_number {
                BLOCK_NUMBER
            } else if log.transaction_index != transaction_index {
                TRANSACTION_INDEX
            } else {
                return Ok(log);
            };
            Err(context.malformed(ShapeError::LogMismatch { index, field }))
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    let logs_bloom = reader.bloom(LOGS_BLOOM).and_then(|bloom| reader.require(LOGS_BLOOM, bloom))?;

    let receipt = TransactionReceipt {
        block_hash,
        block_number,
        contract_address,
        cumulative_gas_used: reader.required_quantity(CUMULATIVE_GAS_USED)?,
        effective_gas_price: reader.required_quantity(EFFECTIVE_GAS_PRICE)?,
        from: reader.required_address(FROM)?,
        gas_used: reader.required_quantity(GAS_USED)?,
        logs,
        logs_bloom,
        status,
        to,
        transaction_hash,
        transaction_index,
        tx_type: originating,
    };

    debug!(
        target: "receipt_decode",
        "Decoded {originating} receipt for {transaction_hash}: {status} with {} logs",
        receipt.logs.len()
    );
    Ok(receipt)
}
