//! Error types for the `txwire-types` crate.

use crate::TxType;
use alloc::string::String;
use alloy_primitives::{Address, B256, U256};
use core::fmt;
use thiserror::Error;
use txwire_quantity::QuantityError;

/// A [Result] type alias where the error is [DecodeError].
pub type DecodeResult<T> = Result<T, DecodeError>;

/// An error raised while decoding or correlating a raw field set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A scalar or byte field contains non-hex characters.
    #[error("Malformed hex in `{field}` of {context}: {input:?}")]
    MalformedHex {
        /// The wire field name.
        field: &'static str,
        /// The entity being decoded.
        context: FieldContext,
        /// The rejected wire value.
        input: String,
    },
    /// A scalar field exceeds the range of its application type.
    #[error("Value {input} of `{field}` overflows {kind}")]
    Overflow {
        /// The wire field name.
        field: &'static str,
        /// The quantity kind the field decodes into.
        kind: &'static str,
        /// The rejected wire value.
        input: String,
    },
    /// The transaction (or request) field set has a conflicting or unrecognized shape.
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(#[source] ShapeError),
    /// A field required by the determined variant is absent or null.
    #[error("Missing field `{field}` for {context}")]
    MissingField {
        /// The wire field name.
        field: &'static str,
        /// The entity being decoded, including its variant when known.
        context: FieldContext,
    },
    /// The receipt field set is malformed.
    #[error("Malformed receipt: {0}")]
    MalformedReceipt(#[source] ShapeError),
    /// A receipt's type disagrees with the type of its transaction.
    #[error("Receipt for {hash} has type {receipt}, but its transaction has type {transaction}")]
    CorrelationMismatch {
        /// The transaction hash.
        hash: B256,
        /// The type carried by the receipt.
        receipt: TxType,
        /// The type of the originating transaction.
        transaction: TxType,
    },
    /// A receipt was checked against a transaction with a different hash.
    #[error("Receipt for {receipt} checked against transaction {transaction}")]
    HashMismatch {
        /// The receipt's transaction hash.
        receipt: B256,
        /// The transaction's hash.
        transaction: B256,
    },
    /// A receipt disagrees with the block inclusion of its transaction.
    #[error("Receipt for {0} disagrees with its transaction's block inclusion")]
    InclusionMismatch(B256),
    /// A receipt was checked against a transaction that is not yet included.
    #[error("Transaction {0} is pending and cannot have a receipt")]
    PendingTransaction(B256),
    /// A receipt references a transaction that is not tracked.
    #[error("No tracked transaction with hash {0}")]
    UnknownTransaction(B256),
}

/// The reason a field set is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// `gasPrice` is present together with fee-market fields.
    #[error("`gasPrice` is present together with fee-market fields")]
    ConflictingFees,
    /// The `type` discriminator is not a known variant.
    #[error("Unrecognized transaction type {0}")]
    UnknownType(String),
    /// The declared `type` forbids a field that is present.
    #[error("Declared {declared} transaction carries forbidden field `{field}`")]
    TypeShapeMismatch {
        /// The declared variant.
        declared: TxType,
        /// The forbidden field.
        field: &'static str,
    },
    /// A fixed-length field decoded to the wrong number of bytes.
    #[error("`{field}` must be {expected} bytes, got {got}")]
    InvalidLength {
        /// The wire field name.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Decoded length in bytes.
        got: usize,
    },
    /// A field holds a JSON value of the wrong kind.
    #[error("`{field}` must be {expected}")]
    UnexpectedValue {
        /// The wire field name.
        field: &'static str,
        /// Description of the expected JSON value.
        expected: &'static str,
    },
    /// Some, but not all, of `blockHash`, `blockNumber` and `transactionIndex` are null.
    #[error("Block inclusion fields are partially null")]
    PartialInclusion,
    /// `maxPriorityFeePerGas` exceeds `maxFeePerGas`.
    #[error("Priority fee {max_priority_fee_per_gas} exceeds fee cap {max_fee_per_gas}")]
    FeeOrdering {
        /// The fee cap.
        max_fee_per_gas: U256,
        /// The priority fee cap.
        max_priority_fee_per_gas: U256,
    },
    /// `data` and `input` are both present and differ.
    #[error("`data` and `input` are both present and differ")]
    ConflictingInput,
    /// The receipt status is not a binary flag.
    #[error("Invalid receipt status {0}")]
    InvalidStatus(String),
    /// A contract address is set on a receipt for a call.
    #[error("Contract address set on a receipt for a call to {0}")]
    ContractAddressOnCall(Address),
    /// A log disagrees with its receipt.
    #[error("Log {index} disagrees with its receipt on `{field}`")]
    LogMismatch {
        /// Position of the log within the receipt.
        index: usize,
        /// The disagreeing field.
        field: &'static str,
    },
    /// A log carries more topics than the EVM can emit.
    #[error("Log {index} carries {count} topics, at most 4 are allowed")]
    TooManyTopics {
        /// Position of the log within the receipt.
        index: usize,
        /// Number of topics present.
        count: usize,
    },
}

/// The entity a field belongs to. Carried by errors so they can be diagnosed without the raw
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldContext {
    /// A transaction of the given variant.
    Transaction(TxType),
    /// A transaction request.
    Request,
    /// A receipt, with the originating variant once known.
    Receipt(Option<TxType>),
    /// The log at the given position within a receipt.
    Log(usize),
}

impl FieldContext {
    /// Wraps a [ShapeError] into the malformed error of this entity.
    pub(crate) fn malformed(self, err: ShapeError) -> DecodeError {
        match self {
            Self::Transaction(_) | Self::Request => DecodeError::MalformedTransaction(err),
            Self::Receipt(_) | Self::Log(_) => DecodeError::MalformedReceipt(err),
        }
    }

    /// Returns a [DecodeError::MissingField] for `field`.
    pub(crate) const fn missing(self, field: &'static str) -> DecodeError {
        DecodeError::MissingField { field, context: self }
    }

    /// Attaches field context to a normalization error.
    pub(crate) fn reject(self, field: &'static str, err: QuantityError) -> DecodeError {
        match err {
            QuantityError::MalformedHex(input) => {
                DecodeError::MalformedHex { field, context: self, input }
            }
            QuantityError::Overflow { kind, input } => DecodeError::Overflow { field, kind, input },
            QuantityError::InvalidLength { expected, got } => {
                self.malformed(ShapeError::InvalidLength { field, expected, got })
            }
        }
    }
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction(ty) => write!(f, "{ty} transaction"),
            Self::Request => f.write_str("transaction request"),
            Self::Receipt(Some(ty)) => write!(f, "{ty} receipt"),
            Self::Receipt(None) => f.write_str("receipt"),
            Self::Log(index) => write!(f, "log {index}"),
        }
    }
}
