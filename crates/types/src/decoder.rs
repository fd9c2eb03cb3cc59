//! Entry points for decoding raw field sets.

use crate::{
    receipt, request, transaction, DecodeConfig, DecodeResult, RawFields, ReceiptCorrelator,
    Transaction, TransactionReceipt, TransactionRequest, TxType,
};

/// Decodes a raw transaction field set with the default [DecodeConfig].
///
/// See [Decoder::decode_transaction].
pub fn decode_transaction(raw: &RawFields) -> DecodeResult<Transaction> {
    Decoder::default().decode_transaction(raw)
}

/// Decodes a raw request field set with the default [DecodeConfig].
///
/// See [Decoder::decode_request].
pub fn decode_request(raw: &RawFields) -> DecodeResult<TransactionRequest> {
    Decoder::default().decode_request(raw)
}

/// Decodes a raw receipt field set with the default [DecodeConfig].
///
/// See [Decoder::decode_receipt].
pub fn decode_receipt(raw: &RawFields, originating: TxType) -> DecodeResult<TransactionReceipt> {
    Decoder::default().decode_receipt(raw, originating)
}

/// Decodes raw field sets under a fixed [DecodeConfig].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    /// Creates a new [Decoder].
    pub const fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Returns the [DecodeConfig] in use.
    pub const fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decodes a raw transaction field set.
    ///
    /// The variant is classified from the field shape first, then the variant's required fields
    /// are checked, then every field is normalized.
    ///
    /// ## Returns
    /// - `Ok(Transaction)` on success.
    /// - `Err(DecodeError::MalformedTransaction)` for conflicting or contradicting shapes.
    /// - `Err(DecodeError::MissingField)` for an absent or null required field.
    /// - `Err(DecodeError::MalformedHex)` or `Err(DecodeError::Overflow)` for a bad scalar.
    pub fn decode_transaction(&self, raw: &RawFields) -> DecodeResult<Transaction> {
        transaction::decode_transaction(raw, &self.config)
    }

    /// Decodes a raw request field set. Only `from` is required.
    pub fn decode_request(&self, raw: &RawFields) -> DecodeResult<TransactionRequest> {
        request::decode_request(raw, &self.config)
    }

    /// Decodes a raw receipt field set for a transaction of type `originating`.
    ///
    /// ## Returns
    /// - `Ok(TransactionReceipt)` on success.
    /// - `Err(DecodeError::MalformedReceipt)` for an invalid status or receipt shape.
    /// - `Err(DecodeError::CorrelationMismatch)` if the receipt's `type` differs from
    ///   `originating`.
    pub fn decode_receipt(
        &self,
        raw: &RawFields,
        originating: TxType,
    ) -> DecodeResult<TransactionReceipt> {
        receipt::decode_receipt(raw, originating, &self.config)
    }

    /// Creates an empty [ReceiptCorrelator] that decodes under this decoder's config.
    pub fn correlator(&self) -> ReceiptCorrelator {
        ReceiptCorrelator::new(self.config)
    }
}
