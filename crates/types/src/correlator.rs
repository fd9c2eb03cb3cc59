//! Receipt correlation: matching receipts to their originating transactions.

use crate::{
    fields::*, receipt::decode_receipt, BlockInclusion, DecodeConfig, DecodeError, DecodeResult,
    FieldContext, RawFields, Transaction, TransactionReceipt, TxType,
};
use alloy_primitives::B256;
use hashbrown::HashMap;
use tracing::{trace, warn};

/// Checks a decoded receipt against its originating transaction.
///
/// The receipt must carry the transaction's hash and type, and the transaction must be included
/// in the block the receipt reports.
pub fn correlate(tx: &Transaction, receipt: &TransactionReceipt) -> DecodeResult<()> {
    let hash = tx.hash();
    if receipt.transaction_hash != hash {
        return Err(DecodeError::HashMismatch {
            receipt: receipt.transaction_hash,
            transaction: hash,
        });
    }
    check_type(hash, receipt.tx_type, tx.tx_type())?;

    match tx.base().inclusion {
        BlockInclusion::Pending => Err(DecodeError::PendingTransaction(hash)),
        inclusion => check_inclusion(hash, inclusion, receipt),
    }
}

/// The type and inclusion of a tracked transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tracked {
    tx_type: TxType,
    inclusion: BlockInclusion,
}

/// Tracks transactions by hash so raw receipts can be decoded against them.
///
/// A receipt for a tracked pending transaction is accepted with any inclusion: the transaction
/// may have been mined after it was tracked. Re-tracking the transaction updates its inclusion.
#[derive(Debug, Clone, Default)]
pub struct ReceiptCorrelator {
    config: DecodeConfig,
    transactions: HashMap<B256, Tracked>,
}

impl ReceiptCorrelator {
    /// Creates an empty correlator that decodes receipts under `config`.
    pub fn new(config: DecodeConfig) -> Self {
        Self { config, transactions: HashMap::new() }
    }

    /// Starts tracking `tx`, replacing any transaction tracked under the same hash.
    pub fn track(&mut self, tx: &Transaction) {
        let tracked = Tracked { tx_type: tx.tx_type(), inclusion: tx.base().inclusion };
        trace!(target: "correlator", "Tracking {} transaction {}", tracked.tx_type, tx.hash());
        self.transactions.insert(tx.hash(), tracked);
    }

    /// Stops tracking the transaction with `hash`, returning its type.
    pub fn untrack(&mut self, hash: &B256) -> Option<TxType> {
        self.transactions.remove(hash).map(|tracked| tracked.tx_type)
    }

    /// Returns the type of the tracked transaction with `hash`.
    pub fn tx_type(&self, hash: &B256) -> Option<TxType> {
        self.transactions.get(hash).map(|tracked| tracked.tx_type)
    }

    /// Returns `true` if a transaction with `hash` is tracked.
    pub fn contains(&self, hash: &B256) -> bool {
        self.transactions.contains_key(hash)
    }

    /// Returns the number of tracked transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns `true` if no transactions are tracked.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Decodes a raw receipt against the tracked transaction it references.
    ///
    /// ## Returns
    /// - `Err(DecodeError::UnknownTransaction)` if the referenced transaction is not tracked.
    /// - `Err(DecodeError::CorrelationMismatch)` if the receipt's type disagrees.
    /// - `Err(DecodeError::InclusionMismatch)` if the tracked transaction is included elsewhere.
    pub fn decode(&self, raw: &RawFields) -> DecodeResult<TransactionReceipt> {
        let reader =
            FieldReader::new(raw.as_map(), FieldContext::Receipt(None), self.config.index_limit);
        let hash = reader.required_hash(TRANSACTION_HASH)?;
        let Some(tracked) = self.transactions.get(&hash) else {
            warn!(target: "correlator", "Receipt references untracked transaction {hash}");
            return Err(DecodeError::UnknownTransaction(hash));
        };

        let receipt = decode_receipt(raw, tracked.tx_type, &self.config)?;
        if !tracked.inclusion.is_pending() {
            check_inclusion(hash, tracked.inclusion, &receipt)?;
        }
        Ok(receipt)
    }
}

fn check_type(hash: B256, receipt: TxType, transaction: TxType) -> DecodeResult<()> {
    if receipt != transaction {
        warn!(
            target: "correlator",
            "Receipt for {hash} has type {receipt}, but its transaction has type {transaction}"
        );
        return Err(DecodeError::CorrelationMismatch { hash, receipt, transaction });
    }
    Ok(())
}

fn check_inclusion(
    hash: B256,
    inclusion: BlockInclusion,
    receipt: &TransactionReceipt,
) -> DecodeResult<()> {
    if receipt.inclusion() != inclusion {
        warn!(target: "correlator", "Receipt for {hash} reports a different block inclusion");
        return Err(DecodeError::InclusionMismatch(hash));
    }
    Ok(())
}
