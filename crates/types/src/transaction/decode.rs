//! Decoding of classified, validated transaction field sets.

use super::{
    classify::TxShape, validate::validate, BlockInclusion, Transaction, TransactionBase,
    TxEip1559, TxEip2930, TxLegacy,
};
use crate::{
    fields::*, AccessList, DecodeConfig, DecodeResult, FieldContext, IndexLimit, RawFields,
    ShapeError, TxType,
};
use alloy_primitives::{TxKind, U256};
use tracing::{debug, trace};
use txwire_quantity::QuantityResult;

/// Decodes a raw transaction field set.
///
/// Classification runs first, then required-field validation for the chosen variant, then
/// per-field normalization.
pub(crate) fn decode_transaction(
    raw: &RawFields,
    config: &DecodeConfig,
) -> DecodeResult<Transaction> {
    let ty = TxShape::inspect(raw)?.classify()?;
    validate(raw, ty)?;

    let context = FieldContext::Transaction(ty);
    let reader = FieldReader::new(raw.as_map(), context, config.index_limit);
    let base = decode_base(&reader, ty, config.index_limit)?;

    let tx: Transaction = match ty {
        TxType::Legacy => {
            TxLegacy { base, gas_price: reader.required_quantity(GAS_PRICE)? }.into()
        }
        TxType::Eip2930 => TxEip2930 {
            base,
            gas_price: reader.required_quantity(GAS_PRICE)?,
            access_list: decode_access_list(&reader)?,
        }
        .into(),
        TxType::Eip1559 => {
            let max_fee_per_gas = reader.required_quantity(MAX_FEE_PER_GAS)?;
            let max_priority_fee_per_gas = reader.required_quantity(MAX_PRIORITY_FEE_PER_GAS)?;
            config
                .fee_ordering
                .check(max_fee_per_gas, max_priority_fee_per_gas)
                .map_err(|err| context.malformed(err))?;
            TxEip1559 {
                base,
                max_fee_per_gas,
                max_priority_fee_per_gas,
                access_list: decode_access_list(&reader)?,
            }
            .into()
        }
    };

    debug!(target: "tx_decode", "Decoded {ty} transaction {}", tx.hash());
    Ok(tx)
}

/// Reads the three block inclusion fields as one nullable unit.
pub(crate) fn decode_inclusion(reader: &FieldReader<'_>) -> DecodeResult<BlockInclusion> {
    let block_hash = reader.hash(BLOCK_HASH)?;
    let block_number = reader.index(BLOCK_NUMBER)?;
    let transaction_index = reader.index(TRANSACTION_INDEX)?;

    match (block_hash, block_number, transaction_index) {
        (Some(block_hash), Some(block_number), Some(transaction_index)) => {
            Ok(BlockInclusion::Included { block_hash, block_number, transaction_index })
        }
        (None, None, None) => Ok(BlockInclusion::Pending),
        _ => Err(reader.context().malformed(ShapeError::PartialInclusion)),
    }
}

fn decode_base(
    reader: &FieldReader<'_>,
    ty: TxType,
    limit: IndexLimit,
) -> DecodeResult<TransactionBase> {
    let v = reader.required_quantity(V)?;
    let chain_id = match reader.index(CHAIN_ID)? {
        Some(chain_id) => Some(chain_id),
        None if ty == TxType::Legacy => {
            let derived = eip155_chain_id(v, limit).map_err(|err| reader.context().reject(V, err))?;
            trace!(target: "tx_decode", "Derived chain ID {derived:?} from v = {v}");
            derived
        }
        None => return Err(reader.context().missing(CHAIN_ID)),
    };
    let to = reader.address(TO)?.map_or(TxKind::Create, TxKind::Call);

    Ok(TransactionBase {
        inclusion: decode_inclusion(reader)?,
        chain_id,
        from: reader.required_address(FROM)?,
        gas: reader.required_quantity(GAS)?,
        hash: reader.required_hash(HASH)?,
        input: reader.required_bytes(INPUT)?,
        nonce: reader.required_index(NONCE)?,
        r: reader.required_quantity(R)?,
        s: reader.required_quantity(S)?,
        v,
        to,
        value: reader.required_quantity(VALUE)?,
    })
}

fn decode_access_list(reader: &FieldReader<'_>) -> DecodeResult<AccessList> {
    let value = reader.require(ACCESS_LIST, reader.field(ACCESS_LIST).value())?;
    AccessList::decode(value, reader.context())
}

/// Recovers the chain ID from an [EIP-155] replay-protected `v`, narrowed under `limit`. Returns
/// `None` for pre-EIP-155 signatures (`v` below 35).
///
/// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
fn eip155_chain_id(v: U256, limit: IndexLimit) -> QuantityResult<Option<u64>> {
    match v.checked_sub(U256::from(35)) {
        Some(offset) => limit.narrow(offset / U256::from(2)).map(Some),
        None => Ok(None),
    }
}
