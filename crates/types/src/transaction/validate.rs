//! Required-field validation, run after classification.

use crate::{fields::*, DecodeResult, FieldContext, RawFields, TxType};

/// Fields every variant requires. `to` and the block inclusion fields are nullable and never
/// required.
const BASE_REQUIRED: [&str; 9] = [FROM, GAS, HASH, INPUT, NONCE, R, S, V, VALUE];

const LEGACY_REQUIRED: &[&str] = &[GAS_PRICE];
const EIP2930_REQUIRED: &[&str] = &[CHAIN_ID, GAS_PRICE, ACCESS_LIST];
const EIP1559_REQUIRED: &[&str] =
    &[CHAIN_ID, MAX_FEE_PER_GAS, MAX_PRIORITY_FEE_PER_GAS, ACCESS_LIST];

/// Returns the wire fields that must be present and non-null for a transaction of type `ty`.
pub fn required_fields(ty: TxType) -> impl Iterator<Item = &'static str> {
    let variant = match ty {
        TxType::Legacy => LEGACY_REQUIRED,
        TxType::Eip2930 => EIP2930_REQUIRED,
        TxType::Eip1559 => EIP1559_REQUIRED,
    };
    BASE_REQUIRED.into_iter().chain(variant.iter().copied())
}

/// Checks that every field required by `ty` is present and non-null.
///
/// ## Returns
/// - `Ok(())` if all required fields are provided.
/// - `Err(DecodeError::MissingField)` naming the first missing field and the variant.
pub fn validate(raw: &RawFields, ty: TxType) -> DecodeResult<()> {
    match required_fields(ty).find(|field| !raw.get(field).is_present()) {
        Some(field) => Err(FieldContext::Transaction(ty).missing(field)),
        None => Ok(()),
    }
}
