//! Variant classification.
//!
//! Classification only looks at which discriminating fields are present. Field values are not
//! decoded here; that happens after [validate](crate::validate) has checked the variant's
//! required fields.

use crate::{fields::*, DecodeError, DecodeResult, RawFields, ShapeError, TxType};
use alloc::string::ToString;
use serde_json::Value;
use tracing::{debug, warn};

/// Presence summary of the fields that discriminate transaction variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxShape {
    /// The explicitly declared `type`, if any.
    pub declared: Option<TxType>,
    /// `gasPrice` is present.
    pub gas_price: bool,
    /// `maxFeePerGas` is present.
    pub max_fee_per_gas: bool,
    /// `maxPriorityFeePerGas` is present.
    pub max_priority_fee_per_gas: bool,
    /// `accessList` is present.
    pub access_list: bool,
}

impl TxShape {
    /// Inspects a raw field set. Fails only if a `type` is present but not recognized.
    pub fn inspect(raw: &RawFields) -> DecodeResult<Self> {
        let declared = match raw.get(TYPE).value() {
            None => None,
            Some(Value::String(tag)) => {
                Some(TxType::from_tag(tag).ok_or_else(|| unknown_type(tag.clone()))?)
            }
            Some(other) => return Err(unknown_type(other.to_string())),
        };

        Ok(Self {
            declared,
            gas_price: raw.get(GAS_PRICE).is_present(),
            max_fee_per_gas: raw.get(MAX_FEE_PER_GAS).is_present(),
            max_priority_fee_per_gas: raw.get(MAX_PRIORITY_FEE_PER_GAS).is_present(),
            access_list: raw.get(ACCESS_LIST).is_present(),
        })
    }

    /// Returns `true` if either fee-market field is present.
    pub const fn has_fee_market_fields(&self) -> bool {
        self.max_fee_per_gas || self.max_priority_fee_per_gas
    }

    /// Returns the first present field that `ty` forbids.
    pub const fn forbidden_field(&self, ty: TxType) -> Option<&'static str> {
        match ty {
            TxType::Legacy if self.access_list => Some(ACCESS_LIST),
            TxType::Legacy | TxType::Eip2930 if self.max_fee_per_gas => Some(MAX_FEE_PER_GAS),
            TxType::Legacy | TxType::Eip2930 if self.max_priority_fee_per_gas => {
                Some(MAX_PRIORITY_FEE_PER_GAS)
            }
            TxType::Eip1559 if self.gas_price => Some(GAS_PRICE),
            _ => None,
        }
    }

    /// Assigns a variant to this shape.
    ///
    /// 1. `gasPrice` together with any fee-market field is malformed, whatever else is present.
    /// 2. A declared `type` is authoritative, but a present field it forbids is malformed.
    /// 3. Otherwise fee-market fields imply `eip1559`, an access list alone implies `eip2930`, and
    ///    neither implies `legacy`.
    pub fn classify(&self) -> DecodeResult<TxType> {
        if self.gas_price && self.has_fee_market_fields() {
            warn!(
                target: "tx_classify",
                "Rejecting field set with both legacy and fee-market pricing"
            );
            return Err(DecodeError::MalformedTransaction(ShapeError::ConflictingFees));
        }

        if let Some(declared) = self.declared {
            if let Some(field) = self.forbidden_field(declared) {
                warn!(
                    target: "tx_classify",
                    "Declared type {declared} contradicts present field `{field}`"
                );
                return Err(DecodeError::MalformedTransaction(ShapeError::TypeShapeMismatch {
                    declared,
                    field,
                }));
            }
            return Ok(declared);
        }

        let inferred = if self.has_fee_market_fields() {
            TxType::Eip1559
        } else if self.access_list {
            TxType::Eip2930
        } else {
            TxType::Legacy
        };
        debug!(target: "tx_classify", "Inferred type {inferred} for untyped field set");
        Ok(inferred)
    }
}

/// Classifies a raw field set. See [TxShape::classify].
pub fn classify(raw: &RawFields) -> DecodeResult<TxType> {
    TxShape::inspect(raw)?.classify()
}

fn unknown_type(tag: alloc::string::String) -> DecodeError {
    warn!(target: "tx_classify", "Unrecognized transaction type {tag}");
    DecodeError::MalformedTransaction(ShapeError::UnknownType(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        eip1559_fields, eip2930_fields, legacy_fields, CollectingLayer, TraceStorage,
    };
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn shape(declared: Option<TxType>, flags: [bool; 4]) -> TxShape {
        let [gas_price, max_fee_per_gas, max_priority_fee_per_gas, access_list] = flags;
        TxShape { declared, gas_price, max_fee_per_gas, max_priority_fee_per_gas, access_list }
    }

    #[rstest]
    #[case::bare(None, [false, false, false, false], TxType::Legacy)]
    #[case::gas_price(None, [true, false, false, false], TxType::Legacy)]
    #[case::access_list(None, [true, false, false, true], TxType::Eip2930)]
    #[case::access_list_only(None, [false, false, false, true], TxType::Eip2930)]
    #[case::fee_market(None, [false, true, true, true], TxType::Eip1559)]
    #[case::fee_cap_only(None, [false, true, false, false], TxType::Eip1559)]
    #[case::tip_only(None, [false, false, true, false], TxType::Eip1559)]
    #[case::declared_legacy(Some(TxType::Legacy), [true, false, false, false], TxType::Legacy)]
    #[case::declared_eip2930(Some(TxType::Eip2930), [true, false, false, true], TxType::Eip2930)]
    #[case::declared_eip1559(Some(TxType::Eip1559), [false, true, true, true], TxType::Eip1559)]
    // Missing required fields are left to validation.
    #[case::declared_eip2930_bare(
        Some(TxType::Eip2930),
        [false, false, false, false],
        TxType::Eip2930
    )]
    fn test_classify(
        #[case] declared: Option<TxType>,
        #[case] flags: [bool; 4],
        #[case] expected: TxType,
    ) {
        assert_eq!(shape(declared, flags).classify().unwrap(), expected);
    }

    #[rstest]
    #[case::legacy_with_access_list(TxType::Legacy, [true, false, false, true], ACCESS_LIST)]
    #[case::legacy_with_fee_cap(TxType::Legacy, [false, true, false, false], MAX_FEE_PER_GAS)]
    #[case::eip2930_with_tip(TxType::Eip2930, [false, false, true, true], MAX_PRIORITY_FEE_PER_GAS)]
    #[case::eip1559_with_gas_price(TxType::Eip1559, [true, false, false, true], GAS_PRICE)]
    fn test_classify_declared_mismatch(
        #[case] declared: TxType,
        #[case] flags: [bool; 4],
        #[case] field: &'static str,
    ) {
        assert_eq!(
            shape(Some(declared), flags).classify(),
            Err(DecodeError::MalformedTransaction(ShapeError::TypeShapeMismatch {
                declared,
                field,
            }))
        );
    }

    #[test]
    fn test_classify_fixtures() {
        assert_eq!(classify(&legacy_fields()).unwrap(), TxType::Legacy);
        assert_eq!(classify(&eip2930_fields()).unwrap(), TxType::Eip2930);
        assert_eq!(classify(&eip1559_fields()).unwrap(), TxType::Eip1559);

        let mut untyped = eip2930_fields();
        untyped.remove(TYPE);
        assert_eq!(classify(&untyped).unwrap(), TxType::Eip2930);

        let mut untyped = eip1559_fields();
        untyped.remove(TYPE);
        assert_eq!(classify(&untyped).unwrap(), TxType::Eip1559);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let mut raw = legacy_fields();
        raw.insert(ACCESS_LIST, Value::Null);
        raw.insert(MAX_FEE_PER_GAS, Value::Null);
        raw.insert(TYPE, Value::Null);
        assert_eq!(classify(&raw).unwrap(), TxType::Legacy);
    }

    #[rstest]
    #[case::blob(json!("0x3"))]
    #[case::deposit(json!("0x7e"))]
    #[case::name(json!("eip4844"))]
    #[case::number(json!(2))]
    fn test_classify_unknown_type(#[case] tag: Value) {
        let mut raw = eip1559_fields();
        raw.insert(TYPE, tag);
        assert!(matches!(
            classify(&raw),
            Err(DecodeError::MalformedTransaction(ShapeError::UnknownType(_)))
        ));
    }

    #[test]
    fn test_conflicting_fees_are_logged() {
        let storage = TraceStorage::default();
        let subscriber = tracing_subscriber::registry().with(CollectingLayer::new(storage.clone()));

        let mut raw = eip1559_fields();
        raw.insert(GAS_PRICE, "0x1");
        let result = tracing::subscriber::with_default(subscriber, || classify(&raw));

        assert_eq!(result, Err(DecodeError::MalformedTransaction(ShapeError::ConflictingFees)));
        let warnings = storage.get_by_level(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("both legacy and fee-market pricing"));
    }

    fn arb_shape() -> impl Strategy<Value = TxShape> {
        (
            prop::option::of(prop_oneof![
                Just(TxType::Legacy),
                Just(TxType::Eip2930),
                Just(TxType::Eip1559)
            ]),
            any::<[bool; 4]>(),
        )
            .prop_map(|(declared, flags)| shape(declared, flags))
    }

    proptest! {
        #[test]
        fn prop_gas_price_and_fee_cap_always_conflict(mut shape in arb_shape()) {
            shape.gas_price = true;
            shape.max_fee_per_gas = true;
            prop_assert_eq!(
                shape.classify(),
                Err(DecodeError::MalformedTransaction(ShapeError::ConflictingFees))
            );
        }

        #[test]
        fn prop_access_list_without_fee_market_is_eip2930(gas_price in any::<bool>()) {
            let shape = shape(None, [gas_price, false, false, true]);
            prop_assert_eq!(shape.classify().unwrap(), TxType::Eip2930);
        }

        #[test]
        fn prop_classification_is_deterministic(shape in arb_shape()) {
            prop_assert_eq!(shape.classify(), shape.classify());
        }

        #[test]
        fn prop_classified_shape_has_no_forbidden_fields(shape in arb_shape()) {
            if let Ok(ty) = shape.classify() {
                prop_assert_eq!(shape.forbidden_field(ty), None);
            }
        }
    }
}
