//! Construction-time transaction requests.
//!
//! A request is the sparse counterpart of a [Transaction](crate::Transaction): only the sender is
//! required, and every other field is left for the execution environment to fill in. Declared
//! types still constrain which fields may be present.

use crate::{
    fields::*, AccessList, DecodeConfig, DecodeResult, FieldContext, RawFields, ShapeError,
    TxShape, TxType,
};
use alloy_primitives::{Address, Bytes, U256};
use tracing::{debug, warn};
use txwire_quantity::{encode_bytes, encode_index, encode_quantity};

/// The pricing fields of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestFees {
    /// No pricing fields. The execution environment prices the transaction.
    #[default]
    Unspecified,
    /// A single gas price.
    Legacy {
        /// Price per unit of gas.
        gas_price: U256,
    },
    /// Fee-market pricing with one or both fields present.
    FeeMarket {
        /// Maximum total fee per unit of gas.
        max_fee_per_gas: Option<U256>,
        /// Maximum priority fee per unit of gas.
        max_priority_fee_per_gas: Option<U256>,
    },
}

/// A transaction request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TransactionRequest {
    /// Sender.
    pub from: Address,
    /// Recipient. `None` deploys a contract.
    pub to: Option<Address>,
    /// Call data or contract init code.
    pub data: Option<Bytes>,
    /// Gas limit.
    pub gas: Option<U256>,
    /// Sender nonce.
    pub nonce: Option<u64>,
    /// Value transferred, in wei.
    pub value: Option<U256>,
    /// Chain ID.
    pub chain_id: Option<u64>,
    /// Pricing fields.
    pub fees: RequestFees,
    /// Pre-declared accounts and storage slots.
    pub access_list: Option<AccessList>,
    /// The declared type. `None` for untyped requests.
    pub tx_type: Option<TxType>,
}

impl TransactionRequest {
    /// Creates an untyped request from `from` with every other field unset.
    pub fn new(from: Address) -> Self {
        Self { from, ..Default::default() }
    }

    /// Returns the declared type, or the variant implied by the present fields.
    pub const fn inferred_type(&self) -> TxType {
        if let Some(ty) = self.tx_type {
            return ty;
        }
        match (&self.fees, &self.access_list) {
            (RequestFees::FeeMarket { .. }, _) => TxType::Eip1559,
            (_, Some(_)) => TxType::Eip2930,
            _ => TxType::Legacy,
        }
    }

    /// Encodes the request into wire fields. Unset fields are omitted and the payload is sent
    /// under `data`.
    pub fn to_fields(&self) -> RawFields {
        let mut fields = RawFields::new();
        if let Some(ty) = self.tx_type {
            fields.insert(TYPE, ty.to_tag());
        }
        fields.insert(FROM, encode_bytes(self.from));
        if let Some(to) = self.to {
            fields.insert(TO, encode_bytes(to));
        }
        if let Some(data) = &self.data {
            fields.insert(DATA, encode_bytes(data));
        }
        if let Some(gas) = self.gas {
            fields.insert(GAS, encode_quantity(gas));
        }
        if let Some(nonce) = self.nonce {
            fields.insert(NONCE, encode_index(nonce));
        }
        if let Some(value) = self.value {
            fields.insert(VALUE, encode_quantity(value));
        }
        if let Some(chain_id) = self.chain_id {
            fields.insert(CHAIN_ID, encode_index(chain_id));
        }
        match self.fees {
            RequestFees::Unspecified => {}
            RequestFees::Legacy { gas_price } => {
                fields.insert(GAS_PRICE, encode_quantity(gas_price));
            }
            RequestFees::FeeMarket { max_fee_per_gas, max_priority_fee_per_gas } => {
                if let Some(max_fee_per_gas) = max_fee_per_gas {
                    fields.insert(MAX_FEE_PER_GAS, encode_quantity(max_fee_per_gas));
                }
                if let Some(max_priority_fee_per_gas) = max_priority_fee_per_gas {
                    fields.insert(
                        MAX_PRIORITY_FEE_PER_GAS,
                        encode_quantity(max_priority_fee_per_gas),
                    );
                }
            }
        }
        if let Some(access_list) = &self.access_list {
            fields.insert(ACCESS_LIST, access_list.to_value());
        }
        fields
    }
}

/// Decodes a raw request field set with the relaxed request rules.
pub(crate) fn decode_request(
    raw: &RawFields,
    config: &DecodeConfig,
) -> DecodeResult<TransactionRequest> {
    let shape = TxShape::inspect(raw)?;
    // A declared type is checked against the present fields. Untyped requests only reject
    // conflicting fee shapes.
    shape.classify()?;

    let context = FieldContext::Request;
    let reader = FieldReader::new(raw.as_map(), context, config.index_limit);

    let data = match (reader.bytes(DATA)?, reader.bytes(INPUT)?) {
        (Some(data), Some(input)) if data != input => {
            warn!(target: "tx_request", "Request carries differing `data` and `input`");
            return Err(context.malformed(ShapeError::ConflictingInput));
        }
        (data, input) => data.or(input),
    };

    let fees = match (
        reader.quantity(GAS_PRICE)?,
        reader.quantity(MAX_FEE_PER_GAS)?,
        reader.quantity(MAX_PRIORITY_FEE_PER_GAS)?,
    ) {
        (Some(gas_price), _, _) => RequestFees::Legacy { gas_price },
        (None, None, None) => RequestFees::Unspecified,
        (None, max_fee_per_gas, max_priority_fee_per_gas) => {
            if let (Some(max_fee), Some(max_priority_fee)) =
                (max_fee_per_gas, max_priority_fee_per_gas)
            {
                config
                    .fee_ordering
                    .check(max_fee, max_priority_fee)
                    .map_err(|err| context.malformed(err))?;
            }
            RequestFees::FeeMarket { max_fee_per_gas, max_priority_fee_per_gas }
        }
    };

    let access_list = reader
        .field(ACCESS_LIST)
        .value()
        .map(|value| AccessList::decode(value, context))
        .transpose()?;

    let request = TransactionRequest {
        from: reader.required_address(FROM)?,
        to: reader.address(TO)?,
        data,
        gas: reader.quantity(GAS)?,
        nonce: reader.index(NONCE)?,
        value: reader.quantity(VALUE)?,
        chain_id: reader.index(CHAIN_ID)?,
        fees,
        access_list,
        tx_type: shape.declared,
    };

    debug!(
        target: "tx_request",
        "Decoded request from {} (declared type: {:?})",
        request.from,
        request.tx_type
    );
    Ok(request)
}
