#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod errors;
pub use errors::{DecodeError, DecodeResult, FieldContext, ShapeError};

mod config;
pub use config::{DecodeConfig, FeeOrdering, IndexLimit};

mod fields;
pub use fields::{Field, RawFields};

mod tx_type;
pub use tx_type::TxType;

mod access_list;
pub use access_list::{AccessList, AccessListItem};

mod fees;
pub use fees::FeeValues;

mod transaction;
pub use transaction::{
    classify, required_fields, validate, BlockInclusion, Transaction, TransactionBase, TxEip1559,
    TxEip2930, TxLegacy, TxShape,
};

mod request;
pub use request::{RequestFees, TransactionRequest};

mod log;
pub use log::Log;

mod receipt;
pub use receipt::{ReceiptStatus, TransactionReceipt};

mod correlator;
pub use correlator::{correlate, ReceiptCorrelator};

mod decoder;
pub use decoder::{decode_receipt, decode_request, decode_transaction, Decoder};

pub use txwire_quantity::{QuantityError, QuantityKind};

#[cfg(test)]
mod test_utils;
