#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod errors;
pub use errors::{QuantityError, QuantityResult};

mod kind;
pub use kind::{Index, Quantity, QuantityKind, SafeIndex, MAX_SAFE_INTEGER};

mod scalar;
pub use scalar::{
    canonicalize, decode, decode_index, decode_quantity, decode_safe_index, encode, encode_index,
    encode_quantity,
};

mod bytes;
pub use bytes::{
    decode_address, decode_bloom, decode_bytes, decode_fixed, decode_hash, encode_bytes,
};
