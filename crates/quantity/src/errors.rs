//! Errors for the `txwire-quantity` crate.

use alloc::string::String;
use thiserror::Error;

/// A [Result] type alias where the error is [QuantityError].
pub type QuantityResult<T> = Result<T, QuantityError>;

/// An error raised while normalizing a wire scalar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input has no digits, or contains characters outside of `[0-9a-fA-F]` after the
    /// optional `0x` prefix.
    #[error("Malformed hex string {0:?}")]
    MalformedHex(String),
    /// The decoded value does not fit the target kind.
    #[error("Value {input} overflows {kind}")]
    Overflow {
        /// Name of the target kind.
        kind: &'static str,
        /// The rejected wire value.
        input: String,
    },
    /// A fixed-length byte sequence decoded to the wrong number of bytes.
    #[error("Invalid byte length. Expected {expected}, got {got}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Decoded length in bytes.
        got: usize,
    },
}
