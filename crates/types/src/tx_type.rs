//! The transaction type discriminator.

use alloc::string::String;
use txwire_quantity::{decode_index, encode_index};

/// Ethereum transaction variants as specified in EIPs [2718], [2930] and [1559].
///
/// [2718]: https://eips.ethereum.org/EIPS/eip-2718
/// [2930]: https://eips.ethereum.org/EIPS/eip-2930
/// [1559]: https://eips.ethereum.org/EIPS/eip-1559
#[repr(u8)]
#[derive(
    derive_more::Display, Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TxType {
    /// Legacy transaction, priced by a single `gasPrice`.
    #[default]
    #[display("legacy")]
    Legacy = 0,
    /// Access list transaction: a legacy fee plus an access list.
    #[display("eip2930")]
    Eip2930 = 1,
    /// Fee-market transaction: a fee cap, a priority fee cap and an access list.
    #[display("eip1559")]
    Eip1559 = 2,
}

impl TxType {
    /// Parses a wire `type` tag.
    ///
    /// Both spellings seen at the RPC boundary are accepted: variant names (`"eip1559"`) and
    /// EIP-2718 type bytes as hex quantities (`"0x2"`, `"0x02"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "legacy" => Some(Self::Legacy),
            "eip2930" => Some(Self::Eip2930),
            "eip1559" => Some(Self::Eip1559),
            _ => decode_index(tag).ok().and_then(|ty| u8::try_from(ty).ok())?.try_into().ok(),
        }
    }

    /// Returns the EIP-2718 hex tag, e.g. `"0x2"`.
    pub fn to_tag(self) -> String {
        encode_index(self as u64)
    }

    /// Returns `true` if this variant carries an access list.
    pub const fn has_access_list(self) -> bool {
        matches!(self, Self::Eip2930 | Self::Eip1559)
    }

    /// Returns `true` if this variant is priced by the fee market.
    pub const fn is_fee_market(self) -> bool {
        matches!(self, Self::Eip1559)
    }
}

impl TryFrom<u8> for TxType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::Eip2930),
            2 => Ok(Self::Eip1559),
            other => Err(other),
        }
    }
}

impl From<TxType> for u8 {
    fn from(ty: TxType) -> Self {
        ty as Self
    }
}
