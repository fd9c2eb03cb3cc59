//! Fee shapes.

use alloy_primitives::U256;

/// The pricing fields of a fully formed transaction. Exactly one shape is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeValues {
    /// A single gas price, used by legacy and access list transactions.
    Legacy {
        /// Price per unit of gas.
        gas_price: U256,
    },
    /// [EIP-1559] fee-market pricing.
    ///
    /// [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559
    FeeMarket {
        /// Maximum total fee per unit of gas.
        max_fee_per_gas: U256,
        /// Maximum priority fee per unit of gas.
        max_priority_fee_per_gas: U256,
    },
}

impl FeeValues {
    /// Returns `true` for the fee-market shape.
    pub const fn is_fee_market(&self) -> bool {
        matches!(self, Self::FeeMarket { .. })
    }

    /// Returns the most the sender pays per unit of gas: the gas price, or the fee cap.
    pub const fn max_fee_per_gas(&self) -> U256 {
        match self {
            Self::Legacy { gas_price } => *gas_price,
            Self::FeeMarket { max_fee_per_gas, .. } => *max_fee_per_gas,
        }
    }

    /// Returns the effective gas price paid at the given base fee, or `None` if the fee cap is
    /// below the base fee. Legacy prices are paid in full.
    pub fn effective_gas_price(&self, base_fee: U256) -> Option<U256> {
        match self {
            Self::Legacy { gas_price } => (*gas_price >= base_fee).then_some(*gas_price),
            Self::FeeMarket { max_fee_per_gas, max_priority_fee_per_gas } => {
                let headroom = max_fee_per_gas.checked_sub(base_fee)?;
                Some(base_fee + headroom.min(*max_priority_fee_per_gas))
            }
        }
    }
}
