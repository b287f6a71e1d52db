use rust_decimal::Decimal;

use super::{DecimalQuantizer, QuantizeError, Symbol};

/// A symbol together with the grids the exchange enforces on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub symbol: Symbol,
    /// Lot size grid, applied to base-asset quantities
    pub quantity_quantizer: DecimalQuantizer,
    /// Tick size grid, applied to prices
    pub price_quantizer: DecimalQuantizer,
}

impl SymbolInfo {
    pub fn new(
        symbol: Symbol,
        quantity_quantizer: DecimalQuantizer,
        price_quantizer: DecimalQuantizer,
    ) -> Self {
        Self {
            symbol,
            quantity_quantizer,
            price_quantizer,
        }
    }

    /// Build from raw `(min, max, step)` filters as exchanges publish them
    pub fn from_filters(
        symbol: Symbol,
        quantity: (Decimal, Decimal, Decimal),
        price: (Decimal, Decimal, Decimal),
    ) -> Result<Self, QuantizeError> {
        Ok(Self {
            symbol,
            quantity_quantizer: DecimalQuantizer::new(quantity.0, quantity.1, quantity.2)?,
            price_quantizer: DecimalQuantizer::new(price.0, price.1, price.2)?,
        })
    }

    /// Decimal places of the quantity step, used to size BUY orders
    pub fn quantity_step_scale(&self) -> u32 {
        self.quantity_quantizer.step_scale()
    }
}
