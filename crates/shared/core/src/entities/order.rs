use serde::{Deserialize, Serialize};

use super::OrderSide;
use crate::instruments::Symbol;
use crate::values::{Currency, Quantity};

/// One hop of a conversion path: which market, which direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderSpec {
    pub symbol: Symbol,
    pub side: OrderSide,
}

impl OrderSpec {
    pub fn new(symbol: Symbol, side: OrderSide) -> Self {
        Self { symbol, side }
    }

    /// Order spec for leaving `holding` through `symbol`: SELL when holding the base
    pub fn leaving(holding: &Currency, symbol: Symbol) -> Self {
        let side = if &symbol.base == holding {
            OrderSide::Sell
        } else {
            OrderSide::Buy
        };
        Self { symbol, side }
    }

    /// Currency spent by this order
    pub fn source_currency(&self) -> &Currency {
        match self.side {
            OrderSide::Sell => &self.symbol.base,
            OrderSide::Buy => &self.symbol.quote,
        }
    }

    /// Currency received by this order
    pub fn target_currency(&self) -> &Currency {
        match self.side {
            OrderSide::Sell => &self.symbol.quote,
            OrderSide::Buy => &self.symbol.base,
        }
    }
}

/// A market order ready for submission
///
/// `quantity` is a base-asset quantity for both sides and sits on the
/// symbol's quantity grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub spec: OrderSpec,
    pub quantity: Quantity,
}

impl Order {
    pub fn new(spec: OrderSpec, quantity: Quantity) -> Self {
        Self { spec, quantity }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.spec.symbol
    }

    pub fn side(&self) -> OrderSide {
        self.spec.side
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.spec.side, self.quantity, self.spec.symbol)
    }
}
