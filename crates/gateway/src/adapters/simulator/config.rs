use meridian_core::{Currency, DecimalQuantizer, Price, QuantizeError, Quantity, Symbol, SymbolInfo};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::source::{ListedSymbol, SymbolStatus};

/// Simulated venue: listed markets and the starting account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub symbols: Vec<SimulatedSymbol>,

    #[serde(default)]
    pub balances: Vec<SimulatedBalance>,

    /// Fraction of the received amount kept by the venue on each fill
    #[serde(default)]
    pub fee_rate: Decimal,
}

impl SimulationConfig {
    /// Three USDT/BTC/ETH markets and a small USDT balance
    pub fn with_default_markets() -> Self {
        let coarse = GridConfig::new(dec!(0.0001), dec!(9000), dec!(0.0001));
        let cents = GridConfig::new(dec!(0.01), dec!(1000000), dec!(0.01));
        Self {
            symbols: vec![
                SimulatedSymbol::new("BTC", "USDT", coarse, cents, dec!(30000)).with_drift(dec!(1)),
                SimulatedSymbol::new("ETH", "USDT", coarse, cents, dec!(1500)).with_drift(dec!(0.1)),
                SimulatedSymbol::new(
                    "ETH",
                    "BTC",
                    GridConfig::new(dec!(0.001), dec!(100000), dec!(0.001)),
                    GridConfig::new(dec!(0.000001), dec!(1), dec!(0.000001)),
                    dec!(0.05),
                ),
            ],
            balances: vec![SimulatedBalance {
                currency: Currency::new("USDT"),
                balance: dec!(1000),
            }],
            fee_rate: Decimal::ZERO,
        }
    }
}

/// Raw `(min, max, step)` exchange filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

impl GridConfig {
    pub fn new(min: Decimal, max: Decimal, step: Decimal) -> Self {
        Self { min, max, step }
    }

    pub fn quantizer(&self) -> Result<DecimalQuantizer, QuantizeError> {
        DecimalQuantizer::new(self.min, self.max, self.step)
    }
}

/// One listed market and its price line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedSymbol {
    pub base: Currency,
    pub quote: Currency,

    #[serde(default)]
    pub status: SymbolStatus,

    pub quantity: GridConfig,
    pub price: GridConfig,

    /// Price at the moment the exchange is created
    pub start_price: Price,

    /// Price change per elapsed minute, may be negative
    #[serde(default)]
    pub drift_per_minute: Decimal,
}

impl SimulatedSymbol {
    pub fn new(
        base: impl Into<Currency>,
        quote: impl Into<Currency>,
        quantity: GridConfig,
        price: GridConfig,
        start_price: Price,
    ) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            status: SymbolStatus::Trading,
            quantity,
            price,
            start_price,
            drift_per_minute: Decimal::ZERO,
        }
    }

    pub fn with_drift(mut self, drift_per_minute: Decimal) -> Self {
        self.drift_per_minute = drift_per_minute;
        self
    }

    pub fn with_status(mut self, status: SymbolStatus) -> Self {
        self.status = status;
        self
    }

    pub fn symbol(&self) -> Symbol {
        Symbol::new(self.base.clone(), self.quote.clone())
    }

    pub(crate) fn listed(&self) -> Result<ListedSymbol, QuantizeError> {
        Ok(ListedSymbol {
            info: SymbolInfo::new(self.symbol(), self.quantity.quantizer()?, self.price.quantizer()?),
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedBalance {
    pub currency: Currency,
    pub balance: Quantity,
}
