use rust_decimal::{Decimal, RoundingStrategy};

/// Precision of values returned by the statistics functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericContext {
    /// Decimal places kept on returned values
    pub scale: u32,
    pub rounding: RoundingStrategy,
}

fn half_up() -> RoundingStrategy {
    RoundingStrategy::MidpointAwayFromZero
}

impl NumericContext {
    pub const DEFAULT_SCALE: u32 = 16;

    pub fn new(scale: u32) -> Self {
        Self {
            scale,
            rounding: half_up(),
        }
    }

    /// Round a final result to this context, stripping trailing zeros
    pub fn round(&self, value: Decimal) -> Decimal {
        value
            .round_dp_with_strategy(self.scale, self.rounding)
            .normalize()
    }
}

impl Default for NumericContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCALE)
    }
}
