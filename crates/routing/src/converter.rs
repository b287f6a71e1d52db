use std::sync::Arc;

use meridian_core::{Currency, Quantity};

use crate::{PathCompiler, Result};

/// Values a quantity of one currency in another by compiling the
/// conversion and reading what the last order would yield
#[derive(Clone)]
pub struct PriceConverter {
    compiler: Arc<PathCompiler>,
}

impl PriceConverter {
    pub fn new(compiler: Arc<PathCompiler>) -> Self {
        Self { compiler }
    }

    /// Worth of `quantity` units of `base` expressed in `quote`
    pub async fn relative_value(&self, base: &Currency, quote: &Currency, quantity: Quantity) -> Result<Quantity> {
        if base == quote {
            return Ok(quantity);
        }
        let orders = self.compiler.compile(base, quote, quantity).await?;
        match orders.last() {
            Some(last) => self.compiler.order_target_quantity(last).await,
            None => Ok(quantity),
        }
    }
}
