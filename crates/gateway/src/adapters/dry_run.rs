use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use meridian_core::{OrderSide, Quantity, Symbol};
use meridian_ports::{OrderSink, ProviderResult, SymbolInfoProvider};

use crate::error::GatewayError;

/// Order sink that checks orders against the symbol table and only logs them
pub struct DryRunOrderSink {
    symbols: Arc<dyn SymbolInfoProvider>,
    accepted: AtomicU64,
}

impl DryRunOrderSink {
    pub fn new(symbols: Arc<dyn SymbolInfoProvider>) -> Self {
        Self {
            symbols,
            accepted: AtomicU64::new(0),
        }
    }

    /// Orders that passed validation so far
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl OrderSink for DryRunOrderSink {
    async fn submit(
        &self,
        symbol: &Symbol,
        side: OrderSide,
        quantity: Quantity,
    ) -> ProviderResult<()> {
        let info = self
            .symbols
            .symbol_info(symbol)
            .await?
            .ok_or_else(|| GatewayError::UnknownSymbol(symbol.name()))?;
        if !info.quantity_quantizer.is_on_grid(quantity) {
            return Err(GatewayError::OffGrid {
                symbol: symbol.name(),
                quantity,
            }
            .into());
        }

        self.accepted.fetch_add(1, Ordering::Relaxed);
        log::info!("[DryRun] Would place {side} {quantity} {symbol}");
        Ok(())
    }

    fn name(&self) -> &str {
        "DryRun"
    }
}
