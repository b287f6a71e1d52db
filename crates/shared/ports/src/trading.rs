use async_trait::async_trait;
use meridian_core::{Asset, OrderSide, Quantity, Symbol};

use crate::ProviderResult;

/// Account balances
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Every asset of the account, zero balances included
    async fn account_assets(&self) -> ProviderResult<Vec<Asset>>;
}

/// Destination for market orders
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// Place a market order for `quantity` units of the symbol's base
    async fn submit(&self, symbol: &Symbol, side: OrderSide, quantity: Quantity) -> ProviderResult<()>;

    fn name(&self) -> &str {
        "OrderSink"
    }
}
