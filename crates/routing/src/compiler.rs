use std::sync::Arc;

use meridian_core::{
    Currency, Order, OrderSide, OrderSpec, Price, Quantity, Rounding, Symbol, SymbolInfo,
    Timestamp,
};
use meridian_ports::{Clock, PriceProvider, SymbolInfoProvider};
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::Mutex;

use crate::{PathStep, Result, RoutingError, ShortestPathsResolver, TradingPaths};

struct Snapshot {
    resolved_at: Timestamp,
    paths: Arc<TradingPaths>,
}

/// Compiles currency-to-currency conversions into exchange orders
///
/// Keeps the latest [`TradingPaths`] snapshot and re-resolves it whenever
/// the symbol provider reports a newer symbol table. The freshness check
/// and the swap happen under one lock, so concurrent callers never resolve
/// twice for the same version; readers keep whatever `Arc` they obtained.
pub struct PathCompiler {
    symbols: Arc<dyn SymbolInfoProvider>,
    prices: Arc<dyn PriceProvider>,
    clock: Arc<dyn Clock>,
    resolver: ShortestPathsResolver,
    snapshot: Mutex<Option<Snapshot>>,
}

impl PathCompiler {
    pub fn new(
        symbols: Arc<dyn SymbolInfoProvider>,
        prices: Arc<dyn PriceProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            symbols,
            prices,
            clock,
            resolver: ShortestPathsResolver::new(),
            snapshot: Mutex::new(None),
        }
    }

    /// Current path table, re-resolved if the symbol universe changed
    pub async fn trading_paths(&self) -> Result<Arc<TradingPaths>> {
        let mut snapshot = self.snapshot.lock().await;
        if let Some(current) = snapshot.as_ref() {
            if !self.symbols.is_updated_since(current.resolved_at).await? {
                return Ok(Arc::clone(&current.paths));
            }
        }

        let resolved_at = self.clock.now();
        let symbols: Vec<Symbol> = self
            .symbols
            .all_symbols()
            .await?
            .into_iter()
            .map(|info| info.symbol)
            .collect();
        let paths = Arc::new(self.resolver.resolve(&symbols));
        log::info!(
            "[Compiler] Trading paths resolved: {} currencies, {} symbols",
            paths.currency_count(),
            symbols.len()
        );

        *snapshot = Some(Snapshot {
            resolved_at,
            paths: Arc::clone(&paths),
        });
        Ok(paths)
    }

    /// Hop-by-hop order specs converting `source` into `target`.
    ///
    /// Empty when both are the same currency.
    pub async fn find_order_specs(&self, source: &Currency, target: &Currency) -> Result<Vec<OrderSpec>> {
        if source == target {
            return Ok(Vec::new());
        }
        let paths = self.trading_paths().await?;
        let no_path = || RoutingError::NoPath {
            from: source.clone(),
            to: target.clone(),
        };

        let hops = paths.path_length(source, target).ok_or_else(no_path)?;
        let mut specs = Vec::with_capacity(hops);
        let mut current = source.clone();
        while &current != target {
            if specs.len() >= hops {
                return Err(no_path());
            }
            let step: &PathStep = paths.next_step(&current, target).ok_or_else(no_path)?;
            let next = step.next_currency(&current).ok_or_else(no_path)?.clone();
            specs.push(OrderSpec::leaving(&current, step.symbol.clone()));
            current = next;
        }
        Ok(specs)
    }

    /// Orders converting `quantity` of `source` into `target`.
    ///
    /// Any hop whose quantity falls off its grid fails the whole chain.
    pub async fn compile(&self, source: &Currency, target: &Currency, quantity: Quantity) -> Result<Vec<Order>> {
        let specs = self.find_order_specs(source, target).await?;
        let mut orders = Vec::with_capacity(specs.len());
        let mut held = quantity;

        for spec in specs {
            let (info, price) = self.market(&spec.symbol).await?;
            let order_quantity = match spec.side {
                OrderSide::Sell => held,
                OrderSide::Buy => {
                    let ask = info.price_quantizer.quantize(price, Rounding::Up)?;
                    checked_div(held, ask, &spec.symbol)?
                        .round_dp_with_strategy(info.quantity_step_scale(), RoundingStrategy::ToZero)
                }
            };
            let order_quantity = info.quantity_quantizer.quantize(order_quantity, Rounding::Down)?;

            held = match spec.side {
                OrderSide::Sell => {
                    let bid = info.price_quantizer.quantize(price, Rounding::Down)?;
                    checked_mul(order_quantity, bid, &spec.symbol)?
                }
                OrderSide::Buy => order_quantity,
            };
            log::debug!(
                "[Compiler] {} {} {} -> holding {}",
                spec.side,
                order_quantity,
                spec.symbol,
                held
            );
            orders.push(Order::new(spec, order_quantity));
        }
        Ok(orders)
    }

    /// Quantity received when `order` fills: quote proceeds for a SELL at
    /// the bid-rounded price, the base quantity for a BUY
    pub async fn order_target_quantity(&self, order: &Order) -> Result<Quantity> {
        match order.side() {
            OrderSide::Sell => {
                let (info, price) = self.market(order.symbol()).await?;
                let bid = info.price_quantizer.quantize(price, Rounding::Down)?;
                checked_mul(order.quantity, bid, order.symbol())
            }
            OrderSide::Buy => Ok(order.quantity),
        }
    }

    /// Quantity spent when `order` fills: quote cost for a BUY at the
    /// ask-rounded price, the base quantity for a SELL
    pub async fn order_source_quantity(&self, order: &Order) -> Result<Quantity> {
        match order.side() {
            OrderSide::Buy => {
                let (info, price) = self.market(order.symbol()).await?;
                let ask = info.price_quantizer.quantize(price, Rounding::Up)?;
                checked_mul(order.quantity, ask, order.symbol())
            }
            OrderSide::Sell => Ok(order.quantity),
        }
    }

    async fn market(&self, symbol: &Symbol) -> Result<(SymbolInfo, Price)> {
        let info = self
            .symbols
            .symbol_info(symbol)
            .await?
            .ok_or_else(|| RoutingError::MissingSymbolInfo(symbol.clone()))?;
        let price = self
            .prices
            .current_price(symbol)
            .await?
            .ok_or_else(|| RoutingError::MissingPrice(symbol.clone()))?;
        Ok((info, price))
    }
}

fn checked_div(quantity: Decimal, price: Price, symbol: &Symbol) -> Result<Decimal> {
    quantity.checked_div(price).ok_or_else(|| RoutingError::InvalidPrice {
        symbol: symbol.clone(),
        price,
    })
}

fn checked_mul(quantity: Decimal, price: Price, symbol: &Symbol) -> Result<Decimal> {
    quantity
        .checked_mul(price)
        .map(|value| value.normalize())
        .ok_or_else(|| RoutingError::InvalidPrice {
            symbol: symbol.clone(),
            price,
        })
}
