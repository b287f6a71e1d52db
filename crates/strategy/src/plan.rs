use std::sync::Arc;

use async_trait::async_trait;
use meridian_core::{Order, TradingPlan};
use meridian_ports::Clock;
use meridian_routing::PathCompiler;
use rust_decimal::Decimal;

use crate::{CandidateAsset, CandidateAssetProducer, Result, TradingConfig};

/// Anything able to produce the next trading plan
#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn produce(&self) -> Result<TradingPlan>;
}

/// Builds a plan by picking, for every eligible source asset, the single
/// target whose predicted growth beats holding the source by the widest
/// margin
pub struct PlanProducer {
    config: Arc<TradingConfig>,
    compiler: Arc<PathCompiler>,
    candidates: CandidateAssetProducer,
    clock: Arc<dyn Clock>,
}

impl PlanProducer {
    pub fn new(
        config: Arc<TradingConfig>,
        compiler: Arc<PathCompiler>,
        candidates: CandidateAssetProducer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            compiler,
            candidates,
            clock,
        }
    }

    async fn most_profitable_orders(
        &self,
        source: &CandidateAsset,
        candidates: &[CandidateAsset],
    ) -> Result<Vec<Order>> {
        let source_currency = &source.asset.currency;
        let mut best_orders = Vec::new();
        let mut best_diff = Decimal::ZERO;

        let targets = candidates
            .iter()
            .filter(|c| &c.asset.currency != source_currency && c.prediction.profitable);
        for target in targets {
            let target_currency = &target.asset.currency;
            let orders = match self
                .compiler
                .compile(source_currency, target_currency, source.free_quantity)
                .await
            {
                Ok(orders) if !orders.is_empty() => orders,
                Ok(_) => continue,
                Err(e) if e.is_provider_failure() => return Err(e.into()),
                Err(e) => {
                    log::debug!(
                        "[Planner] No orders from {} to {}: {}",
                        source_currency,
                        target_currency,
                        e
                    );
                    continue;
                }
            };

            let Some(last) = orders.last() else {
                continue;
            };
            let received = match self.compiler.order_target_quantity(last).await {
                Ok(quantity) => quantity,
                Err(e) if e.is_provider_failure() => return Err(e.into()),
                Err(_) => continue,
            };

            let Some(diff) = self.growth_difference(source, target, orders.len(), received) else {
                log::warn!(
                    "[Planner] Growth estimate overflowed for {} -> {}",
                    source_currency,
                    target_currency
                );
                continue;
            };
            log::debug!(
                "[Planner] Growth diff of {} relative to {} is {}",
                target_currency,
                source_currency,
                diff
            );
            if diff > best_diff {
                best_diff = diff;
                best_orders = orders;
            }
        }
        Ok(best_orders)
    }

    /// Predicted value growth over the horizon when converting, minus the
    /// growth when holding. Fees only count against a non-falling source.
    fn growth_difference(
        &self,
        source: &CandidateAsset,
        target: &CandidateAsset,
        hops: usize,
        received: Decimal,
    ) -> Option<Decimal> {
        let horizon = self.config.horizon();
        let source_growth = source.prediction.growth_per_sec;

        let mut with_conversion = target
            .prediction
            .growth_per_sec
            .checked_mul(horizon)?
            .checked_mul(received)?;
        if source_growth >= Decimal::ZERO {
            let fees = self
                .config
                .trading_fee_rate
                .checked_mul(Decimal::from(hops))?
                .checked_mul(source.free_value)?;
            with_conversion = with_conversion.checked_sub(fees)?;
        }
        let without_conversion = source_growth
            .checked_mul(horizon)?
            .checked_mul(source.free_quantity)?;

        log::debug!(
            "[Planner] {} -> {}: growth with conversion {}, without {}",
            source.asset.currency,
            target.asset.currency,
            with_conversion,
            without_conversion
        );
        with_conversion.checked_sub(without_conversion)
    }
}

#[async_trait]
impl PlanSource for PlanProducer {
    async fn produce(&self) -> Result<TradingPlan> {
        let mut plan = TradingPlan::new(self.clock.now());
        let candidates = self.candidates.candidates().await?;

        for source in candidates.iter().filter(|c| c.eligible_as_source) {
            log::debug!("[Planner] Source asset: {}", source.asset.currency);
            let orders = self.most_profitable_orders(source, &candidates).await?;
            plan.extend(orders);
        }
        log::info!(
            "[Planner] Produced plan {} with {} orders",
            plan.id,
            plan.len()
        );
        Ok(plan)
    }
}
