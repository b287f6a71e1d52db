use std::sync::Arc;

use meridian_core::{Asset, Quantity};
use meridian_ports::AssetProvider;
use meridian_routing::{PriceConverter, RoutingError};
use rust_decimal::Decimal;

use crate::{PricePrediction, PricePredictor, Result, TradingConfig};

/// A held asset annotated with what could be traded and where it is heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAsset {
    pub asset: Asset,
    pub prediction: PricePrediction,
    /// Balance above the configured reserve
    pub free_quantity: Quantity,
    /// Free quantity valued in the quote currency
    pub free_value: Decimal,
    /// Whether the free value is large enough to be converted
    pub eligible_as_source: bool,
}

pub struct CandidateAssetProducer {
    config: Arc<TradingConfig>,
    assets: Arc<dyn AssetProvider>,
    predictor: Arc<PricePredictor>,
    converter: PriceConverter,
}

impl CandidateAssetProducer {
    pub fn new(
        config: Arc<TradingConfig>,
        assets: Arc<dyn AssetProvider>,
        predictor: Arc<PricePredictor>,
        converter: PriceConverter,
    ) -> Self {
        Self {
            config,
            assets,
            predictor,
            converter,
        }
    }

    /// Every account asset that can be valued and predicted.
    ///
    /// Assets without a path to the quote currency or without a usable
    /// prediction are left out; provider failures abort the whole pass.
    pub async fn candidates(&self) -> Result<Vec<CandidateAsset>> {
        let quote = &self.config.quote_currency;
        let mut candidates = Vec::new();

        for asset in self.assets.account_assets().await? {
            let free_quantity = self.free_quantity(&asset);

            let free_value = match self
                .converter
                .relative_value(&asset.currency, quote, free_quantity)
                .await
            {
                Ok(value) => value,
                Err(e @ (RoutingError::OutOfRange(_) | RoutingError::InvalidPrice { .. })) => {
                    log::debug!(
                        "[Candidates] Free balance of {} counts as zero: {}",
                        asset.currency,
                        e
                    );
                    Decimal::ZERO
                }
                Err(e @ RoutingError::NoPath { .. }) => {
                    log::debug!("[Candidates] Skipping {}: {}", asset.currency, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let prediction = match self.predictor.prediction(&asset.currency, quote).await {
                Ok(prediction) => prediction,
                Err(e) if e.is_provider_failure() => return Err(e),
                Err(e) => {
                    log::info!(
                        "[Candidates] Unable to predict {} relative to {}, skipping it: {}",
                        asset.currency,
                        quote,
                        e
                    );
                    continue;
                }
            };

            let eligible_as_source = free_value >= self.config.min_trading_value;
            log::debug!(
                "[Candidates] {}: growth/sec {}, profitable {}, free {} worth {} {}, source: {}",
                asset.currency,
                prediction.growth_per_sec,
                prediction.profitable,
                free_quantity,
                free_value,
                quote,
                eligible_as_source
            );
            candidates.push(CandidateAsset {
                asset,
                prediction,
                free_quantity,
                free_value,
                eligible_as_source,
            });
        }
        Ok(candidates)
    }

    fn free_quantity(&self, asset: &Asset) -> Quantity {
        let reserve = self.config.reserve_for(&asset.currency);
        if reserve >= asset.balance {
            Decimal::ZERO
        } else {
            asset.balance - reserve
        }
    }
}
