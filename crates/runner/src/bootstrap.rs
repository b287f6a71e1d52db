//! Bootstrap - wiring a trader from configuration
//!
//! Builds every layer bottom-up over the simulated exchange:
//!
//! ```text
//! SimulatedExchange ──► CachedSymbolProvider ──► CachedPriceProvider
//!        │                     │                        │
//!        │                     └──────► PathCompiler ◄──┘
//!        │                                   │
//!        ├──► CurrencyPriceHistory ◄─────────┤
//!        │        └──► PricePredictor        └──► PriceConverter
//!        │                  │                          │
//!        └──► CandidateAssetProducer ◄─────────────────┘
//!                         │
//!                   PlanProducer ──► TradingPlanner ──► PlanConsumer
//!                                                          │
//!                           SimulatedExchange | DryRunOrderSink
//! ```

use std::sync::Arc;
use std::time::Duration;

use meridian_clock::SystemClock;
use meridian_gateway::{
    CachedPriceProvider, CachedSymbolProvider, DryRunOrderSink, SimulatedExchange,
};
use meridian_ports::{Clock, OrderSink, Sleeper};
use meridian_routing::{PathCompiler, PriceConverter};
use meridian_strategy::{
    CandidateAssetProducer, CurrencyPriceHistory, PlanProducer, PricePredictor,
};

use crate::config::TraderConfig;
use crate::consumer::PlanConsumer;
use crate::error::Result;
use crate::planner::{PlannerPhase, TradingPlanner};

/// A fully wired trader, idle until started
pub struct Trader {
    exchange: Arc<SimulatedExchange>,
    planner: Arc<TradingPlanner>,
    consumer: PlanConsumer,
    shutdown_timeout: Duration,
}

impl Trader {
    /// Trader on wall-clock time
    pub fn from_config(config: TraderConfig) -> Result<Self> {
        let clock = Arc::new(SystemClock::new());
        Self::with_clock(config, clock.clone(), clock)
    }

    pub fn with_clock(
        config: TraderConfig,
        clock: Arc<dyn Clock>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self> {
        config.validate()?;
        log::info!(
            "[Bootstrap] Quote currency {}, {} markets, clock {}",
            config.trading.quote_currency,
            config.simulation.symbols.len(),
            clock.name()
        );

        let exchange = Arc::new(SimulatedExchange::new(&config.simulation, clock.clone())?);
        let symbols = Arc::new(CachedSymbolProvider::new(
            exchange.clone(),
            clock.clone(),
            config.cache.symbols_ttl(),
        ));
        let prices = Arc::new(CachedPriceProvider::new(
            exchange.clone(),
            symbols.clone(),
            clock.clone(),
            config.cache.prices_ttl(),
        ));

        let compiler = Arc::new(PathCompiler::new(symbols.clone(), prices, clock.clone()));
        let history = Arc::new(CurrencyPriceHistory::new(compiler.clone(), exchange.clone()));
        let predictor = Arc::new(PricePredictor::new(
            history,
            clock.clone(),
            config.trading.prediction.clone(),
        ));

        let trading = Arc::new(config.trading);
        let candidates = CandidateAssetProducer::new(
            trading.clone(),
            exchange.clone(),
            predictor,
            PriceConverter::new(compiler.clone()),
        );
        let producer = Arc::new(PlanProducer::new(trading, compiler, candidates, clock.clone()));
        let planner = Arc::new(TradingPlanner::new(
            producer,
            clock,
            sleeper.clone(),
            &config.planner,
        ));

        let sink: Arc<dyn OrderSink> = if config.worker.dry_run {
            Arc::new(DryRunOrderSink::new(symbols))
        } else {
            exchange.clone()
        };
        log::info!("[Bootstrap] Orders go to {}", sink.name());
        let consumer = PlanConsumer::new(
            planner.clone(),
            sink,
            sleeper,
            config.worker.failure_delay(),
        );

        Ok(Self {
            exchange,
            planner,
            consumer,
            shutdown_timeout: config.worker.shutdown_timeout(),
        })
    }

    pub fn exchange(&self) -> &Arc<SimulatedExchange> {
        &self.exchange
    }

    pub fn planner_phase(&self) -> PlannerPhase {
        self.planner.phase()
    }

    pub fn is_running(&self) -> bool {
        self.consumer.is_running()
    }

    pub fn start(&self) -> Result<()> {
        self.consumer.start()
    }

    /// Stop with the configured shutdown timeout, false if the worker was
    /// aborted
    pub async fn stop(&self) -> bool {
        self.consumer.stop(self.shutdown_timeout).await
    }
}
