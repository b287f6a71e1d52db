mod common;

use std::sync::Arc;

use chrono::Duration;
use common::{info, start_time, three_currency_market, InMemoryMarket};
use meridian_clock::{Clock, ManualClock};
use meridian_core::{Currency, Order, OrderSide, Symbol};
use meridian_routing::{PathCompiler, PriceConverter, RoutingError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn compiler(market: &Arc<InMemoryMarket>, clock: &Arc<ManualClock>) -> PathCompiler {
    PathCompiler::new(market.clone(), market.clone(), clock.clone())
}

fn usdt() -> Currency {
    Currency::from("USDT")
}
fn btc() -> Currency {
    Currency::from("BTC")
}
fn eth() -> Currency {
    Currency::from("ETH")
}

#[tokio::test]
async fn test_usdt_to_eth_buys_through_btc() {
    let _ = env_logger::try_init();
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    let specs = compiler.find_order_specs(&usdt(), &eth()).await.unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].symbol, Symbol::new("BTC", "USDT"));
    assert_eq!(specs[0].side, OrderSide::Buy);
    assert_eq!(specs[1].symbol, Symbol::new("ETH", "BTC"));
    assert_eq!(specs[1].side, OrderSide::Buy);

    let orders = compiler.compile(&usdt(), &eth(), dec!(300)).await.unwrap();
    assert_eq!(orders.len(), 2);
    // 300 / 30000 = 0.01 BTC, then 0.01 / 0.05 = 0.2 ETH; within one step each
    assert!((orders[0].quantity - dec!(0.01)).abs() <= dec!(0.0001));
    assert!((orders[1].quantity - dec!(0.2)).abs() <= dec!(0.001));
}

#[tokio::test]
async fn test_eth_to_usdt_sells_both_hops() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    let orders = compiler.compile(&eth(), &usdt(), dec!(0.2)).await.unwrap();
    let sides: Vec<OrderSide> = orders.iter().map(Order::side).collect();
    assert_eq!(sides, vec![OrderSide::Sell, OrderSide::Sell]);
    assert_eq!(orders[0].quantity, dec!(0.2));
    assert_eq!(orders[1].quantity, dec!(0.01));
    assert_eq!(compiler.order_target_quantity(&orders[1]).await.unwrap(), dec!(300));
}

#[tokio::test]
async fn test_buy_truncates_to_quantity_step() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    // 301.37 / 30000 = 0.0100456.. -> 0.01
    let orders = compiler.compile(&usdt(), &btc(), dec!(301.37)).await.unwrap();
    assert_eq!(orders[0].quantity, dec!(0.01));
    assert_eq!(compiler.order_source_quantity(&orders[0]).await.unwrap(), dec!(300));
}

#[tokio::test]
async fn test_round_trip_stays_within_one_step_per_hop() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    for input in [dec!(300), dec!(301.37), dec!(455.5), dec!(1234.5678)] {
        let orders = compiler.compile(&usdt(), &eth(), input).await.unwrap();
        let received = compiler.order_target_quantity(orders.last().unwrap()).await.unwrap();

        // Walk back: BUY ETHBTC at 0.05, BUY BTCUSDT at 30000
        let btc_spent = received * dec!(0.05);
        let usdt_spent = btc_spent * dec!(30000);
        // one BTC step (0.0001) plus one ETH step (0.001 * 0.05 BTC), in USDT
        let tolerance = dec!(0.0001) * dec!(30000) + dec!(0.001) * dec!(0.05) * dec!(30000);
        assert!(
            (input - usdt_spent).abs() <= tolerance,
            "{input} round-tripped to {usdt_spent}"
        );
        assert!(usdt_spent <= input);
    }
}

#[tokio::test]
async fn test_quantity_below_minimum_fails_whole_chain() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    // 1 USDT buys 0.00003 BTC, below the 0.0001 minimum
    let err = compiler.compile(&usdt(), &eth(), dec!(1)).await.unwrap_err();
    assert!(matches!(err, RoutingError::OutOfRange(_)));
    assert!(!err.is_provider_failure());
}

#[tokio::test]
async fn test_sell_below_lot_minimum_is_out_of_range() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    // Half the 0.0001 BTC lot minimum must not become a full-lot SELL
    let err = compiler.compile(&btc(), &usdt(), dec!(0.00005)).await.unwrap_err();
    assert!(matches!(err, RoutingError::OutOfRange(_)), "{err:?}");

    // 0.001 ETH sells for 0.00005 BTC, dust on the second hop
    let err = compiler.compile(&eth(), &usdt(), dec!(0.001)).await.unwrap_err();
    assert!(matches!(err, RoutingError::OutOfRange(_)), "{err:?}");

    let orders = compiler.compile(&btc(), &usdt(), dec!(0.00015)).await.unwrap();
    assert_eq!(orders[0].quantity, dec!(0.0001));
}

#[tokio::test]
async fn test_converter_never_values_dust_above_holding() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let converter = PriceConverter::new(Arc::new(compiler(&market, &clock)));

    let err = converter.relative_value(&btc(), &usdt(), dec!(0.00005)).await.unwrap_err();
    assert!(matches!(err, RoutingError::OutOfRange(_)));
    assert!(!err.is_provider_failure());

    // 0.00015 BTC sells only one lot: worth 3 USDT, not 4.5
    assert_eq!(converter.relative_value(&btc(), &usdt(), dec!(0.00015)).await.unwrap(), dec!(3));
}

#[tokio::test]
async fn test_same_currency_is_empty_path() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    assert!(compiler.compile(&btc(), &btc(), dec!(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_currency_has_no_path() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    let err = compiler
        .find_order_specs(&usdt(), &Currency::from("DOGE"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RoutingError::NoPath {
            from: usdt(),
            to: Currency::from("DOGE")
        }
    );
}

#[tokio::test]
async fn test_missing_price_is_provider_failure() {
    let market = InMemoryMarket::new();
    market.list(info("BTC", "USDT", dec!(0.0001)), dec!(30000), start_time());
    market.list(info("ETH", "BTC", dec!(0.001)), dec!(0.05), start_time());
    market.set_price(&Symbol::new("ETH", "BTC"), Decimal::ZERO);
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    // A zero price cannot size a BUY
    let err = compiler.compile(&btc(), &eth(), dec!(1)).await.unwrap_err();
    assert!(matches!(
        err,
        RoutingError::OutOfRange(_) | RoutingError::InvalidPrice { .. }
    ));

    let lonely = InMemoryMarket::new();
    let clock = ManualClock::new(start_time());
    let lonely_compiler = PathCompiler::new(lonely.clone(), Arc::new(NoPrices), clock);
    lonely.list(info("BTC", "USDT", dec!(0.0001)), dec!(30000), start_time());
    let err = lonely_compiler.compile(&btc(), &usdt(), dec!(1)).await.unwrap_err();
    assert_eq!(err, RoutingError::MissingPrice(Symbol::new("BTC", "USDT")));
    assert!(err.is_provider_failure());
}

struct NoPrices;

#[async_trait::async_trait]
impl meridian_ports::PriceProvider for NoPrices {
    async fn current_price(&self, _: &Symbol) -> meridian_ports::ProviderResult<Option<meridian_core::Price>> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_paths_reresolve_only_after_symbol_update() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let compiler = compiler(&market, &clock);

    let first = compiler.trading_paths().await.unwrap();
    clock.advance(Duration::minutes(1));
    let again = compiler.trading_paths().await.unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(market.loads(), 1);

    assert!(compiler.find_order_specs(&usdt(), &Currency::from("SOL")).await.is_err());

    market.list(info("SOL", "USDT", dec!(0.01)), dec!(20), clock.now());
    let specs = compiler.find_order_specs(&usdt(), &Currency::from("SOL")).await.unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(market.loads(), 2);
}

#[tokio::test]
async fn test_converter_values_through_path() {
    let market = three_currency_market();
    let clock = ManualClock::new(start_time());
    let converter = PriceConverter::new(Arc::new(compiler(&market, &clock)));

    assert_eq!(converter.relative_value(&eth(), &usdt(), dec!(0.2)).await.unwrap(), dec!(300));
    assert_eq!(converter.relative_value(&btc(), &btc(), dec!(0.5)).await.unwrap(), dec!(0.5));
}
