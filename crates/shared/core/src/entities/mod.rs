mod asset;
mod candlestick;
mod order;
mod plan;
mod side;

pub use asset::Asset;
pub use candlestick::Candlestick;
pub use order::{Order, OrderSpec};
pub use plan::{PlanId, TradingPlan};
pub use side::OrderSide;
