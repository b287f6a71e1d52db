use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Order;
use crate::values::Timestamp;

/// Unique identifier for a trading plan
pub type PlanId = Uuid;

/// Ordered list of orders produced by one planning cycle
///
/// Orders can only be appended; the plan is handed by value to the
/// execution loop, which submits them in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPlan {
    pub id: PlanId,
    pub created_at: Timestamp,
    orders: Vec<Order>,
}

impl TradingPlan {
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            orders: Vec::new(),
        }
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn extend(&mut self, orders: impl IntoIterator<Item = Order>) {
        self.orders.extend(orders);
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
