//! Serializable point-in-time views used for debugging and the demo binary.

use crate::model::{CourierId, Order, OrderId, ShelfKind};
use serde::Serialize;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub name: String,
    /// Value in percent, two decimal places.
    pub value: f64,
}

impl OrderSnapshot {
    pub fn new(order: &Order, now: Instant) -> Self {
        Self {
            id: order.id.clone(),
            name: order.name.clone(),
            value: order.value_percent_at(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfSnapshot {
    pub kind: ShelfKind,
    pub capacity: usize,
    pub available: usize,
    pub orders: Vec<OrderSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenSnapshot {
    /// Orders registered but not yet on a shelf.
    pub orders: Vec<OrderSnapshot>,
    pub shelves: Vec<ShelfSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierSnapshot {
    pub id: CourierId,
    pub order: Option<OrderId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub couriers: Vec<CourierSnapshot>,
    pub kitchen: KitchenSnapshot,
}
