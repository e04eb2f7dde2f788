use crate::model::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::time::Instant;
use uuid::Uuid;

/// Type-safe identifier for Couriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourierId(pub Uuid);

impl CourierId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for CourierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "courier_{}", self.0)
    }
}

/// A delivery agent.
///
/// A courier is idle while `dispatched` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    pub id: CourierId,
    pub order: Option<OrderId>,
    pub dispatched: Option<Instant>,
    pub arrived: Option<Instant>,
    pub departed: Option<Instant>,
    /// When the courier last returned to the pool.
    pub released: Option<Instant>,
}

impl Courier {
    pub fn new(id: CourierId) -> Self {
        Self {
            id,
            order: None,
            dispatched: None,
            arrived: None,
            departed: None,
            released: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.dispatched.is_none()
    }

    /// Binds the courier to an order and marks it dispatched.
    pub fn dispatch(&mut self, order: OrderId, at: Instant) {
        self.order = Some(order);
        self.dispatched = Some(at);
        self.arrived = None;
        self.departed = None;
    }

    /// Clears the delivery cycle so the courier can be reused.
    pub fn reset(&mut self, at: Instant) {
        self.order = None;
        self.dispatched = None;
        self.arrived = None;
        self.departed = None;
        self.released = Some(at);
    }
}
