//! # Kitchen Events
//!
//! Lifecycle notifications for orders and couriers. Events are fire-and-forget: they go
//! out on a bounded broadcast channel owned by one system instance, and nothing in the
//! pipeline waits on a subscriber.

use crate::model::{Courier, Order, ShelfInfo, ShelfKind};
use serde::Serialize;
use std::fmt::Display;
use tokio::sync::broadcast;

/// Failure category attached to storage and delivery errors, and to discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    OutOfCapacity,
    OrderNotFound,
    OrderExpired,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::OutOfCapacity => f.write_str("OUT_OF_CAPACITY"),
            ErrorKind::OrderNotFound => f.write_str("ORDER_NOT_FOUND"),
            ErrorKind::OrderExpired => f.write_str("ORDER_EXPIRED"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum KitchenEvent {
    Received { order: Order },
    Prepared { order: Order },
    Stored { order: Order, shelf: ShelfKind },
    AssignedToShelf { order: Order, shelf: ShelfInfo },
    /// `cause` is `None` for a pickup and `Some` for a discard.
    Removed { order: Order, cause: Option<ErrorKind> },
    AllocatedCourier { courier: Courier },
    DispatchedCourier { courier: Courier, order: Order },
    Delivered { courier: Courier, order: Order },
}

impl KitchenEvent {
    pub fn name(&self) -> &'static str {
        match self {
            KitchenEvent::Received { .. } => "received",
            KitchenEvent::Prepared { .. } => "prepared",
            KitchenEvent::Stored { .. } => "stored",
            KitchenEvent::AssignedToShelf { .. } => "assigned_to_shelf",
            KitchenEvent::Removed { .. } => "removed",
            KitchenEvent::AllocatedCourier { .. } => "allocated_courier",
            KitchenEvent::DispatchedCourier { .. } => "dispatched_courier",
            KitchenEvent::Delivered { .. } => "delivered",
        }
    }

    /// True for a removal that carries a cause.
    pub fn is_discard(&self) -> bool {
        matches!(self, KitchenEvent::Removed { cause: Some(_), .. })
    }
}

/// Publishing half of the event channel, cloned into every component that emits.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    sender: broadcast::Sender<KitchenEvent>,
}

impl EventEmitter {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Sends to current subscribers. Having none is not an error.
    pub fn emit(&self, event: KitchenEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.sender.subscribe()
    }
}
