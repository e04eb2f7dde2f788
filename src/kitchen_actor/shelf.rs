//! A capacity-bounded container of orders for one storage tier.

use super::KitchenError;
use crate::model::{
    ErrorKind, EventEmitter, KitchenEvent, Order, OrderId, OrderPredicate, OrderSnapshot, OrderStatus,
    ShelfInfo, ShelfSnapshot,
};
use std::collections::HashSet;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Shelf {
    info: ShelfInfo,
    orders: Vec<Order>,
}

impl Shelf {
    pub fn new(info: ShelfInfo) -> Self {
        Self {
            info,
            orders: Vec::with_capacity(info.capacity),
        }
    }

    pub fn info(&self) -> ShelfInfo {
        self.info
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.info.capacity.saturating_sub(self.orders.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn find_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| &o.id == id)
    }

    /// Stores `order`, starting a new decay stretch at `at`. Returns the stored snapshot.
    pub fn insert(
        &mut self,
        mut order: Order,
        at: Instant,
        events: &EventEmitter,
    ) -> Result<Order, KitchenError> {
        if self.is_full() {
            return Err(KitchenError::OutOfCapacity {
                shelf: self.info.kind,
            });
        }
        order.removed = None;
        order.append_decay_modifier(self.info.decay_modifier, at)?;
        let stored = order.clone();
        events.emit(KitchenEvent::Stored {
            order: order.clone(),
            shelf: self.info.kind,
        });
        self.orders.push(order);
        Ok(stored)
    }

    /// Takes the listed residents out without stamping or notifying. Used for moves.
    pub(crate) fn extract(&mut self, ids: &HashSet<OrderId>) -> Vec<Order> {
        let (taken, kept): (Vec<Order>, Vec<Order>) = std::mem::take(&mut self.orders)
            .into_iter()
            .partition(|o| ids.contains(&o.id));
        self.orders = kept;
        taken
    }

    /// Takes every resident the predicate accepts, in one pass.
    ///
    /// With a `cause` the removed orders are discarded.
    pub fn remove_matching(
        &mut self,
        predicate: &OrderPredicate,
        cause: Option<ErrorKind>,
        at: Instant,
        events: &EventEmitter,
    ) -> Vec<Order> {
        let mut kept = Vec::with_capacity(self.orders.len());
        let mut removed = Vec::new();

        for (index, order) in std::mem::take(&mut self.orders).into_iter().enumerate() {
            if predicate(&order, index) {
                removed.push(order);
            } else {
                kept.push(order);
            }
        }
        self.orders = kept;

        for order in removed.iter_mut() {
            stamp_removed(order, cause, at);
            events.emit(KitchenEvent::Removed {
                order: order.clone(),
                cause,
            });
        }
        removed
    }

    pub fn snapshot(&self, now: Instant) -> ShelfSnapshot {
        ShelfSnapshot {
            kind: self.info.kind,
            capacity: self.info.capacity,
            available: self.remaining(),
            orders: self.orders.iter().map(|o| OrderSnapshot::new(o, now)).collect(),
        }
    }
}

/// Marks an order as having left storage. A removal with a cause is a discard.
pub(crate) fn stamp_removed(order: &mut Order, cause: Option<ErrorKind>, at: Instant) {
    order.removed = Some(at);
    if cause.is_some() && !order.status.is_terminal() {
        order.status = OrderStatus::Discarded;
    }
}
