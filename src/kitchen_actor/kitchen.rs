//! # Kitchen Aggregate
//!
//! Owns every tracked order: the registry of orders not yet shelved, the shelves, and the
//! released set of orders that have left storage. All cross-shelf lookups and moves go
//! through here so that a single actor task can apply them as one step.

use super::shelf::{stamp_removed, Shelf};
use super::KitchenError;
use crate::model::{
    ErrorKind, EventEmitter, KitchenEvent, KitchenSnapshot, Order, OrderId, OrderSelector,
    OrderSnapshot, OrderStatus, OrderUpdate, ShelfInfo, ShelfKind,
};
use std::collections::{HashMap, HashSet};
use tokio::time::Instant;

#[derive(Debug, Default)]
pub struct Kitchen {
    orders: Vec<Order>,
    shelves: Vec<Shelf>,
    released: HashMap<OrderId, Order>,
}

impl Kitchen {
    pub fn new(shelves: impl IntoIterator<Item = ShelfInfo>) -> Self {
        Self {
            orders: Vec::new(),
            shelves: shelves.into_iter().map(Shelf::new).collect(),
            released: HashMap::new(),
        }
    }

    /// Adds a new order to the registry.
    pub fn register(&mut self, order: Order, events: &EventEmitter) -> Result<Order, KitchenError> {
        if self.get(&order.id).is_some() {
            return Err(KitchenError::DuplicateOrder(order.id));
        }
        events.emit(KitchenEvent::Received {
            order: order.clone(),
        });
        self.orders.push(order.clone());
        Ok(order)
    }

    pub fn shelf_for(&self, kind: ShelfKind) -> Option<ShelfInfo> {
        self.shelf(kind).map(Shelf::info)
    }

    pub fn shelf(&self, kind: ShelfKind) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.info().kind == kind)
    }

    /// Moves every matching order from the registry or another shelf onto the `kind` shelf.
    ///
    /// Either all matches move or none do. Matches already on the target stay put. An order
    /// shelved for the first time becomes `AwaitingCourier` in the same step, so no other
    /// request can observe it shelved but still awaiting storage.
    pub fn place(
        &mut self,
        selector: OrderSelector,
        kind: ShelfKind,
        at: Instant,
        events: &EventEmitter,
    ) -> Result<Vec<Order>, KitchenError> {
        let target = self
            .shelves
            .iter()
            .position(|s| s.info().kind == kind)
            .ok_or(KitchenError::ShelfNotFound(kind))?;
        let description = format!("{selector:?}");
        let predicate = selector.into_predicate();

        let mut moving = HashSet::new();
        let mut already_placed = 0;
        for (index, order) in self.orders.iter().enumerate() {
            if predicate(order, index) {
                moving.insert(order.id.clone());
            }
        }
        for (shelf_index, shelf) in self.shelves.iter().enumerate() {
            for (index, order) in shelf.orders().iter().enumerate() {
                if !predicate(order, index) {
                    continue;
                }
                if shelf_index == target {
                    already_placed += 1;
                } else {
                    moving.insert(order.id.clone());
                }
            }
        }

        if moving.is_empty() && already_placed == 0 {
            return Err(KitchenError::OrderNotFound(description));
        }
        if self.shelves[target].remaining() < moving.len() {
            return Err(KitchenError::OutOfCapacity { shelf: kind });
        }

        let (mut taken, kept): (Vec<Order>, Vec<Order>) = std::mem::take(&mut self.orders)
            .into_iter()
            .partition(|o| moving.contains(&o.id));
        self.orders = kept;
        for (shelf_index, shelf) in self.shelves.iter_mut().enumerate() {
            if shelf_index != target {
                taken.extend(shelf.extract(&moving));
            }
        }

        let info = self.shelves[target].info();
        let mut placed = Vec::with_capacity(taken.len());
        for mut order in taken {
            if order.status == OrderStatus::AwaitingStorage {
                order.set_status(OrderStatus::AwaitingCourier)?;
            }
            let stored = self.shelves[target].insert(order, at, events)?;
            events.emit(KitchenEvent::AssignedToShelf {
                order: stored.clone(),
                shelf: info,
            });
            placed.push(stored);
        }
        Ok(placed)
    }

    /// Removes every matching order from the registry and from every shelf.
    ///
    /// If nothing matched and the selector was a concrete order, that order is echoed back.
    pub fn remove(
        &mut self,
        selector: OrderSelector,
        cause: Option<ErrorKind>,
        at: Instant,
        events: &EventEmitter,
    ) -> Vec<Order> {
        let echo = selector.as_order().cloned();
        let predicate = selector.into_predicate();

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.orders.len());
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

        for shelf in self.shelves.iter_mut() {
            removed.extend(shelf.remove_matching(&predicate, cause, at, events));
        }
        self.release(&removed);

        if removed.is_empty() {
            if let Some(order) = echo {
                removed.push(order);
            }
        }
        removed
    }

    /// Removal restricted to one shelf.
    pub fn remove_from_shelf(
        &mut self,
        kind: ShelfKind,
        selector: OrderSelector,
        cause: Option<ErrorKind>,
        at: Instant,
        events: &EventEmitter,
    ) -> Result<Vec<Order>, KitchenError> {
        let shelf = self
            .shelves
            .iter_mut()
            .find(|s| s.info().kind == kind)
            .ok_or(KitchenError::ShelfNotFound(kind))?;
        let removed = shelf.remove_matching(&selector.into_predicate(), cause, at, events);
        self.release(&removed);
        Ok(removed)
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders
            .iter()
            .find(|o| &o.id == id)
            .or_else(|| self.shelves.iter().find_map(|s| s.find(id)))
            .or_else(|| self.released.get(id))
    }

    pub fn update(&mut self, id: &OrderId, update: OrderUpdate) -> Result<Order, KitchenError> {
        let order = self.get_mut(id).ok_or_else(|| KitchenError::OrderNotFound(id.to_string()))?;
        order.apply(update)?;
        Ok(order.clone())
    }

    pub fn snapshot(&self, now: Instant) -> KitchenSnapshot {
        KitchenSnapshot {
            orders: self.orders.iter().map(|o| OrderSnapshot::new(o, now)).collect(),
            shelves: self.shelves.iter().map(|s| s.snapshot(now)).collect(),
        }
    }

    /// Number of orders tracked anywhere, released ones included.
    pub fn len(&self) -> usize {
        self.orders.len() + self.shelves.iter().map(Shelf::len).sum::<usize>() + self.released.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        if let Some(order) = self.orders.iter_mut().find(|o| &o.id == id) {
            return Some(order);
        }
        if let Some(order) = self.shelves.iter_mut().find_map(|s| s.find_mut(id)) {
            return Some(order);
        }
        self.released.get_mut(id)
    }

    /// Drops a released order once nothing will ask about it again.
    ///
    /// Orders still in the registry or on a shelf are left alone.
    pub fn forget(&mut self, id: &OrderId) -> Option<Order> {
        self.released.remove(id)
    }

    fn release(&mut self, removed: &[Order]) {
        for order in removed {
            self.released.insert(order.id.clone(), order.clone());
        }
    }
}
