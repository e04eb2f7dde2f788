//! The pool of delivery agents.

use super::CourierError;
use crate::model::{Courier, CourierId, CourierSnapshot, OrderId};
use tokio::time::Instant;

#[derive(Debug, Default)]
pub struct CourierPool {
    couriers: Vec<Courier>,
}

impl CourierPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }

    pub fn idle(&self) -> usize {
        self.couriers.iter().filter(|c| c.is_idle()).count()
    }

    /// Dispatches the idle courier that returned to the pool most recently.
    pub fn acquire(&mut self, order: OrderId, at: Instant) -> Option<Courier> {
        // `None < Some(_)`, so a never-released courier ranks last.
        let courier = self
            .couriers
            .iter_mut()
            .filter(|c| c.is_idle())
            .max_by_key(|c| c.released)?;
        courier.dispatch(order, at);
        Some(courier.clone())
    }

    /// Creates a new courier, already dispatched for `order`.
    pub fn allocate(&mut self, order: OrderId, at: Instant) -> Courier {
        let mut courier = Courier::new(CourierId::new_v4());
        courier.dispatch(order, at);
        self.couriers.push(courier.clone());
        courier
    }

    /// Returns a courier to the pool.
    pub fn release(&mut self, id: CourierId, at: Instant) -> Result<Courier, CourierError> {
        let courier = self
            .couriers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CourierError::UnknownCourier(id))?;
        courier.reset(at);
        Ok(courier.clone())
    }

    pub fn snapshot(&self) -> Vec<CourierSnapshot> {
        self.couriers
            .iter()
            .map(|c| CourierSnapshot {
                id: c.id,
                order: c.order.clone(),
            })
            .collect()
    }
}
