//! # Order & Value Model
//!
//! An [`Order`] is a perishable item moving through the kitchen. Its worth decays over
//! time at a rate that depends on the shelf it sits on, so every placement is recorded in
//! a decay history and [`Order::value_at`] replays that history.
//!
//! ## Decay Model
//!
//! Value starts at `1.0`. Each stretch of time spent on a shelf costs
//!
//! ```text
//! 1 - (shelf_life - decay_rate * age * decay_modifier) / shelf_life
//! ```
//!
//! and the costs accumulate. Because the loss of each stretch is *subtracted* rather than
//! recomputed from zero, moving an order from a gentle shelf to a harsh one never resets
//! or jumps its value: the harsher modifier only applies from the moment of the move.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The temperature an order must be stored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Temperature::Hot => f.write_str("hot"),
            Temperature::Cold => f.write_str("cold"),
            Temperature::Frozen => f.write_str("frozen"),
        }
    }
}

/// Where an order is in the fulfillment lifecycle.
///
/// `Discarded` and `Delivered` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    AwaitingPreparation,
    AwaitingStorage,
    AwaitingCourier,
    AwaitingDelivery,
    Discarded,
    Delivered,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Discarded | OrderStatus::Delivered)
    }
}

/// Errors raised by the order entity itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// A decay modifier was appended after the order left storage.
    #[error("Order already removed: {0}")]
    AlreadyRemoved(OrderId),

    /// The decay parameters cannot produce a meaningful value.
    #[error("Invalid order parameters for {id}: {reason}")]
    InvalidParameters { id: OrderId, reason: String },

    /// A terminal order was asked to move to another status.
    #[error("Order {id} is already {from:?}; cannot become {to:?}")]
    TerminalStatus {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Payload for creating a new order, as supplied by an order source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub id: OrderId,
    pub name: String,
    pub temp: Temperature,
    pub shelf_life: f64,
    pub decay_rate: f64,
}

/// Setters owned by the orchestrator. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub prepared: Option<Instant>,
    pub delivered: Option<Instant>,
}

impl OrderUpdate {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// One placement on a shelf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayEntry {
    pub decay_modifier: f64,
    pub placed: Instant,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub temp: Temperature,
    pub shelf_life: f64,
    pub decay_rate: f64,
    pub status: OrderStatus,
    pub prepared: Option<Instant>,
    pub removed: Option<Instant>,
    pub delivered: Option<Instant>,
    decay_history: Vec<DecayEntry>,
}

impl Order {
    /// Creates a new Order awaiting preparation.
    ///
    /// # Errors
    /// Rejects a `shelf_life` that is not strictly positive and a `decay_rate` that is
    /// negative; either would make [`Order::value_at`] meaningless.
    pub fn new(params: OrderCreate) -> Result<Self, OrderError> {
        if !(params.shelf_life.is_finite() && params.shelf_life > 0.0) {
            return Err(OrderError::InvalidParameters {
                id: params.id,
                reason: format!("shelf life must be positive, got {}", params.shelf_life),
            });
        }
        if !(params.decay_rate.is_finite() && params.decay_rate >= 0.0) {
            return Err(OrderError::InvalidParameters {
                id: params.id,
                reason: format!("decay rate must be non-negative, got {}", params.decay_rate),
            });
        }

        Ok(Self {
            id: params.id,
            name: params.name,
            temp: params.temp,
            shelf_life: params.shelf_life,
            decay_rate: params.decay_rate,
            status: OrderStatus::AwaitingPreparation,
            prepared: None,
            removed: None,
            delivered: None,
            decay_history: Vec::new(),
        })
    }

    /// Records a placement on a shelf with the given decay modifier.
    pub fn append_decay_modifier(&mut self, decay_modifier: f64, placed: Instant) -> Result<(), OrderError> {
        if self.removed.is_some() {
            return Err(OrderError::AlreadyRemoved(self.id.clone()));
        }
        self.decay_history.push(DecayEntry {
            decay_modifier,
            placed,
        });
        Ok(())
    }

    pub fn decay_history(&self) -> &[DecayEntry] {
        &self.decay_history
    }

    /// Moves the order to `status`. Re-asserting the current terminal status is a no-op.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), OrderError> {
        if self.status.is_terminal() && self.status != status {
            return Err(OrderError::TerminalStatus {
                id: self.id.clone(),
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        Ok(())
    }

    pub fn apply(&mut self, update: OrderUpdate) -> Result<(), OrderError> {
        if let Some(status) = update.status {
            self.set_status(status)?;
        }
        if let Some(prepared) = update.prepared {
            self.prepared = Some(prepared);
        }
        if let Some(delivered) = update.delivered {
            self.delivered = Some(delivered);
        }
        Ok(())
    }

    /// Time since preparation, frozen once the order leaves storage.
    pub fn age_at(&self, now: Instant) -> Duration {
        match self.prepared {
            Some(prepared) => self.removed.unwrap_or(now).saturating_duration_since(prepared),
            None => Duration::ZERO,
        }
    }

    /// The value of this order at `now`, or at its removal if it has left storage.
    ///
    /// Returns `1.0` until the order has been placed on a shelf. May go negative.
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(last) = self.decay_history.last() else {
            return 1.0;
        };
        let clock = self.removed.unwrap_or(now);

        let mut value = 1.0;
        for pair in self.decay_history.windows(2) {
            let age = pair[1].placed.saturating_duration_since(pair[0].placed);
            value -= 1.0 - self.value_for_age(age, pair[0].decay_modifier);
        }

        let age = clock.saturating_duration_since(last.placed);
        value - (1.0 - self.value_for_age(age, last.decay_modifier))
    }

    pub fn current_value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    /// Value as a percentage with two decimal places.
    pub fn value_percent_at(&self, now: Instant) -> f64 {
        (self.value_at(now) * 10_000.0).round() / 100.0
    }

    /// An order is expired once its value rounds to zero percent or less.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        (self.value_at(now) * 100.0).round() <= 0.0
    }

    fn value_for_age(&self, age: Duration, decay_modifier: f64) -> f64 {
        (self.shelf_life - self.decay_rate * age.as_secs_f64() * decay_modifier) / self.shelf_life
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(shelf_life: f64, decay_rate: f64) -> Order {
        Order::new(OrderCreate {
            id: "a".into(),
            name: "Banana Split".into(),
            temp: Temperature::Frozen,
            shelf_life,
            decay_rate,
        })
        .unwrap()
    }

    #[test]
    fn test_value_is_full_before_shelving() {
        let order = order(100.0, 1.0);
        let now = Instant::now();
        assert_eq!(order.value_at(now + Duration::from_secs(500)), 1.0);
    }

    #[test]
    fn test_value_decays_on_single_shelf() {
        let mut order = order(100.0, 0.5);
        let t0 = Instant::now();
        order.append_decay_modifier(1.0, t0).unwrap();

        // 20s * 0.5 * 1.0 / 100 = 0.1 lost
        let value = order.value_at(t0 + Duration::from_secs(20));
        assert!((value - 0.9).abs() < 1e-9, "value was {value}");
    }

    #[test]
    fn test_value_carries_loss_across_shelves() {
        let mut order = order(100.0, 1.0);
        let t0 = Instant::now();
        order.append_decay_modifier(1.0, t0).unwrap();
        order.append_decay_modifier(2.0, t0 + Duration::from_secs(10)).unwrap();

        // 10s at x1 then 5s at x2 -> 0.1 + 0.1
        let value = order.value_at(t0 + Duration::from_secs(15));
        assert!((value - 0.8).abs() < 1e-9, "value was {value}");
    }

    #[test]
    fn test_value_freezes_at_removal() {
        let mut order = order(10.0, 1.0);
        let t0 = Instant::now();
        order.append_decay_modifier(1.0, t0).unwrap();
        order.removed = Some(t0 + Duration::from_secs(2));

        let later = t0 + Duration::from_secs(60);
        assert!((order.value_at(later) - 0.8).abs() < 1e-9);
        assert!(!order.is_expired_at(later));
    }

    #[test]
    fn test_value_goes_negative_and_expires() {
        let mut order = order(1.0, 1.0);
        let t0 = Instant::now();
        order.append_decay_modifier(1.0, t0).unwrap();

        let now = t0 + Duration::from_secs(2);
        assert!((order.value_at(now) + 1.0).abs() < 1e-9);
        assert!(order.is_expired_at(now));
    }

    #[test]
    fn test_expiry_uses_rounded_percent() {
        let mut order = order(1000.0, 1.0);
        let t0 = Instant::now();
        order.append_decay_modifier(1.0, t0).unwrap();

        // 0.4% left rounds to 0
        assert!(order.is_expired_at(t0 + Duration::from_millis(996_000)));
        // 0.6% left rounds to 1
        assert!(!order.is_expired_at(t0 + Duration::from_millis(994_000)));
        assert_eq!(order.value_percent_at(t0 + Duration::from_secs(500)), 50.0);
    }

    #[test]
    fn test_append_rejected_after_removal() {
        let mut order = order(100.0, 1.0);
        let now = Instant::now();
        order.removed = Some(now);
        assert_eq!(
            order.append_decay_modifier(1.0, now),
            Err(OrderError::AlreadyRemoved("a".into()))
        );
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut order = order(100.0, 1.0);
        order.set_status(OrderStatus::Delivered).unwrap();
        assert!(order.set_status(OrderStatus::Delivered).is_ok());
        assert!(matches!(
            order.set_status(OrderStatus::Discarded),
            Err(OrderError::TerminalStatus { .. })
        ));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = OrderCreate {
            id: "x".into(),
            name: "Nothing".into(),
            temp: Temperature::Hot,
            shelf_life: 0.0,
            decay_rate: 1.0,
        };
        assert!(matches!(Order::new(params), Err(OrderError::InvalidParameters { .. })));
    }

    #[test]
    fn test_age_frozen_at_removal() {
        let mut order = order(100.0, 1.0);
        let t0 = Instant::now();
        assert_eq!(order.age_at(t0), Duration::ZERO);
        order.prepared = Some(t0);
        order.removed = Some(t0 + Duration::from_secs(3));
        assert_eq!(order.age_at(t0 + Duration::from_secs(9)), Duration::from_secs(3));
    }

    #[test]
    fn test_order_create_parses_source_json() {
        let json = r#"{"id":"a8cfcb76","name":"Banana Split","temp":"frozen","shelfLife":20,"decayRate":0.63}"#;
        let params: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(params.id, OrderId::from("a8cfcb76"));
        assert_eq!(params.temp, Temperature::Frozen);
        assert_eq!(params.shelf_life, 20.0);
    }
}
