//! Error types for the fulfillment pipeline.

use super::{ConfigError, SourceError};
use crate::courier_actor::CourierError;
use crate::kitchen_actor::KitchenError;
use crate::model::{ErrorKind, OrderError, OrderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// No shelf could take the order; it was discarded.
    #[error("Order {order} discarded: out of capacity")]
    OutOfCapacity { order: OrderId },

    /// The order was gone by the time the courier arrived.
    #[error("Order {order} not found at pickup")]
    OrderNotFound { order: OrderId },

    /// The order's value reached zero before pickup; it was discarded.
    #[error("Order {order} expired before pickup")]
    OrderExpired { order: OrderId },

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Kitchen(#[from] KitchenError),

    #[error(transparent)]
    Courier(#[from] CourierError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pipeline task panicked or was cancelled.
    #[error("Pipeline task failed: {0}")]
    Task(String),
}

impl FulfillmentError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FulfillmentError::OutOfCapacity { .. } => Some(ErrorKind::OutOfCapacity),
            FulfillmentError::OrderNotFound { .. } => Some(ErrorKind::OrderNotFound),
            FulfillmentError::OrderExpired { .. } => Some(ErrorKind::OrderExpired),
            _ => None,
        }
    }

    /// Expected outcomes are per-order failures that a batch counts rather than propagates.
    pub fn is_expected(&self) -> bool {
        self.kind().is_some()
    }
}
