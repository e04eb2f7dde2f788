//! Error types for the Kitchen actor.

use crate::model::{ErrorKind, OrderError, OrderId, ShelfKind};
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// The target shelf has no room for the order(s).
    #[error("Shelf {shelf} is out of capacity")]
    OutOfCapacity { shelf: ShelfKind },

    /// Nothing matched the selector.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// No shelf of the requested kind is configured.
    #[error("Shelf not found: {0}")]
    ShelfNotFound(ShelfKind),

    /// An order with this id is already tracked.
    #[error("Duplicate order: {0}")]
    DuplicateOrder(OrderId),

    #[error(transparent)]
    Order(#[from] OrderError),

    /// The actor's request channel is closed.
    #[error("Kitchen actor closed")]
    ActorClosed,

    /// The actor dropped the response channel.
    #[error("Kitchen actor dropped response channel")]
    ActorDropped,
}

impl KitchenError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            KitchenError::OutOfCapacity { .. } => Some(ErrorKind::OutOfCapacity),
            KitchenError::OrderNotFound(_) => Some(ErrorKind::OrderNotFound),
            _ => None,
        }
    }
}
