//! Error types for the Courier actor.

use crate::model::CourierId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CourierError {
    /// The courier was never allocated by this pool.
    #[error("Unknown courier: {0}")]
    UnknownCourier(CourierId),

    #[error("Courier actor closed")]
    ActorClosed,

    #[error("Courier actor dropped response channel")]
    ActorDropped,
}
