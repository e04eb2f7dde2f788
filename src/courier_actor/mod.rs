//! # Courier Actor
//!
//! Manages the pool of delivery agents. Couriers are created lazily the first time no
//! idle one is available and are reused for the rest of the run.
//!
//! The simulated allocation delay is not part of this actor: the orchestrator sleeps
//! between a failed [`acquire`](crate::clients::CourierClient::acquire) and an
//! [`allocate`](crate::clients::CourierClient::allocate), so the actor never blocks other
//! pipelines while a courier is being "hired".

pub mod actor;
pub mod error;
pub mod message;
pub mod pool;

pub use actor::CourierActor;
pub use error::*;
pub use message::*;
pub use pool::CourierPool;

use crate::clients::CourierClient;

/// Creates a new Courier actor and its client.
pub fn new(buffer_size: usize) -> (CourierActor, CourierClient) {
    CourierActor::new(buffer_size)
}
