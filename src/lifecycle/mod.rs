//! # System Lifecycle & Orchestration
//!
//! Wires the actors together and drives orders through them.
//!
//! ## Responsibilities
//!
//! 1. **Actor creation and wiring** - [`KitchenSystem::new`] spawns the kitchen and courier
//!    actors and injects the event channel into the kitchen at run time.
//! 2. **Per-order orchestration** - [`KitchenManager::process_order`] is the pipeline state
//!    machine.
//! 3. **Batch runs** - [`KitchenSystem::run_batch`] throttles pipeline starts and gathers a
//!    [`FulfillmentReport`].
//! 4. **Graceful shutdown** - [`KitchenSystem::shutdown`] drops the clients and awaits the
//!    actor tasks.
//! 5. **Ambient concerns** - configuration ([`config`]), randomness ([`random`]), order
//!    sources ([`source`]) and logging ([`tracing`]).
//!
//! ## Shutdown
//!
//! The actors stop when their last client is dropped. Pipelines hold an `Arc` of the
//! manager, so a batch must finish before shutdown can complete.

pub mod config;
pub mod error;
pub mod kitchen_system;
pub mod manager;
pub mod random;
pub mod report;
pub mod source;
pub mod tracing;

pub use self::tracing::*;
pub use config::*;
pub use error::*;
pub use kitchen_system::*;
pub use manager::*;
pub use random::*;
pub use report::*;
pub use source::*;
