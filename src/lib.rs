//! # Kitchen Fulfillment Library
//!
//! A simulation of a perishable-goods kitchen. Orders are cooked, stored on capacity
//! bounded shelves where their value decays, and picked up by couriers before they spoil.
//!
//! - **[model]**: plain data: orders and their decay model, shelves, couriers, events.
//! - **[kitchen_actor]**: single-writer owner of the order registry and the shelves.
//! - **[courier_actor]**: single-writer owner of the courier pool.
//! - **[clients]**: typed handles that hide the message passing.
//! - **[lifecycle]**: the per-order pipeline, system wiring, configuration, and logging.
//! - **[mock]**: helpers for testing clients without real actors.

pub mod clients;
pub mod courier_actor;
pub mod kitchen_actor;
pub mod lifecycle;
pub mod mock;
pub mod model;
