//! # Domain Model
//!
//! Plain data types shared by the actors and the orchestrator. Nothing here spawns tasks
//! or talks to channels, apart from [`EventEmitter`] wrapping a broadcast sender.

pub mod courier;
pub mod event;
pub mod order;
pub mod selector;
pub mod shelf;
pub mod snapshot;

pub use courier::*;
pub use event::*;
pub use order::*;
pub use selector::*;
pub use shelf::*;
pub use snapshot::*;
