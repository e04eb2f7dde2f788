//! Typed handles for talking to the actors. Clients are cheap to clone and every clone
//! feeds the same actor.

pub mod courier_client;
pub mod kitchen_client;

pub use courier_client::*;
pub use kitchen_client::*;
