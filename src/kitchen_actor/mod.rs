//! # Kitchen Actor
//!
//! Serves the storage side of the pipeline: the order registry, the capacity-bounded
//! shelves, and the set of orders that have left storage.
//!
//! ## Structure
//!
//! - [`kitchen`] - the [`Kitchen`] aggregate that routes, places, and removes orders
//! - [`shelf`] - a single capacity-bounded [`Shelf`]
//! - [`message`] - [`KitchenRequest`] messages and the [`Response`] alias
//! - [`actor`] - the [`KitchenActor`] request loop
//! - [`error`] - [`KitchenError`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kitchen_fulfillment::kitchen_actor;
//! use kitchen_fulfillment::model::{EventEmitter, ShelfInfo, ShelfKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = kitchen_actor::new(32, [ShelfInfo::new(ShelfKind::Hot, 10, 1.0)]);
//!     tokio::spawn(actor.run(EventEmitter::new(64)));
//!
//!     let shelf = client.shelf_for(ShelfKind::Hot).await.unwrap();
//!     assert_eq!(shelf.map(|s| s.capacity), Some(10));
//! }
//! ```

pub mod actor;
pub mod error;
pub mod kitchen;
pub mod message;
pub mod shelf;

pub use actor::KitchenActor;
pub use error::*;
pub use kitchen::Kitchen;
pub use message::*;
pub use shelf::Shelf;

use crate::clients::KitchenClient;
use crate::model::ShelfInfo;

/// Creates a new Kitchen actor and its client.
pub fn new(
    buffer_size: usize,
    shelves: impl IntoIterator<Item = ShelfInfo>,
) -> (KitchenActor, KitchenClient) {
    KitchenActor::new(buffer_size, shelves)
}
