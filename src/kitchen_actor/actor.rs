//! # Kitchen Actor Server
//!
//! The single writer for all storage state. Requests are handled one at a time, so a
//! capacity check and the insertion that follows it, or a removal scan across every
//! shelf, can never interleave with another pipeline's request.

use super::{Kitchen, KitchenRequest};
use crate::clients::KitchenClient;
use crate::model::{EventEmitter, ShelfInfo};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct KitchenActor {
    receiver: mpsc::Receiver<KitchenRequest>,
    kitchen: Kitchen,
}

impl KitchenActor {
    pub fn new(
        buffer_size: usize,
        shelves: impl IntoIterator<Item = ShelfInfo>,
    ) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            kitchen: Kitchen::new(shelves),
        };
        (actor, KitchenClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    ///
    /// The event emitter is injected here rather than at construction so the system that
    /// owns the channel decides who listens.
    pub async fn run(mut self, events: EventEmitter) {
        info!("Kitchen actor started");

        while let Some(msg) = self.receiver.recv().await {
            let now = Instant::now();
            match msg {
                KitchenRequest::Register { order, respond_to } => {
                    debug!(order_id = %order.id, "Register");
                    let result = self.kitchen.register(order, &events);
                    if let Err(e) = &result {
                        warn!(error = %e, "Register failed");
                    }
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Get { id, respond_to } => {
                    let order = self.kitchen.get(&id).cloned();
                    debug!(order_id = %id, found = order.is_some(), "Get");
                    let _ = respond_to.send(Ok(order));
                }
                KitchenRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(order_id = %id, ?update, "Update");
                    let result = self.kitchen.update(&id, update);
                    if let Err(e) = &result {
                        warn!(order_id = %id, error = %e, "Update failed");
                    }
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Place {
                    selector,
                    shelf,
                    respond_to,
                } => {
                    debug!(?selector, %shelf, "Place");
                    let result = self.kitchen.place(selector, shelf, now, &events);
                    match &result {
                        Ok(placed) => info!(%shelf, count = placed.len(), "Placed"),
                        Err(e) => debug!(%shelf, error = %e, "Place rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Remove {
                    selector,
                    cause,
                    respond_to,
                } => {
                    debug!(?selector, ?cause, "Remove");
                    let removed = self.kitchen.remove(selector, cause, now, &events);
                    let _ = respond_to.send(Ok(removed));
                }
                KitchenRequest::RemoveFromShelf {
                    shelf,
                    selector,
                    cause,
                    respond_to,
                } => {
                    debug!(%shelf, ?selector, ?cause, "RemoveFromShelf");
                    let result = self
                        .kitchen
                        .remove_from_shelf(shelf, selector, cause, now, &events);
                    if let Ok(removed) = &result {
                        if !removed.is_empty() {
                            info!(%shelf, count = removed.len(), ?cause, "Removed from shelf");
                        }
                    }
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Forget { id, respond_to } => {
                    let forgotten = self.kitchen.forget(&id);
                    debug!(order_id = %id, found = forgotten.is_some(), "Forget");
                    let _ = respond_to.send(Ok(forgotten));
                }
                KitchenRequest::ShelfFor { kind, respond_to } => {
                    let _ = respond_to.send(Ok(self.kitchen.shelf_for(kind)));
                }
                KitchenRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.kitchen.snapshot(now)));
                }
            }
        }

        info!(orders = self.kitchen.len(), "Shutdown");
    }
}
