//! # Tracing & Event Logging
//!
//! Two layers of observability:
//!
//! - **Spans and actor logs** come from `#[instrument]` on client methods and on
//!   [`KitchenManager::process_order`](super::KitchenManager::process_order), which opens
//!   an `order{order_id=...}` span around the whole pipeline.
//! - **Lifecycle events** from the broadcast channel are turned into log lines by
//!   [`spawn_event_logger`].
//!
//! ```bash
//! RUST_LOG=info cargo run -- --file orders.json     # receipts, couriers, deliveries, discards
//! RUST_LOG=debug cargo run -- --file orders.json    # every request and shelf move
//! ```

use crate::model::KitchenEvent;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Logs every event until the channel closes.
pub fn spawn_event_logger(mut receiver: broadcast::Receiver<KitchenEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn log_event(event: &KitchenEvent) {
    match event {
        KitchenEvent::Received { order } => {
            info!(order_id = %order.id, name = %order.name, temp = %order.temp, "Order received")
        }
        KitchenEvent::Prepared { order } => debug!(order_id = %order.id, "Order prepared"),
        KitchenEvent::Stored { order, shelf } => {
            debug!(order_id = %order.id, %shelf, "Order stored")
        }
        KitchenEvent::AssignedToShelf { order, shelf } => {
            debug!(order_id = %order.id, shelf = %shelf.kind, "Order assigned to shelf")
        }
        KitchenEvent::Removed { order, cause: None } => {
            debug!(order_id = %order.id, "Order picked up")
        }
        KitchenEvent::Removed {
            order,
            cause: Some(cause),
        } => warn!(order_id = %order.id, %cause, "Order discarded"),
        KitchenEvent::AllocatedCourier { courier } => {
            info!(courier_id = %courier.id, "Courier allocated")
        }
        KitchenEvent::DispatchedCourier { courier, order } => {
            debug!(courier_id = %courier.id, order_id = %order.id, "Courier dispatched")
        }
        KitchenEvent::Delivered { courier, order } => {
            info!(courier_id = %courier.id, order_id = %order.id, "Order delivered")
        }
    }
}
