//! # Test Utilities
//!
//! Helpers for testing client and manager logic without spawning the real actors. A mock
//! client is an ordinary client whose requests land on a receiver the test controls:
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_kitchen_client(8);
//! let task = tokio::spawn(async move { client.shelf_for(ShelfKind::Hot).await });
//!
//! let (kind, respond_to) = expect_shelf_for(&mut receiver).await.unwrap();
//! respond_to.send(Ok(None)).unwrap();
//! ```

use crate::clients::{CourierClient, KitchenClient};
use crate::courier_actor::{self, CourierRequest};
use crate::kitchen_actor::{self, KitchenRequest};
use crate::lifecycle::RandomSource;
use crate::model::{Courier, ErrorKind, Order, OrderId, OrderSelector, ShelfInfo, ShelfKind};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::mpsc;

pub fn create_mock_kitchen_client(
    buffer_size: usize,
) -> (KitchenClient, mpsc::Receiver<KitchenRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (KitchenClient::new(sender), receiver)
}

pub fn create_mock_courier_client(
    buffer_size: usize,
) -> (CourierClient, mpsc::Receiver<CourierRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CourierClient::new(sender), receiver)
}

pub async fn expect_register(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(Order, kitchen_actor::Response<Order>)> {
    match receiver.recv().await {
        Some(KitchenRequest::Register { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}

pub async fn expect_place(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(OrderSelector, ShelfKind, kitchen_actor::Response<Vec<Order>>)> {
    match receiver.recv().await {
        Some(KitchenRequest::Place {
            selector,
            shelf,
            respond_to,
        }) => Some((selector, shelf, respond_to)),
        _ => None,
    }
}

pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(
    OrderSelector,
    Option<ErrorKind>,
    kitchen_actor::Response<Vec<Order>>,
)> {
    match receiver.recv().await {
        Some(KitchenRequest::Remove {
            selector,
            cause,
            respond_to,
        }) => Some((selector, cause, respond_to)),
        _ => None,
    }
}

pub async fn expect_shelf_for(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(ShelfKind, kitchen_actor::Response<Option<ShelfInfo>>)> {
    match receiver.recv().await {
        Some(KitchenRequest::ShelfFor { kind, respond_to }) => Some((kind, respond_to)),
        _ => None,
    }
}

pub async fn expect_acquire(
    receiver: &mut mpsc::Receiver<CourierRequest>,
) -> Option<(OrderId, courier_actor::Response<Option<Courier>>)> {
    match receiver.recv().await {
        Some(CourierRequest::Acquire { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}

/// Replays a fixed sequence of values, clamped into the requested range. Falls back to
/// the low end once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedRandomSource {
    values: Mutex<VecDeque<u64>>,
}

impl ScriptedRandomSource {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for ScriptedRandomSource {
    fn gen_range(&self, low: u64, high: u64) -> u64 {
        let next = self
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.map_or(low, |v| v.clamp(low, high.max(low)))
    }
}
