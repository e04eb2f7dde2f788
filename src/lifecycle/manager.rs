//! # Kitchen Manager
//!
//! Drives one order at a time through the pipeline:
//!
//! ```text
//! AWAITING_PREPARATION -> AWAITING_STORAGE -> AWAITING_COURIER -> AWAITING_DELIVERY
//!                                                                   -> DELIVERED | DISCARDED
//! ```
//!
//! Every shared resource lives behind an actor, so the manager holds no locks. Simulated
//! work is a `tokio::time::sleep` between actor requests, and other pipelines make
//! progress while one is asleep. An order can therefore be evicted between its placement
//! and the courier's arrival. That is an expected outcome, reported as
//! [`FulfillmentError::OrderNotFound`].

use super::{FulfillmentError, RandomSource, TimingConfig};
use crate::clients::{CourierClient, KitchenClient};
use crate::kitchen_actor::KitchenError;
use crate::model::{
    Courier, ErrorKind, EventEmitter, KitchenEvent, Order, OrderCreate, OrderId, OrderSelector,
    OrderStatus, OrderUpdate, ShelfInfo, ShelfKind, SystemSnapshot,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

pub struct KitchenManager {
    kitchen: KitchenClient,
    couriers: CourierClient,
    events: EventEmitter,
    random: Arc<dyn RandomSource>,
    timing: TimingConfig,
}

impl KitchenManager {
    pub fn new(
        kitchen: KitchenClient,
        couriers: CourierClient,
        events: EventEmitter,
        random: Arc<dyn RandomSource>,
        timing: TimingConfig,
    ) -> Self {
        Self {
            kitchen,
            couriers,
            events,
            random,
            timing,
        }
    }

    pub fn kitchen(&self) -> &KitchenClient {
        &self.kitchen
    }

    pub fn couriers(&self) -> &CourierClient {
        &self.couriers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.events.subscribe()
    }

    /// Runs the full pipeline for one order and returns the delivered order.
    ///
    /// # Errors
    /// [`FulfillmentError::is_expected`] holds for the per-order outcomes (out of capacity,
    /// not found at pickup, expired). Anything else means the system itself failed.
    #[instrument(name = "order", skip(self, params), fields(order_id = %params.id))]
    pub async fn process_order(&self, params: OrderCreate) -> Result<Order, FulfillmentError> {
        let order = Order::new(params)?;
        let id = order.id.clone();
        let result = self.fulfill(order).await;

        // A duplicate belongs to another pipeline, which forgets it itself.
        if !matches!(
            result,
            Err(FulfillmentError::Kitchen(KitchenError::DuplicateOrder(_)))
        ) {
            self.kitchen.forget(id).await?;
        }
        result
    }

    async fn fulfill(&self, order: Order) -> Result<Order, FulfillmentError> {
        let (order, shelf) = self.prepare_order(order).await?;
        let order = self.assign_order_to_shelf(order, shelf).await?;
        let courier = self.dispatch_courier(&order).await?;
        let delivered = self.deliver_order(order.id, courier).await?;
        info!(value = delivered.value_percent_at(Instant::now()), "Delivered");
        Ok(delivered)
    }

    pub async fn snapshot(&self) -> Result<SystemSnapshot, FulfillmentError> {
        Ok(SystemSnapshot {
            couriers: self.couriers.snapshot().await?,
            kitchen: self.kitchen.snapshot().await?,
        })
    }

    /// Registers and cooks the order, then resolves the shelf it should go to.
    ///
    /// A temperature without a configured shelf goes straight to overflow.
    async fn prepare_order(&self, order: Order) -> Result<(Order, Option<ShelfInfo>), FulfillmentError> {
        let id = order.id.clone();
        let temp = order.temp;
        self.kitchen.register(order).await?;

        sleep(self.timing.cook()).await;

        let prepared = self
            .kitchen
            .update(
                id.clone(),
                OrderUpdate {
                    prepared: Some(Instant::now()),
                    ..OrderUpdate::default()
                },
            )
            .await?;
        self.events.emit(KitchenEvent::Prepared { order: prepared });

        let order = self
            .kitchen
            .update(id, OrderUpdate::status(OrderStatus::AwaitingStorage))
            .await?;

        let primary = ShelfKind::from(temp);
        let shelf = match self.kitchen.shelf_for(primary).await? {
            Some(info) => Some(info),
            None => {
                debug!(%temp, "No shelf for temperature; using overflow");
                self.kitchen.shelf_for(ShelfKind::Overflow).await?
            }
        };
        Ok((order, shelf))
    }

    /// Places the order on `shelf`, falling back to overflow and evicting as a last resort.
    async fn assign_order_to_shelf(
        &self,
        order: Order,
        shelf: Option<ShelfInfo>,
    ) -> Result<Order, FulfillmentError> {
        let mut shelf = shelf;
        loop {
            let Some(info) = shelf else {
                warn!("No room on any shelf; discarding");
                self.kitchen
                    .remove(order.id.clone(), Some(ErrorKind::OutOfCapacity))
                    .await?;
                return Err(FulfillmentError::OutOfCapacity { order: order.id });
            };

            self.clean_shelf(info, false).await?;

            match self.kitchen.place(order.id.clone(), info.kind).await {
                Ok(placed) => {
                    debug!(shelf = %info.kind, "Assigned to shelf");
                    return Ok(placed.into_iter().find(|o| o.id == order.id).unwrap_or(order));
                }
                Err(KitchenError::OutOfCapacity { .. }) => {
                    debug!(shelf = %info.kind, "Shelf full");
                    if info.kind == ShelfKind::Overflow {
                        self.clean_shelf(info, true).await?;
                    }
                    shelf = self.kitchen.shelf_for(ShelfKind::Overflow).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Discards expired residents of a shelf. When `force` is set and nothing expired,
    /// evicts a random resident instead.
    ///
    /// The victim index is drawn over the shelf's capacity, not its occupancy, so a
    /// forced clean of a shelf that emptied in the meantime can evict nothing.
    async fn clean_shelf(&self, info: ShelfInfo, force: bool) -> Result<Vec<Order>, FulfillmentError> {
        sleep(self.timing.cleanup()).await;

        let now = Instant::now();
        let expired = OrderSelector::predicate(move |order, _| order.is_expired_at(now));
        let removed = self
            .kitchen
            .remove_from_shelf(info.kind, expired, Some(ErrorKind::OrderExpired))
            .await?;
        if !removed.is_empty() || !force {
            if !removed.is_empty() {
                debug!(shelf = %info.kind, count = removed.len(), "Discarded expired orders");
            }
            return Ok(removed);
        }

        let index = self.random.index(info.capacity);
        let evicted = self
            .kitchen
            .remove_from_shelf(
                info.kind,
                OrderSelector::Index(index),
                Some(ErrorKind::OutOfCapacity),
            )
            .await?;
        for order in &evicted {
            warn!(shelf = %info.kind, evicted = %order.id, "Evicted to make room");
        }
        Ok(evicted)
    }

    /// Hands the order to a courier and waits out the travel time.
    async fn dispatch_courier(&self, order: &Order) -> Result<Courier, FulfillmentError> {
        let mut courier = match self.couriers.acquire(order.id.clone()).await? {
            Some(courier) => courier,
            None => {
                sleep(self.timing.courier_allocation()).await;
                let courier = self.couriers.allocate(order.id.clone()).await?;
                self.events.emit(KitchenEvent::AllocatedCourier {
                    courier: courier.clone(),
                });
                courier
            }
        };
        self.events.emit(KitchenEvent::DispatchedCourier {
            courier: courier.clone(),
            order: order.clone(),
        });

        let travel = self.travel_time();
        debug!(courier_id = %courier.id, ?travel, "Courier dispatched");
        sleep(travel).await;

        courier.arrived = Some(Instant::now());
        Ok(courier)
    }

    /// Picks the order up and delivers it. The courier goes back to the pool whatever
    /// the outcome.
    async fn deliver_order(&self, id: OrderId, mut courier: Courier) -> Result<Order, FulfillmentError> {
        let result = self.hand_over(id, &mut courier).await;
        self.couriers.release(courier.id).await?;
        result
    }

    async fn hand_over(&self, id: OrderId, courier: &mut Courier) -> Result<Order, FulfillmentError> {
        let Some(order) = self.kitchen.get(id.clone()).await? else {
            return Err(FulfillmentError::OrderNotFound { order: id });
        };

        if order.is_expired_at(Instant::now()) {
            warn!("Expired before pickup");
            self.kitchen
                .remove(order, Some(ErrorKind::OrderExpired))
                .await?;
            return Err(FulfillmentError::OrderExpired { order: id });
        }
        if order.prepared.is_none() || order.removed.is_some() {
            debug!(status = ?order.status, "Not on a shelf at pickup");
            return Err(FulfillmentError::OrderNotFound { order: id });
        }

        sleep(self.timing.pickup()).await;
        courier.departed = Some(Instant::now());

        // Another pipeline may have evicted the order during pickup.
        let picked = self.kitchen.remove(id.clone(), None).await?;
        if picked.is_empty() {
            debug!("Evicted during pickup");
            return Err(FulfillmentError::OrderNotFound { order: id });
        }
        self.kitchen
            .update(id.clone(), OrderUpdate::status(OrderStatus::AwaitingDelivery))
            .await?;

        sleep(self.timing.delivery()).await;

        let delivered = self
            .kitchen
            .update(
                id,
                OrderUpdate {
                    status: Some(OrderStatus::Delivered),
                    delivered: Some(Instant::now()),
                    ..OrderUpdate::default()
                },
            )
            .await?;
        self.events.emit(KitchenEvent::Delivered {
            courier: courier.clone(),
            order: delivered.clone(),
        });
        Ok(delivered)
    }

    fn travel_time(&self) -> Duration {
        Duration::from_millis(
            self.random
                .gen_range(self.timing.travel_min_ms, self.timing.travel_max_ms),
        )
    }
}
