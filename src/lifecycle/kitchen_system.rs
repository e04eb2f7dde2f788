use super::{
    ConfigError, FulfillmentError, FulfillmentReport, KitchenConfig, KitchenManager, RandomSource,
    StatsRecorder,
};
use crate::model::{EventEmitter, KitchenEvent, OrderCreate, SystemSnapshot};
use crate::{courier_actor, kitchen_actor};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{error, info};

/// The running kitchen: both actors, the event channel, and the manager that drives
/// orders through them.
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(KitchenConfig::default(), Arc::new(ThreadRandomSource))?;
/// let report = system.run_batch(orders, 2.0).await?;
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    pub manager: Arc<KitchenManager>,
    events: EventEmitter,
    handles: Vec<JoinHandle<()>>,
}

impl KitchenSystem {
    /// Validates `config`, then spawns the kitchen and courier actors.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: KitchenConfig, random: Arc<dyn RandomSource>) -> Result<Self, ConfigError> {
        config.validate()?;

        // 1. Create actors
        let events = EventEmitter::new(config.event_capacity);
        let (kitchen_actor, kitchen_client) =
            kitchen_actor::new(config.actor_buffer, config.shelves.iter().copied());
        let (courier_actor, courier_client) = courier_actor::new(config.actor_buffer);

        // 2. Start actors; the kitchen gets the event channel as its context
        let kitchen_handle = tokio::spawn(kitchen_actor.run(events.clone()));
        let courier_handle = tokio::spawn(courier_actor.run());

        let manager = KitchenManager::new(
            kitchen_client,
            courier_client,
            events.clone(),
            random,
            config.timing,
        );
        info!(shelves = config.shelves.len(), "Kitchen system started");

        Ok(Self {
            manager: Arc::new(manager),
            events,
            handles: vec![kitchen_handle, courier_handle],
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Result<SystemSnapshot, FulfillmentError> {
        self.manager.snapshot().await
    }

    /// Starts one pipeline per order, at most `orders_per_second` starts per second, and
    /// waits for all of them.
    ///
    /// Expected per-order failures are counted in the report. The first unexpected error is
    /// returned once every pipeline has finished.
    pub async fn run_batch(
        &self,
        orders: Vec<OrderCreate>,
        orders_per_second: f64,
    ) -> Result<FulfillmentReport, FulfillmentError> {
        if !(orders_per_second.is_finite() && orders_per_second > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "throughput must be positive, got {orders_per_second}"
            ))
            .into());
        }

        let recorder = StatsRecorder::start(self.events.subscribe());
        let started = Instant::now();
        let mut ticker = interval(Duration::from_secs_f64(1.0 / orders_per_second));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pipelines = Vec::with_capacity(orders.len());
        for params in orders {
            ticker.tick().await;
            let manager = Arc::clone(&self.manager);
            pipelines.push(tokio::spawn(async move { manager.process_order(params).await }));
        }

        let mut delivered = 0;
        let mut failures: HashMap<_, usize> = HashMap::new();
        let mut unexpected = None;
        for pipeline in pipelines {
            match pipeline.await {
                Ok(Ok(_)) => delivered += 1,
                Ok(Err(e)) => match e.kind() {
                    Some(kind) => *failures.entry(kind).or_default() += 1,
                    None => {
                        error!(error = %e, "Pipeline failed");
                        unexpected.get_or_insert(e);
                    }
                },
                Err(e) => {
                    error!(error = %e, "Pipeline task failed");
                    unexpected.get_or_insert(FulfillmentError::Task(e.to_string()));
                }
            }
        }

        let stats = recorder.finish().await?;
        if let Some(e) = unexpected {
            return Err(e);
        }

        Ok(FulfillmentReport {
            stats,
            delivered,
            failures,
            elapsed: started.elapsed(),
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the manager drops the last clients, which closes the actor channels. Any
    /// other clone of the manager or its clients still alive will keep the actors running.
    pub async fn shutdown(self) -> Result<(), FulfillmentError> {
        info!("Shutting down kitchen system...");
        drop(self.manager);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(FulfillmentError::Task(e.to_string()));
            }
        }

        info!("Kitchen system shutdown complete.");
        Ok(())
    }
}
