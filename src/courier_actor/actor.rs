use super::{CourierPool, CourierRequest};
use crate::clients::CourierClient;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Owns the [`CourierPool`]. Acquisition is a single request, so two pipelines can never
/// be handed the same idle courier.
pub struct CourierActor {
    receiver: mpsc::Receiver<CourierRequest>,
    pool: CourierPool,
}

impl CourierActor {
    pub fn new(buffer_size: usize) -> (Self, CourierClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            pool: CourierPool::new(),
        };
        (actor, CourierClient::new(sender))
    }

    pub async fn run(mut self) {
        info!("Courier actor started");

        while let Some(msg) = self.receiver.recv().await {
            let now = Instant::now();
            match msg {
                CourierRequest::Acquire { order, respond_to } => {
                    let courier = self.pool.acquire(order.clone(), now);
                    match &courier {
                        Some(c) => debug!(order_id = %order, courier_id = %c.id, "Acquired idle courier"),
                        None => debug!(order_id = %order, "No idle courier"),
                    }
                    let _ = respond_to.send(Ok(courier));
                }
                CourierRequest::Allocate { order, respond_to } => {
                    let courier = self.pool.allocate(order.clone(), now);
                    info!(order_id = %order, courier_id = %courier.id, size = self.pool.len(), "Allocated");
                    let _ = respond_to.send(Ok(courier));
                }
                CourierRequest::Release { id, respond_to } => {
                    let result = self.pool.release(id, now);
                    match &result {
                        Ok(_) => debug!(courier_id = %id, idle = self.pool.idle(), "Released"),
                        Err(e) => warn!(courier_id = %id, error = %e, "Release failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CourierRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.pool.snapshot()));
                }
            }
        }

        info!(size = self.pool.len(), "Shutdown");
    }
}
