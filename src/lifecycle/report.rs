//! # Batch Statistics
//!
//! Counters are derived from the event stream rather than from pipeline results, so a
//! discard is counted once even when it happens to an order whose own pipeline later
//! reports it as not found.

use super::FulfillmentError;
use crate::model::{ErrorKind, KitchenEvent};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FulfillmentStats {
    pub received: usize,
    /// Removals that carried a cause.
    pub discarded: usize,
    pub delivered: usize,
    pub couriers_allocated: usize,
    /// Sum of dispatch-to-delivery times over delivered orders.
    pub total_delivery: Duration,
    /// Events the recorder fell too far behind to see.
    pub missed_events: u64,
}

impl FulfillmentStats {
    pub fn record(&mut self, event: &KitchenEvent) {
        match event {
            KitchenEvent::Received { .. } => self.received += 1,
            KitchenEvent::Removed { cause: Some(_), .. } => self.discarded += 1,
            KitchenEvent::AllocatedCourier { .. } => self.couriers_allocated += 1,
            KitchenEvent::Delivered { courier, order } => {
                self.delivered += 1;
                if let (Some(dispatched), Some(delivered)) = (courier.dispatched, order.delivered) {
                    self.total_delivery += delivered.saturating_duration_since(dispatched);
                }
            }
            _ => {}
        }
    }

    pub fn mean_delivery(&self) -> Option<Duration> {
        let delivered = u32::try_from(self.delivered).ok().filter(|n| *n > 0)?;
        Some(self.total_delivery / delivered)
    }
}

/// Counts events on a background task between [`start`](Self::start) and
/// [`finish`](Self::finish).
pub struct StatsRecorder {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<FulfillmentStats>,
}

impl StatsRecorder {
    pub fn start(mut receiver: broadcast::Receiver<KitchenEvent>) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut stats = FulfillmentStats::default();
            loop {
                tokio::select! {
                    biased;
                    result = receiver.recv() => match result {
                        Ok(event) => stats.record(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Stats recorder lagged");
                            stats.missed_events += skipped;
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = &mut stopped => {
                        loop {
                            match receiver.try_recv() {
                                Ok(event) => stats.record(&event),
                                Err(TryRecvError::Lagged(skipped)) => stats.missed_events += skipped,
                                Err(_) => break,
                            }
                        }
                        break;
                    }
                }
            }
            stats
        });
        Self { stop, handle }
    }

    /// Stops recording and returns everything seen so far.
    pub async fn finish(self) -> Result<FulfillmentStats, FulfillmentError> {
        let _ = self.stop.send(());
        self.handle
            .await
            .map_err(|e| FulfillmentError::Task(e.to_string()))
    }
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FulfillmentReport {
    pub stats: FulfillmentStats,
    /// Pipelines that ended with a delivery.
    pub delivered: usize,
    /// Pipelines that ended with an expected failure, by kind.
    pub failures: HashMap<ErrorKind, usize>,
    pub elapsed: Duration,
}

impl FulfillmentReport {
    pub fn failed(&self, kind: ErrorKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_failed(&self) -> usize {
        self.failures.values().sum()
    }
}
