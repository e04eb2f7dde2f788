//! # Courier Client
//!
//! High-level API for the Courier actor.

use crate::courier_actor::{CourierError, CourierRequest, Response};
use crate::model::{Courier, CourierId, CourierSnapshot, OrderId};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

#[derive(Clone)]
pub struct CourierClient {
    sender: mpsc::Sender<CourierRequest>,
}

impl CourierClient {
    pub fn new(sender: mpsc::Sender<CourierRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> CourierRequest,
    ) -> Result<T, CourierError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CourierError::ActorClosed)?;
        response.await.map_err(|_| CourierError::ActorDropped)?
    }

    /// Dispatches an idle courier for `order`, if there is one.
    #[instrument(skip(self))]
    pub async fn acquire(&self, order: OrderId) -> Result<Option<Courier>, CourierError> {
        self.request(|respond_to| CourierRequest::Acquire { order, respond_to })
            .await
    }

    /// Hires a new courier, already dispatched for `order`.
    #[instrument(skip(self))]
    pub async fn allocate(&self, order: OrderId) -> Result<Courier, CourierError> {
        self.request(|respond_to| CourierRequest::Allocate { order, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn release(&self, id: CourierId) -> Result<Courier, CourierError> {
        self.request(|respond_to| CourierRequest::Release { id, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<Vec<CourierSnapshot>, CourierError> {
        self.request(|respond_to| CourierRequest::Snapshot { respond_to })
            .await
    }
}
