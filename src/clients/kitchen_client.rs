//! # Kitchen Client
//!
//! High-level API for the Kitchen actor. Every method is one request/response round trip,
//! so each call is applied atomically with respect to other pipelines.

use crate::kitchen_actor::{KitchenError, KitchenRequest, Response};
use crate::model::{
    ErrorKind, KitchenSnapshot, Order, OrderId, OrderSelector, OrderUpdate, ShelfInfo, ShelfKind,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> KitchenRequest,
    ) -> Result<T, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| KitchenError::ActorClosed)?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn register(&self, order: Order) -> Result<Order, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Register { order, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, KitchenError> {
        self.request(|respond_to| KitchenRequest::Get { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<Order, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, selector))]
    pub async fn place(
        &self,
        selector: impl Into<OrderSelector>,
        shelf: ShelfKind,
    ) -> Result<Vec<Order>, KitchenError> {
        let selector = selector.into();
        debug!(?selector, "Sending request");
        self.request(|respond_to| KitchenRequest::Place {
            selector,
            shelf,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, selector))]
    pub async fn remove(
        &self,
        selector: impl Into<OrderSelector>,
        cause: Option<ErrorKind>,
    ) -> Result<Vec<Order>, KitchenError> {
        let selector = selector.into();
        debug!(?selector, "Sending request");
        self.request(|respond_to| KitchenRequest::Remove {
            selector,
            cause,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, selector))]
    pub async fn remove_from_shelf(
        &self,
        shelf: ShelfKind,
        selector: impl Into<OrderSelector>,
        cause: Option<ErrorKind>,
    ) -> Result<Vec<Order>, KitchenError> {
        let selector = selector.into();
        debug!(?selector, "Sending request");
        self.request(|respond_to| KitchenRequest::RemoveFromShelf {
            shelf,
            selector,
            cause,
            respond_to,
        })
        .await
    }

    /// Drops a finished order from the released set. Returns it if it was there.
    #[instrument(skip(self))]
    pub async fn forget(&self, id: OrderId) -> Result<Option<Order>, KitchenError> {
        self.request(|respond_to| KitchenRequest::Forget { id, respond_to })
            .await
    }

    pub async fn shelf_for(&self, kind: ShelfKind) -> Result<Option<ShelfInfo>, KitchenError> {
        self.request(|respond_to| KitchenRequest::ShelfFor { kind, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<KitchenSnapshot, KitchenError> {
        self.request(|respond_to| KitchenRequest::Snapshot { respond_to })
            .await
    }
}
