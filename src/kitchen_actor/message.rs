//! Request messages accepted by the Kitchen actor.

use super::KitchenError;
use crate::model::{
    ErrorKind, KitchenSnapshot, Order, OrderId, OrderSelector, OrderUpdate, ShelfInfo, ShelfKind,
};
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, KitchenError>>;

#[derive(Debug)]
pub enum KitchenRequest {
    Register {
        order: Order,
        respond_to: Response<Order>,
    },
    Get {
        id: OrderId,
        respond_to: Response<Option<Order>>,
    },
    Update {
        id: OrderId,
        update: OrderUpdate,
        respond_to: Response<Order>,
    },
    Place {
        selector: OrderSelector,
        shelf: ShelfKind,
        respond_to: Response<Vec<Order>>,
    },
    Remove {
        selector: OrderSelector,
        cause: Option<ErrorKind>,
        respond_to: Response<Vec<Order>>,
    },
    RemoveFromShelf {
        shelf: ShelfKind,
        selector: OrderSelector,
        cause: Option<ErrorKind>,
        respond_to: Response<Vec<Order>>,
    },
    Forget {
        id: OrderId,
        respond_to: Response<Option<Order>>,
    },
    ShelfFor {
        kind: ShelfKind,
        respond_to: Response<Option<ShelfInfo>>,
    },
    Snapshot {
        respond_to: Response<KitchenSnapshot>,
    },
}
