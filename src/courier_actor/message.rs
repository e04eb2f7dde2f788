use super::CourierError;
use crate::model::{Courier, CourierId, CourierSnapshot, OrderId};
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, CourierError>>;

#[derive(Debug)]
pub enum CourierRequest {
    Acquire {
        order: OrderId,
        respond_to: Response<Option<Courier>>,
    },
    Allocate {
        order: OrderId,
        respond_to: Response<Courier>,
    },
    Release {
        id: CourierId,
        respond_to: Response<Courier>,
    },
    Snapshot {
        respond_to: Response<Vec<CourierSnapshot>>,
    },
}
