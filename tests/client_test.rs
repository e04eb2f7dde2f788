//! Client behaviour against hand-driven mock actors.

use kitchen_fulfillment::courier_actor::CourierError;
use kitchen_fulfillment::kitchen_actor::KitchenError;
use kitchen_fulfillment::mock::{
    create_mock_courier_client, create_mock_kitchen_client, expect_acquire, expect_place,
    expect_register, expect_remove, expect_shelf_for,
};
use kitchen_fulfillment::model::{
    ErrorKind, Order, OrderCreate, OrderId, ShelfInfo, ShelfKind, Temperature,
};

fn order(id: &str) -> Order {
    Order::new(OrderCreate {
        id: id.into(),
        name: "Kale Salad".into(),
        temp: Temperature::Cold,
        shelf_life: 250.0,
        decay_rate: 0.3,
    })
    .unwrap()
}

#[tokio::test]
async fn test_register_round_trip() {
    let (client, mut receiver) = create_mock_kitchen_client(4);

    let task = tokio::spawn(async move { client.register(order("a")).await });

    let (sent, respond_to) = expect_register(&mut receiver)
        .await
        .expect("Expected Register request");
    assert_eq!(sent.id, OrderId::from("a"));
    respond_to.send(Ok(sent)).unwrap();

    let registered = task.await.unwrap().unwrap();
    assert_eq!(registered.name, "Kale Salad");
}

#[tokio::test]
async fn test_place_forwards_selector_and_error() {
    let (client, mut receiver) = create_mock_kitchen_client(4);

    let task = tokio::spawn(async move { client.place("a", ShelfKind::Cold).await });

    let (selector, shelf, respond_to) = expect_place(&mut receiver).await.unwrap();
    assert_eq!(shelf, ShelfKind::Cold);
    let matches = selector.into_predicate();
    assert!(matches(&order("a"), 0));
    assert!(!matches(&order("b"), 0));
    respond_to
        .send(Err(KitchenError::OutOfCapacity { shelf }))
        .unwrap();

    let err = task.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::OutOfCapacity));
}

#[tokio::test]
async fn test_remove_forwards_cause() {
    let (client, mut receiver) = create_mock_kitchen_client(4);

    let task = tokio::spawn(async move {
        client
            .remove(order("a"), Some(ErrorKind::OrderExpired))
            .await
    });

    let (selector, cause, respond_to) = expect_remove(&mut receiver).await.unwrap();
    assert_eq!(cause, Some(ErrorKind::OrderExpired));
    assert_eq!(selector.as_order().map(|o| o.id.clone()), Some(OrderId::from("a")));
    respond_to.send(Ok(vec![])).unwrap();

    assert!(task.await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn test_dropped_responder_is_reported() {
    let (client, mut receiver) = create_mock_kitchen_client(4);

    let task = tokio::spawn(async move { client.shelf_for(ShelfKind::Frozen).await });

    let (kind, respond_to) = expect_shelf_for(&mut receiver).await.unwrap();
    assert_eq!(kind, ShelfKind::Frozen);
    drop(respond_to);

    assert_eq!(task.await.unwrap().unwrap_err(), KitchenError::ActorDropped);
}

#[tokio::test]
async fn test_shelf_lookup_answer() {
    let (client, mut receiver) = create_mock_kitchen_client(4);

    let task = tokio::spawn(async move { client.shelf_for(ShelfKind::Hot).await });

    let (_, respond_to) = expect_shelf_for(&mut receiver).await.unwrap();
    respond_to
        .send(Ok(Some(ShelfInfo::new(ShelfKind::Hot, 10, 1.0))))
        .unwrap();

    let info = task.await.unwrap().unwrap().unwrap();
    assert_eq!(info.capacity, 10);
}

#[tokio::test]
async fn test_courier_client_mapping() {
    let (client, mut receiver) = create_mock_courier_client(4);

    let task = tokio::spawn(async move { client.acquire("a".into()).await });
    let (order, respond_to) = expect_acquire(&mut receiver).await.unwrap();
    assert_eq!(order, OrderId::from("a"));
    respond_to.send(Ok(None)).unwrap();
    assert!(task.await.unwrap().unwrap().is_none());

    drop(receiver);
    let (client, receiver) = create_mock_courier_client(4);
    drop(receiver);
    assert_eq!(
        client.allocate("b".into()).await.unwrap_err(),
        CourierError::ActorClosed
    );
}
