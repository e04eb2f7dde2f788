use kitchen_fulfillment::kitchen_actor::{self, KitchenError};
use kitchen_fulfillment::model::{
    ErrorKind, EventEmitter, Order, OrderCreate, OrderSelector, OrderStatus, OrderUpdate,
    ShelfInfo, ShelfKind, Temperature,
};
use kitchen_fulfillment::courier_actor;
use kitchen_fulfillment::lifecycle::{KitchenConfig, KitchenSystem, ThreadRandomSource, TimingConfig};
use std::collections::HashSet;
use std::sync::Arc;

fn order(id: &str) -> Order {
    Order::new(OrderCreate {
        id: id.into(),
        name: format!("Order {id}"),
        temp: Temperature::Hot,
        shelf_life: 300.0,
        decay_rate: 0.5,
    })
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_placements_never_exceed_capacity() {
    let (actor, client) = kitchen_actor::new(64, [ShelfInfo::new(ShelfKind::Hot, 3, 1.0)]);
    let handle = tokio::spawn(actor.run(EventEmitter::new(256)));

    for i in 0..20 {
        client.register(order(&format!("o{i}"))).await.unwrap();
    }

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.place(format!("o{i}").as_str(), ShelfKind::Hot).await
        }));
    }

    let mut placed = 0;
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(orders) => placed += orders.len(),
            Err(KitchenError::OutOfCapacity { shelf }) => {
                assert_eq!(shelf, ShelfKind::Hot);
                rejected += 1;
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(placed, 3);
    assert_eq!(rejected, 17);
    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.shelves[0].orders.len(), 3);
    assert_eq!(snapshot.shelves[0].available, 0);
    assert_eq!(snapshot.orders.len(), 17);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_acquisition_yields_distinct_couriers() {
    let (actor, client) = courier_actor::new(64);
    let handle = tokio::spawn(actor.run());

    let mut couriers = Vec::new();
    for i in 0..5 {
        couriers.push(client.allocate(format!("warmup{i}").into()).await.unwrap());
    }
    for courier in &couriers {
        client.release(courier.id).await.unwrap();
    }

    let mut tasks = Vec::new();
    for i in 0..10 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.acquire(format!("o{i}").into()).await
        }));
    }

    let mut acquired = HashSet::new();
    let mut misses = 0;
    for task in tasks {
        match task.await.unwrap().unwrap() {
            Some(courier) => assert!(acquired.insert(courier.id), "courier handed out twice"),
            None => misses += 1,
        }
    }
    assert_eq!(acquired.len(), 5);
    assert_eq!(misses, 5);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_evictions_racing_placements_do_not_abort_the_batch() {
    for round in 0..10 {
        let mut config = KitchenConfig::with_shelves(vec![
            ShelfInfo::new(ShelfKind::Hot, 1, 1.0),
            ShelfInfo::new(ShelfKind::Overflow, 1, 2.0),
        ]);
        config.timing = TimingConfig {
            travel_min_ms: 2,
            travel_max_ms: 6,
            ..TimingConfig::default()
        };
        let system = KitchenSystem::new(config, Arc::new(ThreadRandomSource)).unwrap();

        let orders = (0..40)
            .map(|i| OrderCreate {
                id: format!("r{round}-{i}").into(),
                name: "Hot Pot".into(),
                temp: Temperature::Hot,
                shelf_life: 300.0,
                decay_rate: 0.5,
            })
            .collect();
        let report = system
            .run_batch(orders, 1000.0)
            .await
            .unwrap_or_else(|e| panic!("round {round} aborted: {e}"));

        assert_eq!(report.delivered + report.total_failed(), 40);
        let snapshot = system.snapshot().await.unwrap();
        assert!(snapshot.kitchen.orders.is_empty());
        assert!(snapshot.kitchen.shelves.iter().all(|s| s.orders.is_empty()));

        system.shutdown().await.unwrap();
    }
}

#[tokio::test]
async fn test_remove_without_match_emits_nothing() {
    let events = EventEmitter::new(16);
    let mut receiver = events.subscribe();
    let (actor, client) = kitchen_actor::new(8, [ShelfInfo::new(ShelfKind::Hot, 2, 1.0)]);
    tokio::spawn(actor.run(events));

    client.register(order("a")).await.unwrap();
    client.place("a", ShelfKind::Hot).await.unwrap();
    while receiver.try_recv().is_ok() {}

    for _ in 0..2 {
        let removed = client
            .remove_from_shelf(ShelfKind::Hot, "missing", Some(ErrorKind::OrderExpired))
            .await
            .unwrap();
        assert!(removed.is_empty());
    }
    assert!(receiver.try_recv().is_err());
    assert!(client.get("a".into()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_discard_through_actor() {
    let (actor, client) = kitchen_actor::new(8, [ShelfInfo::new(ShelfKind::Hot, 2, 1.0)]);
    tokio::spawn(actor.run(EventEmitter::new(16)));

    client.register(order("a")).await.unwrap();
    client.place("a", ShelfKind::Hot).await.unwrap();
    let removed = client
        .remove(OrderSelector::predicate(|_, _| true), Some(ErrorKind::OutOfCapacity))
        .await
        .unwrap();

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].status, OrderStatus::Discarded);
    let err = client
        .update("a".into(), OrderUpdate::status(OrderStatus::Delivered))
        .await
        .unwrap_err();
    assert!(matches!(err, KitchenError::Order(_)));
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = kitchen_actor::new(8, [ShelfInfo::new(ShelfKind::Hot, 2, 1.0)]);
    drop(actor);

    assert_eq!(
        client.register(order("a")).await.unwrap_err(),
        KitchenError::ActorClosed
    );
}
