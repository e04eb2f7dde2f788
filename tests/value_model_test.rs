use kitchen_fulfillment::model::{Order, OrderCreate, Temperature};
use proptest::prelude::*;
use std::time::Duration;
use tokio::time::Instant;

fn order(shelf_life: f64, decay_rate: f64) -> Order {
    Order::new(OrderCreate {
        id: "p".into(),
        name: "Property Pie".into(),
        temp: Temperature::Hot,
        shelf_life,
        decay_rate,
    })
    .unwrap()
}

/// A decay history as (modifier, seconds since the previous placement).
fn history() -> impl Strategy<Value = Vec<(f64, u64)>> {
    prop::collection::vec((0.5f64..3.0, 0u64..120), 1..6)
}

fn build(shelf_life: f64, decay_rate: f64, steps: &[(f64, u64)], t0: Instant) -> (Order, Instant) {
    let mut order = order(shelf_life, decay_rate);
    let mut at = t0;
    for (modifier, gap) in steps {
        at += Duration::from_secs(*gap);
        order.append_decay_modifier(*modifier, at).unwrap();
    }
    (order, at)
}

proptest! {
    #[test]
    fn value_never_increases_over_time(
        shelf_life in 1.0f64..1000.0,
        decay_rate in 0.0f64..5.0,
        steps in history(),
        first in 0u64..10_000,
        extra in 0u64..10_000,
    ) {
        let (order, last) = build(shelf_life, decay_rate, &steps, Instant::now());
        let earlier = last + Duration::from_millis(first);
        let later = earlier + Duration::from_millis(extra);

        prop_assert!(order.value_at(later) <= order.value_at(earlier) + 1e-9);
    }

    #[test]
    fn moving_shelves_does_not_jump_value(
        shelf_life in 1.0f64..1000.0,
        decay_rate in 0.0f64..5.0,
        steps in history(),
        wait in 0u64..60_000,
        modifier in 0.5f64..3.0,
    ) {
        let (mut order, last) = build(shelf_life, decay_rate, &steps, Instant::now());
        let moved_at = last + Duration::from_millis(wait);
        let before = order.value_at(moved_at);

        order.append_decay_modifier(modifier, moved_at).unwrap();

        prop_assert!((order.value_at(moved_at) - before).abs() < 1e-9);
    }

    #[test]
    fn value_is_frozen_once_removed(
        shelf_life in 1.0f64..1000.0,
        decay_rate in 0.0f64..5.0,
        steps in history(),
        held in 0u64..60_000,
        after in 1u64..60_000,
    ) {
        let (mut order, last) = build(shelf_life, decay_rate, &steps, Instant::now());
        let removed = last + Duration::from_millis(held);
        order.removed = Some(removed);

        prop_assert_eq!(order.value_at(removed), order.value_at(removed + Duration::from_millis(after)));
    }
}
