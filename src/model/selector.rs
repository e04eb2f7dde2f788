//! # Order Selectors
//!
//! Placement and removal accept "which orders?" in several shapes: one order, a batch of
//! orders, a bare id, a position on a shelf, or an arbitrary test. [`OrderSelector`] names
//! each shape explicitly and [`OrderSelector::into_predicate`] resolves it once into the
//! single predicate form the storage layer scans with.

use crate::model::{Order, OrderId};
use std::collections::HashSet;
use std::fmt::Debug;

/// A normalized test over `(order, index_within_collection)`.
pub type OrderPredicate = Box<dyn Fn(&Order, usize) -> bool + Send + Sync>;

pub enum OrderSelector {
    /// Match this exact order (by id).
    Order(Order),
    /// Match any order in the batch (by id).
    Orders(Vec<Order>),
    /// Match the order with this id.
    Id(OrderId),
    /// Match the order at this position.
    Index(usize),
    /// Match every order the function accepts.
    Predicate(OrderPredicate),
}

impl OrderSelector {
    pub fn predicate(f: impl Fn(&Order, usize) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Box::new(f))
    }

    /// The concrete order this selector names, if any. Removal echoes it back when
    /// nothing matched.
    pub fn as_order(&self) -> Option<&Order> {
        match self {
            OrderSelector::Order(order) => Some(order),
            _ => None,
        }
    }

    pub fn into_predicate(self) -> OrderPredicate {
        match self {
            OrderSelector::Order(order) => {
                let id = order.id;
                Box::new(move |candidate, _| candidate.id == id)
            }
            OrderSelector::Orders(orders) => {
                let ids: HashSet<OrderId> = orders.into_iter().map(|o| o.id).collect();
                Box::new(move |candidate, _| ids.contains(&candidate.id))
            }
            OrderSelector::Id(id) => Box::new(move |candidate, _| candidate.id == id),
            OrderSelector::Index(index) => Box::new(move |_, i| i == index),
            OrderSelector::Predicate(f) => f,
        }
    }
}

impl Debug for OrderSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSelector::Order(order) => f.debug_tuple("Order").field(&order.id).finish(),
            OrderSelector::Orders(orders) => f
                .debug_tuple("Orders")
                .field(&orders.iter().map(|o| &o.id).collect::<Vec<_>>())
                .finish(),
            OrderSelector::Id(id) => f.debug_tuple("Id").field(id).finish(),
            OrderSelector::Index(index) => f.debug_tuple("Index").field(index).finish(),
            OrderSelector::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<OrderId> for OrderSelector {
    fn from(id: OrderId) -> Self {
        OrderSelector::Id(id)
    }
}

impl From<&OrderId> for OrderSelector {
    fn from(id: &OrderId) -> Self {
        OrderSelector::Id(id.clone())
    }
}

impl From<&str> for OrderSelector {
    fn from(id: &str) -> Self {
        OrderSelector::Id(id.into())
    }
}

impl From<Order> for OrderSelector {
    fn from(order: Order) -> Self {
        OrderSelector::Order(order)
    }
}

impl From<Vec<Order>> for OrderSelector {
    fn from(orders: Vec<Order>) -> Self {
        OrderSelector::Orders(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderCreate, Temperature};

    fn order(id: &str) -> Order {
        Order::new(OrderCreate {
            id: id.into(),
            name: format!("Order {id}"),
            temp: Temperature::Hot,
            shelf_life: 100.0,
            decay_rate: 1.0,
        })
        .unwrap()
    }

    #[test]
    fn test_each_selector_shape() {
        let (a, b, c) = (order("a"), order("b"), order("c"));

        let by_order = OrderSelector::from(a.clone()).into_predicate();
        assert!(by_order(&a, 5) && !by_order(&b, 0));

        let by_orders = OrderSelector::from(vec![a.clone(), c.clone()]).into_predicate();
        assert!(by_orders(&a, 0) && by_orders(&c, 1) && !by_orders(&b, 2));

        let by_id = OrderSelector::from(OrderId::from("b")).into_predicate();
        assert!(by_id(&b, 0) && !by_id(&c, 0));

        let by_index = OrderSelector::Index(1).into_predicate();
        assert!(by_index(&a, 1) && !by_index(&a, 0));

        let by_fn = OrderSelector::predicate(|o, _| o.name.ends_with('c')).into_predicate();
        assert!(by_fn(&c, 0) && !by_fn(&a, 0));
    }

    #[test]
    fn test_only_concrete_order_is_echoed() {
        assert!(OrderSelector::from(order("a")).as_order().is_some());
        assert!(OrderSelector::from(OrderId::from("a")).as_order().is_none());
    }
}
