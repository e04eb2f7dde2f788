use crate::model::Temperature;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The storage tier a shelf represents.
///
/// `Overflow` is the fallback tier that holds orders of any temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfKind {
    Hot,
    Cold,
    Frozen,
    Overflow,
}

impl From<Temperature> for ShelfKind {
    fn from(temp: Temperature) -> Self {
        match temp {
            Temperature::Hot => ShelfKind::Hot,
            Temperature::Cold => ShelfKind::Cold,
            Temperature::Frozen => ShelfKind::Frozen,
        }
    }
}

impl Display for ShelfKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShelfKind::Hot => f.write_str("hot"),
            ShelfKind::Cold => f.write_str("cold"),
            ShelfKind::Frozen => f.write_str("frozen"),
            ShelfKind::Overflow => f.write_str("overflow"),
        }
    }
}

/// Static description of a shelf: what it stores, how much, and how harshly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfInfo {
    pub kind: ShelfKind,
    pub capacity: usize,
    pub decay_modifier: f64,
}

impl ShelfInfo {
    pub fn new(kind: ShelfKind, capacity: usize, decay_modifier: f64) -> Self {
        Self {
            kind,
            capacity,
            decay_modifier,
        }
    }
}
