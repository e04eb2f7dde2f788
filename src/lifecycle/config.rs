//! # System Configuration
//!
//! Everything [`KitchenSystem::new`](crate::lifecycle::KitchenSystem::new) needs to wire
//! the actors: the shelf layout, the simulated delays, and channel sizes. Configuration
//! can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "shelves": [
//!     { "kind": "hot", "capacity": 10, "decayModifier": 1.0 },
//!     { "kind": "overflow", "capacity": 15, "decayModifier": 2.0 }
//!   ],
//!   "timing": { "travelMinMs": 2000, "travelMaxMs": 6000 }
//! }
//! ```
//!
//! Omitted fields take their defaults.

use crate::model::{ShelfInfo, ShelfKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Simulated work, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingConfig {
    pub cook_ms: u64,
    pub courier_allocation_ms: u64,
    pub cleanup_ms: u64,
    pub pickup_ms: u64,
    pub delivery_ms: u64,
    pub travel_min_ms: u64,
    pub travel_max_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            cook_ms: 1,
            courier_allocation_ms: 1,
            cleanup_ms: 1,
            pickup_ms: 1,
            delivery_ms: 1,
            travel_min_ms: 2_000,
            travel_max_ms: 6_000,
        }
    }
}

impl TimingConfig {
    pub fn cook(&self) -> Duration {
        Duration::from_millis(self.cook_ms)
    }

    pub fn courier_allocation(&self) -> Duration {
        Duration::from_millis(self.courier_allocation_ms)
    }

    pub fn cleanup(&self) -> Duration {
        Duration::from_millis(self.cleanup_ms)
    }

    pub fn pickup(&self) -> Duration {
        Duration::from_millis(self.pickup_ms)
    }

    pub fn delivery(&self) -> Duration {
        Duration::from_millis(self.delivery_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KitchenConfig {
    pub shelves: Vec<ShelfInfo>,
    pub timing: TimingConfig,
    /// Bound of the event broadcast channel. Slow subscribers lag past it.
    pub event_capacity: usize,
    /// Request queue size of each actor.
    pub actor_buffer: usize,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self::with_shelves(vec![
            ShelfInfo::new(ShelfKind::Hot, 10, 1.0),
            ShelfInfo::new(ShelfKind::Cold, 10, 1.0),
            ShelfInfo::new(ShelfKind::Frozen, 10, 1.0),
            ShelfInfo::new(ShelfKind::Overflow, 15, 2.0),
        ])
    }
}

impl KitchenConfig {
    /// Default timing and channel sizes around a custom shelf layout.
    pub fn with_shelves(shelves: Vec<ShelfInfo>) -> Self {
        Self {
            shelves,
            timing: TimingConfig::default(),
            event_capacity: 1024,
            actor_buffer: 32,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// An OVERFLOW shelf is optional; without one, orders that do not fit are discarded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shelves.is_empty() {
            return Err(ConfigError::Invalid("at least one shelf is required".into()));
        }
        let mut seen = HashSet::new();
        for shelf in &self.shelves {
            if !seen.insert(shelf.kind) {
                return Err(ConfigError::Invalid(format!("duplicate {} shelf", shelf.kind)));
            }
            if shelf.capacity == 0 {
                return Err(ConfigError::Invalid(format!("{} shelf has zero capacity", shelf.kind)));
            }
            if !(shelf.decay_modifier.is_finite() && shelf.decay_modifier > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} shelf decay modifier must be positive, got {}",
                    shelf.kind, shelf.decay_modifier
                )));
            }
        }
        if self.timing.travel_min_ms > self.timing.travel_max_ms {
            return Err(ConfigError::Invalid(format!(
                "travel range is empty: {}..={} ms",
                self.timing.travel_min_ms, self.timing.travel_max_ms
            )));
        }
        if self.event_capacity == 0 || self.actor_buffer == 0 {
            return Err(ConfigError::Invalid("channel sizes must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_layout_is_valid() {
        let config = KitchenConfig::default();
        config.validate().unwrap();
        assert_eq!(config.shelves.len(), 4);
        assert_eq!(config.timing.travel_max_ms, 6_000);
    }

    #[test]
    fn test_missing_overflow_is_valid() {
        let config = KitchenConfig::with_shelves(vec![ShelfInfo::new(ShelfKind::Hot, 2, 1.0)]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let duplicate = KitchenConfig::with_shelves(vec![
            ShelfInfo::new(ShelfKind::Hot, 2, 1.0),
            ShelfInfo::new(ShelfKind::Hot, 3, 1.0),
        ]);
        let empty = KitchenConfig::with_shelves(vec![ShelfInfo::new(ShelfKind::Cold, 0, 1.0)]);
        let harmless = KitchenConfig::with_shelves(vec![ShelfInfo::new(ShelfKind::Cold, 1, 0.0)]);
        let mut backwards = KitchenConfig::default();
        backwards.timing.travel_min_ms = 10;
        backwards.timing.travel_max_ms = 5;

        for config in [duplicate, empty, harmless, backwards, KitchenConfig::with_shelves(vec![])] {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_loads_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"shelves":[{{"kind":"frozen","capacity":3,"decayModifier":1.5}}],"timing":{{"travelMinMs":100,"travelMaxMs":200}}}}"#
        )
        .unwrap();

        let config = KitchenConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.shelves, vec![ShelfInfo::new(ShelfKind::Frozen, 3, 1.5)]);
        assert_eq!(config.timing.travel_min_ms, 100);
        assert_eq!(config.timing.cook_ms, 1);
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            KitchenConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
