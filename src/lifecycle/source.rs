//! Where order parameters come from.

use crate::model::OrderCreate;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read orders from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse orders from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn load(&self) -> Result<Vec<OrderCreate>, SourceError>;
}

/// A JSON array of `{id, name, temp, shelfLife, decayRate}` records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<OrderCreate>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Orders held in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    orders: Vec<OrderCreate>,
}

impl VecSource {
    pub fn new(orders: Vec<OrderCreate>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderSource for VecSource {
    async fn load(&self) -> Result<Vec<OrderCreate>, SourceError> {
        Ok(self.orders.clone())
    }
}
