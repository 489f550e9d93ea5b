//! Traits describing data source capabilities and shared helper types.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;

use crate::model::{DashboardData, ModelError};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading a dashboard snapshot.
pub enum SourceError {
    /// Reading the backing data failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The document could not be decoded.
    #[error("Parse error: {0}")]
    Parse(#[from] JsonError),
    /// The document decoded but breaks a model invariant.
    #[error("Invalid data: {0}")]
    Invalid(#[from] ModelError),
    /// No source is registered under the requested id.
    #[error("Unknown source: {0}")]
    UnknownSource(SourceId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier for a data source known to binwatch.
pub struct SourceId(pub String);

impl fmt::Display for SourceId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        SourceId(id.to_owned())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a source and its human-friendly name.
pub struct SourceMeta {
    /// Unique identifier.
    pub id: SourceId,
    /// Display name.
    pub name: String,
}

#[async_trait]
/// Trait for backends that produce dashboard snapshots.
pub trait DataSource: Send + Sync {
    /// Metadata describing this source.
    fn meta(&self) -> &SourceMeta;

    /// Produce a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the data cannot be read or is invalid.
    async fn load(&self) -> Result<DashboardData, SourceError>;
}
