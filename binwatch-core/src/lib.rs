//! Core types and service wiring for the binwatch garbage management dashboard.

/// Summary statistics and badge logic derived from a dashboard snapshot.
pub mod dashboard;
/// Domain models and identifiers shared by all sources.
pub mod model;
/// Registry for plugging data sources into the service.
pub mod plugin;
/// Traits describing the data source interface.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use dashboard::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
