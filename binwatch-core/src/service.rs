//! High-level service facade combining all sources.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::dashboard::{AttentionThreshold, DashboardModel};
use crate::plugin::SourceRegistry;
use crate::ports::{SourceError, SourceId};

/// Public entry point for listing sources and loading dashboards.
pub struct BinwatchService {
    registry: Arc<SourceRegistry>,
}

impl BinwatchService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self { registry }
    }

    /// List all available sources and their display names.
    #[must_use]
    pub fn sources(&self) -> Vec<(SourceId, String)> {
        self.registry
            .sources()
            .into_iter()
            .map(|meta| (meta.id, meta.name))
            .collect()
    }

    /// Load a fresh snapshot from `source` and wrap it in a model.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the source is unknown or fails to load.
    pub async fn load_dashboard(
        &self,
        source: &SourceId,
        threshold: AttentionThreshold,
    ) -> Result<DashboardModel, SourceError> {
        let plugin = self.registry.plugin(source)?;
        let data = plugin.source.load().await.inspect_err(|err| {
            warn!(source = %source, error = %err, "failed to load dashboard data");
        })?;

        debug!(
            source = %source,
            bins = data.bins().len(),
            notifications = data.notifications().len(),
            "loaded dashboard data"
        );
        Ok(DashboardModel::with_threshold(data, threshold))
    }
}
