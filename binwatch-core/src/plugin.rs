//! Registry for all data source plugins.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ports::{DataSource, SourceError, SourceId, SourceMeta};

/// A data source together with the metadata it is registered under.
pub struct SourcePlugin {
    /// Static metadata describing the source.
    pub meta: SourceMeta,
    /// Implementation producing snapshots.
    pub source: Arc<dyn DataSource>,
}

impl SourcePlugin {
    /// Wrap a source, copying its metadata.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            meta: source.meta().clone(),
            source,
        }
    }
}

/// Registry that resolves plugins by source identifier.
pub struct SourceRegistry {
    plugins: BTreeMap<SourceId, SourcePlugin>,
}

impl SourceRegistry {
    /// Build a registry from the provided plugin list.
    ///
    /// A later plugin replaces an earlier one with the same id.
    #[must_use]
    pub fn new(plugins: Vec<SourcePlugin>) -> Self {
        let plugins_map = plugins
            .into_iter()
            .map(|plugin| (plugin.meta.id.clone(), plugin))
            .collect();
        Self {
            plugins: plugins_map,
        }
    }

    /// Return metadata for all registered sources, ordered by id.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceMeta> {
        self.plugins
            .values()
            .map(|plugin| plugin.meta.clone())
            .collect()
    }

    /// Look up a plugin for the given source.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownSource`] when no plugin is registered.
    pub fn plugin(&self, id: &SourceId) -> Result<&SourcePlugin, SourceError> {
        self.plugins
            .get(id)
            .ok_or_else(|| SourceError::UnknownSource(id.clone()))
    }
}
