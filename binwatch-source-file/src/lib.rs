//! Source reading dashboard snapshots from a JSON document on disk.
//!
//! The document mirrors the serialized model:
//!
//! ```json
//! {
//!   "bins": [
//!     { "id": 1, "location": "Block A", "fillLevel": 85,
//!       "type": "General Waste", "lastEmptied": "2024-12-28" }
//!   ],
//!   "notifications": [
//!     { "id": 1, "message": "Bin at Block A approaching capacity - 85% full",
//!       "urgent": true, "time": "15 minutes ago" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use binwatch_core::{
    model::DashboardData,
    plugin::SourcePlugin,
    ports::{DataSource, SourceError, SourceId, SourceMeta},
};

/// Identifier the file source is registered under.
pub const SOURCE_ID: &str = "file";

/// Parse and validate a snapshot document.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] for malformed JSON, unknown bin types,
/// fill levels above 100, or repeated ids.
pub fn parse_document(document: &str) -> Result<DashboardData, SourceError> {
    Ok(serde_json::from_str(document)?)
}

/// Source re-reading a JSON file on every load.
pub struct FileSource {
    path: PathBuf,
    meta: SourceMeta,
}

impl FileSource {
    /// Create a source bound to `path`. The file is not touched until [`DataSource::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let meta = SourceMeta {
            id: SourceId::from(SOURCE_ID),
            name: format!("JSON file ({})", path.display()),
        };
        Self { path, meta }
    }

    /// Path the source reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn meta(&self) -> &SourceMeta {
        &self.meta
    }

    async fn load(&self) -> Result<DashboardData, SourceError> {
        debug!(path = %self.path.display(), "reading dashboard document");
        let document = tokio::fs::read_to_string(&self.path).await?;
        parse_document(&document)
    }
}

/// Plugin bundle for registering a file source.
#[must_use]
pub fn plugin(path: impl Into<PathBuf>) -> SourcePlugin {
    SourcePlugin::new(Arc::new(FileSource::new(path)))
}

#[cfg(test)]
mod tests {
    use binwatch_core::{
        dashboard::DashboardModel,
        model::{BinId, BinType, FillLevel},
    };

    use super::*;

    const DOCUMENT: &str = r#"{
        "bins": [
            {"id": 1, "location": "Block A", "fillLevel": 85, "type": "General Waste", "lastEmptied": "2024-12-28"},
            {"id": 2, "location": "Block B", "fillLevel": 45, "type": "Recyclables", "lastEmptied": "2024-12-29"},
            {"id": 3, "location": "Block C", "fillLevel": 92, "type": "General Waste", "lastEmptied": "2024-12-27"},
            {"id": 4, "location": "Block D", "fillLevel": 30, "type": "Recyclables", "lastEmptied": "2024-12-29"}
        ],
        "notifications": [
            {"id": 1, "message": "Bin at Block C requires immediate attention - 92% full", "urgent": true, "time": "5 minutes ago"},
            {"id": 2, "message": "Bin at Block A approaching capacity - 85% full", "urgent": true, "time": "15 minutes ago"},
            {"id": 3, "message": "Weekly collection scheduled for tomorrow", "urgent": false, "time": "1 hour ago"}
        ]
    }"#;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("binwatch-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn parses_dashboard_document() {
        let data = parse_document(DOCUMENT).expect("document parses");
        let model = DashboardModel::new(data);
        assert_eq!(model.total_bins(), 4);
        assert_eq!(model.bins_requiring_attention(), 2);
        assert_eq!(model.average_fill_level().percent(), 63);
        assert_eq!(model.badge(), Some(2));

        let first = model.bins().first().expect("bins present");
        assert_eq!(first.id, BinId(1));
        assert_eq!(first.kind, BinType::GeneralWaste);
        assert_eq!(first.fill_level, FillLevel::new(85).expect("valid fill level"));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let data = parse_document("{}").expect("empty document parses");
        let model = DashboardModel::new(data);
        assert_eq!(model.total_bins(), 0);
        assert_eq!(model.average_fill_level(), FillLevel::EMPTY);
        assert_eq!(model.badge(), None);
    }

    #[test]
    fn rejects_fill_level_above_hundred() {
        let document = r#"{"bins": [
            {"id": 1, "location": "Block A", "fillLevel": 120, "type": "General Waste", "lastEmptied": "2024-12-28"}
        ]}"#;
        assert!(
            matches!(parse_document(document), Err(SourceError::Parse(_))),
            "fill level 120 must be rejected"
        );
    }

    #[test]
    fn rejects_unknown_bin_type() {
        let document = r#"{"bins": [
            {"id": 1, "location": "Block A", "fillLevel": 20, "type": "Compost", "lastEmptied": "2024-12-28"}
        ]}"#;
        assert!(
            matches!(parse_document(document), Err(SourceError::Parse(_))),
            "unknown bin type must be rejected"
        );
    }

    #[test]
    fn rejects_duplicate_bin_ids() {
        let document = r#"{"bins": [
            {"id": 7, "location": "Block A", "fillLevel": 20, "type": "Recyclables", "lastEmptied": "2024-12-28"},
            {"id": 7, "location": "Block B", "fillLevel": 40, "type": "Recyclables", "lastEmptied": "2024-12-28"}
        ]}"#;
        assert!(
            matches!(parse_document(document), Err(SourceError::Parse(_))),
            "duplicate ids must be rejected"
        );
    }

    #[tokio::test]
    async fn loads_document_from_disk() {
        let path = scratch_path("load");
        tokio::fs::write(&path, DOCUMENT)
            .await
            .expect("scratch file writable");

        let plugin = plugin(&path);
        let loaded = plugin.source.load().await;
        tokio::fs::remove_file(&path)
            .await
            .expect("scratch file removable");

        let data = loaded.expect("file source loads");
        assert_eq!(data.bins().len(), 4);
        assert_eq!(data.notifications().len(), 3);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = FileSource::new(scratch_path("missing"));
        assert!(
            matches!(source.load().await, Err(SourceError::Io(_))),
            "missing file must surface as I/O error"
        );
    }
}
