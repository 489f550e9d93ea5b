//! Built-in source serving the demo bins and notifications.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use binwatch_core::{
    model::{Bin, BinId, BinType, DashboardData, FillLevel, ModelError, Notification, NotificationId},
    plugin::SourcePlugin,
    ports::{DataSource, SourceError, SourceId, SourceMeta},
};

/// Identifier the seed source is registered under.
pub const SOURCE_ID: &str = "seed";

/// (id, location, fill level, type, last emptied as y/m/d)
const BINS: [(u32, &str, u8, BinType, (i32, u32, u32)); 4] = [
    (1, "Block A", 85, BinType::GeneralWaste, (2024, 12, 28)),
    (2, "Block B", 45, BinType::Recyclables, (2024, 12, 29)),
    (3, "Block C", 92, BinType::GeneralWaste, (2024, 12, 27)),
    (4, "Block D", 30, BinType::Recyclables, (2024, 12, 29)),
];

/// (id, message, urgent, time)
const NOTIFICATIONS: [(u32, &str, bool, &str); 3] = [
    (
        1,
        "Bin at Block C requires immediate attention - 92% full",
        true,
        "5 minutes ago",
    ),
    (
        2,
        "Bin at Block A approaching capacity - 85% full",
        true,
        "15 minutes ago",
    ),
    (
        3,
        "Weekly collection scheduled for tomorrow",
        false,
        "1 hour ago",
    ),
];

/// Build the demo snapshot.
///
/// # Errors
///
/// Returns a [`ModelError`] if the built-in table is inconsistent.
pub fn seed_data() -> Result<DashboardData, ModelError> {
    let bins = BINS
        .iter()
        .map(|&(id, location, fill, kind, (year, month, day))| -> Result<Bin, ModelError> {
            Ok(Bin {
                id: BinId(id),
                location: location.to_owned(),
                fill_level: FillLevel::new(fill)?,
                kind,
                last_emptied: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    let notifications = NOTIFICATIONS
        .iter()
        .map(|&(id, message, urgent, time)| Notification {
            id: NotificationId(id),
            message: message.to_owned(),
            urgent,
            time: time.to_owned(),
        })
        .collect();

    DashboardData::new(bins, notifications)
}

/// Source returning [`seed_data`] on every load.
pub struct SeedSource {
    meta: SourceMeta,
}

impl SeedSource {
    /// Create the seed source.
    #[must_use]
    pub fn new() -> Self {
        Self { meta: source_meta() }
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for SeedSource {
    fn meta(&self) -> &SourceMeta {
        &self.meta
    }

    async fn load(&self) -> Result<DashboardData, SourceError> {
        debug!("serving built-in seed data");
        Ok(seed_data()?)
    }
}

fn source_meta() -> SourceMeta {
    SourceMeta {
        id: SourceId::from(SOURCE_ID),
        name: "Built-in demo data".to_owned(),
    }
}

/// Plugin bundle for registering the seed source.
#[must_use]
pub fn plugin() -> SourcePlugin {
    SourcePlugin::new(Arc::new(SeedSource::new()))
}

#[cfg(test)]
mod tests {
    use binwatch_core::dashboard::{AttentionThreshold, DashboardModel};

    use super::*;

    fn model() -> DashboardModel {
        DashboardModel::new(seed_data().expect("seed data is consistent"))
    }

    #[test]
    fn seed_metrics_match_dashboard() {
        let model = model();
        assert_eq!(model.total_bins(), 4);
        assert_eq!(
            model.attention_count(AttentionThreshold::new(80).expect("valid threshold")),
            2
        );
        assert_eq!(model.average_fill_level().percent(), 63);
    }

    #[test]
    fn seed_badge_lists_urgent_notifications_in_order() {
        let model = model();
        let urgent: Vec<NotificationId> = model
            .urgent_notifications()
            .into_iter()
            .map(|notification| notification.id)
            .collect();
        assert_eq!(urgent, vec![NotificationId(1), NotificationId(2)]);
        assert_eq!(model.badge_count(), 2);
        assert_eq!(model.badge(), Some(2));
    }

    #[test]
    fn seed_bins_keep_their_categories_and_dates() {
        let data = seed_data().expect("seed data is consistent");
        let block_b = data
            .bins()
            .iter()
            .find(|bin| bin.location == "Block B")
            .expect("Block B is seeded");
        assert_eq!(block_b.kind, BinType::Recyclables);
        assert_eq!(
            block_b.last_emptied,
            NaiveDate::from_ymd_opt(2024, 12, 29).expect("valid date")
        );
    }

    #[tokio::test]
    async fn plugin_loads_seed_data() {
        let plugin = plugin();
        assert_eq!(plugin.meta.id, SourceId::from(SOURCE_ID));
        let data = plugin.source.load().await.expect("seed source loads");
        assert_eq!(data, seed_data().expect("seed data is consistent"));
    }
}
