//! Derived metrics and the urgent-notification badge.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Bin, DashboardData, FillLevel, ModelError, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Fill level a bin must exceed before it is reported as needing service.
pub struct AttentionThreshold(pub FillLevel);

impl AttentionThreshold {
    /// Threshold used when nothing else is configured.
    pub const DEFAULT_PERCENT: u8 = 80;

    /// [`Self::DEFAULT_PERCENT`] as a threshold.
    pub const DEFAULT: Self = match Self::new(Self::DEFAULT_PERCENT) {
        Ok(threshold) => threshold,
        Err(_) => Self(FillLevel::FULL),
    };

    /// Validate and wrap a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FillLevelOutOfRange`] for values above 100.
    pub const fn new(percent: u8) -> Result<Self, ModelError> {
        match FillLevel::new(percent) {
            Ok(level) => Ok(Self(level)),
            Err(err) => Err(err),
        }
    }

    /// Whether `level` lies strictly above the threshold.
    #[must_use]
    pub fn is_exceeded_by(self, level: FillLevel) -> bool {
        level > self.0
    }
}

impl Default for AttentionThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<FillLevel> for AttentionThreshold {
    fn from(level: FillLevel) -> Self {
        Self(level)
    }
}

impl fmt::Display for AttentionThreshold {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, formatter)
    }
}

/// Read-only view over a [`DashboardData`] snapshot.
///
/// Every method recomputes its answer from the snapshot; nothing is cached
/// and nothing is mutated, so repeated calls always agree.
#[derive(Debug, Clone, Default)]
pub struct DashboardModel {
    data: DashboardData,
    threshold: AttentionThreshold,
}

impl DashboardModel {
    /// Wrap a snapshot using the default attention threshold.
    #[must_use]
    pub fn new(data: DashboardData) -> Self {
        Self::with_threshold(data, AttentionThreshold::default())
    }

    /// Wrap a snapshot using a custom attention threshold.
    #[must_use]
    pub fn with_threshold(data: DashboardData, threshold: AttentionThreshold) -> Self {
        Self { data, threshold }
    }

    /// Snapshot backing this model.
    #[must_use]
    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    /// All bins in their original order.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        self.data.bins()
    }

    /// All notifications in their original order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.data.notifications()
    }

    /// Configured attention threshold.
    #[must_use]
    pub fn threshold(&self) -> AttentionThreshold {
        self.threshold
    }

    /// Number of bins on the dashboard.
    #[must_use]
    pub fn total_bins(&self) -> usize {
        self.bins().len()
    }

    /// Number of bins whose fill level is strictly above `threshold`.
    #[must_use]
    pub fn attention_count(&self, threshold: AttentionThreshold) -> usize {
        self.bins()
            .iter()
            .filter(|bin| threshold.is_exceeded_by(bin.fill_level))
            .count()
    }

    /// [`Self::attention_count`] with the configured threshold.
    #[must_use]
    pub fn bins_requiring_attention(&self) -> usize {
        self.attention_count(self.threshold)
    }

    /// Whether a single bin should be flagged in the view.
    #[must_use]
    pub fn needs_attention(&self, bin: &Bin) -> bool {
        self.threshold.is_exceeded_by(bin.fill_level)
    }

    /// Mean fill level rounded half-up; an empty dashboard averages to 0%.
    #[must_use]
    pub fn average_fill_level(&self) -> FillLevel {
        let count = u64::try_from(self.bins().len()).unwrap_or(u64::MAX);
        if count == 0 {
            return FillLevel::EMPTY;
        }

        let sum: u64 = self
            .bins()
            .iter()
            .map(|bin| u64::from(bin.fill_level.percent()))
            .sum();

        // (sum / count) + 0.5, floored, without leaving integer arithmetic
        FillLevel::clamped((2 * sum + count) / (2 * count))
    }

    /// Urgent notifications, keeping their relative order.
    #[must_use]
    pub fn urgent_notifications(&self) -> Vec<&Notification> {
        self.notifications()
            .iter()
            .filter(|notification| notification.urgent)
            .collect()
    }

    /// Number shown on the notification bell.
    #[must_use]
    pub fn badge_count(&self) -> usize {
        self.urgent_notifications().len()
    }

    /// Badge value, or `None` when the badge should not be drawn.
    #[must_use]
    pub fn badge(&self) -> Option<usize> {
        let count = self.badge_count();
        (count > 0).then_some(count)
    }
}
