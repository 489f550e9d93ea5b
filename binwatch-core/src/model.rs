//! Domain data structures for bins, notifications, and dashboard snapshots.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised when a record violates a model invariant.
pub enum ModelError {
    /// Fill level outside of the 0–100 percentage range.
    #[error("Fill level {0} is outside 0..=100")]
    FillLevelOutOfRange(u8),
    /// Two bins share the same identifier.
    #[error("Duplicate bin id: {0}")]
    DuplicateBinId(BinId),
    /// Two notifications share the same identifier.
    #[error("Duplicate notification id: {0}")]
    DuplicateNotificationId(NotificationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for a bin.
pub struct BinId(pub u32);

impl fmt::Display for BinId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier for a notification.
pub struct NotificationId(pub u32);

impl fmt::Display for NotificationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// How full a bin is, as an integer percentage in `0..=100`.
pub struct FillLevel(u8);

impl FillLevel {
    /// An empty bin.
    pub const EMPTY: Self = Self(0);
    /// A completely full bin.
    pub const FULL: Self = Self(100);

    /// Validate and wrap a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FillLevelOutOfRange`] for values above 100.
    pub const fn new(percent: u8) -> Result<Self, ModelError> {
        if percent > 100 {
            return Err(ModelError::FillLevelOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    /// Wrap a percentage, clamping anything above 100.
    #[must_use]
    pub fn clamped(percent: u64) -> Self {
        Self(u8::try_from(percent.min(100)).unwrap_or(100))
    }

    /// Raw percentage value.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Fill level as a ratio in `0.0..=1.0`, handy for gauges.
    #[must_use]
    pub fn ratio(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<u8> for FillLevel {
    type Error = ModelError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<FillLevel> for u8 {
    fn from(level: FillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for FillLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Waste category a bin is meant for.
pub enum BinType {
    /// Residual household waste.
    #[serde(rename = "General Waste")]
    GeneralWaste,
    /// Sorted recyclable material.
    #[serde(rename = "Recyclables")]
    Recyclables,
}

impl BinType {
    /// Human-friendly label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BinType::GeneralWaste => "General Waste",
            BinType::Recyclables => "Recyclables",
        }
    }
}

impl fmt::Display for BinType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A physical waste receptacle and its last reported state.
pub struct Bin {
    /// Unique identifier.
    pub id: BinId,
    /// Where the bin stands, e.g. "Block A".
    pub location: String,
    /// Current fill percentage.
    pub fill_level: FillLevel,
    /// Waste category.
    #[serde(rename = "type")]
    pub kind: BinType,
    /// Day the bin was last emptied.
    pub last_emptied: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Message shown in the notification feed.
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// Text shown to the operator.
    pub message: String,
    /// Whether the notification is counted by the badge.
    pub urgent: bool,
    /// Relative time label such as "5 minutes ago".
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Immutable snapshot of everything the dashboard shows.
pub struct DashboardData {
    bins: Vec<Bin>,
    notifications: Vec<Notification>,
}

impl DashboardData {
    /// Build a snapshot, checking that identifiers are unique.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateBinId`] or
    /// [`ModelError::DuplicateNotificationId`] when an id repeats.
    pub fn new(bins: Vec<Bin>, notifications: Vec<Notification>) -> Result<Self, ModelError> {
        let mut seen_bins = HashSet::with_capacity(bins.len());
        if let Some(bin) = bins.iter().find(|bin| !seen_bins.insert(bin.id)) {
            return Err(ModelError::DuplicateBinId(bin.id));
        }

        let mut seen_notifications = HashSet::with_capacity(notifications.len());
        if let Some(notification) = notifications
            .iter()
            .find(|notification| !seen_notifications.insert(notification.id))
        {
            return Err(ModelError::DuplicateNotificationId(notification.id));
        }

        Ok(Self {
            bins,
            notifications,
        })
    }

    /// Bins in their original order.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Notifications in their original order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

/// Deserialization runs through [`DashboardData::new`] so loaded documents
/// obey the same id checks as hand-built snapshots.
impl<'de> Deserialize<'de> for DashboardData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            bins: Vec<Bin>,
            #[serde(default)]
            notifications: Vec<Notification>,
        }

        let raw = Raw::deserialize(deserializer)?;
        DashboardData::new(raw.bins, raw.notifications).map_err(serde::de::Error::custom)
    }
}
