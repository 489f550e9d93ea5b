use std::sync::Arc;

use binwatch_core::{
    dashboard::{AttentionThreshold, DashboardModel},
    ports::{SourceError, SourceId},
    service::BinwatchService,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    /// Dashboard with the urgent-notification dropdown open.
    Notifications,
}

/// Dashboard pane the ↑/↓ keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Bins,
    Notifications,
}

/// Entries skipped by a single page step.
const PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Movement {
    Previous,
    Next,
    PageUp,
    PageDown,
    First,
    Last,
}

impl Movement {
    /// New index after moving from `index` in a list of `len` entries.
    fn apply(self, index: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Movement::Previous => index.saturating_sub(1),
            Movement::Next => index.saturating_add(1).min(last),
            Movement::PageUp => index.saturating_sub(PAGE),
            Movement::PageDown => index.saturating_add(PAGE).min(last),
            Movement::First => 0,
            Movement::Last => last,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<BinwatchService>,
    pub source: SourceId,
    pub source_name: String,
    pub threshold: AttentionThreshold,

    pub model: DashboardModel,

    pub screen: Screen,
    pub focus: Focus,
    pub bin_list_index: usize,
    pub notification_list_index: usize,
    pub urgent_list_index: usize,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        service: Arc<BinwatchService>,
        source: SourceId,
        threshold: AttentionThreshold,
    ) -> Self {
        let source_name = service
            .sources()
            .into_iter()
            .find(|(id, _name)| *id == source)
            .map_or_else(|| source.to_string(), |(_id, name)| name);
        Self {
            service,
            source,
            source_name,
            threshold,
            model: DashboardModel::default(),
            screen: Screen::Dashboard,
            focus: Focus::Bins,
            bin_list_index: 0,
            notification_list_index: 0,
            urgent_list_index: 0,
            is_loading: false,
            error_message: None,
        }
    }

    /// Swap in a freshly loaded model, or keep the current one on failure.
    pub(crate) fn apply_load(&mut self, result: Result<DashboardModel, SourceError>) {
        self.is_loading = false;
        match result {
            Ok(model) => {
                info!(
                    source = %self.source,
                    bins = model.total_bins(),
                    urgent = model.badge_count(),
                    "dashboard refreshed"
                );
                self.model = model;
                self.error_message = None;
                self.bin_list_index = self
                    .bin_list_index
                    .min(self.model.total_bins().saturating_sub(1));
                self.notification_list_index = self
                    .notification_list_index
                    .min(self.model.notifications().len().saturating_sub(1));
                self.urgent_list_index = self
                    .urgent_list_index
                    .min(self.model.badge_count().saturating_sub(1));
            }
            Err(err) => {
                warn!(source = %self.source, error = %err, "reload failed, keeping previous data");
                self.error_message = Some(format!("Failed to load {}: {err}", self.source_name));
            }
        }
    }

    pub(crate) fn move_bins(&mut self, movement: Movement) {
        self.bin_list_index = movement.apply(self.bin_list_index, self.model.total_bins());
    }

    pub(crate) fn move_notifications(&mut self, movement: Movement) {
        self.notification_list_index = movement.apply(
            self.notification_list_index,
            self.model.notifications().len(),
        );
    }

    pub(crate) fn move_urgent(&mut self, movement: Movement) {
        self.urgent_list_index = movement.apply(self.urgent_list_index, self.model.badge_count());
    }

    /// Route a movement to whichever dashboard pane has focus.
    pub(crate) fn move_focused(&mut self, movement: Movement) {
        match self.focus {
            Focus::Bins => self.move_bins(movement),
            Focus::Notifications => self.move_notifications(movement),
        }
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Bins => Focus::Notifications,
            Focus::Notifications => Focus::Bins,
        };
    }

    pub(crate) fn toggle_notifications(&mut self) {
        self.screen = match self.screen {
            Screen::Dashboard => Screen::Notifications,
            Screen::Notifications => Screen::Dashboard,
        };
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use binwatch_core::{
        model::{DashboardData, ModelError},
        plugin::SourceRegistry,
    };

    use super::*;

    pub(crate) fn seeded_app() -> App {
        let registry = SourceRegistry::new(vec![binwatch_source_seed::plugin()]);
        let service = Arc::new(BinwatchService::new(Arc::new(registry)));
        let mut app = App::new(
            service,
            SourceId::from(binwatch_source_seed::SOURCE_ID),
            AttentionThreshold::default(),
        );
        let data = binwatch_source_seed::seed_data().expect("seed data is consistent");
        app.apply_load(Ok(DashboardModel::new(data)));
        app
    }

    #[test]
    fn resolves_source_display_name() {
        let app = seeded_app();
        assert_eq!(app.source_name, "Built-in demo data");
    }

    #[test]
    fn failed_reload_keeps_previous_model() {
        let mut app = seeded_app();
        app.is_loading = true;
        app.apply_load(Err(SourceError::Invalid(ModelError::FillLevelOutOfRange(
            140,
        ))));

        assert!(!app.is_loading);
        assert_eq!(app.model.total_bins(), 4);
        let message = app.error_message.as_deref().unwrap_or_default();
        assert!(message.contains("140"), "error should be reported: {message}");
    }

    #[test]
    fn successful_reload_clamps_selection() {
        let mut app = seeded_app();
        app.bin_list_index = 3;
        app.notification_list_index = 2;
        app.urgent_list_index = 1;
        app.apply_load(Ok(DashboardModel::new(DashboardData::default())));
        assert_eq!(app.bin_list_index, 0);
        assert_eq!(app.notification_list_index, 0);
        assert_eq!(app.urgent_list_index, 0);
        assert!(app.error_message.is_none());
    }

    #[test]
    fn selection_stays_within_bins() {
        let mut app = seeded_app();
        app.move_bins(Movement::Previous);
        assert_eq!(app.bin_list_index, 0);
        for _ in 0..10 {
            app.move_bins(Movement::Next);
        }
        assert_eq!(app.bin_list_index, 3);
        app.move_bins(Movement::PageUp);
        assert_eq!(app.bin_list_index, 0);
        app.move_bins(Movement::Last);
        assert_eq!(app.bin_list_index, 3);
    }

    #[test]
    fn focus_decides_which_list_moves() {
        let mut app = seeded_app();
        app.move_focused(Movement::Next);
        assert_eq!((app.bin_list_index, app.notification_list_index), (1, 0));

        app.toggle_focus();
        app.move_focused(Movement::Last);
        assert_eq!((app.bin_list_index, app.notification_list_index), (1, 2));

        app.move_urgent(Movement::PageDown);
        assert_eq!(app.urgent_list_index, 1);
    }

    #[test]
    fn movement_on_empty_list_stays_at_zero() {
        for movement in [
            Movement::Previous,
            Movement::Next,
            Movement::PageUp,
            Movement::PageDown,
            Movement::First,
            Movement::Last,
        ] {
            assert_eq!(movement.apply(0, 0), 0, "{movement:?} left an empty list");
        }
    }
}
