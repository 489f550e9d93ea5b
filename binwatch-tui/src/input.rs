use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Movement, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.load_dashboard`(...) for the configured source
    Reload,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, End, Esc, Home, PageDown, PageUp, Tab, Up};

    // Windows reports releases too; only presses (and held-key repeats) count
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    // Global shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if !key.modifiers.is_empty() {
        return Action::None;
    }
    match key.code {
        Char('q') => return Action::Quit,
        Char('r') => return Action::Reload,
        Char('n') => {
            app.toggle_notifications();
            return Action::None;
        }
        _ => {}
    }

    let movement = match key.code {
        Up | Char('k') => Some(Movement::Previous),
        Down | Char('j') => Some(Movement::Next),
        PageUp => Some(Movement::PageUp),
        PageDown => Some(Movement::PageDown),
        Home => Some(Movement::First),
        End => Some(Movement::Last),
        _ => None,
    };

    match app.screen {
        Screen::Dashboard => match (key.code, movement) {
            (Tab, _) => app.toggle_focus(),
            // Paging always scrolls the notification feed
            (PageUp | PageDown, Some(movement)) => app.move_notifications(movement),
            (_, Some(movement)) => app.move_focused(movement),
            _ => {}
        },

        Screen::Notifications => match (key.code, movement) {
            (Esc, _) => app.screen = Screen::Dashboard,
            (_, Some(movement)) => app.move_urgent(movement),
            _ => {}
        },
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use crate::app::{Focus, tests::seeded_app};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_shortcuts() {
        let mut app = seeded_app();
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &mut app), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut app), Action::Quit);
    }

    #[test]
    fn reload_shortcut() {
        let mut app = seeded_app();
        assert_eq!(handle_key_event(press(KeyCode::Char('r')), &mut app), Action::Reload);
    }

    #[test]
    fn notification_dropdown_toggles_and_closes() {
        let mut app = seeded_app();
        handle_key_event(press(KeyCode::Char('n')), &mut app);
        assert_eq!(app.screen, Screen::Notifications);
        handle_key_event(press(KeyCode::Char('n')), &mut app);
        assert_eq!(app.screen, Screen::Dashboard);

        handle_key_event(press(KeyCode::Char('n')), &mut app);
        handle_key_event(press(KeyCode::Esc), &mut app);
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = seeded_app();
        handle_key_event(press(KeyCode::Char('n')), &mut app);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('n'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(handle_key_event(release, &mut app), Action::None);
        assert_eq!(app.screen, Screen::Notifications);

        let quit_release =
            KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(handle_key_event(quit_release, &mut app), Action::None);
    }

    #[test]
    fn held_key_repeats_move_selection() {
        let mut app = seeded_app();
        let repeat = KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Repeat);
        handle_key_event(repeat, &mut app);
        handle_key_event(repeat, &mut app);
        assert_eq!(app.bin_list_index, 2);
    }

    #[test]
    fn arrows_move_bin_selection_only_on_dashboard() {
        let mut app = seeded_app();
        handle_key_event(press(KeyCode::Down), &mut app);
        handle_key_event(press(KeyCode::Char('j')), &mut app);
        assert_eq!(app.bin_list_index, 2);
        handle_key_event(press(KeyCode::Up), &mut app);
        assert_eq!(app.bin_list_index, 1);

        app.toggle_notifications();
        handle_key_event(press(KeyCode::Down), &mut app);
        assert_eq!(app.bin_list_index, 1);
        assert_eq!(app.urgent_list_index, 1);
    }

    #[test]
    fn tab_moves_arrows_to_notification_feed() {
        let mut app = seeded_app();
        handle_key_event(press(KeyCode::Tab), &mut app);
        assert_eq!(app.focus, Focus::Notifications);

        handle_key_event(press(KeyCode::End), &mut app);
        assert_eq!(app.notification_list_index, 2);
        handle_key_event(press(KeyCode::Up), &mut app);
        assert_eq!(app.notification_list_index, 1);
        assert_eq!(app.bin_list_index, 0);
    }

    #[test]
    fn page_keys_scroll_feed_from_either_focus() {
        let mut app = seeded_app();
        assert_eq!(app.focus, Focus::Bins);
        handle_key_event(press(KeyCode::PageDown), &mut app);
        assert_eq!(app.notification_list_index, 2);
        assert_eq!(app.bin_list_index, 0);
        handle_key_event(press(KeyCode::PageUp), &mut app);
        assert_eq!(app.notification_list_index, 0);
    }
}
