use binwatch_core::model::{Bin, BinType, Notification};
use chrono::{Local, NaiveDate};
use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        Block, Borders, Clear, HighlightSpacing, LineGauge, List, ListItem, ListState, Paragraph,
        Wrap,
    },
};

use crate::app::{App, Focus, Screen};

const TITLE: &str = "Smart Garbage Management Dashboard";
/// Rows used by a single bin entry: label line plus gauge line.
const BIN_ROWS: u16 = 2;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: header, summary cards, body, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, cards_area, body_area, status_area] = chunks else {
        return;
    };

    draw_header(frame, app, *header_area);
    draw_cards(frame, app, *cards_area);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(*body_area);
    if let [notifications_area, bins_area] = body_chunks.as_ref() {
        draw_notifications(frame, app, *notifications_area);
        draw_bins(frame, app, *bins_area);
    }

    if app.screen == Screen::Notifications {
        draw_urgent_dropdown(frame, app, *body_area);
    }

    draw_status(frame, app, *status_area);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("binwatch · {}", app.source_name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(inner);
    let [title_area, badge_area] = header_chunks.as_ref() else {
        return;
    };

    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, *title_area);

    // Badge is only drawn while there is something urgent
    if let Some(count) = app.model.badge() {
        let badge = Paragraph::new(Line::from(vec![
            Span::raw("bell "),
            Span::styled(
                format!(" {count} "),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(badge, *badge_area);
    }
}

fn draw_cards(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let attention = app.model.bins_requiring_attention();
    let attention_style = if attention > 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let cards = [
        ("Total Bins", app.model.total_bins().to_string(), Style::default()),
        ("Bins Requiring Attention", attention.to_string(), attention_style),
        (
            "Average Fill Level",
            app.model.average_fill_level().to_string(),
            Style::default(),
        ),
    ];

    for ((title, value, style), card_area) in cards.into_iter().zip(card_chunks.iter()) {
        let card = Paragraph::new(Span::styled(value, style.add_modifier(Modifier::BOLD)))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(card, *card_area);
    }
}

fn draw_notifications(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = if app.model.notifications().is_empty() {
        vec![ListItem::new("No notifications.")]
    } else {
        app.model
            .notifications()
            .iter()
            .map(notification_item)
            .collect::<Vec<ListItem<'_>>>()
    };

    let total = app.model.notifications().len();
    let title = if total == 0 {
        "Recent Notifications".to_owned()
    } else {
        format!(
            "Recent Notifications ({}/{total})",
            app.notification_list_index + 1
        )
    };

    let focused = app.focus == Focus::Notifications;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(title),
        )
        .highlight_symbol(if focused { "> " } else { "  " })
        .highlight_spacing(HighlightSpacing::Always);

    // The selection keeps the list scrolled so the selected entry stays visible
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.notification_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn notification_item(notification: &Notification) -> ListItem<'_> {
    let style = if notification.urgent {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    ListItem::new(vec![
        Line::from(Span::styled(notification.message.as_str(), style)),
        Line::from(Span::styled(
            notification.time.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn draw_bins(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(app.focus == Focus::Bins))
        .title(format!("Bins Status (flagged above {})", app.model.threshold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.model.bins().is_empty() {
        frame.render_widget(Paragraph::new("No bins reported."), inner);
        return;
    }

    let visible = usize::from((inner.height / BIN_ROWS).max(1));
    let first = app.bin_list_index.saturating_sub(visible - 1);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(BIN_ROWS); visible])
        .split(inner);

    let today = Local::now().date_naive();
    let entries = app.model.bins().iter().enumerate().skip(first);
    for ((index, bin), row_area) in entries.zip(rows.iter()) {
        draw_bin_row(frame, app, bin, index == app.bin_list_index, today, *row_area);
    }
}

fn draw_bin_row(
    frame: &mut Frame<'_>,
    app: &App,
    bin: &Bin,
    selected: bool,
    today: NaiveDate,
    area: Rect,
) {
    let flagged = app.model.needs_attention(bin);
    let fill_color = if flagged { Color::Red } else { Color::Gray };

    let mut location_style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        location_style = location_style.fg(Color::Yellow);
    }

    let mut spans = vec![
        Span::styled(if selected { "> " } else { "  " }, location_style),
        Span::styled(bin.location.as_str(), location_style),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} · Last emptied: {} ({})",
                bin.kind,
                bin.last_emptied.format("%Y-%m-%d"),
                relative_day_label(bin.last_emptied, today)
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(marker) = kind_marker(bin.kind) {
        spans.push(Span::styled(marker, Style::default().fg(Color::Green)));
    }

    let row_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let [label_area, gauge_area] = row_chunks.as_ref() else {
        return;
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), *label_area);

    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(fill_color))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .line_set(symbols::line::THICK)
        .label(Span::styled(
            format!("{:>4}", bin.fill_level.to_string()),
            Style::default().fg(fill_color).add_modifier(Modifier::BOLD),
        ))
        .ratio(bin.fill_level.ratio());
    frame.render_widget(gauge, *gauge_area);
}

fn draw_urgent_dropdown(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let urgent = app.model.urgent_notifications();

    let items = if urgent.is_empty() {
        vec![ListItem::new(Line::from("No urgent notifications").centered())]
    } else {
        urgent
            .into_iter()
            .map(|notification| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        "Urgent Notification",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(notification.message.as_str()),
                    Line::from(Span::styled(
                        notification.time.as_str(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect()
    };

    // Anchored to the top-right corner, below the header, like a dropdown
    let width = area.width.min(60);
    let height = area
        .height
        .min(u16::try_from(items.len() * 3 + 2).unwrap_or(u16::MAX));
    let popup = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Urgent notifications (n/Esc to close)"),
        )
        .highlight_symbol("> ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut state = ListState::default();
    if app.model.badge_count() > 0 {
        state.select(Some(app.urgent_list_index));
    }
    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut state);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let nav_hint = match app.screen {
        Screen::Dashboard => match app.focus {
            Focus::Bins => {
                "↑/↓ select bin · Tab feed · PgUp/PgDn scroll feed · n urgent · r reload · q quit"
            }
            Focus::Notifications => {
                "↑/↓ scroll feed · Tab bins · n urgent · r reload · q quit"
            }
        },
        Screen::Notifications => "↑/↓ scroll · n/Esc close notifications · r reload · q quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

fn kind_marker(kind: BinType) -> Option<&'static str> {
    match kind {
        BinType::Recyclables => Some("  ♻"),
        BinType::GeneralWaste => None,
    }
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (today - date).num_days();
    match delta {
        0 => "today".to_owned(),
        1 => "yesterday".to_owned(),
        days if days > 1 => format!("{days} days ago"),
        -1 => "tomorrow".to_owned(),
        days => format!("in {} days", days.abs()),
    }
}
