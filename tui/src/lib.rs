//! TUI rendering for Roster using ratatui.

mod detail;
mod form;
mod input;
mod overlay;
mod table;
mod theme;

pub use input::handle_events;
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use roster_core::{event_summary, user_summary};
use roster_engine::{App, Pane, Tab, View};
use roster_types::{EventRecord, Resource, UserRecord};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App, tick: usize) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let notice_height = u16::from(app.notice().is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),             // Header + tabs
            Constraint::Min(3),                // Body
            Constraint::Length(notice_height), // Notice bar
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app, &palette);

    match app.tab() {
        Tab::Users => {
            let pane = app.users();
            let stats = user_stats_lines(pane, &palette);
            draw_pane(frame, chunks[1], pane, &palette, &glyphs, stats);
        }
        Tab::Events => {
            let pane = app.events();
            let stats = event_stats_lines(pane, &palette);
            draw_pane(frame, chunks[1], pane, &palette, &glyphs, stats);
        }
    }

    if let Some(notice) = app.notice() {
        overlay::draw_notice(frame, chunks[2], notice, &palette, &glyphs);
    }

    draw_status_bar(frame, chunks[3], app, &palette, tick);

    if let Some(label) = app.confirm_label() {
        overlay::draw_confirm(frame, label, &palette);
    }
}

fn draw_pane<R: Resource>(
    frame: &mut Frame,
    area: Rect,
    pane: &Pane<R>,
    palette: &Palette,
    glyphs: &Glyphs,
    stats: Vec<Line<'static>>,
) {
    match pane.view() {
        View::List { selected } => {
            table::draw_list(frame, area, pane, *selected, palette, glyphs, &stats);
        }
        View::Form(form_state) => {
            form::draw_form(frame, area, form_state, pane.busy(), palette, glyphs);
        }
        View::Detail { .. } => detail::draw_detail(frame, area, pane, palette),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = vec![Span::styled(
        " Roster ",
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD),
    )];

    for tab in [Tab::Users, Tab::Events] {
        let style = if tab == app.tab() {
            styles::tab_active(palette)
        } else {
            styles::tab_inactive(palette)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn count_span(count: usize, label: &str, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            count.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {label}   "), Style::default().fg(color)),
    ]
}

fn user_stats_lines(pane: &Pane<UserRecord>, palette: &Palette) -> Vec<Line<'static>> {
    let summary = user_summary(pane.store().records());
    let mut spans = Vec::new();
    spans.extend(count_span(summary.total, "total", palette.blue));
    spans.extend(count_span(summary.active, "active", palette.success));
    spans.extend(count_span(summary.inactive, "inactive", palette.text_muted));
    vec![Line::from(spans)]
}

fn event_stats_lines(pane: &Pane<EventRecord>, palette: &Palette) -> Vec<Line<'static>> {
    let today = Local::now().date_naive();
    let summary = event_summary(pane.store().records(), today);

    let mut counts = Vec::new();
    counts.extend(count_span(summary.total, "total", palette.blue));
    counts.extend(count_span(summary.upcoming, "upcoming", palette.success));
    counts.extend(count_span(summary.past, "past", palette.text_muted));
    counts.extend(count_span(summary.this_month, "this month", palette.primary));

    let next = match &summary.next {
        Some(event) => Line::from(vec![
            Span::styled("Next: ", Style::default().fg(palette.text_muted)),
            Span::styled(
                event.title.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", event.date.format("%A, %-d %B %Y")),
                Style::default().fg(palette.text_secondary),
            ),
        ]),
        None => Line::from(Span::styled(
            "No upcoming events",
            Style::default().fg(palette.text_muted),
        )),
    };

    vec![Line::from(counts), next]
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, tick: usize) {
    let hints: &[(&str, &str)] = if app.confirm_label().is_some() {
        &[("y", "delete"), ("n", "keep")]
    } else if app.in_form() {
        &[
            ("Enter", "save"),
            ("Tab", "next field"),
            ("Space", "toggle"),
            ("^R", "reset"),
            ("Esc", "cancel"),
        ]
    } else if app.in_detail() {
        &[("e", "edit"), ("d", "delete"), ("Esc", "back"), ("q", "quit")]
    } else {
        &[
            ("a", "add"),
            ("e", "edit"),
            ("Enter", "view"),
            ("d", "delete"),
            ("r", "refresh"),
            ("Tab", "switch"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key}"), styles::key_highlight(palette)));
        spans.push(Span::styled(
            format!(" {action} "),
            styles::key_hint(palette),
        ));
    }

    if app.busy() {
        // Divide the frame counter down so the spinner spins at a sane rate.
        spans.push(Span::styled(
            format!("  {} syncing…", spinner_frame(tick / 6, app.ui_options())),
            Style::default().fg(palette.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
