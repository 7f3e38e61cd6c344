//! Overlays: the delete confirmation modal and the notice bar.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};

use roster_engine::{Notice, NoticeLevel};

use crate::theme::{Glyphs, Palette, styles};

/// Centered popup rect clamped to the frame.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// The yes/no gate in front of every destructive delete.
pub(crate) fn draw_confirm(frame: &mut Frame, label: &str, palette: &Palette) {
    let area = centered_rect(52, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.error))
        .title(" Confirm delete ")
        .title_style(
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(palette.bg_popup))
        .padding(Padding::new(2, 2, 1, 0));

    let body = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Delete ", Style::default().fg(palette.text_primary)),
            Span::styled(
                format!("\"{label}\""),
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(palette.text_primary)),
        ]),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(palette.text_muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", styles::key_highlight(palette)),
            Span::styled(" delete    ", styles::key_hint(palette)),
            Span::styled("n", styles::key_highlight(palette)),
            Span::styled(" / ", styles::key_hint(palette)),
            Span::styled("Esc", styles::key_highlight(palette)),
            Span::styled(" keep it", styles::key_hint(palette)),
        ]),
    ])
    .block(block);

    frame.render_widget(body, area);
}

/// One-line dismissible notice between the body and the status bar.
pub(crate) fn draw_notice(
    frame: &mut Frame,
    area: Rect,
    notice: &Notice,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (glyph, style) = match notice.level {
        NoticeLevel::Info => (glyphs.ok, Style::default().fg(palette.success)),
        NoticeLevel::Error => (glyphs.err, Style::default().fg(palette.error)),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {glyph} "), style.add_modifier(Modifier::BOLD)),
        Span::styled(notice.text.clone(), style),
        Span::styled("  (Esc to dismiss)", styles::key_hint(palette)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.bg_panel)),
        area,
    );
}
