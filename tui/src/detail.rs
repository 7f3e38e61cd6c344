//! Single-record detail view.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use roster_engine::Pane;
use roster_types::Resource;

use crate::theme::Palette;

pub(crate) fn draw_detail<R: Resource>(
    frame: &mut Frame,
    area: Rect,
    pane: &Pane<R>,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(format!(" {} detail ", R::SINGULAR))
        .title_style(
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::new(2, 2, 1, 1));

    let Some(record) = pane.detail_record() else {
        let gone = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("This {} is no longer available.", R::SINGULAR),
                Style::default().fg(palette.warning),
            )),
        ])
        .centered()
        .block(block);
        frame.render_widget(gone, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            record.display_label(),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (field, value) in R::FORM_FIELDS.iter().zip(record.form_values()) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>16}  ", field.label),
                Style::default().fg(palette.text_muted),
            ),
            Span::styled(value, Style::default().fg(palette.text_primary)),
        ]));
    }

    if record.created_at().is_some() || record.updated_at().is_some() {
        lines.push(Line::from(""));
        if let Some(created) = record.created_at() {
            lines.push(timestamp_line("Created", created, palette));
        }
        if let Some(updated) = record.updated_at() {
            lines.push(timestamp_line("Updated", updated, palette));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn timestamp_line(
    label: &'static str,
    instant: chrono::DateTime<chrono::Utc>,
    palette: &Palette,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:>16}  "),
            Style::default().fg(palette.text_muted),
        ),
        Span::styled(
            instant.format("%Y-%m-%d %H:%M UTC").to_string(),
            Style::default().fg(palette.text_secondary),
        ),
    ])
}
