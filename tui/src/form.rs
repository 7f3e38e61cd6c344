//! Add/edit form view with inline validation errors.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use roster_engine::FormState;
use roster_types::{FieldKind, Resource, TOGGLE_ON};

use crate::theme::{Glyphs, Palette, styles};

pub(crate) fn draw_form<R: Resource>(
    frame: &mut Frame,
    area: Rect,
    form: &FormState<R>,
    busy: bool,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let action = if form.is_edit() { "Edit" } else { "Add" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(format!(" {action} {} ", R::SINGULAR))
        .title_style(
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Each field: label, value, then an error line when flagged.
    let mut constraints = Vec::new();
    for field in R::FORM_FIELDS {
        constraints.push(Constraint::Length(1)); // label
        constraints.push(Constraint::Length(match field.kind {
            FieldKind::Multiline => 3,
            _ => 1,
        }));
        constraints.push(Constraint::Length(1)); // error or spacer
    }
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in R::FORM_FIELDS.iter().enumerate() {
        let focused = form.focus() == index;
        let label_style = if focused {
            styles::field_label_focused(palette)
        } else {
            styles::field_label(palette)
        };
        let marker = if focused { glyphs.selected } else { " " };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{marker} "), label_style),
                Span::styled(field.label, label_style),
            ])),
            rows[index * 3],
        );

        let raw = form.values().get(index).map_or("", String::as_str);
        let value_line = match field.kind {
            FieldKind::Toggle => {
                let on = raw == TOGGLE_ON;
                let glyph = if on { glyphs.toggle_on } else { glyphs.toggle_off };
                let text = if on { "Active" } else { "Inactive" };
                let style = if on {
                    Style::default().fg(palette.success)
                } else {
                    Style::default().fg(palette.text_muted)
                };
                Line::from(vec![
                    Span::styled(format!("  {glyph} "), style),
                    Span::styled(text, style),
                ])
            }
            _ => {
                let mut spans = vec![Span::styled(
                    format!("  {raw}"),
                    Style::default().fg(palette.text_primary),
                )];
                if focused && !busy {
                    spans.push(Span::styled("█", Style::default().fg(palette.accent)));
                }
                if raw.is_empty() && !focused {
                    spans.push(Span::styled(
                        placeholder(field.kind),
                        Style::default().fg(palette.text_disabled),
                    ));
                }
                Line::from(spans)
            }
        };
        frame.render_widget(Paragraph::new(value_line), rows[index * 3 + 1]);

        if let Some(message) = form.errors().get(field.name) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  {} {message}", glyphs.err),
                    styles::field_error(palette),
                ))),
                rows[index * 3 + 2],
            );
        }
    }
}

fn placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Date => "YYYY-MM-DD",
        FieldKind::Integer => "0",
        _ => "",
    }
}
