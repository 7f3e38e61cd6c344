//! List view: record table plus the statistics panel beneath it.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

use roster_engine::Pane;
use roster_types::Resource;

use crate::theme::{Glyphs, Palette, styles};

/// Clip a cell to a column width, ellipsizing wide content.
fn fit(text: &str, max_width: usize) -> String {
    if max_width == 0 || text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let budget = max_width.saturating_sub(1);
    for c in text.chars() {
        if out.width() + c.to_string().width() > budget {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

pub(crate) fn draw_list<R: Resource>(
    frame: &mut Frame,
    area: Rect,
    pane: &Pane<R>,
    selected: usize,
    palette: &Palette,
    glyphs: &Glyphs,
    stats: &[Line<'static>],
) {
    let stats_height = (stats.len() as u16).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(stats_height)])
        .split(area);

    draw_table(frame, chunks[0], pane, selected, palette, glyphs);
    draw_stats(frame, chunks[1], palette, stats);
}

fn draw_table<R: Resource>(
    frame: &mut Frame,
    area: Rect,
    pane: &Pane<R>,
    selected: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .padding(Padding::horizontal(1));

    if pane.store().is_empty() {
        let noun = R::COLLECTION;
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No {noun} found"),
                Style::default().fg(palette.text_secondary),
            )),
            Line::from(Span::styled(
                format!("Press 'a' to create your first {}", R::SINGULAR),
                Style::default().fg(palette.text_muted),
            )),
        ])
        .centered()
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let columns = R::TABLE_COLUMNS;
    let column_width = (area.width as usize / columns.len().max(1)).saturating_sub(2);

    let header = Row::new(
        columns
            .iter()
            .map(|title| Cell::from(*title))
            .collect::<Vec<_>>(),
    )
    .style(styles::table_header(palette))
    .height(1);

    let rows: Vec<Row> = pane
        .store()
        .records()
        .iter()
        .map(|record| {
            Row::new(
                record
                    .table_cells()
                    .iter()
                    .map(|cell| Cell::from(fit(cell, column_width)))
                    .collect::<Vec<_>>(),
            )
            .style(Style::default().fg(palette.text_primary))
        })
        .collect();

    let widths = vec![Constraint::Fill(1); columns.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(styles::row_selected(palette))
        .highlight_symbol(Span::styled(
            format!("{} ", glyphs.selected),
            Style::default().fg(palette.accent),
        ));

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_stats(frame: &mut Frame, area: Rect, palette: &Palette, stats: &[Line<'static>]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(" Statistics ")
        .title_style(Style::default().fg(palette.text_secondary))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(stats.to_vec()).block(block);
    frame.render_widget(paragraph, area);
}
