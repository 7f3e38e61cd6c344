//! Input handling for the Roster TUI.
//!
//! Input is drained non-blocking once per frame; a bounded number of events
//! per frame keeps rendering responsive during key repeat floods.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use roster_engine::App;

const MAX_EVENTS_PER_FRAME: usize = 64;

/// Drain pending input events. Returns true when the app should quit.
pub fn handle_events(app: &mut App) -> Result<bool> {
    for _ in 0..MAX_EVENTS_PER_FRAME {
        if !event::poll(Duration::ZERO)? {
            break;
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                if handle_key(app, key) {
                    return Ok(true);
                }
            }
            _ => {}
        }
    }
    Ok(app.should_quit())
}

fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    // The confirmation modal captures everything while open.
    if app.confirm_label().is_some() {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return false;
    }

    if app.in_form() {
        handle_form_key(app, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.switch_tab(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char('v') => app.open_selected_detail(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Esc => {
            if app.notice().is_some() {
                app.dismiss_notice();
            } else {
                app.back_to_list();
            }
        }
        _ => {}
    }
    false
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.back_to_list(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.form_reset(),
        KeyCode::Char(' ') => {
            // Flips a flag field; types a space into anything else. Each
            // call no-ops on the other field kind.
            app.form_toggle();
            app.form_insert_char(' ');
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_insert_char(c);
        }
        _ => {}
    }
}
