//! Core engine for Roster - state machine and orchestration.
//!
//! This crate contains the [`App`] state machine without TUI dependencies.
//! The TUI layer reads state through accessors and drives transitions
//! through methods; the binary calls [`App::tick`] once per frame to drain
//! gateway replies and dispatch queued reloads.
//!
//! # Concurrency model
//!
//! Single-threaded and cooperative. Each pane allows at most one mutating
//! action in flight (its presence is the busy flag); gateway calls run on
//! spawned tasks and resolve through channels drained here. The Local
//! Store is only ever mutated from this drain path, so no locking exists
//! anywhere in the crate.

mod form;
mod notice;
mod pane;
mod reconcile;
mod store;
mod view;

use chrono::{Local, NaiveDate};

use roster_gateway::{BaseUrl, ResourceClient};
use roster_types::{EventRecord, UserRecord};

pub use form::FormState;
pub use notice::{Notice, NoticeLevel, NoticeSlot};
pub use pane::{Pane, PendingDelete};
pub use reconcile::{AfterReload, MutationKind, Outcome, Reply, Step};
pub use store::LocalStore;
pub use view::View;

// Re-export what the binary needs to bootstrap.
pub use roster_config::{ConfigError, RosterConfig, resolve_base_url};
pub use roster_gateway::{BaseUrlError, Envelope};

/// Which resource tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Users,
    Events,
}

impl Tab {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Tab::Users => Tab::Events,
            Tab::Events => Tab::Users,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Tab::Users => "Users",
            Tab::Events => "Events",
        }
    }
}

/// UI options derived from config.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// The whole application state: one pane per resource, the active tab, and
/// the currently visible notice.
#[derive(Debug)]
pub struct App {
    users: Pane<UserRecord>,
    events: Pane<EventRecord>,
    tab: Tab,
    notices: NoticeSlot,
    ui_options: UiOptions,
    should_quit: bool,
}

impl App {
    pub fn new(config: Option<&RosterConfig>) -> Result<Self, BaseUrlError> {
        let base = BaseUrl::parse(&resolve_base_url(config))?;
        tracing::info!(base_url = base.as_str(), "connecting to backend");

        let ui_options = config
            .and_then(|config| config.app.as_ref())
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
            })
            .unwrap_or_default();

        let mut app = Self {
            users: Pane::new(ResourceClient::new(base.clone())),
            events: Pane::new(ResourceClient::new(base)),
            tab: Tab::Users,
            notices: NoticeSlot::new(),
            ui_options,
            should_quit: false,
        };
        app.users.start_initial_load();
        app.events.start_initial_load();
        Ok(app)
    }

    // === Read access for rendering ===

    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    #[must_use]
    pub fn users(&self) -> &Pane<UserRecord> {
        &self.users
    }

    #[must_use]
    pub fn events(&self) -> &Pane<EventRecord> {
        &self.events
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    /// True while the active pane has an action in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        match self.tab {
            Tab::Users => self.users.busy(),
            Tab::Events => self.events.busy(),
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    // === Frame plumbing ===

    /// Drain gateway replies and dispatch queued reloads. Called once per
    /// frame by the binary.
    pub fn tick(&mut self) {
        self.users.drain(&mut self.notices);
        self.events.drain(&mut self.notices);
        self.users.pump();
        self.events.pump();
    }

    // === Transitions (delegated to the active pane) ===

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    pub fn select_next(&mut self) {
        match self.tab {
            Tab::Users => self.users.select_next(),
            Tab::Events => self.events.select_next(),
        }
    }

    pub fn select_prev(&mut self) {
        match self.tab {
            Tab::Users => self.users.select_prev(),
            Tab::Events => self.events.select_prev(),
        }
    }

    pub fn open_add_form(&mut self) {
        match self.tab {
            Tab::Users => self.users.open_add_form(),
            Tab::Events => self.events.open_add_form(),
        }
    }

    pub fn open_edit_form(&mut self) {
        match self.tab {
            Tab::Users => self.users.open_edit_form(),
            Tab::Events => self.events.open_edit_form(),
        }
    }

    pub fn open_selected_detail(&mut self) {
        match self.tab {
            Tab::Users => self.users.open_selected_detail(&mut self.notices),
            Tab::Events => self.events.open_selected_detail(&mut self.notices),
        }
    }

    pub fn back_to_list(&mut self) {
        match self.tab {
            Tab::Users => self.users.back_to_list(),
            Tab::Events => self.events.back_to_list(),
        }
    }

    pub fn refresh(&mut self) {
        match self.tab {
            Tab::Users => self.users.refresh(),
            Tab::Events => self.events.refresh(),
        }
    }

    pub fn submit_form(&mut self) {
        let today = self.today();
        match self.tab {
            Tab::Users => self.users.submit_form(today),
            Tab::Events => self.events.submit_form(today),
        }
    }

    pub fn request_delete(&mut self) {
        match self.tab {
            Tab::Users => self.users.request_delete(),
            Tab::Events => self.events.request_delete(),
        }
    }

    pub fn confirm_delete(&mut self) {
        match self.tab {
            Tab::Users => self.users.confirm_delete(),
            Tab::Events => self.events.confirm_delete(),
        }
    }

    pub fn cancel_delete(&mut self) {
        match self.tab {
            Tab::Users => self.users.cancel_delete(),
            Tab::Events => self.events.cancel_delete(),
        }
    }

    /// Label of the delete awaiting confirmation on the active tab, if any.
    #[must_use]
    pub fn confirm_label(&self) -> Option<&str> {
        match self.tab {
            Tab::Users => self.users.confirm().map(|c| c.label.as_str()),
            Tab::Events => self.events.confirm().map(|c| c.label.as_str()),
        }
    }

    /// True when the active pane is showing a form.
    #[must_use]
    pub fn in_form(&self) -> bool {
        match self.tab {
            Tab::Users => self.users.view().is_form(),
            Tab::Events => self.events.view().is_form(),
        }
    }

    /// True when the active pane is showing a record detail.
    #[must_use]
    pub fn in_detail(&self) -> bool {
        match self.tab {
            Tab::Users => matches!(self.users.view(), View::Detail { .. }),
            Tab::Events => matches!(self.events.view(), View::Detail { .. }),
        }
    }

    // === Form editing on the active pane ===

    pub fn form_insert_char(&mut self, c: char) {
        match self.tab {
            Tab::Users => {
                if let Some(form) = self.users.form_mut() {
                    form.insert_char(c);
                }
            }
            Tab::Events => {
                if let Some(form) = self.events.form_mut() {
                    form.insert_char(c);
                }
            }
        }
    }

    pub fn form_backspace(&mut self) {
        match self.tab {
            Tab::Users => {
                if let Some(form) = self.users.form_mut() {
                    form.backspace();
                }
            }
            Tab::Events => {
                if let Some(form) = self.events.form_mut() {
                    form.backspace();
                }
            }
        }
    }

    pub fn form_next_field(&mut self) {
        match self.tab {
            Tab::Users => {
                if let Some(form) = self.users.form_mut() {
                    form.focus_next();
                }
            }
            Tab::Events => {
                if let Some(form) = self.events.form_mut() {
                    form.focus_next();
                }
            }
        }
    }

    pub fn form_prev_field(&mut self) {
        match self.tab {
            Tab::Users => {
                if let Some(form) = self.users.form_mut() {
                    form.focus_prev();
                }
            }
            Tab::Events => {
                if let Some(form) = self.events.form_mut() {
                    form.focus_prev();
                }
            }
        }
    }

    pub fn form_toggle(&mut self) {
        match self.tab {
            Tab::Users => {
                if let Some(form) = self.users.form_mut() {
                    form.toggle();
                }
            }
            Tab::Events => {
                if let Some(form) = self.events.form_mut() {
                    form.toggle();
                }
            }
        }
    }

    pub fn form_reset(&mut self) {
        match self.tab {
            Tab::Users => {
                if let Some(form) = self.users.form_mut() {
                    form.reset();
                }
            }
            Tab::Events => {
                if let Some(form) = self.events.form_mut() {
                    form.reset();
                }
            }
        }
    }
}
