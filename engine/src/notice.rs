//! Dismissible user-facing notices.
//!
//! One notice is visible at a time; a newer one replaces the current. All
//! failure reporting goes through here - nothing is fatal to the session.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Holder for the currently visible notice.
#[derive(Debug, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice, replacing whatever was visible.
    pub fn push(&mut self, notice: Notice) {
        self.current = Some(notice);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
