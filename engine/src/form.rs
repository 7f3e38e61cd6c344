//! Form state for the add/edit view.
//!
//! One raw input string per [`FieldSpec`], parallel to the resource's field
//! list. Parsing into a draft happens only at submit time; editing a field
//! clears that field's validation error and no other.

use roster_core::FieldErrors;
use roster_types::{FieldKind, FieldSpec, Resource, TOGGLE_OFF, TOGGLE_ON};

#[derive(Debug)]
pub struct FormState<R: Resource> {
    values: Vec<String>,
    focus: usize,
    errors: FieldErrors,
    /// Target id when this form edits an existing record; `None` for add.
    editing: Option<R::Id>,
}

impl<R: Resource> FormState<R> {
    /// Empty add form. Toggle fields start switched on.
    #[must_use]
    pub fn add() -> Self {
        Self {
            values: R::FORM_FIELDS.iter().map(default_value).collect(),
            focus: 0,
            errors: FieldErrors::new(),
            editing: None,
        }
    }

    /// Edit form pre-filled from an existing record.
    #[must_use]
    pub fn edit(record: &R) -> Self {
        Self {
            values: record.form_values(),
            focus: 0,
            errors: FieldErrors::new(),
            editing: record.id().cloned(),
        }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub fn editing(&self) -> Option<&R::Id> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn focused_field(&self) -> &'static FieldSpec {
        &R::FORM_FIELDS[self.focus.min(R::FORM_FIELDS.len() - 1)]
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % R::FORM_FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(R::FORM_FIELDS.len() - 1);
    }

    /// Type into the focused field. No-op on toggle fields.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focused_field();
        if field.kind == FieldKind::Toggle {
            return;
        }
        if let Some(value) = self.values.get_mut(self.focus) {
            value.push(c);
            self.errors.clear(field.name);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        if field.kind == FieldKind::Toggle {
            return;
        }
        if let Some(value) = self.values.get_mut(self.focus) {
            value.pop();
            self.errors.clear(field.name);
        }
    }

    /// Flip the focused field if it is a toggle.
    pub fn toggle(&mut self) {
        let field = self.focused_field();
        if field.kind != FieldKind::Toggle {
            return;
        }
        if let Some(value) = self.values.get_mut(self.focus) {
            *value = if value == TOGGLE_ON {
                TOGGLE_OFF.to_string()
            } else {
                TOGGLE_ON.to_string()
            };
            self.errors.clear(field.name);
        }
    }

    /// Clear every field back to its default and drop all errors.
    pub fn reset(&mut self) {
        self.values = R::FORM_FIELDS.iter().map(default_value).collect();
        self.errors = FieldErrors::new();
        self.focus = 0;
    }

    /// Parse the raw values into a draft for validation and submission.
    #[must_use]
    pub fn draft(&self) -> R::Draft {
        R::draft_from_values(&self.values)
    }
}

fn default_value(field: &FieldSpec) -> String {
    match field.kind {
        FieldKind::Toggle => TOGGLE_ON.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_types::{EventId, EventRecord, UserRecord};

    fn event() -> EventRecord {
        EventRecord {
            id: Some(EventId::new(3)),
            title: "Standup".to_string(),
            description: "Daily team sync".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn add_form_starts_empty_with_toggles_on() {
        let form = FormState::<UserRecord>::add();
        assert!(!form.is_edit());
        assert_eq!(form.values()[0], "");
        assert_eq!(form.values()[5], TOGGLE_ON);
    }

    #[test]
    fn edit_form_prefills_from_the_record() {
        let form = FormState::<EventRecord>::edit(&event());
        assert!(form.is_edit());
        assert_eq!(form.editing(), Some(&EventId::new(3)));
        assert_eq!(form.values()[0], "Standup");
        assert_eq!(form.values()[2], "2026-08-20");
    }

    #[test]
    fn typing_clears_only_that_fields_error() {
        let mut form = FormState::<EventRecord>::add();
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        errors.insert("date", "Date is required");
        form.set_errors(errors);

        form.insert_char('H');
        assert_eq!(form.errors().get("title"), None);
        assert_eq!(form.errors().get("date"), Some("Date is required"));
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = FormState::<EventRecord>::add();
        form.focus_prev();
        assert_eq!(form.focus(), EventRecord::FORM_FIELDS.len() - 1);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn toggle_flips_only_toggle_fields() {
        let mut form = FormState::<UserRecord>::add();
        form.toggle(); // focused on a text field: no-op
        assert_eq!(form.values()[0], "");

        while form.focused_field().kind != FieldKind::Toggle {
            form.focus_next();
        }
        form.toggle();
        assert_eq!(form.values()[5], TOGGLE_OFF);
        form.toggle();
        assert_eq!(form.values()[5], TOGGLE_ON);
    }

    #[test]
    fn reset_clears_values_and_errors() {
        let mut form = FormState::<EventRecord>::edit(&event());
        let mut errors = FieldErrors::new();
        errors.insert("title", "x");
        form.set_errors(errors);

        form.reset();
        assert_eq!(form.values()[0], "");
        assert!(form.errors().is_empty());
        // Reset clears content, not the edit target.
        assert!(form.is_edit());
    }
}
