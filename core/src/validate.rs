//! Draft validation.
//!
//! The contract is `validate(draft, today) -> field -> message`: an empty
//! map means the draft may be submitted. Validation runs in full on every
//! submission attempt and must pass before a draft is ever handed to the
//! gateway. All checks trim surrounding whitespace first; date comparisons
//! are calendar-day comparisons (time of day never enters the picture
//! because fields are `NaiveDate`).

use chrono::{Datelike, NaiveDate};

use roster_types::{EventDraft, UserDraft};

/// Minimum length for an event title, when non-empty.
pub const MIN_TITLE_LEN: usize = 3;
/// Minimum length for an event description, when non-empty.
pub const MIN_DESCRIPTION_LEN: usize = 10;
/// Minimum age in whole years for a user's birth date.
pub const MIN_USER_AGE_YEARS: i32 = 17;

/// Field-keyed validation errors, in form order.
///
/// Keys are `FieldSpec::name` values, so the form layer can clear a single
/// field's error when that field is edited without touching the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, replacing any earlier one for the same key.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            entry.1 = message;
        } else {
            self.entries.push((field, message));
        }
    }

    /// Clear one field's error, leaving the rest in place.
    pub fn clear(&mut self, field: &str) {
        self.entries.retain(|(name, _)| *name != field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(name, message)| (*name, message.as_str()))
    }
}

/// Synchronous, pure draft validation. Idempotent for an unchanged draft.
pub trait Validate {
    fn validate(&self, today: NaiveDate) -> FieldErrors;
}

impl Validate for EventDraft {
    fn validate(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title", "Title is required");
        } else if title.chars().count() < MIN_TITLE_LEN {
            errors.insert(
                "title",
                format!("Title must be at least {MIN_TITLE_LEN} characters"),
            );
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert("description", "Description is required");
        } else if description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.insert(
                "description",
                format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
            );
        }

        match self.date {
            None => errors.insert("date", "Date is required"),
            Some(date) if date < today => errors.insert("date", "Date cannot be in the past"),
            Some(_) => {}
        }

        errors
    }
}

impl Validate for UserDraft {
    fn validate(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.insert("last_name", "Last name is required");
        }
        if self.address.trim().is_empty() {
            errors.insert("address", "Address is required");
        }

        match self.identity_number {
            Some(number) if number > 0 => {}
            _ => errors.insert(
                "identity_number",
                "Identity number must be a positive number",
            ),
        }

        match self.birth_date {
            None => errors.insert("birth_date", "Birth date is required"),
            Some(birth_date) if birth_date > today => {
                errors.insert("birth_date", "Birth date cannot be in the future");
            }
            Some(birth_date) if age_in_years(birth_date, today) < MIN_USER_AGE_YEARS => {
                errors.insert(
                    "birth_date",
                    format!("User must be at least {MIN_USER_AGE_YEARS} years old"),
                );
            }
            Some(_) => {}
        }

        errors
    }
}

/// Age in whole years from `birth_date` to `today`.
#[must_use]
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 5)
    }

    fn valid_event() -> EventDraft {
        EventDraft {
            title: "Launch day".to_string(),
            description: "Ship the release and watch the dashboards".to_string(),
            date: Some(date(2026, 9, 1)),
        }
    }

    fn valid_user() -> UserDraft {
        UserDraft {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 St James Square".to_string(),
            identity_number: Some(1815),
            birth_date: Some(date(1998, 12, 10)),
            active: true,
        }
    }

    mod event_rules {
        use super::*;

        #[test]
        fn valid_draft_has_no_errors() {
            assert!(valid_event().validate(today()).is_empty());
        }

        #[test]
        fn missing_title_flags_only_title() {
            let mut draft = valid_event();
            draft.title = "   ".to_string();
            let errors = draft.validate(today());
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get("title"), Some("Title is required"));
            assert_eq!(errors.get("description"), None);
        }

        #[test]
        fn short_title_gets_length_message_not_required_message() {
            let mut draft = valid_event();
            draft.title = "Hi".to_string();
            let errors = draft.validate(today());
            assert_eq!(
                errors.get("title"),
                Some("Title must be at least 3 characters")
            );
        }

        #[test]
        fn short_description_gets_length_message() {
            let mut draft = valid_event();
            draft.description = "too short".to_string();
            let errors = draft.validate(today());
            assert_eq!(
                errors.get("description"),
                Some("Description must be at least 10 characters")
            );
        }

        #[test]
        fn yesterday_fails_today_and_tomorrow_pass() {
            let mut draft = valid_event();

            draft.date = Some(today().pred_opt().unwrap());
            assert_eq!(
                draft.validate(today()).get("date"),
                Some("Date cannot be in the past")
            );

            draft.date = Some(today());
            assert_eq!(draft.validate(today()).get("date"), None);

            draft.date = Some(today().succ_opt().unwrap());
            assert_eq!(draft.validate(today()).get("date"), None);
        }

        #[test]
        fn all_three_fields_flagged_at_once() {
            let draft = EventDraft {
                title: "Hi".to_string(),
                description: "short".to_string(),
                date: Some(today().pred_opt().unwrap()),
            };
            let errors = draft.validate(today());
            assert_eq!(errors.len(), 3);
            assert!(errors.get("title").is_some());
            assert!(errors.get("description").is_some());
            assert!(errors.get("date").is_some());
        }

        #[test]
        fn validation_is_idempotent() {
            let draft = EventDraft {
                title: String::new(),
                description: "x".to_string(),
                date: None,
            };
            assert_eq!(draft.validate(today()), draft.validate(today()));
        }
    }

    mod user_rules {
        use super::*;

        #[test]
        fn valid_draft_has_no_errors() {
            assert!(valid_user().validate(today()).is_empty());
        }

        #[test]
        fn each_required_text_field_is_flagged_in_isolation() {
            for field in ["first_name", "last_name", "address"] {
                let mut draft = valid_user();
                match field {
                    "first_name" => draft.first_name = String::new(),
                    "last_name" => draft.last_name = String::new(),
                    _ => draft.address = String::new(),
                }
                let errors = draft.validate(today());
                assert_eq!(errors.len(), 1, "only {field} should be flagged");
                assert!(errors.get(field).is_some());
            }
        }

        #[test]
        fn identity_number_must_be_positive() {
            let mut draft = valid_user();
            for bad in [None, Some(0), Some(-4)] {
                draft.identity_number = bad;
                assert!(draft.validate(today()).get("identity_number").is_some());
            }
            draft.identity_number = Some(1);
            assert!(draft.validate(today()).get("identity_number").is_none());
        }

        #[test]
        fn birth_date_in_the_future_fails() {
            let mut draft = valid_user();
            draft.birth_date = Some(today().succ_opt().unwrap());
            assert_eq!(
                draft.validate(today()).get("birth_date"),
                Some("Birth date cannot be in the future")
            );
        }

        #[test]
        fn under_age_fails_even_when_everything_else_is_valid() {
            let mut draft = valid_user();
            draft.birth_date = Some(date(2010, 1, 1));
            let errors = draft.validate(today());
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get("birth_date"),
                Some("User must be at least 17 years old")
            );
        }

        #[test]
        fn seventeenth_birthday_passes_the_day_it_happens() {
            let mut draft = valid_user();
            draft.birth_date = Some(date(2009, 8, 5));
            assert!(draft.validate(today()).get("birth_date").is_none());

            draft.birth_date = Some(date(2009, 8, 6));
            assert!(draft.validate(today()).get("birth_date").is_some());
        }
    }

    mod age {
        use super::*;

        #[test]
        fn counts_whole_years_only() {
            assert_eq!(age_in_years(date(1998, 12, 10), date(2026, 8, 5)), 27);
            assert_eq!(age_in_years(date(1998, 8, 5), date(2026, 8, 5)), 28);
            assert_eq!(age_in_years(date(1998, 8, 6), date(2026, 8, 5)), 27);
        }

        #[test]
        fn leap_day_birthday() {
            assert_eq!(age_in_years(date(2008, 2, 29), date(2026, 2, 28)), 17);
            assert_eq!(age_in_years(date(2008, 2, 29), date(2026, 3, 1)), 18);
        }
    }

    mod field_errors {
        use super::*;

        #[test]
        fn clear_removes_only_the_named_field() {
            let mut errors = FieldErrors::new();
            errors.insert("title", "Title is required");
            errors.insert("date", "Date is required");
            errors.clear("title");
            assert_eq!(errors.get("title"), None);
            assert_eq!(errors.get("date"), Some("Date is required"));
        }

        #[test]
        fn insert_replaces_existing_message() {
            let mut errors = FieldErrors::new();
            errors.insert("title", "Title is required");
            errors.insert("title", "Title must be at least 3 characters");
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get("title"),
                Some("Title must be at least 3 characters")
            );
        }

        #[test]
        fn iteration_preserves_insertion_order() {
            let mut errors = FieldErrors::new();
            errors.insert("title", "a");
            errors.insert("description", "b");
            errors.insert("date", "c");
            let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
            assert_eq!(fields, vec!["title", "description", "date"]);
        }
    }
}
