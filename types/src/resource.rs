//! The [`Resource`] trait - the seam both record variants share.
//!
//! The gateway builds one client per implementation (`COLLECTION` is the
//! URL path segment and the accepted wrapped-list key), and the engine
//! builds one pane per implementation. Everything the generic layers need
//! from a record goes through this trait; nothing downstream matches on
//! the concrete variant.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::form::{FieldKind, FieldSpec, TOGGLE_OFF, TOGGLE_ON};
use crate::ids::{EventId, UserId};
use crate::record::{EventDraft, EventRecord, UserDraft, UserRecord};

pub trait Resource: Clone + fmt::Debug + Send + Sync + DeserializeOwned + 'static {
    /// Backend-assigned key type. Absent until the first successful create.
    type Id: Clone + PartialEq + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;
    /// Client-settable fields; serializing one is the POST/PUT body.
    type Draft: Serialize + Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// URL path segment (`GET /{COLLECTION}`) and accepted wrapped-list key.
    const COLLECTION: &'static str;
    /// Display noun for notices and titles ("user", "event").
    const SINGULAR: &'static str;
    /// Form fields in render order; validation errors key off their names.
    const FORM_FIELDS: &'static [FieldSpec];
    /// List-view column headers, parallel to [`Resource::table_cells`].
    const TABLE_COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<&Self::Id>;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Merge edited fields into this record, preserving identifier and
    /// timestamps. This is the optimistic half of an update; the confirming
    /// round trip (or a reload on failure) settles it.
    fn apply_draft(&mut self, draft: &Self::Draft);

    /// Raw form values pre-filling an edit form, parallel to `FORM_FIELDS`.
    fn form_values(&self) -> Vec<String>;

    /// Parse raw form values into a draft. Unparseable numeric/date input
    /// becomes `None` so the validator reports it instead of a panic.
    fn draft_from_values(values: &[String]) -> Self::Draft;

    /// List-view cells, parallel to `TABLE_COLUMNS`.
    fn table_cells(&self) -> Vec<String>;

    /// Short human label for confirmation prompts and detail titles.
    fn display_label(&self) -> String;
}

fn value<'a>(values: &'a [String], index: usize) -> &'a str {
    values.get(index).map_or("", String::as_str)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl Resource for UserRecord {
    type Id = UserId;
    type Draft = UserDraft;

    const COLLECTION: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const FORM_FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("first_name", "First name", FieldKind::Text),
        FieldSpec::new("last_name", "Last name", FieldKind::Text),
        FieldSpec::new("address", "Address", FieldKind::Text),
        FieldSpec::new("identity_number", "Identity number", FieldKind::Integer),
        FieldSpec::new("birth_date", "Birth date", FieldKind::Date),
        FieldSpec::new("active", "Status", FieldKind::Toggle),
    ];
    const TABLE_COLUMNS: &'static [&'static str] = &[
        "Full Name",
        "Address",
        "Identity Number",
        "Birth Date",
        "Status",
    ];

    fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn apply_draft(&mut self, draft: &UserDraft) {
        self.first_name = draft.first_name.clone();
        self.last_name = draft.last_name.clone();
        self.address = draft.address.clone();
        if let Some(number) = draft.identity_number {
            self.identity_number = number;
        }
        if let Some(birth_date) = draft.birth_date {
            self.birth_date = birth_date;
        }
        self.active = draft.active;
    }

    fn form_values(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.address.clone(),
            self.identity_number.to_string(),
            self.birth_date.format("%Y-%m-%d").to_string(),
            if self.active { TOGGLE_ON } else { TOGGLE_OFF }.to_string(),
        ]
    }

    fn draft_from_values(values: &[String]) -> UserDraft {
        UserDraft {
            first_name: value(values, 0).to_string(),
            last_name: value(values, 1).to_string(),
            address: value(values, 2).to_string(),
            identity_number: value(values, 3).trim().parse().ok(),
            birth_date: parse_date(value(values, 4)),
            active: value(values, 5) == TOGGLE_ON,
        }
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.full_name(),
            self.address.clone(),
            self.identity_number.to_string(),
            self.birth_date.format("%Y-%m-%d").to_string(),
            if self.active { "Active" } else { "Inactive" }.to_string(),
        ]
    }

    fn display_label(&self) -> String {
        self.full_name()
    }
}

impl Resource for EventRecord {
    type Id = EventId;
    type Draft = EventDraft;

    const COLLECTION: &'static str = "events";
    const SINGULAR: &'static str = "event";
    const FORM_FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::Multiline),
        FieldSpec::new("date", "Date", FieldKind::Date),
    ];
    const TABLE_COLUMNS: &'static [&'static str] = &["Title", "Date", "Description"];

    fn id(&self) -> Option<&EventId> {
        self.id.as_ref()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn apply_draft(&mut self, draft: &EventDraft) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        if let Some(date) = draft.date {
            self.date = date;
        }
    }

    fn form_values(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.date.format("%Y-%m-%d").to_string(),
        ]
    }

    fn draft_from_values(values: &[String]) -> EventDraft {
        EventDraft {
            title: value(values, 0).to_string(),
            description: value(values, 1).to_string(),
            date: parse_date(value(values, 2)),
        }
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.description.clone(),
        ]
    }

    fn display_label(&self) -> String {
        self.title.clone()
    }
}
