//! Record and draft types for both resource variants.
//!
//! Wire casing matches the backend exactly: user fields are camelCase with
//! the historical `IdentityNumber`/`status` names, event fields are
//! snake_case. Timestamps are server-assigned and never serialized by the
//! client; drafts omit them (and the identifier) structurally.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, UserId};

/// A user as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    #[serde(rename = "IdentityNumber")]
    pub identity_number: i64,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    #[serde(rename = "status")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Client-settable user fields. Serializing this is the POST/PUT body.
///
/// Numeric and date fields are `Option` so the form layer can hand
/// unparseable input to the validator instead of failing early; a draft
/// only reaches the wire once validation has proven both are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDraft {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    #[serde(rename = "IdentityNumber")]
    pub identity_number: Option<i64>,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "status")]
    pub active: bool,
}

/// An event as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-settable event fields. Serializing this is the POST/PUT body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn user_wire_casing_round_trips() {
        let json = serde_json::json!({
            "id": "u-9",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "address": "12 St James Square",
            "IdentityNumber": 1815,
            "birthDate": "1998-12-10",
            "status": true
        });
        let user: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, Some(UserId::new("u-9")));
        assert_eq!(user.identity_number, 1815);
        assert_eq!(user.birth_date, date(1998, 12, 10));
        assert!(user.active);
        assert_eq!(user.created_at, None);
    }

    #[test]
    fn event_draft_body_has_no_id_or_timestamps() {
        let draft = EventDraft {
            title: "Launch".to_string(),
            description: "Quarterly launch review".to_string(),
            date: Some(date(2026, 9, 1)),
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "title": "Launch",
                "description": "Quarterly launch review",
                "date": "2026-09-01"
            })
        );
    }

    #[test]
    fn user_draft_serializes_wire_names() {
        let draft = UserDraft {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 St James Square".to_string(),
            identity_number: Some(1815),
            birth_date: Some(date(1998, 12, 10)),
            active: false,
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["firstName"], "Ada");
        assert_eq!(body["IdentityNumber"], 1815);
        assert_eq!(body["status"], false);
        assert!(body.get("id").is_none());
    }
}
