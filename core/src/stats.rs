//! Derived summary statistics over store slices.
//!
//! Recomputed from the Local Store on every render; nothing here caches.

use chrono::{Datelike, NaiveDate};

use roster_types::{EventRecord, UserRecord};

/// Counts shown under the user list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Counts and the next upcoming event, shown under the event list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSummary {
    pub total: usize,
    /// Events dated today or later.
    pub upcoming: usize,
    /// Events dated strictly before today.
    pub past: usize,
    /// Events in the current calendar month and year.
    pub this_month: usize,
    /// The soonest event dated today or later, if any.
    pub next: Option<EventRecord>,
}

#[must_use]
pub fn user_summary(users: &[UserRecord]) -> UserSummary {
    let active = users.iter().filter(|user| user.active).count();
    UserSummary {
        total: users.len(),
        active,
        inactive: users.len() - active,
    }
}

#[must_use]
pub fn event_summary(events: &[EventRecord], today: NaiveDate) -> EventSummary {
    let upcoming = events.iter().filter(|event| event.date >= today).count();
    let this_month = events
        .iter()
        .filter(|event| {
            event.date.month() == today.month() && event.date.year() == today.year()
        })
        .count();
    let next = events
        .iter()
        .filter(|event| event.date >= today)
        .min_by_key(|event| event.date)
        .cloned();

    EventSummary {
        total: events.len(),
        upcoming,
        past: events.len() - upcoming,
        this_month,
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(title: &str, on: NaiveDate) -> EventRecord {
        EventRecord {
            id: None,
            title: title.to_string(),
            description: String::new(),
            date: on,
            created_at: None,
            updated_at: None,
        }
    }

    fn user(active: bool) -> UserRecord {
        UserRecord {
            id: None,
            first_name: "a".to_string(),
            last_name: "b".to_string(),
            address: "c".to_string(),
            identity_number: 1,
            birth_date: date(1990, 1, 1),
            active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn user_counts_split_by_active_flag() {
        let users = vec![user(true), user(true), user(false)];
        let summary = user_summary(&users);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.inactive, 1);
    }

    #[test]
    fn today_counts_as_upcoming() {
        let today = date(2026, 8, 5);
        let events = vec![
            event("past", date(2026, 8, 4)),
            event("today", today),
            event("future", date(2026, 8, 6)),
        ];
        let summary = event_summary(&events, today);
        assert_eq!(summary.upcoming, 2);
        assert_eq!(summary.past, 1);
    }

    #[test]
    fn next_is_the_soonest_future_event_regardless_of_store_order() {
        let today = date(2026, 8, 5);
        let events = vec![
            event("later", date(2026, 10, 1)),
            event("soonest", date(2026, 8, 9)),
            event("gone", date(2026, 1, 1)),
        ];
        let summary = event_summary(&events, today);
        assert_eq!(summary.next.unwrap().title, "soonest");
    }

    #[test]
    fn no_upcoming_events_means_no_next() {
        let today = date(2026, 8, 5);
        let events = vec![event("gone", date(2026, 1, 1))];
        assert_eq!(event_summary(&events, today).next, None);
    }

    #[test]
    fn this_month_requires_matching_year_too() {
        let today = date(2026, 8, 5);
        let events = vec![
            event("this month", date(2026, 8, 30)),
            event("same month last year", date(2025, 8, 30)),
            event("next month", date(2026, 9, 1)),
        ];
        assert_eq!(event_summary(&events, today).this_month, 1);
    }
}
