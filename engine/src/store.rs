//! The Local Store - last known server state, in server order.
//!
//! Holds only persisted records (non-null identifier), except during an
//! optimistic mutation window: a deleted record is speculatively absent and
//! an edited record speculatively carries unconfirmed field values until the
//! backend confirms or a reload resyncs. The store is only ever mutated from
//! the reconciliation flow; nothing else holds a `&mut` to it.

use roster_types::Resource;

#[derive(Debug)]
pub struct LocalStore<R: Resource> {
    records: Vec<R>,
}

impl<R: Resource> Default for LocalStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Resource> LocalStore<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the order last received from the backend.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records
            .iter()
            .find(|record| record.id() == Some(id))
    }

    #[must_use]
    pub fn contains(&self, id: &R::Id) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Full resync from backend truth (reload).
    pub fn replace_all(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Optimistic delete. Returns false when the id was already absent.
    pub fn remove_by_id(&mut self, id: &R::Id) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != Some(id));
        self.records.len() != before
    }

    /// Optimistic edit: merge draft fields into the record, identifier and
    /// timestamps untouched. Returns false when the id is absent.
    pub fn apply_draft(&mut self, id: &R::Id, draft: &R::Draft) -> bool {
        match self
            .records
            .iter_mut()
            .find(|record| record.id() == Some(id))
        {
            Some(record) => {
                record.apply_draft(draft);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_types::{EventDraft, EventId, EventRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: i64, title: &str) -> EventRecord {
        EventRecord {
            id: Some(EventId::new(id)),
            title: title.to_string(),
            description: "a description long enough".to_string(),
            date: date(2026, 9, 1),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn replace_all_keeps_backend_order() {
        let mut store = LocalStore::new();
        store.replace_all(vec![event(3, "c"), event(1, "a"), event(2, "b")]);
        let titles: Vec<_> = store.records().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn remove_by_id_only_touches_the_target() {
        let mut store = LocalStore::new();
        store.replace_all(vec![event(1, "a"), event(7, "b"), event(9, "c")]);

        assert!(store.remove_by_id(&EventId::new(7)));
        assert_eq!(store.len(), 2);
        assert!(!store.contains(&EventId::new(7)));
        assert!(store.contains(&EventId::new(1)));

        assert!(!store.remove_by_id(&EventId::new(7)));
    }

    #[test]
    fn apply_draft_merges_fields_but_keeps_the_id() {
        let mut store = LocalStore::new();
        store.replace_all(vec![event(5, "old")]);

        let draft = EventDraft {
            title: "New".to_string(),
            description: "changed description".to_string(),
            date: Some(date(2026, 10, 1)),
        };
        assert!(store.apply_draft(&EventId::new(5), &draft));

        let record = store.get(&EventId::new(5)).unwrap();
        assert_eq!(record.title, "New");
        assert_eq!(record.date, date(2026, 10, 1));
        assert_eq!(record.id, Some(EventId::new(5)));

        assert!(!store.apply_draft(&EventId::new(99), &draft));
    }
}
