//! The entry store: owns every captured moment and the daily prompt

use crate::domain::prompt::random_prompt;
use crate::domain::tags::normalize_tag;
use crate::domain::{DailyPrompt, EntryUpdate, ImportRecord, WonderEntry};
use crate::error::{Result, WonderError};
use crate::infrastructure::{Clock, EntryRepository, SystemClock};
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

const CLEAR_QUESTION: &str = "Are you sure you want to delete ALL entries? This cannot be undone.";

/// Something the store reports to the user after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(String),
    Deleted(String),
    Updated(String),
    Imported(usize),
    ImportFailed(String),
    Cleared,
    LoadWarning(String),
}

impl StoreEvent {
    /// Short user-facing message for this event
    pub fn message(&self) -> String {
        match self {
            StoreEvent::Added(_) => "Moment captured successfully!".to_string(),
            StoreEvent::Deleted(_) => "Entry deleted".to_string(),
            StoreEvent::Updated(_) => "Entry updated successfully!".to_string(),
            StoreEvent::Imported(n) => format!("Successfully imported {} entries", n),
            StoreEvent::ImportFailed(msg) => msg.clone(),
            StoreEvent::Cleared => "All entries have been deleted".to_string(),
            StoreEvent::LoadWarning(msg) => msg.clone(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StoreEvent::ImportFailed(_) | StoreEvent::LoadWarning(_))
    }
}

/// Receives store events (e.g. to show a notification)
pub trait Notifier {
    fn notify(&self, event: &StoreEvent);
}

impl<F: Fn(&StoreEvent)> Notifier for F {
    fn notify(&self, event: &StoreEvent) {
        self(event)
    }
}

/// Blocking yes/no question asked before destructive operations
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// A fixed answer, e.g. from a `--yes` flag
impl Confirm for bool {
    fn confirm(&self, _question: &str) -> bool {
        *self
    }
}

/// Entry store over a repository.
///
/// Every mutating operation rewrites the whole collection through the
/// repository before returning. A failed write is logged and otherwise
/// ignored: the in-memory collection stays authoritative for the session.
pub struct EntryStore<R: EntryRepository, C: Clock = SystemClock> {
    repository: R,
    clock: C,
    rng: StdRng,
    entries: Vec<WonderEntry>,
    daily_prompt: DailyPrompt,
    load_warning: Option<String>,
    subscribers: Vec<Box<dyn Notifier>>,
}

impl<R: EntryRepository> EntryStore<R, SystemClock> {
    /// Open the store with the system clock and an entropy-seeded rng
    pub fn open(repository: R) -> Self {
        Self::open_with(repository, SystemClock, StdRng::from_entropy())
    }
}

impl<R: EntryRepository, C: Clock> EntryStore<R, C> {
    /// Open the store, loading persisted entries and today's prompt.
    ///
    /// Unreadable persisted entries yield an empty collection and a load
    /// warning (see [`EntryStore::load_warning`]).
    pub fn open_with(repository: R, clock: C, mut rng: StdRng) -> Self {
        let (entries, load_warning) = match repository.load_entries() {
            Ok(entries) => (entries, None),
            Err(e) => {
                warn!(error = %e, "failed to load stored entries, starting empty");
                (
                    Vec::new(),
                    Some(format!("Could not read saved entries ({}); starting empty", e)),
                )
            }
        };

        let today = clock.today();
        let persisted = repository.load_daily_prompt().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load daily prompt");
            None
        });
        let (daily_prompt, fresh) = match persisted {
            Some(prompt) if prompt.is_current(today) => (prompt, false),
            _ => (DailyPrompt::roll(&mut rng, today), true),
        };

        let mut store = EntryStore {
            repository,
            clock,
            rng,
            entries,
            daily_prompt,
            load_warning,
            subscribers: Vec::new(),
        };
        if fresh {
            store.persist_daily_prompt();
        }
        debug!(entries = store.entries.len(), "entry store opened");
        store
    }

    /// Register a subscriber. A pending load warning is delivered immediately.
    pub fn subscribe(&mut self, notifier: Box<dyn Notifier>) {
        if let Some(warning) = &self.load_warning {
            notifier.notify(&StoreEvent::LoadWarning(warning.clone()));
        }
        self.subscribers.push(notifier);
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[WonderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Today's prompt, re-rolled if the calendar day changed since it was chosen
    pub fn daily_prompt(&mut self) -> &str {
        let today = self.clock.today();
        if !self.daily_prompt.is_current(today) {
            self.daily_prompt = DailyPrompt::roll(&mut self.rng, today);
            self.persist_daily_prompt();
        }
        &self.daily_prompt.text
    }

    /// A random prompt; does not touch the daily prompt
    pub fn random_prompt(&mut self) -> &'static str {
        random_prompt(&mut self.rng)
    }

    /// Capture a new moment and return its id
    pub fn add_entry(&mut self, image: String, reflection: String, prompt: String) -> String {
        let id = self.fresh_id(&HashSet::new());
        let entry = WonderEntry::new(id.clone(), image, reflection, prompt, self.clock.now());
        debug!(id = %id, tags = entry.tags().len(), "adding entry");

        self.entries.insert(0, entry);
        self.persist_entries();
        self.emit(StoreEvent::Added(id.clone()));
        id
    }

    pub fn entry_by_id(&self, id: &str) -> Option<&WonderEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Delete an entry. Returns whether it existed; a missing id is a no-op.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        debug!(id = %id, removed, "delete entry");

        self.persist_entries();
        self.emit(StoreEvent::Deleted(id.to_string()));
        removed
    }

    /// Merge `update` into an entry, re-deriving tags when the reflection
    /// changes. Returns whether the entry existed; a missing id is a no-op.
    pub fn update_entry(&mut self, id: &str, update: EntryUpdate) -> bool {
        let found = match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                let changed = entry.apply(update);
                debug!(id = %id, changed, "update entry");
                true
            }
            None => {
                debug!(id = %id, "update entry: no such id");
                false
            }
        };

        self.persist_entries();
        self.emit(StoreEvent::Updated(id.to_string()));
        found
    }

    /// Serialize every entry as a JSON array (dates in ISO-8601)
    pub fn export_entries_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Import entries; `false` (with an `ImportFailed` event) if the payload
    /// is rejected, in which case the collection is unchanged.
    pub fn import_entries_from_json(&mut self, text: &str) -> bool {
        self.import_entries(text).is_ok()
    }

    /// Import entries from a JSON array, prepending them to the collection.
    ///
    /// Returns the number imported. A supplied id is kept unless it is
    /// already taken; entries are not deduplicated by content, so importing
    /// the same export twice yields every moment twice.
    pub fn import_entries(&mut self, text: &str) -> Result<usize> {
        match self.parse_import(text) {
            Ok(mut imported) => {
                let count = imported.len();
                imported.append(&mut self.entries);
                self.entries = imported;
                info!(count, "imported entries");

                self.persist_entries();
                self.emit(StoreEvent::Imported(count));
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "import rejected");
                let message = match &e {
                    WonderError::Json(_) => {
                        "Failed to import entries. Invalid JSON format.".to_string()
                    }
                    WonderError::InvalidImport(msg) => format!("Invalid format: {}", msg),
                    other => other.to_string(),
                };
                self.emit(StoreEvent::ImportFailed(message));
                Err(e)
            }
        }
    }

    fn parse_import(&self, text: &str) -> Result<Vec<WonderEntry>> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Array(items) = value else {
            return Err(WonderError::InvalidImport(
                "Import data must be an array".to_string(),
            ));
        };

        let mut taken: HashSet<String> = self.entries.iter().map(|e| e.id.clone()).collect();
        let mut imported = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                return Err(WonderError::InvalidImport(format!(
                    "Entry {} is not an object",
                    index
                )));
            }
            let record: ImportRecord = serde_json::from_value(item).map_err(|e| {
                WonderError::InvalidImport(format!("Entry {} is malformed: {}", index, e))
            })?;

            let id = match record.supplied_id() {
                Some(id) if !taken.contains(&id) => id,
                _ => self.fresh_id(&taken),
            };
            taken.insert(id.clone());

            let entry = record.into_entry(id).ok_or_else(|| {
                WonderError::InvalidImport(format!("Entry {} has a missing or invalid date", index))
            })?;
            imported.push(entry);
        }

        Ok(imported)
    }

    /// Entries carrying `tag` (case-insensitive, leading `#` optional)
    pub fn entries_by_tag(&self, tag: &str) -> Vec<&WonderEntry> {
        let tag = normalize_tag(tag);
        self.entries.iter().filter(|e| e.has_tag(&tag)).collect()
    }

    /// Entries captured in a local calendar month (`month0` is 0-11)
    pub fn entries_by_month(&self, month0: u32, year: i32) -> Vec<&WonderEntry> {
        self.entries
            .iter()
            .filter(|e| {
                let date = e.local_date();
                date.month0() == month0 && date.year() == year
            })
            .collect()
    }

    /// Delete every entry after confirmation. Returns whether it happened.
    pub fn clear_all_entries(&mut self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(CLEAR_QUESTION) {
            debug!("clear all entries declined");
            return false;
        }

        info!(count = self.entries.len(), "clearing all entries");
        self.entries.clear();
        self.persist_entries();
        self.emit(StoreEvent::Cleared);
        true
    }

    fn fresh_id(&self, taken: &HashSet<String>) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !taken.contains(&id) && self.entry_by_id(&id).is_none() {
                return id;
            }
        }
    }

    fn persist_entries(&mut self) {
        if let Err(e) = self.repository.save_entries(&self.entries) {
            warn!(error = %e, "failed to persist entries; changes kept in memory only");
        }
    }

    fn persist_daily_prompt(&mut self) {
        if let Err(e) = self.repository.save_daily_prompt(&self.daily_prompt) {
            warn!(error = %e, "failed to persist daily prompt");
        }
    }

    fn emit(&self, event: StoreEvent) {
        for subscriber in &self.subscribers {
            subscriber.notify(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PROMPTS;
    use crate::infrastructure::{FixedClock, KeyValueRepository, MemoryStorage};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestStore = EntryStore<KeyValueRepository<MemoryStorage>, FixedClock>;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2025, 4, 16, 12, 0, 0).unwrap())
    }

    fn store_with(storage: MemoryStorage) -> TestStore {
        EntryStore::open_with(
            KeyValueRepository::new(storage),
            clock(),
            StdRng::seed_from_u64(1),
        )
    }

    fn store() -> TestStore {
        store_with(MemoryStorage::new())
    }

    fn recorder(store: &mut TestStore) -> Rc<RefCell<Vec<StoreEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(Box::new(move |e: &StoreEvent| sink.borrow_mut().push(e.clone())));
        events
    }

    #[test]
    fn test_add_prepends_and_derives_tags() {
        let mut store = store();
        let first = store.add_entry("img1".into(), "one #Sky".into(), "p".into());
        let second = store.add_entry("img2".into(), "two".into(), "p".into());

        assert_eq!(store.entries()[0].id, second);
        assert_eq!(store.entries()[1].id, first);
        assert!(store.entry_by_id(&first).unwrap().has_tag("sky"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_add_uses_clock_time() {
        let mut store = store();
        let id = store.add_entry("img".into(), String::new(), "p".into());
        assert_eq!(store.entry_by_id(&id).unwrap().date, clock().now());
    }

    #[test]
    fn test_add_persists() {
        let mut store = store();
        store.add_entry("img".into(), "#a".into(), "p".into());
        assert_eq!(store.repository().load_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = store();
        store.add_entry("img".into(), String::new(), "p".into());
        assert!(!store.delete_entry("missing"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_reflection_replaces_tags() {
        let mut store = store();
        let id = store.add_entry("img".into(), "old #stuff".into(), "p".into());

        assert!(store.update_entry(&id, EntryUpdate::reflection("new #tag text")));

        let entry = store.entry_by_id(&id).unwrap();
        assert_eq!(entry.tags().iter().collect::<Vec<_>>(), vec!["tag"]);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = store();
        assert!(!store.update_entry("missing", EntryUpdate::prompt("x")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_events_emitted() {
        let mut store = store();
        let events = recorder(&mut store);

        let id = store.add_entry("img".into(), String::new(), "p".into());
        store.update_entry(&id, EntryUpdate::prompt("q"));
        store.delete_entry(&id);
        store.clear_all_entries(&true);

        assert_eq!(
            *events.borrow(),
            vec![
                StoreEvent::Added(id.clone()),
                StoreEvent::Updated(id.clone()),
                StoreEvent::Deleted(id),
                StoreEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_corrupt_state_starts_empty_with_warning() {
        let storage = MemoryStorage::new().with_value("wonderEntries", "not json");
        let mut store = store_with(storage);
        assert!(store.is_empty());
        assert!(store.load_warning().is_some());

        let events = recorder(&mut store);
        assert!(matches!(events.borrow()[0], StoreEvent::LoadWarning(_)));
    }

    #[test]
    fn test_failure_events() {
        assert!(StoreEvent::LoadWarning("x".into()).is_failure());
        assert!(StoreEvent::ImportFailed("x".into()).is_failure());
        assert!(!StoreEvent::Imported(2).is_failure());
        assert!(!StoreEvent::Cleared.is_failure());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = store();
        store.repository_mut().storage_mut().set_fail_writes(true);

        let id = store.add_entry("img".into(), "#kept".into(), "p".into());

        assert_eq!(store.len(), 1);
        assert!(store.entry_by_id(&id).is_some());
        assert!(store.repository().load_entries().unwrap().is_empty());
    }

    #[test]
    fn test_import_non_array_rejected() {
        let mut store = store();
        store.add_entry("img".into(), String::new(), "p".into());
        let events = recorder(&mut store);

        assert!(!store.import_entries_from_json("{}"));
        assert_eq!(store.len(), 1);
        assert_eq!(
            events.borrow()[0],
            StoreEvent::ImportFailed("Invalid format: Import data must be an array".to_string())
        );
    }

    #[test]
    fn test_import_invalid_json_rejected() {
        let mut store = store();
        let events = recorder(&mut store);

        assert!(!store.import_entries_from_json("[{"));
        assert!(store.is_empty());
        assert_eq!(
            events.borrow()[0].message(),
            "Failed to import entries. Invalid JSON format."
        );
    }

    #[test]
    fn test_import_bad_date_leaves_store_unchanged() {
        let mut store = store();
        let payload = r#"[{"reflection":"ok","date":"2025-04-01T00:00:00Z"},{"reflection":"bad"}]"#;
        assert!(matches!(
            store.import_entries(payload),
            Err(WonderError::InvalidImport(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_prepends_in_payload_order() {
        let mut store = store();
        let existing = store.add_entry("img".into(), String::new(), "p".into());
        let payload = r##"[
            {"id":"a","image":"i","reflection":"#one","prompt":"p","date":"2025-04-02T10:00:00Z"},
            {"id":"b","image":"i","reflection":"#two","prompt":"p","date":"2025-04-01T10:00:00Z"}
        ]"##;

        assert_eq!(store.import_entries(payload).unwrap(), 2);

        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", existing.as_str()]);
    }

    #[test]
    fn test_import_keeps_numeric_id() {
        let mut store = store();
        let payload = r##"[{"id":123,"reflection":"#a","date":"2025-04-01T00:00:00Z"}]"##;

        assert!(store.import_entries_from_json(payload));
        assert_eq!(store.len(), 1);
        assert!(store.entry_by_id("123").unwrap().has_tag("a"));
    }

    #[test]
    fn test_import_assigns_ids_when_missing_or_taken() {
        let mut store = store();
        let payload = r#"[
            {"reflection":"x","date":"2025-04-02T10:00:00Z"},
            {"id":"dup","reflection":"y","date":"2025-04-02T10:00:00Z"},
            {"id":"dup","reflection":"z","date":"2025-04-02T10:00:00Z"}
        ]"#;
        store.import_entries(payload).unwrap();

        let ids: HashSet<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("dup"));
        assert!(store.entries().iter().all(|e| !e.id.is_empty()));
    }

    #[test]
    fn test_import_twice_duplicates_content() {
        let mut store = store();
        store.add_entry("img".into(), "#a".into(), "p".into());
        let export = store.export_entries_to_json().unwrap();

        store.import_entries(&export).unwrap();
        store.import_entries(&export).unwrap();

        assert_eq!(store.len(), 3);
        let ids: HashSet<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_entries_by_tag_case_insensitive() {
        let mut store = store();
        store.add_entry("i".into(), "#Nature walk".into(), "p".into());
        store.add_entry("i".into(), "city".into(), "p".into());

        assert_eq!(store.entries_by_tag("NATURE").len(), 1);
        assert_eq!(store.entries_by_tag("#nature").len(), 1);
        assert!(store.entries_by_tag("city").is_empty());
    }

    #[test]
    fn test_clear_declined_keeps_entries() {
        let mut store = store();
        store.add_entry("i".into(), String::new(), "p".into());

        assert!(!store.clear_all_entries(&false));
        assert_eq!(store.len(), 1);
        assert_eq!(store.repository().load_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_confirmed_persists_empty() {
        let mut store = store();
        store.add_entry("i".into(), String::new(), "p".into());

        assert!(store.clear_all_entries(&true));
        assert!(store.is_empty());
        assert!(store.repository().load_entries().unwrap().is_empty());
    }

    #[test]
    fn test_confirm_receives_question() {
        struct Asked(RefCell<Option<String>>);
        impl Confirm for Asked {
            fn confirm(&self, question: &str) -> bool {
                *self.0.borrow_mut() = Some(question.to_string());
                false
            }
        }

        let mut store = store();
        let asked = Asked(RefCell::new(None));
        store.clear_all_entries(&asked);
        assert!(asked.0.borrow().as_deref().unwrap().contains("cannot be undone"));
    }

    #[test]
    fn test_daily_prompt_stable_within_day_and_rerolled_next_day() {
        let mut store = store();
        let first = store.daily_prompt().to_string();
        assert!(PROMPTS.contains(&first.as_str()));
        assert_eq!(store.daily_prompt(), first);

        let next_day = clock().now() + Duration::days(1);
        store.clock_mut().set(next_day);
        let rolled = store.daily_prompt().to_string();
        assert!(PROMPTS.contains(&rolled.as_str()));

        let saved = store.repository().load_daily_prompt().unwrap().unwrap();
        assert_eq!(saved.text, rolled);
        assert_eq!(saved.date, store.clock_mut().today());
    }

    #[test]
    fn test_random_prompt_does_not_change_daily_prompt() {
        let mut store = store();
        let daily = store.daily_prompt().to_string();
        for _ in 0..20 {
            store.random_prompt();
        }
        assert_eq!(store.daily_prompt(), daily);
    }
}
