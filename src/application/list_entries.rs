//! List entries use case: filtered lists, month grids and single days

use crate::application::EntryStore;
use crate::domain::insights::{dates_with_entries, entries_on, month_heatmap};
use crate::domain::WonderEntry;
use crate::error::{Result, WonderError};
use crate::infrastructure::{Clock, EntryRepository};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;

/// Filters for `list_entries`; unset fields do not filter
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub tag: Option<String>,
    /// Calendar month, 1-12
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub limit: Option<usize>,
}

/// Entries matching every filter, newest first.
///
/// A month without a year means that month of the current year.
pub fn list_entries<'a, R: EntryRepository, C: Clock>(
    store: &'a EntryStore<R, C>,
    filter: &ListFilter,
) -> Vec<&'a WonderEntry> {
    let this_year = store.clock().today().year();

    let mut entries: Vec<&WonderEntry> = match (filter.month, filter.year) {
        (Some(m), y) => store.entries_by_month(m.saturating_sub(1), y.unwrap_or(this_year)),
        (None, Some(y)) => store
            .entries()
            .iter()
            .filter(|e| e.local_date().year() == y)
            .collect(),
        (None, None) => store.entries().iter().collect(),
    };

    if let Some(tag) = &filter.tag {
        let tagged: HashSet<&str> = store
            .entries_by_tag(tag)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        entries.retain(|e| tagged.contains(e.id.as_str()));
    }
    if let Some(n) = filter.limit {
        entries.truncate(n);
    }
    entries
}

/// One month of the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    /// 0-11
    pub month0: u32,
    pub year: i32,
    /// Day of month to entry count
    pub heatmap: BTreeMap<u32, usize>,
}

/// Month grid data; month (1-12) and year default to the current ones
pub fn month_view<R: EntryRepository, C: Clock>(
    store: &EntryStore<R, C>,
    month: Option<u32>,
    year: Option<i32>,
) -> MonthView {
    let today = store.clock().today();
    let month0 = month.map(|m| m.saturating_sub(1)).unwrap_or(today.month0());
    let year = year.unwrap_or(today.year());
    MonthView {
        month0,
        year,
        heatmap: month_heatmap(store.entries(), month0, year),
    }
}

/// Entries of one day, plus the nearest days around it that have entries
#[derive(Debug, Clone, PartialEq)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a WonderEntry>,
    pub previous: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
}

/// Parse a `YYYY-MM-DD` date and collect that day's entries
pub fn day_view<'a, R: EntryRepository, C: Clock>(
    store: &'a EntryStore<R, C>,
    date: &str,
) -> Result<DayView<'a>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        WonderError::Config(format!("Invalid date: '{}'. Use YYYY-MM-DD", date))
    })?;

    let highlighted = dates_with_entries(store.entries());
    Ok(DayView {
        date,
        entries: entries_on(store.entries(), date),
        previous: highlighted.range(..date).next_back().copied(),
        next: highlighted
            .range((Bound::Excluded(date), Bound::Unbounded))
            .next()
            .copied(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{FixedClock, KeyValueRepository, MemoryStorage};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestStore = EntryStore<KeyValueRepository<MemoryStorage>, FixedClock>;

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn store_at(now: DateTime<Utc>) -> TestStore {
        EntryStore::open_with(
            KeyValueRepository::new(MemoryStorage::new()),
            FixedClock::new(now),
            StdRng::seed_from_u64(1),
        )
    }

    /// Entries on 2025-03-20, 2025-04-02 (x2), 2025-04-10 and 2024-04-05
    fn populated() -> TestStore {
        let mut store = store_at(local(2024, 4, 5, 12));
        store.add_entry("i".into(), "old #tree".into(), "p".into());
        for (m, d, text) in [
            (3, 20, "march #tree"),
            (4, 2, "morning #sky"),
            (4, 2, "evening #tree"),
            (4, 10, "rain #tree"),
        ] {
            store.clock_mut().set(local(2025, m, d, 12));
            store.add_entry("i".into(), text.into(), "p".into());
        }
        store.clock_mut().set(local(2025, 4, 16, 12));
        store
    }

    fn reflections(entries: &[&WonderEntry]) -> Vec<String> {
        entries.iter().map(|e| e.reflection().to_string()).collect()
    }

    #[test]
    fn test_list_without_filters_is_newest_first() {
        let store = populated();
        let listed = list_entries(&store, &ListFilter::default());
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].reflection(), "rain #tree");
    }

    #[test]
    fn test_list_month_defaults_to_current_year() {
        let store = populated();
        let filter = ListFilter {
            month: Some(4),
            ..Default::default()
        };
        assert_eq!(
            reflections(&list_entries(&store, &filter)),
            vec!["rain #tree", "evening #tree", "morning #sky"]
        );
    }

    #[test]
    fn test_list_year_only() {
        let store = populated();
        let filter = ListFilter {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(reflections(&list_entries(&store, &filter)), vec!["old #tree"]);
    }

    #[test]
    fn test_list_tag_month_and_limit_combine() {
        let store = populated();
        let filter = ListFilter {
            tag: Some("#Tree".to_string()),
            month: Some(4),
            year: Some(2025),
            limit: Some(1),
        };
        assert_eq!(reflections(&list_entries(&store, &filter)), vec!["rain #tree"]);
    }

    #[test]
    fn test_month_view_defaults_to_today() {
        let store = populated();
        let view = month_view(&store, None, None);
        assert_eq!((view.month0, view.year), (3, 2025));
        assert_eq!(view.heatmap, BTreeMap::from([(2, 2), (10, 1)]));
    }

    #[test]
    fn test_day_view_lists_day_and_neighbors() {
        let store = populated();
        let view = day_view(&store, "2025-04-02").unwrap();
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.previous, NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(view.next, NaiveDate::from_ymd_opt(2025, 4, 10));

        let empty = day_view(&store, "2025-04-05").unwrap();
        assert!(empty.entries.is_empty());
        assert_eq!(empty.previous, NaiveDate::from_ymd_opt(2025, 4, 2));
        assert_eq!(empty.next, NaiveDate::from_ymd_opt(2025, 4, 10));

        let last = day_view(&store, "2025-04-10").unwrap();
        assert_eq!(last.next, None);
    }

    #[test]
    fn test_day_view_rejects_bad_date() {
        let store = populated();
        assert!(matches!(
            day_view(&store, "04/02/2025"),
            Err(WonderError::Config(_))
        ));
    }
}
