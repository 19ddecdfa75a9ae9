//! Calendar and weekly insights derived from entries

use crate::domain::WonderEntry;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// More than this many moments in a week counts as a streak
const STREAK_THRESHOLD: usize = 5;

/// First day of the week used by weekly insights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" => Ok(WeekStart::Sunday),
            "monday" => Ok(WeekStart::Monday),
            _ => Err(format!(
                "Invalid week start: '{}'. Valid values are: sunday, monday",
                s
            )),
        }
    }
}

impl WeekStart {
    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Days between the start of the week and `date`
    pub fn days_into_week(self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

/// Number of entries captured on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Summary of the current week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySummary {
    pub days: Vec<DayCount>,
    pub top_tags: Vec<(String, usize)>,
}

impl WeeklySummary {
    pub fn build(entries: &[WonderEntry], today: NaiveDate, start: WeekStart) -> Self {
        let days = weekly_counts(entries, today, start);
        let first = days[0].date;
        let last = days[days.len() - 1].date;
        let this_week: Vec<WonderEntry> = entries
            .iter()
            .filter(|e| {
                let d = e.local_date();
                d >= first && d <= last
            })
            .cloned()
            .collect();
        let mut top_tags = tag_counts(&this_week);
        top_tags.truncate(3);

        WeeklySummary { days, top_tags }
    }

    pub fn total(&self) -> usize {
        self.days.iter().map(|d| d.count).sum()
    }

    pub fn on_streak(&self) -> bool {
        self.total() > STREAK_THRESHOLD
    }
}

/// First day of the week containing `today`, `None` if it falls before the
/// earliest representable date
pub fn week_start(today: NaiveDate, start: WeekStart) -> Option<NaiveDate> {
    today.checked_sub_signed(Duration::days(start.days_into_week(today) as i64))
}

/// Per-day entry counts for the seven days of the current week
pub fn weekly_counts(entries: &[WonderEntry], today: NaiveDate, start: WeekStart) -> Vec<DayCount> {
    let first = week_start(today, start).unwrap_or(today);
    first
        .iter_days()
        .take(7)
        .map(|date| {
            let count = entries.iter().filter(|e| e.local_date() == date).count();
            DayCount { date, count }
        })
        .collect()
}

/// Distinct local dates that have at least one entry (calendar highlights)
pub fn dates_with_entries(entries: &[WonderEntry]) -> BTreeSet<NaiveDate> {
    entries.iter().map(|e| e.local_date()).collect()
}

/// Entries captured on a given local date, in storage order
pub fn entries_on(entries: &[WonderEntry], date: NaiveDate) -> Vec<&WonderEntry> {
    entries.iter().filter(|e| e.local_date() == date).collect()
}

/// Day-of-month to entry count for a month (`month0` is 0-11)
pub fn month_heatmap(entries: &[WonderEntry], month0: u32, year: i32) -> BTreeMap<u32, usize> {
    let mut heatmap = BTreeMap::new();
    for entry in entries {
        let date = entry.local_date();
        if date.month0() == month0 && date.year() == year {
            *heatmap.entry(date.day()).or_insert(0) += 1;
        }
    }
    heatmap
}

/// Tags ordered by descending frequency, then alphabetically
pub fn tag_counts(entries: &[WonderEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in entries.iter().flat_map(|e| e.tags().iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, n)| (tag.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
