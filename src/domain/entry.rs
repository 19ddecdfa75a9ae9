//! Wonder entry model

use crate::domain::tags::extract_tags;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One captured moment: a photo, the prompt it answered and a reflection.
///
/// `tags` is always the hashtag set of the current `reflection`; the only way
/// to change the reflection is [`WonderEntry::set_reflection`], which re-derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WonderEntry {
    pub id: String,
    pub image: String,
    reflection: String,
    pub prompt: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    tags: BTreeSet<String>,
}

impl WonderEntry {
    pub fn new(
        id: String,
        image: String,
        reflection: String,
        prompt: String,
        date: DateTime<Utc>,
    ) -> Self {
        let tags = extract_tags(&reflection);
        WonderEntry {
            id,
            image,
            reflection,
            prompt,
            date,
            tags,
        }
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Replace the reflection and re-derive the tag set from it
    pub fn set_reflection(&mut self, reflection: String) {
        self.tags = extract_tags(&reflection);
        self.reflection = reflection;
    }

    /// Recompute tags from the reflection (used after deserializing stored state)
    pub fn refresh_tags(&mut self) {
        self.tags = extract_tags(&self.reflection);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Capture date in the local calendar
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    /// Apply a partial update. Returns true if anything changed.
    pub fn apply(&mut self, update: EntryUpdate) -> bool {
        let mut changed = false;
        if let Some(reflection) = update.reflection {
            changed |= reflection != self.reflection;
            self.set_reflection(reflection);
        }
        if let Some(prompt) = update.prompt {
            changed |= prompt != self.prompt;
            self.prompt = prompt;
        }
        changed
    }
}

/// Fields of an entry that may be edited after capture.
///
/// `id`, `date` and `image` are fixed at creation; `tags` follow `reflection`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub reflection: Option<String>,
    pub prompt: Option<String>,
}

impl EntryUpdate {
    pub fn reflection(text: impl Into<String>) -> Self {
        EntryUpdate {
            reflection: Some(text.into()),
            prompt: None,
        }
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        EntryUpdate {
            reflection: None,
            prompt: Some(text.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reflection.is_none() && self.prompt.is_none()
    }
}

/// Lenient shape of one element of an import payload.
///
/// Every field is optional; a supplied `tags` field is ignored because tags
/// are always derived from the reflection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub date: serde_json::Value,
}

impl ImportRecord {
    /// The supplied id: a non-empty string or a non-zero number.
    /// Anything else counts as missing.
    pub fn supplied_id(&self) -> Option<String> {
        match &self.id {
            serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
            serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Build an entry with the given id, coercing the date field.
    /// Returns `None` if the date is missing or unreadable.
    pub fn into_entry(self, id: String) -> Option<WonderEntry> {
        let date = coerce_date(&self.date)?;
        Some(WonderEntry::new(
            id,
            self.image.unwrap_or_default(),
            self.reflection.unwrap_or_default(),
            self.prompt.unwrap_or_default(),
            date,
        ))
    }
}

/// Coerce a JSON value into a timestamp.
///
/// Accepts RFC 3339 strings, naive date-times and bare dates (local time),
/// and numbers as epoch milliseconds.
pub fn coerce_date(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(text) => parse_date_string(text.trim()),
        serde_json::Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

fn parse_date_string(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    resolve_local(&Local, naive)
}

/// Place a wall-clock time in `tz`. Times skipped by a forward clock change
/// resolve to the same wall time an hour later.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}
