//! Output formatting utilities

use crate::application::DayView;
use crate::domain::insights::{week_start, WeekStart, WeeklySummary};
use crate::domain::WonderEntry;
use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeMap;

const SUMMARY_WIDTH: usize = 48;

fn summary(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > SUMMARY_WIDTH {
        let cut: String = first_line.chars().take(SUMMARY_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

fn local_timestamp(entry: &WonderEntry) -> String {
    entry
        .date
        .with_timezone(&Local)
        .format("%d-%m-%Y %H:%M")
        .to_string()
}

/// Format a list of entries for display
pub fn format_entry_list(entries: &[&WonderEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {}  {}\n",
            local_timestamp(entry),
            entry.id,
            summary(entry.reflection())
        ));
    }
    output
}

/// Format one entry in full
pub fn format_entry_detail(entry: &WonderEntry) -> String {
    let tags = if entry.tags().is_empty() {
        "-".to_string()
    } else {
        entry
            .tags()
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mime = entry
        .image
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .filter(|m| !m.is_empty())
        .unwrap_or("unknown");

    format!(
        "id:         {}\n\
        captured:   {}\n\
        prompt:     {}\n\
        tags:       {}\n\
        image:      {} ({} bytes encoded)\n\n\
        {}\n",
        entry.id,
        local_timestamp(entry),
        entry.prompt,
        tags,
        mime,
        entry.image.len(),
        entry.reflection()
    )
}

/// Format tag usage counts for display
pub fn format_tag_counts(tags: &[(String, usize)]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for (tag, count) in tags {
        output.push_str(&format!("#{}  {}\n", tag, count));
    }
    output
}

/// Format the weekly insights summary
pub fn format_weekly_summary(summary: &WeeklySummary) -> String {
    let mut output = String::from("Your Weekly Wonder Insights\n\n");
    for day in &summary.days {
        output.push_str(&format!(
            "{}  {:>2}  {}\n",
            day.date.format("%a"),
            day.count,
            "#".repeat(day.count)
        ));
    }

    if !summary.top_tags.is_empty() {
        let themes: Vec<String> = summary.top_tags.iter().map(|(t, _)| format!("#{}", t)).collect();
        output.push_str(&format!("\nCommon themes: {}\n", themes.join(" ")));
    }

    output.push_str(&format!(
        "\nYou've captured {} moments of wonder this week.",
        summary.total()
    ));
    if summary.on_streak() {
        output.push_str(" You're on a wonderful streak!\n");
    } else {
        output.push_str(" Keep capturing to build your wonder practice.\n");
    }
    output
}

/// Format one day's entries; an empty day points at the nearest days with entries
pub fn format_day_view(view: &DayView) -> String {
    let mut output = format_entry_list(&view.entries);
    if view.entries.is_empty() {
        output.push_str(&format!(" on {}\n", view.date.format("%Y-%m-%d")));
        if let Some(previous) = view.previous {
            output.push_str(&format!("Previous: {}\n", previous.format("%Y-%m-%d")));
        }
        if let Some(next) = view.next {
            output.push_str(&format!("Next:     {}\n", next.format("%Y-%m-%d")));
        }
    }
    output
}

/// Format a month grid; days with entries are marked with `*`
pub fn format_month_calendar(
    month0: u32,
    year: i32,
    heatmap: &BTreeMap<u32, usize>,
    start: WeekStart,
) -> String {
    let Some(first) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
        return "Invalid month".to_string();
    };

    // The grid's first row starts before the 1st
    if week_start(first, start).is_none() {
        return "Invalid month".to_string();
    }

    let mut output = format!("{}\n", first.format("%B %Y"));
    let mut weekday = start.first_weekday();
    for _ in 0..7 {
        output.push_str(&format!(" {} ", &weekday.to_string()[..2]));
        weekday = weekday.succ();
    }
    output.push('\n');

    let leading = start.days_into_week(first) as usize;
    output.push_str(&"    ".repeat(leading));

    for day in first.iter_days().take_while(|d| d.month0() == month0) {
        let marker = if heatmap.contains_key(&day.day()) { '*' } else { ' ' };
        output.push_str(&format!(" {:>2}{}", day.day(), marker));
        if start.days_into_week(day) == 6 {
            output.push('\n');
        }
    }
    if !output.ends_with('\n') {
        output.push('\n');
    }

    let total: usize = heatmap.values().sum();
    output.push_str(&format!(
        "\n{} entries on {} days\n",
        total,
        heatmap.len()
    ));
    output
}
