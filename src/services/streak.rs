//! Habit streak and completion-grid derivation.
//!
//! Completed dates are compared as strings in the client's date
//! representation. Parsing is used only to order entries.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Calendar-date format the client stores in `completedDates`.
pub const DATE_KEY_FORMAT: &str = "%a %b %d %Y";

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

pub fn is_completed_on(completed_dates: &[String], date: NaiveDate) -> bool {
    let key = date_key(date);
    completed_dates.iter().any(|d| *d == key)
}

pub fn is_completed_today(completed_dates: &[String], today: NaiveDate) -> bool {
    is_completed_on(completed_dates, today)
}

/// Consecutive days ending at `today` that are marked complete.
///
/// Entries are walked newest first and each must equal `today - streak`.
/// The walk always starts at `today`, so a habit not yet done today has a
/// streak of 0 even if yesterday and earlier are complete. The walk also ends
/// at the earliest representable date.
pub fn current_streak(completed_dates: &[String], today: NaiveDate) -> u32 {
    let mut sorted: Vec<(Option<NaiveDate>, &str)> = completed_dates
        .iter()
        .map(|d| (parse_date_key(d), d.as_str()))
        .collect();
    // Unparseable entries (None) sort last.
    sorted.sort_by(|a, b| b.0.cmp(&a.0));

    let mut streak = 0u32;
    for (_, key) in sorted {
        let Some(expected) = today.checked_sub_signed(Duration::days(i64::from(streak))) else {
            break;
        };
        if key == date_key(expected) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    pub completed: bool,
    pub is_today: bool,
}

/// The `days` calendar days ending at `today`, oldest first.
///
/// `None` when the window would start before the earliest representable date.
pub fn last_n_days(
    completed_dates: &[String],
    today: NaiveDate,
    days: u32,
) -> Option<Vec<DayCell>> {
    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = today.checked_sub_signed(Duration::days(offset))?;
            Some(DayCell {
                date,
                key: date_key(date),
                completed: is_completed_on(completed_dates, date),
                is_today: offset == 0,
            })
        })
        .collect()
}
