// --- File: crates/playon_availability/src/calendar.rs ---
//! Month helpers for the date picker.

use chrono::{Datelike, NaiveDate};

/// Every date of `month` (1-12) in `year`. Empty for an invalid month.
pub fn days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .collect()
}

/// Blank cells before day 1 in a grid whose weeks start on Sunday.
pub fn leading_blanks(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Day granularity: any time today is not in the past.
pub fn is_past_date(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
