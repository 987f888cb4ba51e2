use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// The fixed weekly rest day for the whole shop.
pub const WEEKLY_REST_DAY: Weekday = Weekday::Sun;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Holiday,
    RestDay,
    Weekday,
}

/// Holiday overrides rest day overrides weekday. Dates outside the holiday
/// set simply classify by weekday; there is no error case.
pub fn classify(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> DayKind {
    if holidays.contains(&date) {
        DayKind::Holiday
    } else if date.weekday() == WEEKLY_REST_DAY {
        DayKind::RestDay
    } else {
        DayKind::Weekday
    }
}

/// First and last day of a calendar month, inclusive.
pub fn month_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}
