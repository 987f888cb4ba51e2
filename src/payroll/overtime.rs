use crate::model::attendance::{AttendanceRecord, OvertimeBucket, OvertimeValue};

use super::calendar::DayKind;
use super::timeparse;

/// Regular weekday shift ends at 17:30.
pub const WEEKDAY_SHIFT_END: f64 = 17.5;
/// Assumed overtime end when no end-time column parses: 20:30.
pub const DEFAULT_OVERTIME_END: f64 = 20.5;
/// Credit when the computed weekday overtime comes out non-positive.
pub const WEEKDAY_FALLBACK_HOURS: f64 = 3.0;
/// Credit for a holiday or rest-day record without parsable clock times.
pub const FULL_DAY_HOURS: f64 = 8.0;

/// End-of-overtime columns in the order the screens populated them over the
/// years, with the plain clock-out as a last resort; the first one that
/// parses wins, 20:30 if none do.
fn overtime_end_hours(record: &AttendanceRecord) -> f64 {
    [
        record.overtime_end.as_deref(),
        record.overtime_out.as_deref(),
        record.check_out.as_deref(),
    ]
    .into_iter()
    .find_map(timeparse::parse_clock)
    .unwrap_or(DEFAULT_OVERTIME_END)
}

/// Overtime bucket and hours for one already-classified attendance record,
/// or `None` when the day yields no overtime.
///
/// On a holiday or rest day every worked hour is overtime; records without a
/// usable clock window get a full 8-hour credit. On a weekday the marker
/// decides: an explicit positive number is taken verbatim, a set flag means
/// "worked past 17:30 until the recorded end" with a 3-hour floor for
/// incomplete data, and anything else is no overtime.
pub fn resolve(record: &AttendanceRecord, kind: DayKind) -> Option<(OvertimeBucket, f64)> {
    match kind {
        DayKind::Holiday | DayKind::RestDay => {
            let hours =
                timeparse::window_hours(record.check_in.as_deref(), record.check_out.as_deref())
                    .unwrap_or(FULL_DAY_HOURS);
            let bucket = if kind == DayKind::Holiday {
                OvertimeBucket::Holiday
            } else {
                OvertimeBucket::RestDay
            };
            Some((bucket, hours))
        }
        DayKind::Weekday => match record.overtime {
            None | Some(OvertimeValue::Flag(false)) => None,
            Some(OvertimeValue::Hours(h)) if h > 0.0 => Some((OvertimeBucket::Normal, h)),
            Some(_) => {
                let worked = overtime_end_hours(record) - WEEKDAY_SHIFT_END;
                let hours = if worked > 0.0 {
                    worked
                } else {
                    WEEKDAY_FALLBACK_HOURS
                };
                Some((OvertimeBucket::Normal, hours))
            }
        },
    }
}
