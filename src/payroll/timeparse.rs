use chrono::{NaiveTime, Timelike};

/// Fractional hours since midnight for a raw "HH:MM" clock string.
///
/// The shop-floor terminals and the old mobile client both wrote free text
/// into these columns, so anything malformed is treated the same as absent.
pub fn parse_clock(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    let t = NaiveTime::parse_from_str(s, "%H:%M").ok()?;
    Some(f64::from(t.hour()) + f64::from(t.minute()) / 60.0)
}

/// Hours between two clock strings, when both parse and the window is
/// positive.
pub fn window_hours(check_in: Option<&str>, check_out: Option<&str>) -> Option<f64> {
    let start = parse_clock(check_in)?;
    let end = parse_clock(check_out)?;
    (end > start).then_some(end - start)
}
