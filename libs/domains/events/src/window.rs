//! Day-window arithmetic and the interval overlap predicate.
//!
//! Day and range lookups share one rule: an event belongs to a window when
//! it starts in it, ends in it, or covers it entirely. The predicate lives
//! here as a plain function so it can be tested without a store, and the
//! MongoDB filter in [`crate::mongodb`] mirrors it clause for clause.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

/// Start and end instants of `date` as a local calendar day.
///
/// The end lands on 23:59:59.999 of the same day, so both bounds are
/// inclusive when fed to [`overlaps`].
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + TimeDelta::milliseconds(86_399_999); // 23:59:59.999
    (to_utc(start), to_utc(end))
}

/// True when an event interval touches the window `[window_start, window_end]`.
///
/// Matches when any of the following holds:
/// - the event starts inside the window,
/// - the event ends inside the window,
/// - the event starts on or before the window and ends on or after it.
///
/// Open-ended events (no `end_at`) only match through their start; they
/// never satisfy the second or third clause.
pub fn overlaps(
    start_at: DateTime<Utc>,
    end_at: Option<DateTime<Utc>>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> bool {
    let starts_inside = window_start <= start_at && start_at <= window_end;
    let ends_inside = end_at.is_some_and(|end| window_start <= end && end <= window_end);
    let covers_window = end_at.is_some_and(|end| start_at <= window_start && end >= window_end);
    starts_inside || ends_inside || covers_window
}

/// Parse a `YYYY-MM-DD` value such as the day-lookup path segment.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse a range start bound, either `YYYY-MM-DD` or RFC 3339.
///
/// Plain dates expand to the start of that local day so a date-only range
/// covers every day it names in full.
pub fn parse_range_start(value: &str) -> Option<DateTime<Utc>> {
    parse_bound(value).map(|bound| match bound {
        Bound::Instant(instant) => instant,
        Bound::Day(date) => day_window(date).0,
    })
}

/// Parse a range end bound, either `YYYY-MM-DD` or RFC 3339.
///
/// Plain dates expand to the end of that local day (23:59:59.999).
pub fn parse_range_end(value: &str) -> Option<DateTime<Utc>> {
    parse_bound(value).map(|bound| match bound {
        Bound::Instant(instant) => instant,
        Bound::Day(date) => day_window(date).1,
    })
}

enum Bound {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

fn parse_bound(value: &str) -> Option<Bound> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(Bound::Instant(instant.with_timezone(&Utc)));
    }
    parse_day(value).map(Bound::Day)
}

/// Interpret a wall-clock time in the server's local timezone.
///
/// Ambiguous times (DST fold) resolve to the earlier instant; nonexistent
/// times (DST gap) fall back to the UTC reading.
fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
