//! ISO-8601 rendering for timestamps
//!
//! Output has the form `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`. Fractional
//! seconds are written with microsecond precision and only when non-zero;
//! sub-microsecond digits are truncated. Aware timestamps always carry a
//! numeric offset, so UTC renders as `+00:00` rather than `Z`. An offset
//! with a seconds component gets a trailing `:SS`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};

/// Render a timezone-aware timestamp
pub fn isoformat(dt: &DateTime<FixedOffset>) -> String {
    format!(
        "{}{}",
        naive_isoformat(&dt.naive_local()),
        utc_offset(dt.offset().local_minus_utc())
    )
}

/// `+HH:MM`, or `+HH:MM:SS` when the offset has a seconds component
fn utc_offset(total_secs: i32) -> String {
    let sign = if total_secs < 0 { '-' } else { '+' };
    let secs = total_secs.unsigned_abs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if seconds == 0 {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    }
}

/// Render a naive timestamp (no offset suffix)
pub fn naive_isoformat(dt: &NaiveDateTime) -> String {
    // nanosecond() exceeds 1e9 inside a leap second
    let micros = dt.nanosecond() % 1_000_000_000 / 1_000;
    let base = dt.format("%Y-%m-%dT%H:%M:%S");
    if micros == 0 {
        base.to_string()
    } else {
        format!("{}.{:06}", base, micros)
    }
}
