use chrono::{DateTime, Local, TimeZone, Timelike};

const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Formats epoch seconds as an ISO-8601 timestamp in the local time zone
///
/// Returns `None` when the value cannot be represented as a date.
pub fn iso_local(epoch_secs: f64) -> Option<String> {
    iso_in(epoch_secs, &Local)
}

/// Formats epoch seconds as a naive ISO-8601 timestamp in `tz`
///
/// The value is rounded to microseconds. The fraction is printed with six digits, and only
/// when it is non-zero: `2023-11-14T22:13:20` or `2023-11-14T22:13:20.500000`. No offset is
/// appended.
pub fn iso_in<Tz: TimeZone>(epoch_secs: f64, tz: &Tz) -> Option<String> {
    if !epoch_secs.is_finite() {
        return None;
    }
    // Saturating cast; out-of-range values are rejected by chrono below
    let micros = (epoch_secs * 1_000_000.0).round_ties_even() as i64;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    let utc = DateTime::from_timestamp(secs, nanos)?;
    let local = utc.with_timezone(tz).naive_local();

    let format = if local.nanosecond() == 0 { SECONDS_FORMAT } else { MICROS_FORMAT };
    Some(local.format(format).to_string())
}
