//! Relative date labels and human-readable durations

use chrono::{Datelike, Duration, NaiveDateTime};

/// Short label for `date` relative to `now`.
///
/// Today (or later) shows only the time, the previous six days add the
/// weekday, the current year adds month/day, anything older the full date.
pub fn relative(date: NaiveDateTime, now: NaiveDateTime) -> String {
    let today = now.date();
    let fmt = if date.date() >= today {
        "%-I:%M%P"
    } else if date.date() >= today - Duration::days(6) {
        "%a %-I:%M%P"
    } else if date.year() == today.year() {
        "%m/%d %-I:%M%P"
    } else {
        "%m/%d/%Y %-I:%M%P"
    };
    date.format(fmt).to_string()
}

fn unit(count: i64, name: &str) -> String {
    if count == 1 {
        format!("{} {}", count, name)
    } else {
        format!("{} {}s", count, name)
    }
}

/// Render a number of seconds as `1 day, 2 hours, 5 minutes`, omitting
/// zero units. Zero or negative durations render as an empty string.
pub fn humanize(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let parts = [
        (seconds / 86_400, "day"),
        (seconds / 3_600 % 24, "hour"),
        (seconds / 60 % 60, "minute"),
        (seconds % 60, "second"),
    ];

    parts
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, name)| unit(*count, name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Clock-style duration, `HH:MM:SS`, hours unbounded
pub fn clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3_600,
        seconds / 60 % 60,
        seconds % 60
    )
}
