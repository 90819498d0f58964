//! Day-range and display-time helpers

use chrono::{DateTime, NaiveTime, Utc};

/// Start of the day containing `now` (00:00:00 UTC)
///
/// Used as the feed subscription's range filter so the screen only shows
/// today's check-ins.
pub fn today_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The date of `now` as a `YYYY-MM-DD` string
pub fn date_string(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Wall-clock text for the screen header, `HH:MM:SS`
pub fn clock_text(now: DateTime<Utc>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Human-readable stay duration since `joined_at`
///
/// Under a minute reads "just now"; after that, minutes, then hours and
/// minutes. A `joined_at` in the future (clock skew between the server stamp
/// and this display) clamps to "just now".
pub fn format_stay(joined_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - joined_at).num_minutes().max(0);
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("staying {} min", minutes)
    } else {
        format!("staying {} h {} min", minutes / 60, minutes % 60)
    }
}
