use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Long-form creation date, e.g. `May 1, 2024, 10:00 AM`.
pub fn format_long<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%B %-d, %Y, %I:%M %p").to_string()
}

/// Long-form date in the local time zone.
pub fn format_local(dt: &DateTime<Utc>) -> String {
    format_long(&dt.with_timezone(&Local))
}

/// Short date for list rows, e.g. `2024-05-01`.
pub fn format_short(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
