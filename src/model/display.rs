// File: src/model/display.rs
//
// Date formatting helpers shared by presentation layers.
use chrono::{DateTime, Datelike, Local, Utc};

/// Full form with year and time, e.g. "Jan 25, 2026 10:00".
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string()
}

/// Short form without time, e.g. "Jan 25, 2026".
pub fn format_date_short(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

/// Like [`format_date`] but the year is omitted when it matches the
/// reference timestamp's year.
pub fn format_relative_date(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    if local.year() == now.with_timezone(&Local).year() {
        local.format("%b %-d %H:%M").to_string()
    } else {
        local.format("%b %-d, %Y %H:%M").to_string()
    }
}

/// The first 8 bytes of an item id for compact display. Ids shorter than
/// that (hand-edited store files) are shown in full rather than sliced.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_short_id_truncates_uuids() {
        assert_eq!(short_id("0d9f3b1c-aaaa-bbbb-cccc-ddddeeeeffff"), "0d9f3b1c");
    }

    #[test]
    fn test_short_id_keeps_short_ids_whole() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }
}
