// File: tests/logic_recurrence.rs
use chrono::{DateTime, Duration, Timelike, Utc};
use dashtrack::model::{Item, Priority, RecurrenceEngine, RecurrenceRule};
use std::collections::HashSet;

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn recurring_item(due: &str, rule: RecurrenceRule) -> Item {
    let mut item = Item::new("Test Recurring Task");
    item.due_date = Some(utc(due));
    item.is_recurring = true;
    item.recurrence_rule = Some(rule);
    item.priority = Priority::Medium;
    item.tags = vec!["work".to_string()];
    item.has_reminder = true;
    item.reminder_date = Some(utc("2026-01-20T09:00:00Z"));
    item
}

#[test]
fn test_not_recurring_yields_nothing() {
    let mut item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    item.is_recurring = false;
    assert!(RecurrenceEngine::expand(&item).is_empty());
}

#[test]
fn test_missing_rule_yields_nothing() {
    let mut item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    item.recurrence_rule = None;
    assert!(RecurrenceEngine::expand(&item).is_empty());
}

#[test]
fn test_missing_due_date_yields_nothing() {
    let mut item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    item.due_date = None;
    assert!(RecurrenceEngine::expand(&item).is_empty());
}

#[test]
fn test_creates_exactly_ten_occurrences() {
    let item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    assert_eq!(RecurrenceEngine::expand(&item).len(), 10);
}

#[test]
fn test_daily_sequence() {
    let item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[0].due_date, Some(utc("2026-01-21T10:00:00Z")));
    assert_eq!(result[9].due_date, Some(utc("2026-01-30T10:00:00Z")));

    // Strictly ascending.
    for pair in result.windows(2) {
        assert!(pair[0].due_date < pair[1].due_date);
    }
}

#[test]
fn test_weekly_preserves_weekday_and_time() {
    let item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Weekly);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[0].due_date, Some(utc("2026-01-27T10:00:00Z")));
    assert_eq!(result[9].due_date, Some(utc("2026-03-31T10:00:00Z")));
}

#[test]
fn test_monthly_day_overflow_spills_into_next_month() {
    // Jan 31 + 1 month lands on "Feb 31", which spills to Mar 3 in a
    // non-leap year (JS setMonth convention, not chrono's clamping).
    let item = recurring_item("2026-01-31T10:00:00Z", RecurrenceRule::Monthly);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[0].due_date, Some(utc("2026-03-03T10:00:00Z")));
    // The spilled date is a regular anchor for the following step.
    assert_eq!(result[1].due_date, Some(utc("2026-04-03T10:00:00Z")));
}

#[test]
fn test_monthly_reaches_leap_day() {
    // 2028 is a leap year, so Jan 29 + 1 month is exactly Feb 29.
    let item = recurring_item("2028-01-29T10:00:00Z", RecurrenceRule::Monthly);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[0].due_date, Some(utc("2028-02-29T10:00:00Z")));
    assert_eq!(result[1].due_date, Some(utc("2028-03-29T10:00:00Z")));
}

#[test]
fn test_monthly_feb_overflow_in_leap_year() {
    // Jan 30 in a leap year: "Feb 30" spills past Feb 29 to Mar 1.
    let item = recurring_item("2028-01-30T10:00:00Z", RecurrenceRule::Monthly);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[0].due_date, Some(utc("2028-03-01T10:00:00Z")));
}

#[test]
fn test_monthly_carries_year_past_december() {
    let item = recurring_item("2026-11-15T10:00:00Z", RecurrenceRule::Monthly);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[0].due_date, Some(utc("2026-12-15T10:00:00Z")));
    assert_eq!(result[1].due_date, Some(utc("2027-01-15T10:00:00Z")));
}

#[test]
fn test_daily_preserves_wall_clock_across_month_boundary() {
    let item = recurring_item("2026-01-30T23:45:00Z", RecurrenceRule::Daily);
    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result[1].due_date, Some(utc("2026-02-01T23:45:00Z")));
    for occurrence in &result {
        let due = occurrence.due_date.unwrap();
        assert_eq!((due.hour(), due.minute()), (23, 45));
    }
}

#[test]
fn test_occurrences_get_unique_fresh_ids() {
    let item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    let result = RecurrenceEngine::expand(&item);

    let ids: HashSet<&str> = result.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), 10);
    assert!(!ids.contains(item.id.as_str()));
}

#[test]
fn test_occurrences_copy_fields_but_reset_state() {
    let mut item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    item.title = "Daily Standup".to_string();
    item.priority = Priority::High;
    item.tags = vec!["work".to_string(), "meeting".to_string()];
    item.is_completed = true;

    let result = RecurrenceEngine::expand(&item);

    for occurrence in &result {
        assert_eq!(occurrence.title, "Daily Standup");
        assert_eq!(occurrence.priority, Priority::High);
        assert_eq!(occurrence.tags, item.tags);
        assert!(occurrence.is_recurring);
        assert_eq!(occurrence.recurrence_rule, Some(RecurrenceRule::Daily));

        assert!(!occurrence.is_completed);
        assert!(!occurrence.has_reminder);
        assert_eq!(occurrence.reminder_date, None);
        assert_eq!(occurrence.updated_date, None);
    }
}

#[test]
fn test_batch_shares_one_created_date() {
    let item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    let result = RecurrenceEngine::expand(&item);

    let first_created = result[0].created_date;
    assert!(result.iter().all(|i| i.created_date == first_created));
}

#[test]
fn test_anchor_is_not_mutated() {
    let item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    let before = item.clone();
    let _ = RecurrenceEngine::expand(&item);
    assert_eq!(item, before);
}

#[test]
fn test_expansion_stops_at_the_edge_of_the_date_range() {
    // A due date three days before the last representable instant leaves
    // room for only three daily steps; the series ends there instead of
    // panicking.
    let mut item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Daily);
    item.due_date = Some(DateTime::<Utc>::MAX_UTC - Duration::days(3));

    let result = RecurrenceEngine::expand(&item);

    assert_eq!(result.len(), 3);
    assert_eq!(result[2].due_date, Some(DateTime::<Utc>::MAX_UTC));
}

#[test]
fn test_monthly_expansion_stops_at_the_edge_of_the_date_range() {
    let mut item = recurring_item("2026-01-20T10:00:00Z", RecurrenceRule::Monthly);
    item.due_date = Some(DateTime::<Utc>::MAX_UTC - Duration::days(40));

    let result = RecurrenceEngine::expand(&item);

    assert!(result.len() < 10);
}
