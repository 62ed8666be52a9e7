// File: src/model/recurrence.rs
use crate::model::item::{Item, RecurrenceRule};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use uuid::Uuid;

/// Number of future occurrences generated per recurring anchor item.
pub const OCCURRENCES_TO_CREATE: usize = 10;

pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Expands a recurring anchor item into its future occurrences.
    ///
    /// Returns [`OCCURRENCES_TO_CREATE`] new items in ascending due-date
    /// order, or an empty vec when the anchor is not recurring, has no
    /// rule, or has no due date. Each occurrence is an independent copy
    /// of the anchor with a fresh id, a reset completion state, and no
    /// reminder; the anchor itself is never mutated. The series stops
    /// short only when a step would leave the representable date range.
    pub fn expand(anchor: &Item) -> Vec<Item> {
        if !anchor.is_recurring {
            return Vec::new();
        }
        let Some(rule) = anchor.recurrence_rule else {
            return Vec::new();
        };
        let Some(due) = anchor.due_date else {
            return Vec::new();
        };

        // One timestamp for the whole batch: the expansion is a single
        // atomic operation.
        let created = Utc::now();

        let mut current = due;
        let mut occurrences = Vec::with_capacity(OCCURRENCES_TO_CREATE);
        for _ in 0..OCCURRENCES_TO_CREATE {
            let Some(next) = Self::next_date(current, rule) else {
                break;
            };
            current = next;

            let mut occurrence = anchor.clone();
            occurrence.id = Uuid::new_v4().to_string();
            occurrence.created_date = created;
            occurrence.updated_date = None;
            occurrence.due_date = Some(current);
            occurrence.is_completed = false;
            occurrence.has_reminder = false;
            occurrence.reminder_date = None;
            occurrences.push(occurrence);
        }
        occurrences
    }

    /// Advances a due date by one step of the rule, preserving the
    /// wall-clock time of day. `None` when the step would leave the
    /// representable date range.
    fn next_date(date: DateTime<Utc>, rule: RecurrenceRule) -> Option<DateTime<Utc>> {
        match rule {
            RecurrenceRule::Daily => date.checked_add_signed(Duration::days(1)),
            RecurrenceRule::Weekly => date.checked_add_signed(Duration::days(7)),
            RecurrenceRule::Monthly => Self::add_month_spilling(date),
        }
    }

    /// Month arithmetic with spill-over day overflow: the month field is
    /// incremented (carrying the year past December) and a day-of-month
    /// that does not exist in the target month spills into the following
    /// month, e.g. Jan 31 -> Mar 3 in a non-leap year and Jan 29 2028 ->
    /// Feb 29 2028. Chrono's own `Months` arithmetic clamps to the last
    /// day of the month instead and must not be used here.
    fn add_month_spilling(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (mut year, mut month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        let mut day = date.day();

        let len = days_in_month(year, month)?;
        if day > len {
            day -= len;
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        // day <= 31 spills to at most day 3, so only a year out of range
        // can fail here.
        Some(
            NaiveDate::from_ymd_opt(year, month, day)?
                .and_time(date.time())
                .and_utc(),
        )
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some((next_first - first).num_days() as u32)
}
