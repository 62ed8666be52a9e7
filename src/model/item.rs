// File: src/model/item.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecurrenceRule {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Task,
    Event,
}

/// A single tracked entry: either a task (completion state, optional due
/// date) or an event (event date and optional end date). A recurring task
/// acts as the anchor from which future occurrences are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub photo_paths: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub kind: ItemKind,

    // Task-specific
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRule>,
    #[serde(default)]
    pub has_reminder: bool,
    #[serde(default)]
    pub reminder_date: Option<DateTime<Utc>>,

    // Event-specific
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            notes: None,
            created_date: Utc::now(),
            updated_date: None,
            location: None,
            links: Vec::new(),
            photo_paths: Vec::new(),
            tags: Vec::new(),
            kind: ItemKind::Task,
            is_completed: false,
            due_date: None,
            priority: Priority::None,
            is_recurring: false,
            recurrence_rule: None,
            has_reminder: false,
            reminder_date: None,
            event_date: None,
            end_date: None,
        }
    }

    /// Builds a fresh task from the quick-add interpreter output.
    pub fn from_quick_input(parsed: crate::model::parser::ParsedInput) -> Self {
        let mut item = Self::new(parsed.title);
        item.due_date = parsed.due_date;
        item.priority = parsed.priority;
        item.is_recurring = parsed.is_recurring;
        item.recurrence_rule = parsed.recurrence_rule;
        item
    }

    /// The date this item sorts and displays by: due date for tasks,
    /// event date for events.
    pub fn relevant_date(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            ItemKind::Task => self.due_date,
            ItemKind::Event => self.event_date,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.kind != ItemKind::Task || self.is_completed {
            return false;
        }
        match self.due_date {
            Some(due) => due < now,
            None => false,
        }
    }
}
