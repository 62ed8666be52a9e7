// File: src/model/mod.rs
pub mod display;
pub mod item;
pub mod parser;
pub mod recurrence;

pub use item::{Item, ItemKind, Priority, RecurrenceRule};
pub use parser::{ParsedInput, parse_quick_input, parse_quick_input_at};
pub use recurrence::{OCCURRENCES_TO_CREATE, RecurrenceEngine};
