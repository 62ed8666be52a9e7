// File: src/store.rs
use crate::config::Config;
use crate::context::AppContext;
use crate::model::parser::parse_quick_input;
use crate::model::{Item, ItemKind, Priority, RecurrenceEngine, RecurrenceRule};
use crate::storage::LocalStorage;
use anyhow::Result;
use chrono::{Duration, Utc};
use std::cmp::Ordering;

/// In-memory item collection plus the item-creation workflow. All
/// mutating operations persist the full list through [`LocalStorage`]
/// before returning.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    pub items: Vec<Item>,
}

pub struct FilterOptions<'a> {
    pub search_term: &'a str,
    pub show_completed: bool,
    pub kind: Option<ItemKind>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the store from disk. On a fresh install (no store file yet)
    /// the demo items are seeded when the config asks for them.
    pub fn load(ctx: &dyn AppContext, config: &Config) -> Result<Self> {
        let path = ctx.get_items_path()?;
        if !path.exists() && config.seed_demo_data {
            let mut store = Self {
                items: demo_items(),
            };
            store.save(ctx)?;
            log::info!("Seeded item store with {} demo items", store.items.len());
            return Ok(store);
        }

        Ok(Self {
            items: LocalStorage::load(ctx)?,
        })
    }

    fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        LocalStorage::save(ctx, &self.items)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The quick-add workflow: interpret the text, persist the new item,
    /// then expand and persist its recurrence series (if any). Returns
    /// the id of the anchor item.
    pub fn quick_add(&mut self, ctx: &dyn AppContext, text: &str) -> Result<String> {
        let parsed = parse_quick_input(text);
        let item = Item::from_quick_input(parsed);
        let id = item.id.clone();

        // The anchor is persisted before its occurrences are created.
        self.items.push(item);
        self.save(ctx)?;

        let occurrences = self
            .items
            .last()
            .map(RecurrenceEngine::expand)
            .unwrap_or_default();

        if !occurrences.is_empty() {
            log::info!(
                "Expanding recurring item {} into {} occurrences",
                id,
                occurrences.len()
            );
            self.items.extend(occurrences);
            self.save(ctx)?;
        }

        Ok(id)
    }

    /// Adds an already-built item (manual entry path). Recurrence is
    /// expanded exactly as for quick-add.
    pub fn add_item(&mut self, ctx: &dyn AppContext, item: Item) -> Result<String> {
        let id = item.id.clone();
        self.items.push(item);
        self.save(ctx)?;

        let occurrences = self
            .items
            .last()
            .map(RecurrenceEngine::expand)
            .unwrap_or_default();

        if !occurrences.is_empty() {
            self.items.extend(occurrences);
            self.save(ctx)?;
        }
        Ok(id)
    }

    /// Replaces an existing item (matched by id) and persists.
    pub fn update_item(&mut self, ctx: &dyn AppContext, mut item: Item) -> Result<()> {
        let Some(idx) = self.items.iter().position(|i| i.id == item.id) else {
            anyhow::bail!("No item with id {}", item.id);
        };
        item.updated_date = Some(Utc::now());
        self.items[idx] = item;
        self.save(ctx)
    }

    pub fn toggle_completed(&mut self, ctx: &dyn AppContext, id: &str) -> Result<bool> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            anyhow::bail!("No item with id {}", id);
        };
        item.is_completed = !item.is_completed;
        item.updated_date = Some(Utc::now());
        let completed = item.is_completed;
        self.save(ctx)?;
        Ok(completed)
    }

    pub fn delete_item(&mut self, ctx: &dyn AppContext, id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() == before {
            anyhow::bail!("No item with id {}", id);
        }
        self.save(ctx)
    }

    /// Filtered, sorted view over the items: completed tasks are hidden
    /// unless requested, the search term matches title/notes/location/
    /// tags case-insensitively, and results sort incomplete-first, then
    /// by relevant date ascending with dateless items last.
    pub fn filtered(&self, opts: &FilterOptions) -> Vec<&Item> {
        let search = opts.search_term.trim().to_lowercase();
        let mut result: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| opts.show_completed || !item.is_completed)
            .filter(|item| opts.kind.is_none_or(|k| item.kind == k))
            .filter(|item| {
                if search.is_empty() {
                    return true;
                }
                item.title.to_lowercase().contains(&search)
                    || item
                        .notes
                        .as_ref()
                        .is_some_and(|n| n.to_lowercase().contains(&search))
                    || item
                        .location
                        .as_ref()
                        .is_some_and(|l| l.to_lowercase().contains(&search))
                    || item.tags.iter().any(|t| t.to_lowercase().contains(&search))
            })
            .collect();

        result.sort_by(|a, b| {
            if a.is_completed != b.is_completed {
                return if a.is_completed {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }
            match (a.relevant_date(), b.relevant_date()) {
                (Some(da), Some(db)) => da.cmp(&db),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
            }
        });

        result
    }
}

/// Sample items shown on a fresh install so the list is not empty.
fn demo_items() -> Vec<Item> {
    let now = Utc::now();

    let mut welcome = Item::new("Welcome to Dashtrack");
    welcome.notes = Some("Tap the checkbox to complete a task.".to_string());
    welcome.tags = vec!["getting-started".to_string()];

    let mut groceries = Item::new("Buy groceries");
    groceries.due_date = Some(now + Duration::days(1));
    groceries.priority = Priority::Medium;
    groceries.tags = vec!["errands".to_string()];

    let mut standup = Item::new("Team standup");
    standup.due_date = Some(now + Duration::days(1));
    standup.priority = Priority::High;
    standup.is_recurring = true;
    standup.recurrence_rule = Some(RecurrenceRule::Daily);
    standup.tags = vec!["work".to_string()];

    vec![welcome, groceries, standup]
}
