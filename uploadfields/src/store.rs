//! Collaborator traits for the host wiki, with in-memory implementations
//!
//! The host supplies field definitions, message text, the category
//! table, and page content. Each concern is one small synchronous trait
//! so hosts can back them with whatever they have; the `Memory*`
//! implementations are complete stand-ins used by tests, doc examples,
//! and hosts without a live wiki.

use crate::error::Result;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// A raw definition row from the host's definition source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefinitionRecord {
    /// Host-assigned page identifier.
    pub id: u64,
    /// Structured title: `UploadField-<type>-<name>`.
    pub title: String,
    /// Lookup key for the field's associated message text.
    pub message_key: String,
    /// Redirects never define fields.
    pub redirect: bool,
}

impl DefinitionRecord {
    /// A non-redirect record whose message key is its own title, the
    /// usual shape for definitions kept in the message namespace.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id,
            message_key: title.clone(),
            title,
            redirect: false,
        }
    }
}

/// Options for a page write.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditOptions {
    /// Edit summary text. May be empty.
    pub summary: String,
    /// Let the host derive a summary when `summary` is empty.
    pub automatic_summary: bool,
    /// Keep the edit out of the host's recent-changes feed.
    pub suppress_recent_changes: bool,
}

/// Source of field definition records.
pub trait DefinitionStore: Send + Sync {
    /// All non-redirect records whose title follows the
    /// `UploadField-<type>-<name>` scheme, in source order.
    fn field_records(&self) -> Result<Vec<DefinitionRecord>>;
}

/// Display text lookups by message key.
pub trait MessageStore: Send + Sync {
    /// The text stored under `key`, if any.
    fn text(&self, key: &str) -> Result<Option<String>>;
}

/// The host's category table. A category is known once at least one
/// page populates it.
pub trait CategoryStore: Send + Sync {
    /// Every known category name in database-key form, in source order.
    fn all(&self) -> Result<Vec<String>>;

    /// The subset of `keys` present in the store.
    fn existing(&self, keys: &[String]) -> Result<HashSet<String>> {
        let known: HashSet<String> = self.all()?.into_iter().collect();
        Ok(keys.iter().filter(|key| known.contains(*key)).cloned().collect())
    }
}

/// Raw page content access.
pub trait PageStore: Send + Sync {
    /// Current content of the page, `None` if it does not exist.
    fn read(&self, title: &str) -> Result<Option<String>>;

    /// Replace or create the page's content.
    fn write(&self, title: &str, content: &str, options: &EditOptions) -> Result<()>;
}

/// Filter for definition titles: reserved prefix, a type segment, a
/// name segment.
static TITLE_FILTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^UploadField-.+-.+$").expect("title filter pattern is valid"));

/// Lock, recovering the data from a poisoned mutex.
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory definition source.
///
/// Holds records as added and applies the same filtering a live source
/// would at read time: the title scheme and the redirect flag.
#[derive(Debug, Default)]
pub struct MemoryDefinitionStore {
    records: Mutex<Vec<DefinitionRecord>>,
}

impl MemoryDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. Filtering happens at read time.
    pub fn add(&self, record: DefinitionRecord) {
        locked(&self.records).push(record);
    }
}

impl DefinitionStore for MemoryDefinitionStore {
    fn field_records(&self) -> Result<Vec<DefinitionRecord>> {
        Ok(locked(&self.records)
            .iter()
            .filter(|record| !record.redirect && TITLE_FILTER.is_match(&record.title))
            .cloned()
            .collect())
    }
}

/// In-memory message text store.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    messages: Mutex<HashMap<String, String>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text stored under a key.
    pub fn set(&self, key: impl Into<String>, text: impl Into<String>) {
        locked(&self.messages).insert(key.into(), text.into());
    }
}

impl MessageStore for MemoryMessageStore {
    fn text(&self, key: &str) -> Result<Option<String>> {
        Ok(locked(&self.messages).get(key).cloned())
    }
}

/// In-memory category table, insertion ordered.
#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    categories: Mutex<IndexSet<String>>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a category as populated. Names are database keys.
    pub fn add(&self, name: impl Into<String>) {
        locked(&self.categories).insert(name.into());
    }
}

impl CategoryStore for MemoryCategoryStore {
    fn all(&self) -> Result<Vec<String>> {
        Ok(locked(&self.categories).iter().cloned().collect())
    }
}

/// In-memory page table.
///
/// Also remembers the options of the most recent [`PageStore::write`]
/// so callers can observe how an edit was requested.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: Mutex<HashMap<String, String>>,
    last_edit: Mutex<Option<EditOptions>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed page content directly, without counting as an edit.
    pub fn put(&self, title: impl Into<String>, content: impl Into<String>) {
        locked(&self.pages).insert(title.into(), content.into());
    }

    /// Options of the most recent write, if any write happened.
    pub fn last_edit_options(&self) -> Option<EditOptions> {
        locked(&self.last_edit).clone()
    }
}

impl PageStore for MemoryPageStore {
    fn read(&self, title: &str) -> Result<Option<String>> {
        Ok(locked(&self.pages).get(title).cloned())
    }

    fn write(&self, title: &str, content: &str, options: &EditOptions) -> Result<()> {
        locked(&self.pages).insert(title.to_string(), content.to_string());
        *locked(&self.last_edit) = Some(options.clone());
        Ok(())
    }
}
