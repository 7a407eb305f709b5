//! WikiContext - injected host collaborators
//!
//! The context bundles the four host-side stores and is handed to every
//! operation. No business logic lives here, just access.

use crate::store::{
    CategoryStore, DefinitionStore, MemoryCategoryStore, MemoryDefinitionStore,
    MemoryMessageStore, MemoryPageStore, MessageStore, PageStore,
};
use std::sync::Arc;

/// Context passed to every operation - provides access, not logic.
/// Cheap to clone; clones share the underlying collaborators.
#[derive(Clone)]
pub struct WikiContext {
    definitions: Arc<dyn DefinitionStore>,
    messages: Arc<dyn MessageStore>,
    categories: Arc<dyn CategoryStore>,
    pages: Arc<dyn PageStore>,
}

impl WikiContext {
    /// Create a context over host-provided collaborators.
    pub fn new(
        definitions: Arc<dyn DefinitionStore>,
        messages: Arc<dyn MessageStore>,
        categories: Arc<dyn CategoryStore>,
        pages: Arc<dyn PageStore>,
    ) -> Self {
        Self {
            definitions,
            messages,
            categories,
            pages,
        }
    }

    /// Create a context wired to fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryDefinitionStore::new()),
            Arc::new(MemoryMessageStore::new()),
            Arc::new(MemoryCategoryStore::new()),
            Arc::new(MemoryPageStore::new()),
        )
    }

    /// The field definition source.
    pub fn definitions(&self) -> &dyn DefinitionStore {
        self.definitions.as_ref()
    }

    /// Message text lookups.
    pub fn messages(&self) -> &dyn MessageStore {
        self.messages.as_ref()
    }

    /// The category table.
    pub fn categories(&self) -> &dyn CategoryStore {
        self.categories.as_ref()
    }

    /// Page content access.
    pub fn pages(&self) -> &dyn PageStore {
        self.pages.as_ref()
    }
}
