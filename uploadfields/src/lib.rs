//! Custom metadata fields for the wiki upload form
//!
//! `uploadfields` lets wiki operators define extra upload-form fields
//! (select, multiselect, text, textarea, category) through ordinary
//! definition pages. Submitted values are serialized into a
//! `{{FileInfo}}` template block and appended to the uploaded file's
//! description page.
//!
//! # Architecture
//!
//! - **Host-agnostic**: the wiki collaborators (definition source,
//!   message store, category store, page store) are traits bundled in
//!   [`WikiContext`]; in-memory implementations back the tests
//! - **Definition-driven**: fields come from `UploadField-<type>-<name>`
//!   records, select options from an indented `*` bullet outline
//! - **Write-once**: the completion flow appends the template block at
//!   most once per page, guarded by a `{{FileInfo` sentinel

pub mod context;
pub mod error;
pub mod field;
pub mod outline;
pub mod registry;
pub mod store;
pub mod title;
pub mod types;
pub mod upload;

pub use context::WikiContext;
pub use error::{Result, UploadFieldsError};
pub use field::UploadField;
pub use outline::parse_outline;
pub use registry::{FieldRegistry, SENTINEL, TEMPLATE_NAME};
pub use store::{
    CategoryStore, DefinitionRecord, DefinitionStore, EditOptions, MemoryCategoryStore,
    MemoryDefinitionStore, MemoryMessageStore, MemoryPageStore, MessageStore, PageStore,
};
pub use title::CategoryTitle;
pub use types::{
    FieldDescriptor, FieldType, FieldValue, OptionTree, OptionValue, SubmittedValues, WidgetConfig,
};
pub use upload::{AttachOutcome, UploadComplete};
