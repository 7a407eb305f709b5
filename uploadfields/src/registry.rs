//! FieldRegistry - loads field definitions and assembles the template
//!
//! The registry is the read side of the crate: it turns definition
//! records into fields, fields into form descriptors, and submitted
//! values into the wikitext template block.

use crate::context::WikiContext;
use crate::error::Result;
use crate::field::UploadField;
use crate::types::{FieldDescriptor, SubmittedValues};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Name of the template receiving submitted values.
pub const TEMPLATE_NAME: &str = "FileInfo";

/// Substring marking page content that already carries the template.
pub const SENTINEL: &str = "{{FileInfo";

/// Loads field definitions and serializes submissions against them.
pub struct FieldRegistry {
    ctx: WikiContext,
}

impl FieldRegistry {
    pub fn new(ctx: WikiContext) -> Self {
        Self { ctx }
    }

    /// The collaborators this registry reads from.
    pub fn context(&self) -> &WikiContext {
        &self.ctx
    }

    /// Load every defined field, keyed by id in source order.
    ///
    /// Fields are built fresh from the definition source on every call.
    /// Records that do not describe a field are skipped, never fatal.
    pub fn load_all(&self) -> Result<IndexMap<u64, UploadField>> {
        let mut fields = IndexMap::new();
        for record in self.ctx.definitions().field_records()? {
            let id = record.id;
            let title = record.title.clone();
            match UploadField::from_record(record) {
                Some(field) => {
                    fields.insert(field.id(), field);
                }
                None => warn!(id, title = %title, "skipping invalid field definition"),
            }
        }
        debug!(count = fields.len(), "loaded field definitions");
        Ok(fields)
    }

    /// Build the upload-form descriptors, keyed by display label in
    /// definition order.
    ///
    /// Hosts rebuilding a re-upload form skip this call; re-uploads
    /// keep their existing description page.
    pub fn form_descriptors(
        &self,
        fields: &IndexMap<u64, UploadField>,
    ) -> Result<IndexMap<String, FieldDescriptor>> {
        let mut descriptors = IndexMap::new();
        for field in fields.values() {
            let descriptor = field.descriptor(self.ctx.messages(), self.ctx.categories())?;
            descriptors.insert(field.label().to_string(), descriptor);
        }
        Ok(descriptors)
    }

    /// Assemble the template block for a set of submitted values.
    ///
    /// The summary entry always leads; field fragments follow in
    /// definition order. A field contributes only when a value was
    /// submitted under its key and its fragment came back non-empty.
    /// Returns `None` when no field contributed and the summary is
    /// empty, in which case nothing should be written.
    pub fn assemble_block(
        &self,
        fields: &IndexMap<u64, UploadField>,
        submitted: &SubmittedValues,
        summary: &str,
    ) -> Result<Option<String>> {
        let mut fragments = vec![format!("summary={summary}")];
        for field in fields.values() {
            if let Some(value) = submitted.get(field.key()) {
                let fragment = field.wiki_text(value, self.ctx.categories())?;
                if !fragment.is_empty() {
                    fragments.push(fragment);
                }
            }
        }

        if fragments.len() == 1 && summary.is_empty() {
            return Ok(None);
        }

        debug!(
            template = TEMPLATE_NAME,
            fragments = fragments.len(),
            "assembled template block"
        );
        Ok(Some(format!(
            "{{{{{}\n|{}\n}}}}",
            TEMPLATE_NAME,
            fragments.join("\n|")
        )))
    }
}
