//! UploadComplete - attach submitted values to a finished upload
//!
//! Runs once per upload, after the file is stored: assembles the
//! template block from the submitted form values and appends it to the
//! file's description page.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::registry::{FieldRegistry, SENTINEL};
use crate::store::EditOptions;
use crate::types::{FieldValue, SubmittedValues};

/// What the completion flow did with the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachOutcome {
    /// A template block was written to the description page.
    Attached,
    /// The page already carried a template block.
    AlreadyTagged,
    /// Re-uploads keep their existing description page.
    ReUpload,
    /// No fields are defined, or nothing was submitted.
    NothingToAttach,
}

/// Completion event for a freshly uploaded file.
#[derive(Debug, Clone)]
pub struct UploadComplete {
    /// Title of the file's description page
    pub file_title: String,
    /// Upload description entered alongside the file
    pub summary: String,
    /// Values collected from the custom form fields
    pub values: SubmittedValues,
    /// Whether this upload replaced an existing file
    pub reupload: bool,
}

impl UploadComplete {
    /// Create a completion event for the given description page.
    pub fn new(file_title: impl Into<String>) -> Self {
        Self {
            file_title: file_title.into(),
            summary: String::new(),
            values: SubmittedValues::new(),
            reupload: false,
        }
    }

    /// Set the upload description.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Record one submitted field value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Replace all submitted values at once.
    pub fn with_values(mut self, values: SubmittedValues) -> Self {
        self.values = values;
        self
    }

    /// Mark this upload as replacing an existing file.
    pub fn for_reupload(mut self) -> Self {
        self.reupload = true;
        self
    }

    /// Run the completion flow.
    ///
    /// Writes the description page at most once, with the automatic
    /// summary and recent-changes suppression flags set. Never writes
    /// for a re-upload, for a page that already carries the template,
    /// or when there is nothing to attach.
    pub fn execute(&self, registry: &FieldRegistry) -> Result<AttachOutcome> {
        if self.reupload {
            debug!(title = %self.file_title, "re-upload, leaving page untouched");
            return Ok(AttachOutcome::ReUpload);
        }

        let ctx = registry.context();
        let current = ctx.pages().read(&self.file_title)?.unwrap_or_default();
        if current.contains(SENTINEL) {
            debug!(title = %self.file_title, "page already tagged");
            return Ok(AttachOutcome::AlreadyTagged);
        }

        let fields = registry.load_all()?;
        if fields.is_empty() {
            return Ok(AttachOutcome::NothingToAttach);
        }

        let block = match registry.assemble_block(&fields, &self.values, &self.summary)? {
            Some(block) => block,
            None => return Ok(AttachOutcome::NothingToAttach),
        };

        let content = if current.is_empty() {
            block
        } else {
            format!("{current}\n\n{block}")
        };
        let options = EditOptions {
            summary: String::new(),
            automatic_summary: true,
            suppress_recent_changes: true,
        };
        ctx.pages().write(&self.file_title, &content, &options)?;
        debug!(title = %self.file_title, bytes = content.len(), "attached template block");
        Ok(AttachOutcome::Attached)
    }
}
