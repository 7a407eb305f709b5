//! Error types for upload field operations

use thiserror::Error;

/// Result type for upload field operations
pub type Result<T> = std::result::Result<T, UploadFieldsError>;

/// Errors that can occur in upload field operations
///
/// Only collaborator failures surface here. Recoverable per-record
/// problems (a malformed definition title, an unknown category entry,
/// an unlabeled option line) are skipped and logged, never returned.
#[derive(Debug, Error)]
pub enum UploadFieldsError {
    /// A host collaborator failed
    #[error("{store} store error: {message}")]
    Store { store: String, message: String },
}

impl UploadFieldsError {
    /// Create a store error
    pub fn store(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            message: message.into(),
        }
    }
}
