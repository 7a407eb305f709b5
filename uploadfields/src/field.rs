//! UploadField - one custom upload-form field
//!
//! A field is constructed from a definition record whose title encodes
//! its type and name (`UploadField-<type>-<name>`). It knows how to
//! render itself as a form descriptor and how to turn a submitted value
//! back into a wikitext fragment.

use crate::error::Result;
use crate::outline::parse_outline;
use crate::store::{CategoryStore, DefinitionRecord, MessageStore};
use crate::title::{capitalize_first, CategoryTitle};
use crate::types::{FieldDescriptor, FieldType, FieldValue, OptionTree, OptionValue, WidgetConfig};
use tracing::warn;

/// Labels longer than this truncate.
const MAX_LABEL_CHARS: usize = 255;

/// A single field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadField {
    id: u64,
    field_type: FieldType,
    label: String,
    key: String,
    record: DefinitionRecord,
}

impl UploadField {
    /// Construct a field from a definition record.
    ///
    /// The title must carry a known type segment and a non-empty name
    /// segment; segments past the third are ignored. Returns `None` for
    /// records that do not describe a field. The record identifier
    /// becomes the field id, fixed for the life of the value.
    pub fn from_record(record: DefinitionRecord) -> Option<Self> {
        let mut segments = record.title.split('-');
        segments.next()?; // reserved prefix, already filtered by the source
        let field_type = FieldType::from_name(segments.next()?)?;
        let name = segments.next()?;
        if name.is_empty() {
            return None;
        }
        let label = capitalize_first(&name.to_lowercase());

        let mut field = Self {
            id: record.id,
            field_type,
            label: String::new(),
            key: String::new(),
            record,
        };
        field.set_label(&label);
        Some(field)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The wikitext key, derived from the label at construction.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the display label.
    ///
    /// Empty labels are rejected; long labels truncate to 255
    /// characters. The derived key survives relabeling so existing
    /// template blocks keep resolving.
    pub fn set_label(&mut self, label: &str) -> bool {
        if label.is_empty() {
            return false;
        }
        self.label = label.chars().take(MAX_LABEL_CHARS).collect();
        if self.key.is_empty() {
            self.key = name_to_key(&self.label);
        }
        true
    }

    /// Build the form descriptor for this field.
    ///
    /// Choice options come back freshly parsed on every call; category
    /// fields list every category known at call time.
    pub fn descriptor(
        &self,
        messages: &dyn MessageStore,
        categories: &dyn CategoryStore,
    ) -> Result<FieldDescriptor> {
        let mut value = FieldValue::Text(String::new());
        let widget = match self.field_type {
            FieldType::Select => WidgetConfig::Select {
                options: self.parse_options(messages)?,
            },
            FieldType::MultiSelect => WidgetConfig::MultiSelect {
                options: self.parse_options(messages)?,
            },
            FieldType::Text => WidgetConfig::Text {
                default: self.message_text(messages)?,
            },
            FieldType::Textarea => WidgetConfig::Textarea {
                default: self.message_text(messages)?,
                rows: 5,
            },
            FieldType::Category => {
                let mut options = OptionTree::new();
                for name in categories.all()? {
                    options.insert(name.clone(), OptionValue::Value(name));
                }
                value = FieldValue::List(Vec::new());
                WidgetConfig::MultiSelect { options }
            }
        };

        Ok(FieldDescriptor {
            name: self.key.clone(),
            fieldname: self.key.clone(),
            label: format!("{}:", self.label),
            section: "description".to_string(),
            widget,
            value,
        })
    }

    /// Serialize a submitted value into a `key=value` wikitext fragment.
    ///
    /// Category values are validated against the category table; entries
    /// failing title rules or unknown to the wiki drop out. An empty
    /// fragment contributes nothing to the assembled block.
    pub fn wiki_text(&self, input: &FieldValue, categories: &dyn CategoryStore) -> Result<String> {
        match self.field_type {
            FieldType::Select | FieldType::MultiSelect | FieldType::Text | FieldType::Textarea => {
                // Pipes and newlines pass through unescaped and can break
                // the surrounding template markup.
                let text = match input {
                    FieldValue::Text(text) => text.clone(),
                    FieldValue::List(items) => items.join(","),
                };
                Ok(format!("{}={}", self.key, text))
            }
            FieldType::Category => {
                let entries: Vec<&str> = match input {
                    FieldValue::Text(text) => vec![text.as_str()],
                    FieldValue::List(items) => items.iter().map(String::as_str).collect(),
                };

                let mut titles = Vec::new();
                for entry in entries {
                    match CategoryTitle::make_safe(entry) {
                        Some(title) => titles.push(title),
                        None => warn!(category = entry, "dropping unusable category name"),
                    }
                }

                let keys: Vec<String> = titles.iter().map(CategoryTitle::db_key).collect();
                let known = categories.existing(&keys)?;

                let mut kept = Vec::new();
                for title in &titles {
                    if known.contains(&title.db_key()) {
                        kept.push(title.prefixed_text());
                    } else {
                        warn!(category = title.text(), "dropping unknown category");
                    }
                }

                if kept.is_empty() {
                    Ok(String::new())
                } else {
                    Ok(format!("category={}", kept.join(",")))
                }
            }
        }
    }

    fn message_text(&self, messages: &dyn MessageStore) -> Result<String> {
        Ok(messages.text(&self.record.message_key)?.unwrap_or_default())
    }

    fn parse_options(&self, messages: &dyn MessageStore) -> Result<OptionTree> {
        let text = self.message_text(messages)?;
        Ok(parse_outline(&text))
    }
}

/// Turn a human friendly label into a wikitext key: lowercase, each run
/// of non-word characters becomes a single hyphen, hyphens trimmed.
/// Word characters are ASCII alphanumerics and underscore.
fn name_to_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut key = String::with_capacity(lowered.len());
    for c in lowered.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            key.push(c);
        } else if !key.ends_with('-') {
            key.push('-');
        }
    }
    key.trim_matches('-').to_string()
}
