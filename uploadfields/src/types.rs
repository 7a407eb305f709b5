//! Core descriptor and value types for upload fields.
//!
//! All types serialize to/from JSON via serde so hosts can move form
//! descriptors and submitted values across their form layer. Maps use
//! `IndexMap` throughout: definition order and option order are visible
//! in the rendered form, so insertion order is part of the contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of an upload field. Determines widget shape and how a
/// submitted value serializes back into wikitext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Select,
    MultiSelect,
    Text,
    Textarea,
    Category,
}

impl FieldType {
    /// Parse a type name as it appears in a definition title.
    /// Case-insensitive; unknown names do not construct.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "select" => Some(Self::Select),
            "multiselect" => Some(Self::MultiSelect),
            "text" => Some(Self::Text),
            "textarea" => Some(Self::Textarea),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed option outline: label → value, one nested level at most.
pub type OptionTree = IndexMap<String, OptionValue>;

/// A single entry in an option tree: either a selectable value or a
/// labeled group of nested options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OptionValue {
    Value(String),
    Group(OptionTree),
}

/// A value submitted for a single field.
///
/// Single-choice and free-text widgets submit `Text`; multi-choice
/// widgets submit `List`. Untagged on the wire: a JSON string or a
/// JSON array of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The text form, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The list form, if this is a `List` value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

/// The values a host collected from the upload form, keyed by field key.
/// Preserves submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SubmittedValues {
    values: IndexMap<String, FieldValue>,
}

impl SubmittedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted value under a field key, replacing any earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Widget configuration for a form descriptor, the structured stand-in
/// for the host's widget class lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum WidgetConfig {
    /// Single-choice dropdown.
    Select { options: OptionTree },
    /// Multi-choice checklist. Also used by category fields.
    MultiSelect { options: OptionTree },
    /// Single-line text input.
    Text { default: String },
    /// Multi-line text input.
    Textarea { default: String, rows: u32 },
}

/// A complete form descriptor for one field, ready for the host to
/// render into its upload form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub fieldname: String,
    /// Display label with the trailing colon already applied.
    pub label: String,
    /// Form section the input is grouped under.
    pub section: String,
    #[serde(flatten)]
    pub widget: WidgetConfig,
    /// Initial value: empty text, or an empty list for multi-choice input.
    pub value: FieldValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_from_name_is_case_insensitive() {
        assert_eq!(FieldType::from_name("select"), Some(FieldType::Select));
        assert_eq!(FieldType::from_name("SELECT"), Some(FieldType::Select));
        assert_eq!(
            FieldType::from_name("MultiSelect"),
            Some(FieldType::MultiSelect)
        );
        assert_eq!(FieldType::from_name("Textarea"), Some(FieldType::Textarea));
        assert_eq!(FieldType::from_name("category"), Some(FieldType::Category));
    }

    #[test]
    fn field_type_unknown_name_does_not_construct() {
        assert_eq!(FieldType::from_name("checkbox"), None);
        assert_eq!(FieldType::from_name(""), None);
        assert_eq!(FieldType::from_name("multi-select"), None);
    }

    #[test]
    fn field_type_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&FieldType::MultiSelect).unwrap(),
            "\"multiselect\""
        );
        assert_eq!(
            serde_json::to_string(&FieldType::Textarea).unwrap(),
            "\"textarea\""
        );
    }

    #[test]
    fn field_value_is_untagged_on_the_wire() {
        let text: FieldValue = serde_json::from_str("\"cc-by-sa\"").unwrap();
        assert_eq!(text, FieldValue::Text("cc-by-sa".into()));

        let list: FieldValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(list, FieldValue::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn field_value_conversions() {
        assert_eq!(FieldValue::from("x"), FieldValue::Text("x".into()));
        assert_eq!(
            FieldValue::from(vec!["a", "b"]),
            FieldValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(FieldValue::from("x").as_text(), Some("x"));
        assert!(FieldValue::from(vec!["a"]).as_text().is_none());
    }

    #[test]
    fn submitted_values_preserve_insertion_order() {
        let mut values = SubmittedValues::new();
        values.insert("license", "cc-by-sa");
        values.insert("artist", "someone");
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"license":"cc-by-sa","artist":"someone"}"#);
    }

    #[test]
    fn widget_config_carries_a_widget_tag() {
        let widget = WidgetConfig::Textarea {
            default: String::new(),
            rows: 5,
        };
        let json = serde_json::to_string(&widget).unwrap();
        assert_eq!(json, r#"{"widget":"textarea","default":"","rows":5}"#);
    }

    #[test]
    fn descriptor_serializes_flat() {
        let mut options = OptionTree::new();
        options.insert("Portrait".into(), OptionValue::Value("portrait".into()));
        let descriptor = FieldDescriptor {
            name: "genre".into(),
            fieldname: "genre".into(),
            label: "Genre:".into(),
            section: "description".into(),
            widget: WidgetConfig::Select { options },
            value: FieldValue::Text(String::new()),
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(
            json,
            r#"{"name":"genre","fieldname":"genre","label":"Genre:","section":"description","widget":"select","options":{"Portrait":"portrait"},"value":""}"#
        );
    }

    #[test]
    fn option_groups_nest_one_level() {
        let mut inner = OptionTree::new();
        inner.insert("label".into(), OptionValue::Value("x".into()));
        let mut tree = OptionTree::new();
        tree.insert("a".into(), OptionValue::Value("a".into()));
        tree.insert("b".into(), OptionValue::Group(inner));
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"a":"a","b":{"label":"x"}}"#);
    }
}
