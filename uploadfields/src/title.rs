//! Category-namespace title normalization.
//!
//! A small stand-in for the host wiki's title rules, covering exactly
//! what category validation needs: fold underscores and whitespace,
//! reject illegal names, and expose the database-key and prefixed
//! display forms.

/// Characters a title may never contain.
const ILLEGAL_CHARS: [char; 8] = ['#', '<', '>', '[', ']', '|', '{', '}'];

/// Longest allowed title, in bytes of the normalized form.
const MAX_TITLE_BYTES: usize = 255;

/// A validated title in the category namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTitle {
    text: String,
}

impl CategoryTitle {
    /// Normalize and validate a raw category name. Returns `None` for
    /// names the wiki would refuse as page titles.
    pub fn make_safe(raw: &str) -> Option<Self> {
        let mut text = String::with_capacity(raw.len());
        let mut pending_space = false;
        for c in raw.chars() {
            if c == '_' || c.is_whitespace() {
                pending_space = !text.is_empty();
            } else {
                if pending_space {
                    text.push(' ');
                    pending_space = false;
                }
                text.push(c);
            }
        }

        if text.is_empty() {
            return None;
        }
        if text.chars().any(|c| c.is_control() || ILLEGAL_CHARS.contains(&c)) {
            return None;
        }
        if text == "." || text == ".." || text.starts_with("./") || text.starts_with("../") {
            return None;
        }
        if text.contains("~~~") {
            return None;
        }

        let text = capitalize_first(&text);
        if text.len() > MAX_TITLE_BYTES {
            return None;
        }

        Some(Self { text })
    }

    /// Display form: spaces, first letter uppercased, no namespace.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Database-key form: spaces become underscores.
    pub fn db_key(&self) -> String {
        self.text.replace(' ', "_")
    }

    /// Display form with the category namespace prefix.
    pub fn prefixed_text(&self) -> String {
        format!("Category:{}", self.text)
    }
}

/// Uppercase the first character, multibyte aware.
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
