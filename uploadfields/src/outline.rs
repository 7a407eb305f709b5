//! Parse indented-bullet option outlines into option trees.
//!
//! One option per line: `*value|label`, with the label optional (the
//! value doubles as the label when absent). A second leading `*` nests
//! the line under the preceding single-star entry. Deeper markers clamp
//! to two levels. Lines that do not start with `*` carry no option.

use crate::types::{OptionTree, OptionValue};

/// Marker counting stops here; any further `*` stays in the line body.
const DEPTH_COUNT_CAP: usize = 10;

/// Nesting beyond this is folded back to a group entry.
const MAX_DEPTH: usize = 2;

/// Cursor over the lines of an outline with single-step rewind.
///
/// The rewind slot holds one line: pushing back while a line is already
/// waiting replaces it.
pub struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    pushed_back: Option<&'a str>,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            pushed_back: None,
        }
    }

    /// Next line without consuming it.
    pub fn peek(&mut self) -> Option<&'a str> {
        if self.pushed_back.is_none() {
            self.pushed_back = self.lines.next();
        }
        self.pushed_back
    }

    /// Consume and return the next line.
    pub fn advance(&mut self) -> Option<&'a str> {
        self.pushed_back.take().or_else(|| self.lines.next())
    }

    /// Return a line to the cursor so the next `advance` re-reads it.
    pub fn push_back(&mut self, line: &'a str) {
        self.pushed_back = Some(line);
    }
}

/// Parse an option outline into a label → value tree.
///
/// Unmarked and blank lines contribute nothing. Duplicate labels
/// overwrite in place, keeping the original position. A nested group
/// with no entry before it has no home and is dropped.
pub fn parse_outline(text: &str) -> OptionTree {
    let mut cursor = LineCursor::new(text);
    parse_depth(&mut cursor, 1)
}

/// Count leading `*` markers, up to [`DEPTH_COUNT_CAP`].
fn marker_depth(line: &str) -> usize {
    line.bytes()
        .take(DEPTH_COUNT_CAP)
        .take_while(|&b| b == b'*')
        .count()
}

fn parse_depth(cursor: &mut LineCursor<'_>, depth: usize) -> OptionTree {
    let mut options = OptionTree::new();

    while let Some(raw) = cursor.advance() {
        if !raw.starts_with('*') {
            continue;
        }

        let mut line = raw;
        let mut line_depth = marker_depth(line);
        if line_depth > MAX_DEPTH {
            // Option groups do not support more than one nesting level.
            // Past the counting cap the surplus markers stay in the line.
            line = &line[line_depth - MAX_DEPTH..];
            line_depth = MAX_DEPTH;
        }

        if line_depth > depth {
            // Re-read the raw line at its own depth and hang the subtree
            // off the last entry at this level.
            cursor.push_back(raw);
            let subtree = parse_depth(cursor, line_depth);
            if let Some(index) = options.len().checked_sub(1) {
                if let Some((_, slot)) = options.get_index_mut(index) {
                    *slot = OptionValue::Group(subtree);
                }
            }
            continue;
        } else if line_depth < depth {
            cursor.push_back(raw);
            break;
        }

        let rest = &line[depth..];
        let (value, label) = match rest.split_once('|') {
            Some((value, label)) => (value, label),
            None => (rest, rest),
        };
        let label = if label.is_empty() { value } else { label };
        if label.is_empty() {
            // No empty labels allowed.
            continue;
        }
        options.insert(label.to_string(), OptionValue::Value(value.to_string()));
    }

    options
}
