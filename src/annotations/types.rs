//! Annotation and selection types
//!
//! Offsets are character offsets (Unicode scalar values) into the source
//! text. Hosts whose input controls report UTF-16 code units convert
//! before calling in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note attached to a character range of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier (UUID)
    pub id: String,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Snapshot of the annotated text taken at creation time
    pub text: String,
    /// User note
    pub note: String,
}

impl Annotation {
    /// Create an annotation over `selection`, snapshotting its text from `source`.
    ///
    /// The caller is responsible for having validated the range.
    pub(crate) fn from_selection(selection: Selection, source: &str, note: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start: selection.start,
            end: selection.end,
            text: char_slice(source, selection.start, selection.end).to_string(),
            note: note.to_string(),
        }
    }
}

/// A non-empty text selection reported by the host input control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from raw input offsets.
    ///
    /// Returns `None` for a collapsed (zero-width) selection. Reversed
    /// offsets are normalised.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        if start == end {
            return None;
        }
        Some(Self {
            start: start.min(end),
            end: start.max(end),
        })
    }

    /// Build a selection from optional offsets as delivered by input events
    pub fn from_offsets(start: Option<usize>, end: Option<usize>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => None,
        }
    }
}

/// Slice `text` by character offsets, clamping to the text length
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end.max(start));
    &text[from..to]
}

/// Byte offset of the `chars`-th character, or `text.len()` past the end
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Length of `text` in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
