//! Display segments produced by the overlay engine

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One contiguous, uniformly highlighted slice of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// The covered text
    pub text: String,
    /// Ids of every annotation covering this slice (sorted)
    pub active_annotation_ids: BTreeSet<String>,
    /// Character offset of the first character in the source text
    pub start_offset: usize,
}

impl Segment {
    pub fn plain(text: &str, start_offset: usize) -> Self {
        Self {
            text: text.to_string(),
            active_annotation_ids: BTreeSet::new(),
            start_offset,
        }
    }

    /// Character offset one past the last covered character
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.text.chars().count()
    }

    /// Number of overlapping annotations
    pub fn depth(&self) -> usize {
        self.active_annotation_ids.len()
    }

    pub fn is_highlighted(&self) -> bool {
        !self.active_annotation_ids.is_empty()
    }

    /// Stable identity for UI diffing
    pub fn key(&self) -> SegmentKey {
        SegmentKey {
            start_offset: self.start_offset,
            annotation_ids: self.active_annotation_ids.iter().cloned().collect(),
        }
    }
}

/// Reproducible key derived from the start offset and the active ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey {
    pub start_offset: usize,
    pub annotation_ids: Vec<String>,
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.annotation_ids.is_empty() {
            write!(f, "text-{}", self.start_offset)
        } else {
            write!(
                f,
                "overlap-{}-{}",
                self.start_offset,
                self.annotation_ids.join("-")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segment_key() {
        let segment = Segment::plain("world", 6);

        assert!(!segment.is_highlighted());
        assert_eq!(segment.end_offset(), 11);
        assert_eq!(segment.key().to_string(), "text-6");
    }

    #[test]
    fn test_highlighted_segment_key_sorted() {
        let segment = Segment {
            text: "lo".to_string(),
            active_annotation_ids: ["b", "a"].iter().map(|s| s.to_string()).collect(),
            start_offset: 3,
        };

        assert_eq!(segment.depth(), 2);
        assert_eq!(segment.key().to_string(), "overlap-3-a-b");
    }

    #[test]
    fn test_serialization_camel_case() {
        let segment = Segment::plain("hi", 0);
        let json = serde_json::to_string(&segment).unwrap();

        assert!(json.contains("\"activeAnnotationIds\":[]"));
        assert!(json.contains("\"startOffset\":0"));
    }
}
