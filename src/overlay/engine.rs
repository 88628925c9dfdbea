//! Interval sweep that partitions text into highlight segments
//!
//! Every annotation contributes an OPEN boundary at its start and a CLOSE
//! boundary at its end. Boundaries are swept left to right; whenever the
//! sweep advances, the text since the previous boundary becomes a segment
//! carrying the annotations active over it.
//!
//! At equal positions CLOSE sorts before OPEN, so `0..5` and `5..10` render
//! as two segments meeting at 5 with no zero-width overlap between them.

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use crate::annotations::{char_len, Annotation};

use super::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BoundaryKind {
    // Declaration order is the tie-break order
    Close,
    Open,
}

#[derive(Debug, Clone, Copy)]
struct Boundary<'a> {
    position: usize,
    kind: BoundaryKind,
    id: &'a str,
}

/// Partition `text` into display segments
///
/// Offsets past the end of the text are clipped and spans left empty by
/// clipping are skipped. This happens when annotations outlive edits to the
/// text they were created on.
pub fn render(text: &str, annotations: &[Annotation]) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let len = char_len(text);
    let mut boundaries = Vec::with_capacity(annotations.len() * 2);

    for annotation in annotations {
        let start = annotation.start.min(len);
        let end = annotation.end.min(len);
        if start >= end {
            tracing::debug!(
                "Skipping annotation {} ({}..{}) outside text of length {}",
                annotation.id,
                annotation.start,
                annotation.end,
                len
            );
            continue;
        }
        push_boundaries(&mut boundaries, &annotation.id, start, end);
    }

    sweep(text, boundaries)
}

/// Partition `text`, rejecting annotations that do not fit inside it
pub fn try_render(text: &str, annotations: &[Annotation]) -> Result<Vec<Segment>, OverlayError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let len = char_len(text);
    let mut boundaries = Vec::with_capacity(annotations.len() * 2);

    for annotation in annotations {
        if annotation.start >= annotation.end {
            return Err(OverlayError::EmptySpan {
                id: annotation.id.clone(),
            });
        }
        if annotation.end > len {
            return Err(OverlayError::OutOfBounds {
                id: annotation.id.clone(),
                start: annotation.start,
                end: annotation.end,
                len,
            });
        }
        push_boundaries(&mut boundaries, &annotation.id, annotation.start, annotation.end);
    }

    Ok(sweep(text, boundaries))
}

fn push_boundaries<'a>(boundaries: &mut Vec<Boundary<'a>>, id: &'a str, start: usize, end: usize) {
    boundaries.push(Boundary {
        position: start,
        kind: BoundaryKind::Open,
        id,
    });
    boundaries.push(Boundary {
        position: end,
        kind: BoundaryKind::Close,
        id,
    });
}

fn sweep(text: &str, mut boundaries: Vec<Boundary<'_>>) -> Vec<Segment> {
    // Stable sort keeps insertion order within equal (position, kind)
    boundaries.sort_by(|a, b| a.position.cmp(&b.position).then(a.kind.cmp(&b.kind)));

    // Byte offset of every character position, plus one past the end
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(text.len()))
        .collect();
    let len = offsets.len() - 1;

    let mut segments = Vec::with_capacity(boundaries.len() + 1);
    // Counted so a repeated id stays active until its last span closes
    let mut active: BTreeMap<&str, usize> = BTreeMap::new();
    let mut last = 0;

    for boundary in &boundaries {
        if boundary.position > last {
            segments.push(Segment {
                text: text[offsets[last]..offsets[boundary.position]].to_string(),
                active_annotation_ids: active_ids(&active),
                start_offset: last,
            });
            last = boundary.position;
        }

        match boundary.kind {
            BoundaryKind::Open => *active.entry(boundary.id).or_insert(0) += 1,
            BoundaryKind::Close => {
                if let Some(count) = active.get_mut(boundary.id) {
                    *count -= 1;
                    if *count == 0 {
                        active.remove(boundary.id);
                    }
                }
            }
        }
    }

    if last < len {
        segments.push(Segment::plain(&text[offsets[last]..], last));
    }

    segments
}

fn active_ids(active: &BTreeMap<&str, usize>) -> BTreeSet<String> {
    active.keys().map(|id| id.to_string()).collect()
}

/// Annotations that cannot be laid over the given text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("annotation {id} spans {start}..{end}, outside text of length {len}")]
    OutOfBounds {
        id: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("annotation {id} covers no text")]
    EmptySpan { id: String },
}
