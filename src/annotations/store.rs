//! In-memory annotation store
//!
//! Insertion-ordered collection owned by a single editing session.

use super::error::{AnnotationError, SelectionFault};
use super::types::{char_len, char_slice, Annotation, Selection};

/// Ordered collection of annotations (oldest first)
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotation from the current selection
    ///
    /// Fails with `InvalidSelection` when the selection is absent, collapsed
    /// or outside the source text. The store is left unchanged on failure.
    pub fn add(
        &mut self,
        selection: Option<Selection>,
        source: &str,
        note: &str,
    ) -> Result<Annotation, AnnotationError> {
        let selection = selection.ok_or(SelectionFault::Missing)?;
        check_range(selection.start, selection.end, source)?;

        let annotation = Annotation::from_selection(selection, source, note);
        tracing::debug!(
            "Added annotation {} over {}..{}",
            annotation.id,
            annotation.start,
            annotation.end
        );
        self.annotations.push(annotation.clone());
        Ok(annotation)
    }

    /// Insert a host-supplied annotation, keeping its id
    ///
    /// An empty `text` field is filled from `source`.
    pub fn insert(&mut self, mut annotation: Annotation, source: &str) -> Result<(), AnnotationError> {
        check_range(annotation.start, annotation.end, source)?;
        if self.get(&annotation.id).is_some() {
            return Err(AnnotationError::DuplicateId(annotation.id));
        }
        if annotation.text.is_empty() {
            annotation.text = char_slice(source, annotation.start, annotation.end).to_string();
        }
        self.annotations.push(annotation);
        Ok(())
    }

    /// Remove an annotation by id
    ///
    /// Unknown ids are ignored: removals may race with re-renders.
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        tracing::debug!("Removed annotation {}", id);
        Some(self.annotations.remove(index))
    }

    /// Snapshot of all annotations in insertion order
    pub fn list(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

fn check_range(start: usize, end: usize, source: &str) -> Result<(), SelectionFault> {
    if start == end {
        return Err(SelectionFault::ZeroWidth { at: start });
    }
    let len = char_len(source);
    if start > end || end > len {
        return Err(SelectionFault::OutOfBounds { start, end, len });
    }
    Ok(())
}
