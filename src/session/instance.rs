//! A single annotation editing session
//!
//! Owns the text, the annotation store and the selection state of one
//! widget instance. Every mutation re-renders the overlay before returning,
//! so the cached segments always match the current text and annotations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::annotations::{Annotation, AnnotationError, AnnotationStore, Selection};
use crate::overlay::{self, Segment};

use super::selection::{SelectionEvent, SelectionTracker};

/// Handle identifying one widget instance
pub type SessionId = String;

/// Text, annotations and rendered overlay of one widget instance
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    text: String,
    store: AnnotationStore,
    tracker: SelectionTracker,
    segments: Vec<Segment>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Lightweight listing entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: SessionId,
    pub text_length: usize,
    pub annotation_count: usize,
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with a fresh id
    pub fn new(text: &str) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text)
    }

    pub fn with_id(id: SessionId, text: &str) -> Self {
        let now = Utc::now();
        let mut session = Self {
            id,
            text: text.to_string(),
            store: AnnotationStore::new(),
            tracker: SelectionTracker::new(),
            segments: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        };
        session.rerender();
        session
    }

    /// Seed the session with existing annotations
    ///
    /// Nothing is added if any annotation is invalid for the current text.
    pub fn with_annotations(
        mut self,
        annotations: Vec<Annotation>,
    ) -> Result<Self, AnnotationError> {
        let mut store = AnnotationStore::new();
        for annotation in annotations {
            store.insert(annotation, &self.text)?;
        }
        self.store = store;
        self.rerender();
        Ok(self)
    }

    /// Replace the text
    ///
    /// Existing annotations keep their offsets and text snapshots.
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.touch();
    }

    /// Record a selection event from the host input
    pub fn apply_selection_event(&mut self, event: &SelectionEvent) {
        self.tracker.apply(event);
    }

    /// Annotate the current selection
    ///
    /// Requires a non-empty selection in a focused input.
    pub fn commit(&mut self, note: &str) -> Result<Annotation, AnnotationError> {
        if !self.tracker.commit_enabled() {
            return Err(AnnotationError::CommitDisabled);
        }
        let annotation = self.add_annotation(self.tracker.selection(), note)?;
        self.tracker.clear();
        Ok(annotation)
    }

    /// Annotate an explicit range, bypassing selection tracking
    pub fn add_annotation(
        &mut self,
        selection: Option<Selection>,
        note: &str,
    ) -> Result<Annotation, AnnotationError> {
        let annotation = self.store.add(selection, &self.text, note)?;
        self.touch();
        Ok(annotation)
    }

    /// Remove an annotation; unknown ids are ignored
    pub fn remove_annotation(&mut self, annotation_id: &str) -> Option<Annotation> {
        let removed = self.store.remove(annotation_id)?;
        self.touch();
        Some(removed)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.store.list()
    }

    /// Segments rendered from the current text and annotations
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn selection(&self) -> Option<Selection> {
        self.tracker.selection()
    }

    pub fn commit_enabled(&self) -> bool {
        self.tracker.commit_enabled()
    }

    /// Incremented on every change to text or annotations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            text_length: self.text.chars().count(),
            annotation_count: self.store.len(),
            revision: self.revision,
            updated_at: self.updated_at,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
        self.rerender();
    }

    fn rerender(&mut self) {
        self.segments = overlay::render(&self.text, self.store.list());
        tracing::trace!(
            "Session {} rev {} rendered {} segments",
            self.id,
            self.revision,
            self.segments.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::SelectionFault;
    use crate::session::SelectionEventKind;

    fn layout(session: &Session) -> Vec<(usize, usize, usize)> {
        session
            .segments()
            .iter()
            .map(|s| (s.start_offset, s.end_offset(), s.depth()))
            .collect()
    }

    fn select(session: &mut Session, start: usize, end: usize) {
        session.apply_selection_event(&SelectionEvent::new(SelectionEventKind::Select, start, end));
    }

    #[test]
    fn test_new_session_renders_plain_text() {
        let session = Session::new("hello world");

        assert_eq!(layout(&session), vec![(0, 11, 0)]);
        assert_eq!(session.revision(), 0);
    }

    #[test]
    fn test_hello_world_scenario() {
        let mut session = Session::new("hello world");

        select(&mut session, 0, 5);
        let a = session.commit("greeting").unwrap();
        assert_eq!(a.text, "hello");
        assert_eq!(layout(&session), vec![(0, 5, 1), (5, 11, 0)]);

        select(&mut session, 3, 8);
        let b = session.commit("overlap").unwrap();
        assert_eq!(
            layout(&session),
            vec![(0, 3, 1), (3, 5, 2), (5, 8, 1), (8, 11, 0)]
        );
        assert!(session.segments()[2].active_annotation_ids.contains(&b.id));

        session.remove_annotation(&a.id);
        assert_eq!(layout(&session), vec![(0, 3, 0), (3, 8, 1), (8, 11, 0)]);
        assert!(session.segments()[1].active_annotation_ids.contains(&b.id));
    }

    #[test]
    fn test_commit_requires_focus() {
        let mut session = Session::new("hello world");
        select(&mut session, 0, 5);
        session.apply_selection_event(&SelectionEvent::new(SelectionEventKind::FocusOut, 0, 5));

        assert_eq!(session.commit("late"), Err(AnnotationError::CommitDisabled));
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn test_commit_clears_selection() {
        let mut session = Session::new("hello world");
        select(&mut session, 0, 5);
        session.commit("once").unwrap();

        assert!(!session.commit_enabled());
        assert_eq!(session.commit("twice"), Err(AnnotationError::CommitDisabled));
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn test_commit_stale_selection_after_text_shrinks() {
        let mut session = Session::new("hello world");
        select(&mut session, 6, 11);
        session.set_text("hello");

        let err = session.commit("gone").unwrap_err();
        assert!(matches!(
            err,
            AnnotationError::InvalidSelection(SelectionFault::OutOfBounds { len: 5, .. })
        ));
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn test_text_edit_keeps_annotation_snapshot() {
        let mut session = Session::new("hello world");
        let a = session.add_annotation(Selection::new(6, 11), "noun").unwrap();
        session.set_text("hello there");

        assert_eq!(session.annotations()[0].text, "world");
        assert_eq!(layout(&session), vec![(0, 6, 0), (6, 11, 1)]);
        assert_eq!(session.segments()[1].text, "there");
        assert_eq!(session.annotations()[0].id, a.id);
    }

    #[test]
    fn test_text_edit_clips_overlay() {
        let mut session = Session::new("hello world");
        session.add_annotation(Selection::new(3, 11), "tail").unwrap();
        session.set_text("hello");

        assert_eq!(layout(&session), vec![(0, 3, 0), (3, 5, 1)]);
    }

    #[test]
    fn test_remove_unknown_does_not_bump_revision() {
        let mut session = Session::new("hello world");
        session.add_annotation(Selection::new(0, 5), "greeting").unwrap();
        let revision = session.revision();

        assert!(session.remove_annotation("nonexistent-id").is_none());
        assert_eq!(session.revision(), revision);
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn test_with_annotations_rejects_invalid_seed() {
        let seed = vec![Annotation {
            id: "seed".to_string(),
            start: 4,
            end: 40,
            text: String::new(),
            note: String::new(),
        }];
        let result = Session::new("short text").with_annotations(seed);

        assert!(matches!(result, Err(AnnotationError::InvalidSelection(_))));
    }

    #[test]
    fn test_summary() {
        let mut session = Session::with_id("s-1".to_string(), "naïve");
        session.add_annotation(Selection::new(0, 2), "").unwrap();
        let summary = session.summary();

        assert_eq!(summary.id, "s-1");
        assert_eq!(summary.text_length, 5);
        assert_eq!(summary.annotation_count, 1);
        assert_eq!(summary.revision, 1);
    }
}
