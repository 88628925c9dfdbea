//! Selection capture and commit enablement
//!
//! The host reports the input's selection offsets on select, pointer-up,
//! key-up and focus-loss. Commit is enabled only while a non-empty
//! selection exists and the input still has focus.

use serde::{Deserialize, Serialize};

use crate::annotations::Selection;

/// Input events that carry selection offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionEventKind {
    Select,
    #[serde(alias = "mouseup")]
    PointerUp,
    KeyUp,
    #[serde(alias = "blur")]
    FocusOut,
}

/// A selection-changing event from the host input control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SelectionEvent {
    #[serde(rename = "event")]
    pub kind: SelectionEventKind,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl SelectionEvent {
    pub fn new(kind: SelectionEventKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Current selection plus focus state of the host input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selection: Option<Selection>,
    focused: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the selection reported by an input event
    pub fn apply(&mut self, event: &SelectionEvent) {
        self.selection = Selection::from_offsets(event.start, event.end);
        self.focused = event.kind != SelectionEventKind::FocusOut;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// A stale selection left behind by a blur never enables commit
    pub fn commit_enabled(&self) -> bool {
        self.selection.is_some() && self.focused
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_disabled() {
        let tracker = SelectionTracker::new();

        assert_eq!(tracker.selection(), None);
        assert!(!tracker.commit_enabled());
    }

    #[test]
    fn test_select_enables_commit() {
        let mut tracker = SelectionTracker::new();
        tracker.apply(&SelectionEvent::new(SelectionEventKind::PointerUp, 0, 5));

        assert_eq!(tracker.selection(), Selection::new(0, 5));
        assert!(tracker.commit_enabled());
    }

    #[test]
    fn test_collapsed_selection_disables_commit() {
        let mut tracker = SelectionTracker::new();
        tracker.apply(&SelectionEvent::new(SelectionEventKind::Select, 0, 5));
        tracker.apply(&SelectionEvent::new(SelectionEventKind::KeyUp, 3, 3));

        assert_eq!(tracker.selection(), None);
        assert!(!tracker.commit_enabled());
    }

    #[test]
    fn test_focus_out_disables_commit() {
        let mut tracker = SelectionTracker::new();
        tracker.apply(&SelectionEvent::new(SelectionEventKind::Select, 0, 5));
        tracker.apply(&SelectionEvent::new(SelectionEventKind::FocusOut, 0, 5));

        assert!(tracker.selection().is_some());
        assert!(!tracker.is_focused());
        assert!(!tracker.commit_enabled());

        tracker.apply(&SelectionEvent::new(SelectionEventKind::Select, 0, 5));
        assert!(tracker.commit_enabled());
    }

    #[test]
    fn test_event_deserialization_aliases() {
        let event: SelectionEvent =
            serde_json::from_str(r#"{"event": "mouseup", "start": 1, "end": 4}"#).unwrap();
        assert_eq!(event.kind, SelectionEventKind::PointerUp);

        let event: SelectionEvent = serde_json::from_str(r#"{"event": "focusout"}"#).unwrap();
        assert_eq!(event.kind, SelectionEventKind::FocusOut);
        assert_eq!(event.start, None);
    }
}
