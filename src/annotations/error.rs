//! Annotation errors

use thiserror::Error;

/// Why a selection cannot be turned into an annotation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionFault {
    #[error("no selection")]
    Missing,

    #[error("selection is empty at offset {at}")]
    ZeroWidth { at: usize },

    #[error("range {start}..{end} is outside text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

/// Errors raised by annotation store and commit operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionFault),

    #[error("annotation id already exists: {0}")]
    DuplicateId(String),

    #[error("commit is disabled: no active selection in a focused input")]
    CommitDisabled,
}
