//! Annotation module
//!
//! Annotation records, selections and the per-session annotation store.
//!
//! Annotations are created from a non-empty selection and keep a snapshot
//! of the text they covered. They are not adjusted when the source text is
//! edited afterwards.

mod error;
mod store;
mod types;

pub use error::{AnnotationError, SelectionFault};
pub use store::AnnotationStore;
pub use types::{char_len, char_slice, Annotation, Selection};
