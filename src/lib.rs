//! Span Annotator Library
//!
//! Backend for an interactive text annotation widget. Users select ranges
//! of text and attach notes; the text is rendered with every annotated span
//! highlighted, including overlapping spans.
//!
//! # Modules
//!
//! - `overlay`: Sweep-line engine partitioning text into highlight segments
//! - `annotations`: Annotation records and the per-session store
//! - `session`: Widget instances, selection tracking and the session registry
//! - `html`: Overlay and annotation list markup
//! - `routes`: HTTP API serving sessions to a host UI

pub mod annotations;
pub mod config;
pub mod error;
pub mod html;
pub mod overlay;
pub mod routes;
pub mod session;
pub mod state;
