//! HTML rendering module
//!
//! Provides markup for the annotation widget:
//! - Overlay spans for rendered segments
//! - Annotation list with remove controls
//!
//! All text is escaped with html-escape.

mod highlight_renderer;

pub use highlight_renderer::{render_annotation_list_html, render_overlay_html, HighlightConfig};
