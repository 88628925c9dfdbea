//! Overlay engine
//!
//! Pure functions turning text plus (possibly overlapping) annotations into
//! an ordered partition of display segments. Identical inputs always give
//! identical output.

mod engine;
mod segment;

pub use engine::{render, try_render, OverlayError};
pub use segment::{Segment, SegmentKey};
