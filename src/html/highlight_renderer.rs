//! Highlight rendering for the text overlay
//!
//! Turns overlay segments into `<span>` markup laid over the editable input
//! and renders the annotation list shown beneath it.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;

use crate::annotations::Annotation;
use crate::overlay::Segment;

/// Configuration for highlight rendering
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    /// CSS class prefix for highlights
    pub class_prefix: String,
    /// Data attribute listing the active annotation ids
    pub ids_attribute: String,
    /// Data attribute carrying a single annotation id
    pub id_attribute: String,
    /// Opacity offset added to every highlighted segment
    pub base_opacity: f32,
    /// Opacity added per overlapping annotation
    pub opacity_step: f32,
    /// Upper bound for opacity
    pub max_opacity: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            class_prefix: "sa-highlight".to_string(),
            ids_attribute: "data-annotation-ids".to_string(),
            id_attribute: "data-annotation-id".to_string(),
            base_opacity: 0.2,
            opacity_step: 0.2,
            max_opacity: 1.0,
        }
    }
}

impl HighlightConfig {
    /// Highlight opacity for a segment covered by `depth` annotations
    pub fn opacity(&self, depth: usize) -> f32 {
        (self.base_opacity + depth as f32 * self.opacity_step).min(self.max_opacity)
    }
}

/// Render segments as overlay spans
///
/// The container keeps whitespace so the spans line up character for
/// character with the input underneath.
pub fn render_overlay_html(segments: &[Segment], config: &HighlightConfig) -> String {
    let mut html = format!(
        "<div class=\"{}-overlay\" style=\"white-space: pre-wrap;\">",
        config.class_prefix
    );
    for segment in segments {
        html.push_str(&format_segment_span(segment, config));
    }
    html.push_str("</div>");
    html
}

/// Format a single segment span
fn format_segment_span(segment: &Segment, config: &HighlightConfig) -> String {
    let key = segment.key().to_string();
    let text = encode_text(&segment.text);

    if !segment.is_highlighted() {
        return format!("<span id=\"{}\">{}</span>", key, text);
    }

    let ids = segment
        .active_annotation_ids
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "<span id=\"{}\" class=\"{} {}-depth-{}\" {}=\"{}\" style=\"opacity: {:.3};\">{}</span>",
        encode_double_quoted_attribute(&key),
        config.class_prefix,
        config.class_prefix,
        segment.depth(),
        config.ids_attribute,
        encode_double_quoted_attribute(&ids),
        config.opacity(segment.depth()),
        text
    )
}

/// Render the annotation list with a remove control per item
pub fn render_annotation_list_html(annotations: &[Annotation], config: &HighlightConfig) -> String {
    let mut html = format!("<div class=\"{}-list\">", config.class_prefix);
    for annotation in annotations {
        let id = encode_double_quoted_attribute(&annotation.id);
        html.push_str(&format!(
            "<div class=\"{prefix}-item\" {attr}=\"{id}\">\
             <div class=\"{prefix}-quote\">&quot;{text}&quot;</div>\
             <div class=\"{prefix}-note\">{note}</div>\
             <button class=\"{prefix}-remove\" {attr}=\"{id}\">Remove</button>\
             </div>",
            prefix = config.class_prefix,
            attr = config.id_attribute,
            id = id,
            text = encode_text(&annotation.text),
            note = encode_text(&annotation.note),
        ));
    }
    html.push_str("</div>");
    html
}
