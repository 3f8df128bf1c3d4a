//! Article body document model.
//!
//! The normalized, storable representation of an article's rich content:
//! ordered paragraphs of styled spans, each span holding inline runs of
//! text, hyperlinks, or embedded images referencing registered media.
//! Persisted as a JSON document with camelCase field names.

use serde::{Deserialize, Serialize};

/// Fallback width (px) for an image with an unparseable inline width.
pub const DEFAULT_IMAGE_WIDTH: f64 = 300.0;

/// Fallback height (px) for an image with an unparseable inline height.
pub const DEFAULT_IMAGE_HEIGHT: f64 = 200.0;

/// A complete article body. Paragraph order is reading order; an empty
/// body is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleBody {
    pub paragraphs: Vec<Paragraph>,
}

impl ArticleBody {
    /// Collect the plain text of the body, one line per paragraph.
    ///
    /// Anchor inner markup is included as-is; images contribute nothing.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.paragraphs.len());
        for paragraph in &self.paragraphs {
            let mut line = String::new();
            for span in &paragraph.spans {
                for item in &span.content {
                    match item {
                        ContentItem::Text { content } => line.push_str(content),
                        ContentItem::Anchor { content, .. } => line.push_str(content),
                        ContentItem::Image { .. } => {}
                    }
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Media ids of every embedded image, in document order.
    pub fn media_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for paragraph in &self.paragraphs {
            for span in &paragraph.spans {
                for item in &span.content {
                    match item {
                        ContentItem::Image { media_id, .. } => ids.push(media_id.as_str()),
                        ContentItem::Text { .. } | ContentItem::Anchor { .. } => {}
                    }
                }
            }
        }
        ids
    }
}

/// A paragraph of styled spans.
///
/// Style values are CSS-length/keyword strings carried verbatim from the
/// source document; they are not parsed or validated numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub margin_left: String,
    pub margin_right: String,
    pub text_alignment: String,
    pub text_indent: String,
    pub spans: Vec<Span>,
}

impl Paragraph {
    /// Create an unstyled paragraph with source-format defaults.
    pub fn unstyled(spans: Vec<Span>) -> Self {
        Self {
            margin_left: "0".to_string(),
            margin_right: "0".to_string(),
            text_alignment: "left".to_string(),
            text_indent: "0".to_string(),
            spans,
        }
    }
}

/// A contiguous run of uniformly-styled inline content.
///
/// A span with an empty content sequence is retained: styling alone may
/// be meaningful to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub font_style: String,
    pub text_decoration: String,
    pub color: String,
    pub font_weight: String,
    pub content: Vec<ContentItem>,
}

impl Span {
    /// Create a span with default character styling.
    pub fn plain(content: Vec<ContentItem>) -> Self {
        Self {
            font_style: "normal".to_string(),
            text_decoration: "none".to_string(),
            color: "#000000".to_string(),
            font_weight: "400".to_string(),
            content,
        }
    }
}

/// One inline content run.
///
/// Serialized untagged: the wire shape discriminates the variant, so
/// declaration order matters. `Image` carries `mediaId`, `Anchor` adds
/// `href` over plain `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    /// Reference to a registered media entity, with the pixel dimensions
    /// captured at authoring time (independent of the asset's native size).
    Image {
        #[serde(rename = "mediaId")]
        media_id: String,
        width: f64,
        height: f64,
    },

    /// A hyperlink; `content` is the inner HTML of the link.
    Anchor { href: String, content: String },

    /// Raw (HTML-escaped) text, inline markup preserved as-is.
    Text { content: String },
}

impl ContentItem {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn anchor(href: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Anchor {
            href: href.into(),
            content: content.into(),
        }
    }

    pub fn image(media_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self::Image {
            media_id: media_id.into(),
            width,
            height,
        }
    }
}
