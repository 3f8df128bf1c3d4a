// src/transform/render.rs

//! Article body to HTML rendering.
//!
//! Walks the stored document model in order, emitting one `<p>` per
//! paragraph and one `<span>` per styled run. Stored text content is
//! already escaped markup and is emitted as-is; only attribute values
//! built here are escaped.

use std::collections::HashMap;

use crate::models::{ArticleBody, ContentItem, Media, Paragraph, Span};

/// Render a stored article body to HTML.
///
/// Image items are resolved against the registered media by id; an id
/// that is no longer registered is skipped with a warning, mirroring the
/// parser's drop policy for unresolvable sources.
pub fn render(body: &ArticleBody, media_by_id: &HashMap<String, Media>) -> String {
    let mut html = String::new();
    for paragraph in &body.paragraphs {
        render_paragraph(&mut html, paragraph, media_by_id);
    }
    html
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph, media_by_id: &HashMap<String, Media>) {
    out.push_str(&format!(
        r#"<p style="margin-left: {}; margin-right: {}; text-align: {}; text-indent: {}">"#,
        escape_attr(&paragraph.margin_left),
        escape_attr(&paragraph.margin_right),
        escape_attr(&paragraph.text_alignment),
        escape_attr(&paragraph.text_indent),
    ));
    for span in &paragraph.spans {
        render_span(out, span, media_by_id);
    }
    out.push_str("</p>\n");
}

fn render_span(out: &mut String, span: &Span, media_by_id: &HashMap<String, Media>) {
    out.push_str(&format!(
        r#"<span style="font-style: {}; text-decoration: {}; color: {}; font-weight: {}">"#,
        escape_attr(&span.font_style),
        escape_attr(&span.text_decoration),
        escape_attr(&span.color),
        escape_attr(&span.font_weight),
    ));
    for item in &span.content {
        match item {
            ContentItem::Text { content } => out.push_str(content),
            ContentItem::Anchor { href, content } => {
                out.push_str(&format!(r#"<a href="{}">{}</a>"#, escape_attr(href), content));
            }
            ContentItem::Image {
                media_id,
                width,
                height,
            } => match media_by_id.get(media_id) {
                Some(media) => {
                    out.push_str(&format!(
                        r#"<img src="{}" alt="{}" width="{}" height="{}">"#,
                        escape_attr(&media.content_url),
                        escape_attr(&media.alt_text),
                        format_px(*width),
                        format_px(*height),
                    ));
                }
                None => {
                    log::warn!("Skipping image with unregistered media id: {media_id}");
                }
            },
        }
    }
    out.push_str("</span>");
}

/// Escape a string for use inside a double-quoted attribute value.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a pixel dimension, dropping a trailing `.0` for whole values.
fn format_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleBody, ContentItem, Paragraph, Span};

    fn media_map() -> HashMap<String, Media> {
        let mut map = HashMap::new();
        map.insert(
            "m1".to_string(),
            Media {
                id: "m1".to_string(),
                content_url: "https://cdn.example.com/m1.jpg".to_string(),
                alt_text: "A \"photo\"".to_string(),
                attribution: None,
            },
        );
        map
    }

    #[test]
    fn test_render_paragraph_and_span_styles() {
        let body = ArticleBody {
            paragraphs: vec![Paragraph {
                margin_left: "10px".to_string(),
                margin_right: "0".to_string(),
                text_alignment: "center".to_string(),
                text_indent: "0".to_string(),
                spans: vec![Span::plain(vec![ContentItem::text("Hi")])],
            }],
        };
        let html = render(&body, &media_map());
        assert!(html.contains(r#"<p style="margin-left: 10px; margin-right: 0; text-align: center; text-indent: 0">"#));
        assert!(html.contains(
            r#"<span style="font-style: normal; text-decoration: none; color: #000000; font-weight: 400">Hi</span>"#
        ));
    }

    #[test]
    fn test_render_anchor_escapes_href_only() {
        let body = ArticleBody {
            paragraphs: vec![Paragraph::unstyled(vec![Span::plain(vec![
                ContentItem::anchor("https://x.com/?a=1&b=2", "see <em>more</em>"),
            ])])],
        };
        let html = render(&body, &media_map());
        assert!(html.contains(r#"<a href="https://x.com/?a=1&amp;b=2">see <em>more</em></a>"#));
    }

    #[test]
    fn test_render_image_from_registry() {
        let body = ArticleBody {
            paragraphs: vec![Paragraph::unstyled(vec![Span::plain(vec![
                ContentItem::image("m1", 100.0, 50.5),
            ])])],
        };
        let html = render(&body, &media_map());
        assert!(html.contains(
            r#"<img src="https://cdn.example.com/m1.jpg" alt="A &quot;photo&quot;" width="100" height="50.5">"#
        ));
    }

    #[test]
    fn test_render_skips_unregistered_image() {
        let body = ArticleBody {
            paragraphs: vec![Paragraph::unstyled(vec![Span::plain(vec![
                ContentItem::text("before"),
                ContentItem::image("gone", 10.0, 10.0),
                ContentItem::text("after"),
            ])])],
        };
        let html = render(&body, &media_map());
        assert!(html.contains("beforeafter"));
        assert!(!html.contains("<img"));
    }
}
