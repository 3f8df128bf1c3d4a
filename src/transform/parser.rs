// src/transform/parser.rs

//! Editor-export HTML to article body conversion.
//!
//! The source documents are self-contained HTML exports from a
//! word-processor-style editor: a title paragraph followed by content
//! paragraphs, each made of style-annotated `<span>` runs containing
//! anchors, images, or bare text.

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    ArticleBody, ContentItem, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, MediaIndex, Paragraph,
    Span,
};
use crate::transform::style::InlineStyle;
use crate::utils::resolve_url;

/// Parser from editor-export HTML to the article body model.
pub struct DocumentParser<'a> {
    media: &'a MediaIndex,
    base_url: Option<Url>,
}

impl<'a> DocumentParser<'a> {
    /// Create a parser resolving image references against the given
    /// media registry.
    pub fn new(media: &'a MediaIndex) -> Self {
        Self {
            media,
            base_url: None,
        }
    }

    /// Set the document base URL used to absolutize anchor hrefs.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Parse an export document into an article body.
    ///
    /// The first paragraph of the export is the document title inserted
    /// by the editor; the platform keeps titles separately, so it is
    /// skipped. A document with no further paragraphs yields an empty
    /// body.
    pub fn parse(&self, html: &str) -> Result<ArticleBody> {
        let document = Html::parse_document(html);
        let paragraph_sel = parse_selector("body > p")?;

        let paragraphs = document
            .select(&paragraph_sel)
            .skip(1)
            .map(|p| self.parse_paragraph(&p))
            .collect();

        Ok(ArticleBody { paragraphs })
    }

    fn parse_paragraph(&self, element: &ElementRef<'_>) -> Paragraph {
        let style = InlineStyle::of(element);

        let spans = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "span")
            .map(|span| self.parse_span(&span))
            .collect();

        Paragraph {
            margin_left: style.get_or("margin-left", "0").to_string(),
            margin_right: style.get_or("margin-right", "0").to_string(),
            text_alignment: style.get_or("text-align", "left").to_string(),
            text_indent: style.get_or("text-indent", "0").to_string(),
            spans,
        }
    }

    fn parse_span(&self, element: &ElementRef<'_>) -> Span {
        let style = InlineStyle::of(element);

        let mut content = Vec::new();
        for node in element.children() {
            if let Some(child) = ElementRef::wrap(node) {
                match child.value().name() {
                    "a" => content.push(self.parse_anchor(&child)),
                    "img" => {
                        if let Some(item) = self.parse_image(&child) {
                            content.push(item);
                        }
                    }
                    // Other inline elements contribute their text content.
                    _ => content.push(ContentItem::text(child.text().collect::<String>())),
                }
            } else {
                match node.value() {
                    Node::Text(text) => content.push(ContentItem::text(text.text.to_string())),
                    Node::Comment(comment) => {
                        content.push(ContentItem::text(comment.comment.to_string()))
                    }
                    _ => content.push(ContentItem::text("")),
                }
            }
        }

        Span {
            font_style: style.get_or("font-style", "normal").to_string(),
            text_decoration: style.get_or("text-decoration", "none").to_string(),
            color: style.get_or("color", "#000000").to_string(),
            font_weight: style.get_or("font-weight", "400").to_string(),
            content,
        }
    }

    fn parse_anchor(&self, element: &ElementRef<'_>) -> ContentItem {
        let raw_href = element.value().attr("href").unwrap_or("");
        let href = match &self.base_url {
            Some(base) => resolve_url(base, raw_href),
            None => raw_href.to_string(),
        };
        ContentItem::anchor(href, element.inner_html())
    }

    /// Resolve an `<img>` to an image content item, or None when its src
    /// matches no registered media (the item is dropped, not an error).
    fn parse_image(&self, element: &ElementRef<'_>) -> Option<ContentItem> {
        let style = InlineStyle::of(element);
        // Unparseable dimensions indicate unexpected export markup;
        // recovered with fixed fallbacks rather than failing the parse.
        let width = style.px("width").unwrap_or(DEFAULT_IMAGE_WIDTH);
        let height = style.px("height").unwrap_or(DEFAULT_IMAGE_HEIGHT);

        let src = element.value().attr("src").unwrap_or("");
        match self.media.resolve(src) {
            Some(media) => Some(ContentItem::image(&media.id, width, height)),
            None => {
                log::debug!("Dropping image with unregistered src: {src}");
                None
            }
        }
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Media;

    fn media_index() -> MediaIndex {
        let mut index = MediaIndex::new();
        index.register(
            "photo1.jpg",
            Media {
                id: "m1".to_string(),
                content_url: "https://cdn.example.com/m1".to_string(),
                alt_text: "A photo".to_string(),
                attribution: None,
            },
        );
        index
    }

    fn parse(html: &str) -> ArticleBody {
        let index = media_index();
        DocumentParser::new(&index).parse(html).unwrap()
    }

    fn doc(body: &str) -> String {
        format!("<html><body><p>Title</p>{body}</body></html>")
    }

    #[test]
    fn test_title_only_document_yields_empty_body() {
        let body = parse("<html><body><p>Title</p></body></html>");
        assert!(body.paragraphs.is_empty());
    }

    #[test]
    fn test_first_paragraph_is_skipped() {
        let body = parse(&doc("<p><span>Content</span></p>"));
        assert_eq!(body.paragraphs.len(), 1);
        assert_eq!(body.plain_text(), "Content");
    }

    #[test]
    fn test_paragraph_style_defaults() {
        let body = parse(&doc("<p><span>x</span></p>"));
        let paragraph = &body.paragraphs[0];
        assert_eq!(paragraph.text_alignment, "left");
        assert_eq!(paragraph.text_indent, "0");
        assert_eq!(paragraph.margin_left, "0");
        assert_eq!(paragraph.margin_right, "0");
    }

    #[test]
    fn test_paragraph_styles_copied_verbatim() {
        let body = parse(&doc(
            r#"<p style="text-align: center; margin-left: 36pt"><span>x</span></p>"#,
        ));
        let paragraph = &body.paragraphs[0];
        assert_eq!(paragraph.text_alignment, "center");
        assert_eq!(paragraph.margin_left, "36pt");
    }

    #[test]
    fn test_span_style_defaults_and_overrides() {
        let body = parse(&doc(
            r#"<p><span style="font-weight: 700; color: #ff0000">x</span></p>"#,
        ));
        let span = &body.paragraphs[0].spans[0];
        assert_eq!(span.font_weight, "700");
        assert_eq!(span.color, "#ff0000");
        assert_eq!(span.font_style, "normal");
        assert_eq!(span.text_decoration, "none");
    }

    #[test]
    fn test_text_and_anchor_order() {
        let body = parse(&doc(
            r#"<p><span>Hello<a href="https://x.com">there</a></span></p>"#,
        ));
        let span = &body.paragraphs[0].spans[0];
        assert_eq!(
            span.content,
            vec![
                ContentItem::text("Hello"),
                ContentItem::anchor("https://x.com", "there"),
            ]
        );
    }

    #[test]
    fn test_anchor_href_resolved_against_base() {
        let index = media_index();
        let base = Url::parse("https://docs.example.com/d/abc/export").unwrap();
        let body = DocumentParser::new(&index)
            .with_base_url(base)
            .parse(&doc(r#"<p><span><a href="/news/item">go</a></span></p>"#))
            .unwrap();
        assert_eq!(
            body.paragraphs[0].spans[0].content[0],
            ContentItem::anchor("https://docs.example.com/news/item", "go")
        );
    }

    #[test]
    fn test_image_resolved_with_dimensions() {
        let body = parse(&doc(
            r#"<p><span><img src="https://export.example.com/images/photo1.jpg" style="width: 100px; height: 50px"></span></p>"#,
        ));
        assert_eq!(
            body.paragraphs[0].spans[0].content,
            vec![ContentItem::image("m1", 100.0, 50.0)]
        );
    }

    #[test]
    fn test_image_malformed_dimensions_fall_back() {
        let body = parse(&doc(
            r#"<p><span><img src="photo1.jpg" style="width: auto"></span></p>"#,
        ));
        assert_eq!(
            body.paragraphs[0].spans[0].content,
            vec![ContentItem::image("m1", 300.0, 200.0)]
        );
    }

    #[test]
    fn test_unregistered_image_dropped_siblings_kept() {
        let body = parse(&doc(
            r#"<p><span>before<img src="unknown.png" style="width:10px;height:10px">after</span></p>"#,
        ));
        assert_eq!(
            body.paragraphs[0].spans[0].content,
            vec![ContentItem::text("before"), ContentItem::text("after")]
        );
    }

    #[test]
    fn test_empty_span_is_retained() {
        let body = parse(&doc(r#"<p><span style="color: #00ff00"></span></p>"#));
        let span = &body.paragraphs[0].spans[0];
        assert!(span.content.is_empty());
        assert_eq!(span.color, "#00ff00");
    }

    #[test]
    fn test_non_span_paragraph_children_ignored() {
        let body = parse(&doc("<p>bare text<span>kept</span><b>bold</b></p>"));
        assert_eq!(body.paragraphs[0].spans.len(), 1);
        assert_eq!(body.plain_text(), "kept");
    }

    #[test]
    fn test_other_inline_elements_become_text() {
        let body = parse(&doc("<p><span><b>bold</b></span></p>"));
        assert_eq!(
            body.paragraphs[0].spans[0].content,
            vec![ContentItem::text("bold")]
        );
    }

    #[test]
    fn test_paragraph_order_preserved() {
        let body = parse(&doc(
            "<p><span>one</span></p><p><span>two</span></p><p><span>three</span></p>",
        ));
        assert_eq!(body.plain_text(), "one\ntwo\nthree");
    }
}
