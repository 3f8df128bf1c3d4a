// src/transform/mod.rs

//! Document transform: editor-export HTML to the article body model and
//! back.

mod parser;
mod render;
pub mod style;
mod validate;

pub use parser::DocumentParser;
pub use render::render;
pub use validate::validate;

use url::Url;

use crate::error::Result;
use crate::models::{ArticleBody, MediaIndex};

/// Parse an export document, resolving images against registered media.
///
/// Convenience wrapper over [`DocumentParser`].
pub fn parse_document(
    html: &str,
    media: &MediaIndex,
    base_url: Option<Url>,
) -> Result<ArticleBody> {
    let parser = DocumentParser::new(media);
    let parser = match base_url {
        Some(base) => parser.with_base_url(base),
        None => parser,
    };
    parser.parse(html)
}
