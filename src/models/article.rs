//! Article entity and editorial workflow states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{AppError, Result};
use crate::frontpage::FrontPageEntry;
use crate::models::ArticleBody;

/// Editorial workflow state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Being written; not yet submitted for review
    Draft,
    /// Submitted, awaiting editor review
    InReview,
    /// Approved and publicly visible
    Published,
}

/// A published or in-progress article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier (slug)
    pub id: String,

    /// Headline
    pub title: String,

    /// Contributor byline
    pub byline: String,

    /// Editorial workflow state
    pub status: ArticleStatus,

    /// Rich body content
    pub body: ArticleBody,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Publication timestamp, set on publish
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Dense front-page position, None when not on the front page
    #[serde(default)]
    pub front_page_index: Option<u32>,

    /// Featured flag; the featured article sits above the ordinal sequence
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    /// Create a new draft article.
    pub fn draft(
        id: impl Into<String>,
        title: impl Into<String>,
        byline: impl Into<String>,
        body: ArticleBody,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            byline: byline.into(),
            status: ArticleStatus::Draft,
            body,
            created_at: Utc::now(),
            published_at: None,
            front_page_index: None,
            featured: false,
        }
    }

    /// Submit a draft for review.
    pub fn submit(&mut self) -> Result<()> {
        match self.status {
            ArticleStatus::Draft => {
                self.status = ArticleStatus::InReview;
                Ok(())
            }
            _ => Err(AppError::validation(format!(
                "Cannot submit article '{}' from {:?}",
                self.id, self.status
            ))),
        }
    }

    /// Approve a reviewed article and publish it.
    pub fn publish(&mut self) -> Result<()> {
        match self.status {
            ArticleStatus::InReview => {
                self.status = ArticleStatus::Published;
                self.published_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(AppError::validation(format!(
                "Cannot publish article '{}' from {:?}",
                self.id, self.status
            ))),
        }
    }

    /// Send a submitted article back to draft.
    pub fn reject(&mut self) -> Result<()> {
        match self.status {
            ArticleStatus::InReview => {
                self.status = ArticleStatus::Draft;
                Ok(())
            }
            _ => Err(AppError::validation(format!(
                "Cannot reject article '{}' from {:?}",
                self.id, self.status
            ))),
        }
    }

    /// Whether the article is publicly visible.
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// A short teaser: the body's leading text, truncated on a grapheme
    /// boundary with an ellipsis.
    pub fn teaser(&self, max_graphemes: usize) -> String {
        let text = self.body.plain_text();
        let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        let graphemes: Vec<&str> = first_line.graphemes(true).collect();
        if graphemes.len() <= max_graphemes {
            first_line.to_string()
        } else {
            let mut teaser: String = graphemes[..max_graphemes].concat();
            teaser.push('…');
            teaser
        }
    }

    /// Project the curation attributes for the ordinal manager.
    pub fn front_page_entry(&self) -> FrontPageEntry {
        FrontPageEntry {
            article_id: self.id.clone(),
            front_page_index: self.front_page_index,
            featured: self.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentItem, Paragraph, Span};

    fn article_with_text(text: &str) -> Article {
        let body = ArticleBody {
            paragraphs: vec![Paragraph::unstyled(vec![Span::plain(vec![
                ContentItem::text(text),
            ])])],
        };
        Article::draft("test-article", "Test", "A. Reporter", body)
    }

    #[test]
    fn test_workflow_happy_path() {
        let mut article = article_with_text("body");
        assert_eq!(article.status, ArticleStatus::Draft);

        article.submit().unwrap();
        assert_eq!(article.status, ArticleStatus::InReview);

        article.publish().unwrap();
        assert!(article.is_published());
        assert!(article.published_at.is_some());
    }

    #[test]
    fn test_workflow_rejects_invalid_transitions() {
        let mut article = article_with_text("body");
        assert!(article.publish().is_err());

        article.submit().unwrap();
        assert!(article.submit().is_err());

        article.reject().unwrap();
        assert_eq!(article.status, ArticleStatus::Draft);
    }

    #[test]
    fn test_teaser_truncates_on_graphemes() {
        let article = article_with_text("한국어 기사 본문입니다");
        let teaser = article.teaser(5);
        assert_eq!(teaser, "한국어 기…");
    }

    #[test]
    fn test_teaser_short_text_unchanged() {
        let article = article_with_text("Short");
        assert_eq!(article.teaser(80), "Short");
    }

    #[test]
    fn test_front_page_entry_projection() {
        let mut article = article_with_text("body");
        article.front_page_index = Some(2);
        let entry = article.front_page_entry();
        assert_eq!(entry.article_id, "test-article");
        assert_eq!(entry.front_page_index, Some(2));
        assert!(!entry.featured);
    }
}
