//! Storage abstractions for article, media, and index persistence.
//!
//! The content core computes; the store owns durability and the
//! transactional discipline around front-page reorders: a whole
//! [`ReorderPlan`] is applied in one atomic collection write, so no
//! reader ever observes duplicate ordinals or a half-applied swap.
//!
//! ## Directory Structure
//!
//! ```text
//! store/
//! ├── articles.json         # Article collection (bodies embedded)
//! ├── media.json            # Registered media, keyed by file name
//! └── index.json            # Search index over published articles
//! ```

pub mod local;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frontpage::{FrontPageEntry, ReorderPlan};
use crate::models::{Article, Media, MediaIndex};
use crate::search::SearchIndex;

// Re-export for convenience
pub use local::LocalStore;

/// Envelope for the article collection file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCollection {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total article count
    pub count: usize,
    /// The articles
    pub articles: Vec<Article>,
}

impl ArticleCollection {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: articles.len(),
            articles,
        }
    }
}

/// Envelope for the media registry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaCollection {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total registered media count
    pub count: usize,
    /// The registry
    pub media: MediaIndex,
}

impl MediaCollection {
    pub fn new(media: MediaIndex) -> Self {
        Self {
            updated_at: Utc::now(),
            count: media.len(),
            media,
        }
    }
}

/// Trait for article storage backends.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert or replace an article by id.
    async fn save_article(&self, article: &Article) -> Result<()>;

    /// Load an article by id.
    async fn load_article(&self, id: &str) -> Result<Option<Article>>;

    /// Load the full article collection.
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Load published articles only.
    async fn list_published(&self) -> Result<Vec<Article>>;

    /// Project the curation attributes of every article.
    async fn front_page_snapshot(&self) -> Result<Vec<FrontPageEntry>>;

    /// Apply a reorder plan as a single transactional write.
    ///
    /// Refuses (without writing) a plan whose application would leave a
    /// non-dense ordinal sequence.
    async fn apply_reorder(&self, plan: &ReorderPlan) -> Result<()>;

    /// Mark one article featured, clearing any previous featured flag in
    /// the same write. A featured article leaves the ordinal sequence;
    /// its slot is compacted away.
    async fn set_featured(&self, id: &str) -> Result<()>;

    /// Merge newly registered media into the registry.
    async fn save_media(&self, media: &MediaIndex) -> Result<()>;

    /// Load the media registry.
    async fn load_media(&self) -> Result<MediaIndex>;

    /// Registered media keyed by media id, for rendering.
    async fn media_by_id(&self) -> Result<HashMap<String, Media>>;

    /// Persist the search index.
    async fn save_search_index(&self, index: &SearchIndex) -> Result<()>;

    /// Load the search index, if one has been built.
    async fn load_search_index(&self) -> Result<Option<SearchIndex>>;
}
