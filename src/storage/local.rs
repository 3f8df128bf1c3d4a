//! Local filesystem storage implementation.
//!
//! JSON collection files under a root directory, written atomically
//! (temp file + rename). Reorder plans are applied read-modify-write
//! against the article collection and land in one rename, which is the
//! transactional boundary the front-page density invariant relies on.
//! Callers serialize reorders; this store does not lock across
//! processes.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::frontpage::{self, FrontPageEntry, ReorderPlan};
use crate::models::{Article, Media, MediaIndex};
use crate::search::SearchIndex;
use crate::storage::{ArticleCollection, ArticleStore, MediaCollection};

const ARTICLES_FILE: &str = "articles.json";
const MEDIA_FILE: &str = "media.json";
const INDEX_FILE: &str = "index.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a new LocalStore rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load the article collection, empty when the file is absent.
    async fn load_collection(&self) -> Result<Vec<Article>> {
        match self.read_json::<ArticleCollection>(ARTICLES_FILE).await? {
            Some(data) => Ok(data.articles),
            None => Ok(Vec::new()),
        }
    }

    /// Write the article collection in one atomic replace.
    async fn write_collection(&self, articles: Vec<Article>) -> Result<()> {
        self.write_json(ARTICLES_FILE, &ArticleCollection::new(articles))
            .await
    }
}

#[async_trait]
impl ArticleStore for LocalStore {
    async fn save_article(&self, article: &Article) -> Result<()> {
        let mut articles = self.load_collection().await?;
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article.clone(),
            None => articles.push(article.clone()),
        }
        self.write_collection(articles).await
    }

    async fn load_article(&self, id: &str) -> Result<Option<Article>> {
        let articles = self.load_collection().await?;
        Ok(articles.into_iter().find(|a| a.id == id))
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        self.load_collection().await
    }

    async fn list_published(&self) -> Result<Vec<Article>> {
        let articles = self.load_collection().await?;
        Ok(articles.into_iter().filter(|a| a.is_published()).collect())
    }

    async fn front_page_snapshot(&self) -> Result<Vec<FrontPageEntry>> {
        let articles = self.load_collection().await?;
        Ok(articles.iter().map(Article::front_page_entry).collect())
    }

    async fn apply_reorder(&self, plan: &ReorderPlan) -> Result<()> {
        if plan.is_noop() {
            return Ok(());
        }

        let mut articles = self.load_collection().await?;
        for change in &plan.changes {
            match articles.iter_mut().find(|a| a.id == change.article_id) {
                Some(article) => article.front_page_index = change.new_index,
                None => {
                    return Err(AppError::consistency(
                        "apply_reorder",
                        format!("plan references unknown article {}", change.article_id),
                    ));
                }
            }
        }

        let snapshot: Vec<FrontPageEntry> =
            articles.iter().map(Article::front_page_entry).collect();
        if !frontpage::is_dense(&snapshot) {
            return Err(AppError::consistency(
                "apply_reorder",
                "plan application would leave a non-dense front-page sequence",
            ));
        }

        self.write_collection(articles).await
    }

    async fn set_featured(&self, id: &str) -> Result<()> {
        let mut articles = self.load_collection().await?;
        if !articles.iter().any(|a| a.id == id) {
            return Err(AppError::validation(format!("No article with id '{id}'")));
        }

        // Compact the target's ordinal slot away before it leaves the
        // sequence.
        let snapshot: Vec<FrontPageEntry> =
            articles.iter().map(Article::front_page_entry).collect();
        let removal = frontpage::remove_from_front_page(&snapshot, id);
        for change in &removal.changes {
            if let Some(article) = articles.iter_mut().find(|a| a.id == change.article_id) {
                article.front_page_index = change.new_index;
            }
        }

        for article in articles.iter_mut() {
            article.featured = article.id == id;
        }
        self.write_collection(articles).await
    }

    async fn save_media(&self, media: &MediaIndex) -> Result<()> {
        let mut registry = self.load_media().await?;
        for entry in media.iter() {
            registry.register(entry.file_name.clone(), entry.media.clone());
        }
        self.write_json(MEDIA_FILE, &MediaCollection::new(registry))
            .await
    }

    async fn load_media(&self) -> Result<MediaIndex> {
        match self.read_json::<MediaCollection>(MEDIA_FILE).await? {
            Some(data) => Ok(data.media),
            None => Ok(MediaIndex::new()),
        }
    }

    async fn media_by_id(&self) -> Result<HashMap<String, Media>> {
        let registry = self.load_media().await?;
        Ok(registry
            .iter()
            .map(|e| (e.media.id.clone(), e.media.clone()))
            .collect())
    }

    async fn save_search_index(&self, index: &SearchIndex) -> Result<()> {
        self.write_json(INDEX_FILE, index).await
    }

    async fn load_search_index(&self) -> Result<Option<SearchIndex>> {
        self.read_json(INDEX_FILE).await
    }
}
