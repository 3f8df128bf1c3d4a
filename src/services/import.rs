// src/services/import.rs

//! Document import service.
//!
//! Fetches a word-processor HTML export, registers every embedded image
//! as a media entity, and runs the document transform to produce a draft
//! article. Media registration happens before the body is parsed and is
//! not transactional with it: an import that fails after registration
//! leaves orphaned media rows behind, which is tolerated. Media is
//! independently addressable and harmless if unreferenced.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use scraper::{Html, Selector};
use sha2::{Digest, Sha256};
use url::Url;

use crate::config::ImporterConfig;
use crate::error::{AppError, Result};
use crate::models::{Article, Media, MediaIndex};
use crate::storage::ArticleStore;
use crate::transform;
use crate::utils::{self, http};

/// Capability for obtaining an editor-side access token.
///
/// The source system reached for a browser-global object here; the
/// token source is injected instead so callers decide where credentials
/// come from.
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> Result<String>;
}

/// Token provider wrapping a fixed string (e.g. read from the
/// environment by the CLI).
pub struct StaticTokenProvider(String);

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl AccessTokenProvider for StaticTokenProvider {
    fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Summary of an import run.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub article_id: String,
    pub paragraph_count: usize,
    pub media_registered: usize,
    pub media_failed: usize,
}

/// A distinct image reference found in an export document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageRef {
    file_name: String,
    src: String,
    alt_text: String,
}

/// Service for importing editor exports as draft articles.
pub struct DocumentImporter {
    config: ImporterConfig,
    client: reqwest::Client,
    tokens: Option<Arc<dyn AccessTokenProvider>>,
}

impl DocumentImporter {
    /// Create a new importer with the given configuration.
    pub fn new(config: &ImporterConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            client: http::create_async_client(config)?,
            tokens: None,
        })
    }

    /// Attach an access token source for authenticated export fetches.
    pub fn with_token_provider(mut self, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Import the export at `url` as a new draft article.
    pub async fn import(
        &self,
        store: &dyn ArticleStore,
        url: &str,
        title: &str,
        byline: &str,
        id: Option<String>,
    ) -> Result<(Article, ImportOutcome)> {
        let base_url = Url::parse(url)?;
        let html = self.fetch_export(&base_url).await?;

        let (media, media_failed) = self.register_media(&html, &base_url).await?;
        // Persisted before the body parse: registration is side-effectful
        // and survives a failed import.
        store.save_media(&media).await?;

        let body = transform::parse_document(&html, &media, Some(base_url))?;

        let article_id = id.unwrap_or_else(|| utils::slugify(title));
        if article_id.is_empty() {
            return Err(AppError::validation("Article id/title produced an empty slug"));
        }
        let article = Article::draft(&article_id, title, byline, body);
        store.save_article(&article).await?;

        let outcome = ImportOutcome {
            article_id,
            paragraph_count: article.body.paragraphs.len(),
            media_registered: media.len(),
            media_failed,
        };
        Ok((article, outcome))
    }

    /// Fetch the export HTML, attaching a bearer token when a provider
    /// is configured.
    pub async fn fetch_export(&self, url: &Url) -> Result<String> {
        let token = self.bearer()?;
        http::fetch_text(&self.client, url.as_str(), token.as_deref())
            .await
            .map_err(|e| AppError::import(url.as_str(), e))
    }

    /// Download and register every distinct image of the export.
    ///
    /// Returns the registry plus the count of failed downloads; failures
    /// are logged and skipped, and the parser later drops those images.
    async fn register_media(&self, html: &str, base_url: &Url) -> Result<(MediaIndex, usize)> {
        let refs = collect_image_refs(html, base_url)?;
        let token = self.bearer()?;

        let concurrency = self.config.max_concurrent_downloads.max(1);
        let downloads: Vec<(ImageRef, Result<Vec<u8>>)> = stream::iter(refs)
            .map(|image_ref| {
                let client = &self.client;
                let token = token.as_deref();
                async move {
                    let result = http::fetch_bytes(client, &image_ref.src, token).await;
                    (image_ref, result)
                }
            })
            // `buffered`, not `buffer_unordered`: registration order must
            // stay document order for first-match resolution.
            .buffered(concurrency)
            .collect()
            .await;

        let mut media = MediaIndex::new();
        let mut failed = 0;
        for (image_ref, result) in downloads {
            match result {
                Ok(bytes) => {
                    media.register(
                        image_ref.file_name,
                        Media {
                            id: media_id(&bytes),
                            content_url: image_ref.src,
                            alt_text: image_ref.alt_text,
                            attribution: None,
                        },
                    );
                }
                Err(error) => {
                    failed += 1;
                    log::warn!("Failed to download image {}: {}", image_ref.src, error);
                }
            }
        }
        Ok((media, failed))
    }

    fn bearer(&self) -> Result<Option<String>> {
        self.tokens
            .as_ref()
            .map(|t| t.access_token())
            .transpose()
    }
}

/// Collect distinct image references from an export, in document order.
fn collect_image_refs(html: &str, base_url: &Url) -> Result<Vec<ImageRef>> {
    let document = Html::parse_document(html);
    let img_sel =
        Selector::parse("img").map_err(|e| AppError::selector("img", format!("{e:?}")))?;

    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    for img in document.select(&img_sel) {
        let Some(raw_src) = img.value().attr("src") else {
            continue;
        };
        let src = utils::resolve_url(base_url, raw_src);
        let file_name = utils::file_name_from_src(&src);
        if file_name.is_empty() || !seen.insert(file_name.clone()) {
            continue;
        }
        refs.push(ImageRef {
            file_name,
            src,
            alt_text: img.value().attr("alt").unwrap_or("").to_string(),
        });
    }
    Ok(refs)
}

/// Content-addressed media identifier: a truncated hex digest of the
/// asset bytes, so re-importing the same image registers the same id.
fn media_id(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)[..16].to_string()
}
