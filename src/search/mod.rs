// src/search/mod.rs

//! Inverted index over published articles.
//!
//! Builds a static index mapping keywords to article ids, enabling the
//! public site's search without a backend search engine. Indexed fields:
//! title, byline, and body plain text.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::SearchConfig;
use crate::models::Article;

/// Inverted index for article search.
///
/// Maps normalized keywords to sorted lists of article ids.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchIndex {
    /// Version for cache busting
    pub version: u32,
    /// Total number of indexed articles
    pub article_count: usize,
    /// Total number of unique tokens
    pub token_count: usize,
    /// The inverted index: keyword -> list of article ids
    pub index: HashMap<String, Vec<String>>,
}

impl SearchIndex {
    /// Look up article ids matching every token of the query.
    pub fn lookup(&self, query: &str) -> Vec<String> {
        let tokens: Vec<String> = query
            .to_lowercase()
            .unicode_words()
            .map(String::from)
            .collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut matched: Option<HashSet<&String>> = None;
        for token in &tokens {
            let ids: HashSet<&String> = match self.index.get(token) {
                Some(ids) => ids.iter().collect(),
                None => return Vec::new(),
            };
            matched = Some(match matched {
                Some(prev) => prev.intersection(&ids).copied().collect(),
                None => ids,
            });
        }

        let mut result: Vec<String> = matched
            .unwrap_or_default()
            .into_iter()
            .cloned()
            .collect();
        result.sort();
        result
    }
}

/// Builder for constructing a search index.
pub struct IndexBuilder {
    config: SearchConfig,
    index: HashMap<String, HashSet<String>>,
    article_count: usize,
}

impl IndexBuilder {
    /// Create a new index builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create a new index builder with custom configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            index: HashMap::new(),
            article_count: 0,
        }
    }

    /// Add an article to the index.
    pub fn add_article(&mut self, article: &Article) {
        self.article_count += 1;

        let mut tokens = self.tokenize(&article.title);
        tokens.extend(self.tokenize(&article.byline));
        tokens.extend(self.tokenize(&article.body.plain_text()));
        tokens.truncate(self.config.max_tokens_per_article);

        for token in tokens {
            self.index
                .entry(token)
                .or_default()
                .insert(article.id.clone());
        }
    }

    /// Add multiple articles to the index.
    pub fn add_articles(&mut self, articles: &[Article]) {
        for article in articles {
            self.add_article(article);
        }
    }

    /// Build the final search index.
    pub fn build(self) -> SearchIndex {
        let token_count = self.index.len();
        let index: HashMap<String, Vec<String>> = self
            .index
            .into_iter()
            .map(|(k, v)| {
                let mut ids: Vec<_> = v.into_iter().collect();
                ids.sort(); // Deterministic output
                (k, ids)
            })
            .collect();

        SearchIndex {
            version: 1,
            article_count: self.article_count,
            token_count,
            index,
        }
    }

    /// Tokenize a string into normalized keywords.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.to_lowercase();

        // Use unicode-aware word segmentation
        normalized
            .unicode_words()
            .filter(|word| word.len() >= self.config.min_token_length)
            .filter(|word| !is_stopword(word))
            .map(String::from)
            .collect()
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a word is a common English stopword.
fn is_stopword(word: &str) -> bool {
    const STOPWORDS: &[&str] = &[
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "must",
        "shall", "of", "to", "in", "for", "on", "with", "at", "by", "from", "as", "or", "and",
        "but", "if", "then", "so", "than", // Common URL/HTML artifacts
        "http", "https", "www", "com", "html", "amp", "nbsp",
    ];
    STOPWORDS.contains(&word)
}

/// Build a search index from published articles only.
pub fn build_index(articles: &[Article]) -> SearchIndex {
    let mut builder = IndexBuilder::new();
    let published: Vec<Article> = articles
        .iter()
        .filter(|a| a.is_published())
        .cloned()
        .collect();
    builder.add_articles(&published);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ArticleBody, ContentItem, Paragraph, Span};

    fn sample_article(id: &str, title: &str, text: &str) -> Article {
        let body = ArticleBody {
            paragraphs: vec![Paragraph::unstyled(vec![Span::plain(vec![
                ContentItem::text(text),
            ])])],
        };
        let mut article = Article::draft(id, title, "Dana Writer", body);
        article.submit().unwrap();
        article.publish().unwrap();
        article
    }

    #[test]
    fn test_build_index_over_titles_and_bodies() {
        let articles = vec![
            sample_article("001", "Harbor cleanup begins", "volunteers gathered"),
            sample_article("002", "Budget vote delayed", "council members met"),
            sample_article("003", "Harbor festival returns", "music along the water"),
        ];

        let index = build_index(&articles);

        assert_eq!(index.article_count, 3);
        assert!(index.token_count > 0);

        let harbor_ids = index.index.get("harbor").expect("harbor indexed");
        assert!(harbor_ids.contains(&"001".to_string()));
        assert!(harbor_ids.contains(&"003".to_string()));
        assert!(!harbor_ids.contains(&"002".to_string()));

        // Body text is indexed too
        assert!(index.index.contains_key("volunteers"));
        // Byline tokens are searchable
        assert!(index.index.contains_key("dana"));
    }

    #[test]
    fn test_drafts_are_not_indexed() {
        let draft = Article::draft("d1", "Secret draft", "X", ArticleBody::default());
        let index = build_index(&[draft]);
        assert_eq!(index.article_count, 0);
        assert!(!index.index.contains_key("secret"));
    }

    #[test]
    fn test_stopword_filtering() {
        let articles = vec![sample_article("001", "the quick brown fox", "")];
        let index = build_index(&articles);

        assert!(!index.index.contains_key("the"));
        assert!(index.index.contains_key("quick"));
        assert!(index.index.contains_key("brown"));
        assert!(index.index.contains_key("fox"));
    }

    #[test]
    fn test_min_token_length() {
        let articles = vec![sample_article("001", "q w cd efg", "")];
        let index = build_index(&articles);

        assert!(!index.index.contains_key("q"));
        assert!(index.index.contains_key("cd"));
        assert!(index.index.contains_key("efg"));
    }

    #[test]
    fn test_lookup_intersects_query_tokens() {
        let articles = vec![
            sample_article("001", "Harbor cleanup begins", ""),
            sample_article("002", "Harbor festival returns", ""),
            sample_article("003", "Cleanup crew hiring", ""),
        ];
        let index = build_index(&articles);

        assert_eq!(index.lookup("harbor cleanup"), vec!["001".to_string()]);
        assert_eq!(
            index.lookup("Harbor"),
            vec!["001".to_string(), "002".to_string()]
        );
        assert!(index.lookup("nonexistent").is_empty());
        assert!(index.lookup("").is_empty());
    }
}
