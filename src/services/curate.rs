// src/services/curate.rs

//! Front-page curation service.
//!
//! Bridges the pure ordinal computations and the store: read a
//! snapshot, compute a plan, apply it as one transactional write.
//! Reorders must be serialized per collection, since two concurrent
//! computations over the same snapshot can race into duplicate
//! ordinals. Callers run at most one curation operation at a time.

use std::sync::Arc;

use crate::error::Result;
use crate::frontpage::{self, FrontPageEntry, ReorderPlan};
use crate::models::Article;
use crate::storage::ArticleStore;

/// Curator over an article store.
pub struct FrontPageCurator {
    store: Arc<dyn ArticleStore>,
}

impl FrontPageCurator {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Move an article one slot up. Returns false on a no-op.
    pub async fn move_up(&self, article_id: &str) -> Result<bool> {
        self.run(article_id, frontpage::move_up).await
    }

    /// Move an article one slot down. Returns false on a no-op.
    pub async fn move_down(&self, article_id: &str) -> Result<bool> {
        self.run(article_id, frontpage::move_down).await
    }

    /// Take an article off the front page, compacting the rest.
    pub async fn remove(&self, article_id: &str) -> Result<bool> {
        self.run(article_id, frontpage::remove_from_front_page).await
    }

    /// Put an article at the top ordinal slot, shifting the rest down.
    pub async fn insert_at_front(&self, article_id: &str) -> Result<bool> {
        self.run(article_id, frontpage::insert_at_front).await
    }

    /// Mark an article as the single featured article.
    pub async fn feature(&self, article_id: &str) -> Result<()> {
        self.store.set_featured(article_id).await
    }

    /// The front page in display order: featured first, then ordinals.
    pub async fn front_page(&self) -> Result<Vec<Article>> {
        let articles = self.store.list_articles().await?;
        let snapshot: Vec<FrontPageEntry> =
            articles.iter().map(Article::front_page_entry).collect();

        let ordered_ids: Vec<String> = frontpage::display_order(&snapshot)
            .into_iter()
            .map(|e| e.article_id.clone())
            .collect();

        Ok(ordered_ids
            .into_iter()
            .filter_map(|id| articles.iter().find(|a| a.id == id).cloned())
            .collect())
    }

    async fn run(
        &self,
        article_id: &str,
        op: fn(&[FrontPageEntry], &str) -> ReorderPlan,
    ) -> Result<bool> {
        let snapshot = self.store.front_page_snapshot().await?;
        let plan = op(&snapshot, article_id);
        if plan.is_noop() {
            return Ok(false);
        }
        self.store.apply_reorder(&plan).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleBody;
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    async fn seeded_curator(tmp: &TempDir) -> FrontPageCurator {
        let store = Arc::new(LocalStore::new(tmp.path()));
        for (id, index) in [("a", Some(0)), ("b", Some(1)), ("c", Some(2)), ("d", None)] {
            let mut article =
                Article::draft(id, id.to_uppercase(), "Reporter", ArticleBody::default());
            article.front_page_index = index;
            store.save_article(&article).await.unwrap();
        }
        FrontPageCurator::new(store)
    }

    #[tokio::test]
    async fn test_move_and_noop() {
        let tmp = TempDir::new().unwrap();
        let curator = seeded_curator(&tmp).await;

        assert!(curator.move_up("b").await.unwrap());
        assert!(!curator.move_up("b").await.unwrap()); // now at 0

        let page = curator.front_page().await.unwrap();
        let ids: Vec<&str> = page.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_insert_remove_feature_flow() {
        let tmp = TempDir::new().unwrap();
        let curator = seeded_curator(&tmp).await;

        assert!(curator.insert_at_front("d").await.unwrap());
        assert!(curator.remove("c").await.unwrap());
        curator.feature("a").await.unwrap();

        let page = curator.front_page().await.unwrap();
        let ids: Vec<&str> = page.iter().map(|a| a.id.as_str()).collect();
        // a featured on top; d and b hold the dense ordinals.
        assert_eq!(ids, vec!["a", "d", "b"]);
    }
}
