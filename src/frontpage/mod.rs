// src/frontpage/mod.rs

//! Front-page ordinal management.
//!
//! Articles selected for the front page carry a dense ordinal
//! (`0..k-1`, no gaps, no duplicates). The single featured article sits
//! above the sequence and carries no ordinal. The operations here are
//! pure: they compute a [`ReorderPlan`] from an in-memory snapshot, and
//! the persistence layer applies the whole plan as one transactional
//! write. Callers must serialize reorders per collection: compute,
//! apply, and only then let the next reorder read a snapshot.

use serde::{Deserialize, Serialize};

/// Curation attributes of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontPageEntry {
    pub article_id: String,
    pub front_page_index: Option<u32>,
    pub featured: bool,
}

/// One article's new front-page position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexChange {
    pub article_id: String,
    pub new_index: Option<u32>,
}

/// The full set of index changes for one curation operation.
///
/// Applied atomically: a reader must never observe two articles sharing
/// an ordinal or a half-applied swap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPlan {
    pub changes: Vec<IndexChange>,
}

impl ReorderPlan {
    fn change(mut self, article_id: &str, new_index: Option<u32>) -> Self {
        self.changes.push(IndexChange {
            article_id: article_id.to_string(),
            new_index,
        });
        self
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Move an article one slot toward the front.
///
/// Swaps the article with the occupant of the slot above it. At ordinal
/// 0 the operation is a no-op. A missing occupant above a non-zero
/// ordinal means the density invariant was already broken upstream: it
/// is logged as an internal-consistency fault and the operation becomes
/// a no-op rather than corrupting state further.
pub fn move_up(snapshot: &[FrontPageEntry], article_id: &str) -> ReorderPlan {
    let Some(index) = ordinal_of(snapshot, article_id) else {
        log::warn!("move_up: article {article_id} is not on the front page");
        return ReorderPlan::default();
    };
    if index == 0 {
        log::debug!("move_up: article {article_id} is already first");
        return ReorderPlan::default();
    }
    match occupant_of(snapshot, index - 1) {
        Some(neighbor) => ReorderPlan::default()
            .change(article_id, Some(index - 1))
            .change(&neighbor.article_id, Some(index)),
        None => {
            log::error!(
                "move_up: no article at ordinal {} above {article_id}; front-page sequence is not dense",
                index - 1
            );
            ReorderPlan::default()
        }
    }
}

/// Move an article one slot toward the back.
///
/// No-op when the article is already last. A hole below the article
/// that is not the end of the sequence is a density violation and is
/// logged as such.
pub fn move_down(snapshot: &[FrontPageEntry], article_id: &str) -> ReorderPlan {
    let Some(index) = ordinal_of(snapshot, article_id) else {
        log::warn!("move_down: article {article_id} is not on the front page");
        return ReorderPlan::default();
    };
    match occupant_of(snapshot, index + 1) {
        Some(neighbor) => ReorderPlan::default()
            .change(article_id, Some(index + 1))
            .change(&neighbor.article_id, Some(index)),
        None => {
            let has_later = ordinals(snapshot).any(|i| i > index + 1);
            if has_later {
                log::error!(
                    "move_down: no article at ordinal {} below {article_id} but later ordinals exist; front-page sequence is not dense",
                    index + 1
                );
            } else {
                log::debug!("move_down: article {article_id} is already last");
            }
            ReorderPlan::default()
        }
    }
}

/// Take an article off the front page, compacting the remainder.
///
/// Every ordinal above the removed slot shifts down by one, so a dense
/// sequence stays dense. (The reference system skipped compaction on one
/// removal path; this implementation always compacts.)
pub fn remove_from_front_page(snapshot: &[FrontPageEntry], article_id: &str) -> ReorderPlan {
    let Some(index) = ordinal_of(snapshot, article_id) else {
        log::debug!("remove_from_front_page: article {article_id} is not on the front page");
        return ReorderPlan::default();
    };
    let mut plan = ReorderPlan::default().change(article_id, None);
    for entry in snapshot {
        if let Some(i) = entry_ordinal(entry) {
            if i > index {
                plan = plan.change(&entry.article_id, Some(i - 1));
            }
        }
    }
    plan
}

/// Place an article at the first ordinal slot.
///
/// Every article currently on the front page shifts down by one. An
/// article that already holds an ordinal is treated as a move-to-front:
/// its old slot is compacted away in the same plan.
pub fn insert_at_front(snapshot: &[FrontPageEntry], article_id: &str) -> ReorderPlan {
    let current = ordinal_of(snapshot, article_id);
    if current == Some(0) {
        log::debug!("insert_at_front: article {article_id} is already first");
        return ReorderPlan::default();
    }
    let mut plan = ReorderPlan::default().change(article_id, Some(0));
    for entry in snapshot {
        if entry.article_id == article_id {
            continue;
        }
        if let Some(i) = entry_ordinal(entry) {
            // Only slots above the vacated position shift when this is a
            // move-to-front; everything shifts for a fresh insert.
            if current.is_none_or(|old| i < old) {
                plan = plan.change(&entry.article_id, Some(i + 1));
            }
        }
    }
    plan
}

/// Apply a plan to a snapshot in place.
///
/// Shared by the store's transactional write and by tests.
pub fn apply(entries: &mut [FrontPageEntry], plan: &ReorderPlan) {
    for change in &plan.changes {
        if let Some(entry) = entries.iter_mut().find(|e| e.article_id == change.article_id) {
            entry.front_page_index = change.new_index;
        }
    }
}

/// Check the density invariant: ordinals form a contiguous `0..k-1`.
pub fn is_dense(snapshot: &[FrontPageEntry]) -> bool {
    let mut indices: Vec<u32> = ordinals(snapshot).collect();
    indices.sort_unstable();
    indices.iter().enumerate().all(|(i, &v)| v == i as u32)
}

/// Front-page display order: the featured article first, then the
/// ordinal sequence. Articles with neither attribute are excluded.
pub fn display_order(snapshot: &[FrontPageEntry]) -> Vec<&FrontPageEntry> {
    let mut ordered: Vec<&FrontPageEntry> = Vec::new();
    ordered.extend(snapshot.iter().filter(|e| e.featured));
    let mut ranked: Vec<&FrontPageEntry> = snapshot
        .iter()
        .filter(|e| !e.featured && e.front_page_index.is_some())
        .collect();
    ranked.sort_by_key(|e| e.front_page_index);
    ordered.extend(ranked);
    ordered
}

/// Ordinal of an article, None when absent, featured, or unranked.
fn ordinal_of(snapshot: &[FrontPageEntry], article_id: &str) -> Option<u32> {
    snapshot
        .iter()
        .find(|e| e.article_id == article_id)
        .and_then(entry_ordinal)
}

/// The occupant of an ordinal slot, excluding the featured article.
fn occupant_of<'a>(snapshot: &'a [FrontPageEntry], index: u32) -> Option<&'a FrontPageEntry> {
    snapshot.iter().find(|e| entry_ordinal(e) == Some(index))
}

/// The featured article carries no ordinal for arithmetic purposes.
fn entry_ordinal(entry: &FrontPageEntry) -> Option<u32> {
    if entry.featured {
        None
    } else {
        entry.front_page_index
    }
}

/// All occupied ordinals in the snapshot.
fn ordinals(snapshot: &[FrontPageEntry]) -> impl Iterator<Item = u32> + '_ {
    snapshot.iter().filter_map(entry_ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, index: Option<u32>) -> FrontPageEntry {
        FrontPageEntry {
            article_id: id.to_string(),
            front_page_index: index,
            featured: false,
        }
    }

    /// a..d at 0..3, e unranked, f featured.
    fn snapshot() -> Vec<FrontPageEntry> {
        let mut entries = vec![
            entry("a", Some(0)),
            entry("b", Some(1)),
            entry("c", Some(2)),
            entry("d", Some(3)),
            entry("e", None),
        ];
        entries.push(FrontPageEntry {
            article_id: "f".to_string(),
            front_page_index: None,
            featured: true,
        });
        entries
    }

    fn index_of(entries: &[FrontPageEntry], id: &str) -> Option<u32> {
        entries
            .iter()
            .find(|e| e.article_id == id)
            .unwrap()
            .front_page_index
    }

    #[test]
    fn test_move_up_at_zero_is_noop() {
        assert!(move_up(&snapshot(), "a").is_noop());
    }

    #[test]
    fn test_move_up_swaps_exactly_two() {
        let entries = snapshot();
        let plan = move_up(&entries, "c");
        assert_eq!(plan.changes.len(), 2);

        let mut after = entries;
        apply(&mut after, &plan);
        assert_eq!(index_of(&after, "c"), Some(1));
        assert_eq!(index_of(&after, "b"), Some(2));
        assert_eq!(index_of(&after, "a"), Some(0));
        assert_eq!(index_of(&after, "d"), Some(3));
    }

    #[test]
    fn test_move_down_last_is_noop() {
        assert!(move_down(&snapshot(), "d").is_noop());
    }

    #[test]
    fn test_move_down_swaps() {
        let mut entries = snapshot();
        let plan = move_down(&entries, "a");
        apply(&mut entries, &plan);
        assert_eq!(index_of(&entries, "a"), Some(1));
        assert_eq!(index_of(&entries, "b"), Some(0));
    }

    #[test]
    fn test_move_on_unranked_article_is_noop() {
        assert!(move_up(&snapshot(), "e").is_noop());
        assert!(move_down(&snapshot(), "missing").is_noop());
    }

    #[test]
    fn test_move_up_over_hole_is_noop() {
        // Broken upstream state: nothing at ordinal 1.
        let entries = vec![entry("a", Some(0)), entry("c", Some(2))];
        assert!(move_up(&entries, "c").is_noop());
    }

    #[test]
    fn test_remove_compacts_higher_ordinals() {
        let mut entries = snapshot();
        let plan = remove_from_front_page(&entries, "b");
        apply(&mut entries, &plan);

        assert_eq!(index_of(&entries, "b"), None);
        assert_eq!(index_of(&entries, "a"), Some(0));
        assert_eq!(index_of(&entries, "c"), Some(1));
        assert_eq!(index_of(&entries, "d"), Some(2));
        assert!(is_dense(&entries));
    }

    #[test]
    fn test_insert_at_front_shifts_everything() {
        let mut entries = snapshot();
        let plan = insert_at_front(&entries, "e");
        apply(&mut entries, &plan);

        assert_eq!(index_of(&entries, "e"), Some(0));
        assert_eq!(index_of(&entries, "a"), Some(1));
        assert_eq!(index_of(&entries, "d"), Some(4));
        assert!(is_dense(&entries));
    }

    #[test]
    fn test_insert_of_ranked_article_moves_to_front() {
        let mut entries = snapshot();
        let plan = insert_at_front(&entries, "c");
        apply(&mut entries, &plan);

        assert_eq!(index_of(&entries, "c"), Some(0));
        assert_eq!(index_of(&entries, "a"), Some(1));
        assert_eq!(index_of(&entries, "b"), Some(2));
        assert_eq!(index_of(&entries, "d"), Some(3));
        assert!(is_dense(&entries));
    }

    #[test]
    fn test_featured_is_excluded_from_ordinals() {
        let entries = snapshot();
        assert!(move_up(&entries, "f").is_noop());
        // Featured at the head of display order, before ordinal 0.
        let order: Vec<&str> = display_order(&entries)
            .iter()
            .map(|e| e.article_id.as_str())
            .collect();
        assert_eq!(order, vec!["f", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_move_sequence_preserves_permutation() {
        let mut entries = snapshot();
        let script: &[(&str, fn(&[FrontPageEntry], &str) -> ReorderPlan)] = &[
            ("c", move_up),
            ("a", move_down),
            ("d", move_up),
            ("b", move_down),
            ("a", move_up),
            ("d", move_down),
        ];
        for &(id, op) in script {
            let plan = op(&entries, id);
            apply(&mut entries, &plan);
            assert!(is_dense(&entries), "sequence broke after moving {id}");
        }
        let mut indices: Vec<Option<u32>> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| index_of(&entries, id))
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense(&snapshot()));
        let sparse = vec![entry("a", Some(0)), entry("c", Some(2))];
        assert!(!is_dense(&sparse));
        let duplicated = vec![entry("a", Some(0)), entry("b", Some(0))];
        assert!(!is_dense(&duplicated));
        assert!(is_dense(&[]));
    }
}
