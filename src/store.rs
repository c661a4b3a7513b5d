// 🗄️ Catalog Store - Frozen snapshot of items, timeline and feed
//
// A store is built once from seed data and never mutated. Refreshing the
// catalog means building a new store and swapping it into a CatalogHandle;
// readers keep whichever snapshot they started with.

use crate::entities::{Category, Feed, Item, Timeline, TimelineEntry};
use crate::error::{SeedError, SeedViolation};
use crate::seed::SeedData;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

// ============================================================================
// CATALOG STORE
// ============================================================================

#[derive(Debug, Clone)]
pub struct CatalogStore {
    items: Vec<Item>,
    timeline: Timeline,
    feed: Feed,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
}

impl CatalogStore {
    /// Build a store from seed data
    ///
    /// Fails with `SeedError::Invalid` listing every structural violation:
    /// item kind/price mismatch, duplicate item ids, ratings outside 0..=5,
    /// duplicate timeline dates and duplicate aspect ids.
    pub fn load(seed: SeedData) -> Result<Self, SeedError> {
        let fingerprint = fingerprint(&seed)?;
        let SeedData {
            items: records,
            timeline,
            feed,
        } = seed;

        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut items = Vec::with_capacity(records.len());

        for record in records {
            if !seen_ids.insert(record.id) {
                violations.push(SeedViolation::DuplicateItemId { item_id: record.id });
            }
            match record.into_item() {
                Ok(item) => items.push(item),
                Err(found) => violations.extend(found),
            }
        }

        violations.extend(timeline.violations());

        if !violations.is_empty() {
            tracing::warn!(
                violations = violations.len(),
                "Rejected seed data"
            );
            return Err(SeedError::Invalid(violations));
        }

        tracing::info!(
            items = items.len(),
            timeline_entries = timeline.entries.len(),
            feed_cards = feed.cards.len(),
            fingerprint = %&fingerprint[..12],
            "Catalog store loaded"
        );

        Ok(CatalogStore {
            items,
            timeline,
            feed,
            fingerprint,
            loaded_at: Utc::now(),
        })
    }

    /// Build a store from the built-in dataset
    pub fn builtin() -> Result<Self, SeedError> {
        Self::load(SeedData::builtin())
    }

    /// Build a store from a JSON seed file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        Self::load(SeedData::from_file(path)?)
    }

    /// All items in insertion order
    pub fn all_items(&self) -> &[Item] {
        &self.items
    }

    /// All timeline entries in insertion (display) order
    pub fn all_timeline_entries(&self) -> &[TimelineEntry] {
        &self.timeline.entries
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Categories present in the store, in first-seen order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Every category in menu order with its item count (zero included)
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let mut counts: HashMap<Category, usize> = HashMap::new();
        for item in &self.items {
            *counts.entry(item.category).or_default() += 1;
        }
        Category::all()
            .iter()
            .map(|c| (*c, counts.get(c).copied().unwrap_or(0)))
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// SHA-256 of the canonical seed JSON; identifies the snapshot
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn fingerprint(seed: &SeedData) -> Result<String, SeedError> {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_canonical_json()?);
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// CATALOG HANDLE
// ============================================================================

/// Shared holder of the current store snapshot
///
/// `replace` swaps in a whole new store; a reader that called `snapshot`
/// keeps its `Arc` for the rest of its operation and never sees a partial
/// refresh.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    current: Arc<RwLock<Arc<CatalogStore>>>,
}

impl CatalogHandle {
    pub fn new(store: CatalogStore) -> Self {
        CatalogHandle {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<CatalogStore> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a new store, returning the previous snapshot
    pub fn replace(&self, store: CatalogStore) -> Arc<CatalogStore> {
        let next = Arc::new(store);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        tracing::info!(
            previous = %&guard.fingerprint()[..12],
            next = %&next.fingerprint()[..12],
            "Catalog snapshot replaced"
        );

        std::mem::replace(&mut *guard, next)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ItemKind, TimelineEntry};

    fn entry(date: &str, title: &str) -> TimelineEntry {
        TimelineEntry {
            date: date.to_string(),
            title: title.to_string(),
            summary_text: String::new(),
            overview_text: String::new(),
            aspects: vec![],
        }
    }

    #[test]
    fn test_builtin_store_loads() {
        let store = CatalogStore::builtin().unwrap();

        assert_eq!(store.item_count(), 3);
        assert_eq!(store.all_timeline_entries().len(), 4);
        assert_eq!(store.fingerprint().len(), 64);
        assert_eq!(
            store.categories(),
            vec![Category::AiRobotics, Category::Software, Category::Hardware]
        );
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let store = CatalogStore::builtin().unwrap();
        let ids: Vec<u32> = store.all_items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_timeline_dates_rejected() {
        let mut seed = SeedData::builtin();
        seed.timeline.entries = vec![entry("2023-12", "Public Beta Testing"), entry("2023-12", "Again")];

        let err = CatalogStore::load(seed).unwrap_err();
        assert_eq!(
            err.violations(),
            &[SeedViolation::DuplicateTimelineDate {
                date: "2023-12".to_string()
            }]
        );
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut seed = SeedData::builtin();
        seed.items[1].kind = ItemKind::Funding;

        let err = CatalogStore::load(seed).unwrap_err();
        assert!(matches!(
            err.violations()[0],
            SeedViolation::KindMismatch { item_id: 2, .. }
        ));
    }

    #[test]
    fn test_every_violation_reported() {
        let mut seed = SeedData::builtin();
        seed.items[2].id = 1;
        seed.items[0].rating = -1.0;
        seed.timeline.entries.push(entry("2024-01", "Duplicate"));

        let err = CatalogStore::load(seed).unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&SeedViolation::DuplicateItemId { item_id: 1 }));
        assert!(violations.contains(&SeedViolation::DuplicateTimelineDate {
            date: "2024-01".to_string()
        }));
    }

    #[test]
    fn test_empty_seed_is_valid() {
        let store = CatalogStore::load(SeedData::default()).unwrap();
        assert!(store.is_empty());
        assert!(store.all_timeline_entries().is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = CatalogStore::builtin().unwrap();
        let b = CatalogStore::builtin().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut seed = SeedData::builtin();
        seed.items.pop();
        let c = CatalogStore::load(seed).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_handle_snapshot_survives_replace() {
        let handle = CatalogHandle::new(CatalogStore::builtin().unwrap());
        let before = handle.snapshot();

        let mut seed = SeedData::builtin();
        seed.items.truncate(1);
        let previous = handle.replace(CatalogStore::load(seed).unwrap());

        // Old readers keep a consistent view
        assert_eq!(before.item_count(), 3);
        assert_eq!(previous.fingerprint(), before.fingerprint());
        // New readers see the new store
        assert_eq!(handle.snapshot().item_count(), 1);
    }

    #[test]
    fn test_category_counts_cover_every_category() {
        let store = CatalogStore::builtin().unwrap();
        let counts = store.category_counts();

        assert_eq!(counts.len(), Category::all().len());
        assert_eq!(counts[0], (Category::AiRobotics, 1));
        assert_eq!(counts[1], (Category::Software, 1));
        assert_eq!(counts[2], (Category::Hardware, 1));
        assert!(counts[3..].iter().all(|(_, n)| *n == 0));

        let empty = CatalogStore::load(SeedData::default()).unwrap();
        assert!(empty.category_counts().iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogStore>();
        assert_send_sync::<CatalogHandle>();
    }
}
