// 🎯 Selector - Resolve one record by key
//
// Every lookup is a linear scan in stored order. Absence is `None`, never a
// panic; callers decide how to degrade (placeholder, empty view, 404).
// If a uniqueness invariant was broken upstream, the first match wins.

use crate::entities::{
    FeedCard, Item, NavigationTopic, ProductSpecs, SpecReview, TechnicalAspect, TimelineEntry,
};
use crate::store::CatalogStore;

/// Timeline entry whose date equals `date`
pub fn find_timeline_entry_by_date<'a>(
    store: &'a CatalogStore,
    date: &str,
) -> Option<&'a TimelineEntry> {
    let found = find_entry_in(store.all_timeline_entries(), date);
    if found.is_none() {
        tracing::debug!(date, "No timeline entry for date");
    }
    found
}

/// First entry in `entries` whose date equals `date`
pub fn find_entry_in<'a>(entries: &'a [TimelineEntry], date: &str) -> Option<&'a TimelineEntry> {
    entries.iter().find(|e| e.date == date)
}

/// Item with the given id
pub fn find_item_by_id(store: &CatalogStore, id: u32) -> Option<&Item> {
    let found = store.all_items().iter().find(|item| item.id == id);
    if found.is_none() {
        tracing::debug!(id, "No item with id");
    }
    found
}

/// Aspect with the given id inside one timeline entry
pub fn find_aspect_by_id(entry: &TimelineEntry, aspect_id: u32) -> Option<&TechnicalAspect> {
    entry.aspects.iter().find(|a| a.id == aspect_id)
}

/// Review with the given id on a product specification page
pub fn find_spec_review_by_id(specs: &ProductSpecs, review_id: u32) -> Option<&SpecReview> {
    specs.reviews.iter().find(|r| r.id == review_id)
}

/// Home feed card with the given id
pub fn find_feed_card_by_id(store: &CatalogStore, id: u32) -> Option<&FeedCard> {
    store.feed().cards.iter().find(|card| card.id == id)
}

/// Header menu topic whose slug equals `slug`
pub fn find_navigation_topic_by_slug(store: &CatalogStore, slug: &str) -> Option<NavigationTopic> {
    store
        .feed()
        .navigation_topics()
        .into_iter()
        .find(|topic| topic.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    fn store() -> CatalogStore {
        CatalogStore::builtin().unwrap()
    }

    #[test]
    fn test_find_timeline_entry_by_date() {
        let store = store();

        let entry = find_timeline_entry_by_date(&store, "2023-12").unwrap();
        assert_eq!(entry.title, "Public Beta Testing");

        assert!(find_timeline_entry_by_date(&store, "2022-01").is_none());
        assert!(find_timeline_entry_by_date(&store, "").is_none());
    }

    #[test]
    fn test_find_item_by_id() {
        let store = store();

        assert_eq!(
            find_item_by_id(&store, 2).map(|i| i.title.as_str()),
            Some("Developer Productivity Suite")
        );
        assert!(find_item_by_id(&store, 42).is_none());
    }

    #[test]
    fn test_find_aspect_by_id() {
        let store = store();
        let entry = find_timeline_entry_by_date(&store, "2024-01").unwrap();

        let aspect = find_aspect_by_id(entry, 1).unwrap();
        assert_eq!(aspect.title, "Final Neural Network Architecture");
        assert_eq!(aspect.reviews.len(), 1);

        assert!(find_aspect_by_id(entry, 3).is_none());
    }

    #[test]
    fn test_aspect_ids_are_scoped_to_their_entry() {
        let store = store();
        let older = find_timeline_entry_by_date(&store, "2023-11").unwrap();

        assert_eq!(find_aspect_by_id(older, 1).unwrap().title, "Proposed Architecture");
        assert!(find_aspect_by_id(older, 2).is_none());
    }

    #[test]
    fn test_first_match_wins_on_duplicate_dates() {
        let entries = vec![
            TimelineEntry {
                date: "2024-01".to_string(),
                title: "First".to_string(),
                summary_text: String::new(),
                overview_text: String::new(),
                aspects: vec![],
            },
            TimelineEntry {
                date: "2024-01".to_string(),
                title: "Second".to_string(),
                summary_text: String::new(),
                overview_text: String::new(),
                aspects: vec![],
            },
        ];
        assert_eq!(find_entry_in(&entries, "2024-01").unwrap().title, "First");

        // A store never holds such a timeline
        let mut seed = SeedData::builtin();
        seed.timeline.entries = entries;
        assert!(CatalogStore::load(seed).is_err());
    }

    #[test]
    fn test_find_spec_review_by_id() {
        let store = store();
        let specs = find_item_by_id(&store, 1).and_then(|i| i.specs.as_ref()).unwrap();

        assert_eq!(find_spec_review_by_id(specs, 2).unwrap().user, "Sarah Chen");
        assert!(find_spec_review_by_id(specs, 3).is_none());

        // Items without a spec page resolve to None rather than failing
        assert!(find_item_by_id(&store, 2).and_then(|i| i.specs.as_ref()).is_none());
    }

    #[test]
    fn test_feed_lookups() {
        let store = store();

        assert_eq!(find_feed_card_by_id(&store, 2).unwrap().topic, "Tesla FSD");
        assert!(find_feed_card_by_id(&store, 99).is_none());

        let topic = find_navigation_topic_by_slug(&store, "consumer-electronics").unwrap();
        assert_eq!(topic.name, "Consumer Electronics");
        assert!(find_navigation_topic_by_slug(&store, "consumer-electronics-x").is_none());
    }
}
