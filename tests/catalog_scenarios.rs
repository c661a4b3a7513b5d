// End-to-end catalog scenarios: seed loading, filtering and lookups

use pretty_assertions::assert_eq;
use std::io::Write;

use tech_catalog::{
    filter, find_aspect_by_id, find_item_by_id, find_timeline_entry_by_date, CatalogHandle,
    CatalogStore, Category, FilterSpec, ItemKind, SeedData, SeedError, SeedViolation,
};

const TWO_ITEM_SEED: &str = r#"{
  "items": [
    {
      "id": 1,
      "title": "AI-Powered Smart Home Assistant",
      "description": "Next-generation home automation with natural language understanding.",
      "kind": "funding",
      "fundingGoal": "$500,000",
      "category": "AI & Robotics",
      "rating": 4.5,
      "reviewCount": 28,
      "author": { "name": "Tech Innovators Inc.", "tag": "Verified startup" }
    },
    {
      "id": 2,
      "title": "Developer Productivity Suite",
      "description": "All-in-one toolkit for modern software teams.",
      "kind": "subscription",
      "price": "$29.99/month",
      "category": "Software",
      "rating": 4.8,
      "reviewCount": 156,
      "author": { "name": "DevTools Co.", "tag": "Established vendor" }
    }
  ]
}"#;

fn two_item_store() -> CatalogStore {
    CatalogStore::load(SeedData::from_json(TWO_ITEM_SEED).unwrap()).unwrap()
}

#[test]
fn identity_filter_returns_every_item_in_order() {
    let store = CatalogStore::builtin().unwrap();
    let result = filter(&store, &FilterSpec::any());

    let all: Vec<u32> = store.all_items().iter().map(|i| i.id).collect();
    assert_eq!(result.ids(), all);
    assert_eq!(result.total, store.item_count());
}

#[test]
fn item_matches_its_own_facets_and_title_fragment() {
    let store = CatalogStore::builtin().unwrap();

    for item in store.all_items() {
        let fragment: String = item.title.chars().skip(2).take(6).collect();
        let spec = FilterSpec::any()
            .with_kind(item.kind())
            .with_category(item.category)
            .with_query(fragment.to_uppercase());

        assert!(
            filter(&store, &spec).ids().contains(&item.id),
            "item {} not found by its own facets",
            item.id
        );
    }
}

#[test]
fn two_item_store_scenarios() {
    let store = two_item_store();

    let by_kind = filter(&store, &FilterSpec::any().with_kind(ItemKind::Funding));
    assert_eq!(by_kind.ids(), vec![1]);

    let by_query = filter(&store, &FilterSpec::any().with_query("developer"));
    assert_eq!(by_query.ids(), vec![2]);

    let by_category = filter(&store, &FilterSpec::any().with_category(Category::Hardware));
    assert_eq!(by_category.ids(), Vec::<u32>::new());
    assert_eq!(by_category.total, 2);
}

#[test]
fn tokens_from_the_ui_build_the_same_filters() {
    let store = two_item_store();

    let spec = FilterSpec::from_tokens(Some("funding"), Some("all"), None);
    assert_eq!(filter(&store, &spec).ids(), vec![1]);

    let spec = FilterSpec::from_tokens(None, Some("software"), Some(""));
    assert_eq!(filter(&store, &spec).ids(), vec![2]);
}

#[test]
fn text_search_is_case_insensitive_over_category() {
    let store = two_item_store();

    let result = filter(&store, &FilterSpec::any().with_query("AI"));
    assert_eq!(result.ids(), vec![1]);

    let result = filter(&store, &FilterSpec::any().with_query("robotics"));
    assert_eq!(result.ids(), vec![1]);
}

#[test]
fn timeline_lookup_by_date() {
    let store = CatalogStore::builtin().unwrap();

    assert_eq!(
        store.timeline().dates(),
        vec!["2024-01", "2023-12", "2023-11", "2023-10"]
    );

    let entry = find_timeline_entry_by_date(&store, "2023-12").unwrap();
    assert_eq!(entry.title, "Public Beta Testing");
    assert!(find_aspect_by_id(entry, 2).is_some());

    assert!(find_timeline_entry_by_date(&store, "2022-01").is_none());
}

#[test]
fn duplicate_timeline_dates_are_rejected() {
    let mut seed = SeedData::builtin();
    let copy = seed.timeline.entries[1].clone();
    seed.timeline.entries.push(copy);

    match CatalogStore::load(seed) {
        Err(SeedError::Invalid(violations)) => assert_eq!(
            violations,
            vec![SeedViolation::DuplicateTimelineDate {
                date: "2023-12".to_string()
            }]
        ),
        other => panic!("expected an invalid seed, got {:?}", other.map(|s| s.item_count())),
    }
}

#[test]
fn seed_file_round_trips_through_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", TWO_ITEM_SEED).unwrap();

    let store = CatalogStore::from_file(file.path()).unwrap();
    assert_eq!(store.item_count(), 2);
    assert!(store.all_timeline_entries().is_empty());
    assert_eq!(find_item_by_id(&store, 2).map(|i| i.title.as_str()), Some("Developer Productivity Suite"));
    assert_eq!(store.fingerprint(), two_item_store().fingerprint());
}

#[test]
fn missing_seed_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        CatalogStore::from_file(&path),
        Err(SeedError::Io { .. })
    ));
}

#[test]
fn refresh_swaps_whole_snapshots() {
    let handle = CatalogHandle::new(CatalogStore::builtin().unwrap());
    let before = handle.snapshot();

    handle.replace(two_item_store());

    assert_eq!(before.item_count(), 3);
    assert_eq!(handle.snapshot().item_count(), 2);
    assert!(find_timeline_entry_by_date(&before, "2024-01").is_some());
}
