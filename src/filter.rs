// 🔎 Filter Engine - Facet + free-text search over catalog items
//
// An item matches when every condition holds:
//   1. kind facet is Any or equals the item kind
//   2. category facet is Any or equals the item category
//   3. query is empty, or its lowercase form is a substring of the lowercase
//      title, description, author name, author tag or category name
//
// Filtering is stable: matches come back in store order.

use crate::entities::{Category, Item, ItemKind};
use crate::store::CatalogStore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// FACETS
// ============================================================================

/// Facet condition: match everything, or exactly one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet<T> {
    Any,
    Exactly(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::Any
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Facet::Any => true,
            Facet::Exactly(wanted) => wanted == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Facet::Any)
    }
}

impl<T> From<Option<T>> for Facet<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Facet::Exactly(v),
            None => Facet::Any,
        }
    }
}

// ============================================================================
// FILTER SPEC
// ============================================================================

/// On the wire a FilterSpec is three plain tokens, e.g.
/// `{"kind": "funding", "category": "ai-robotics", "query": "smart"}`.
/// Missing, null or unrecognized facet tokens deserialize to Any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    pub kind: Facet<ItemKind>,
    pub category: Facet<Category>,
    /// Free text; empty means no text filtering
    pub query: String,
}

impl FilterSpec {
    /// Spec that matches every item
    pub fn any() -> Self {
        Self::default()
    }

    /// Build a spec from raw UI tokens
    ///
    /// "all", "any", missing or unrecognized facet tokens all mean Any.
    pub fn from_tokens(kind: Option<&str>, category: Option<&str>, query: Option<&str>) -> Self {
        FilterSpec {
            kind: kind.and_then(ItemKind::from_token).into(),
            category: category.and_then(Category::from_token).into(),
            query: query.unwrap_or_default().to_string(),
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = Facet::Exactly(kind);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Facet::Exactly(category);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// True when the spec filters nothing out
    pub fn is_identity(&self) -> bool {
        self.kind.is_any() && self.category.is_any() && self.query.is_empty()
    }

    /// Compile into a matcher (lowercases the query once)
    pub fn matcher(&self) -> ItemMatcher<'_> {
        ItemMatcher {
            spec: self,
            needle: self.query.to_lowercase(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matcher().matches(item)
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct FilterTokens {
    kind: Value,
    category: Value,
    query: Value,
}

impl Serialize for FilterSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = match &self.kind {
            Facet::Any => "all".to_string(),
            Facet::Exactly(kind) => kind.as_str().to_string(),
        };
        let category = match &self.category {
            Facet::Any => "all".to_string(),
            Facet::Exactly(category) => category.slug(),
        };

        FilterTokens {
            kind: Value::String(kind),
            category: Value::String(category),
            query: Value::String(self.query.clone()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tokens = FilterTokens::deserialize(deserializer)?;
        Ok(FilterSpec::from_tokens(
            tokens.kind.as_str(),
            tokens.category.as_str(),
            tokens.query.as_str(),
        ))
    }
}

/// A FilterSpec ready to test many items
pub struct ItemMatcher<'a> {
    spec: &'a FilterSpec,
    needle: String,
}

impl ItemMatcher<'_> {
    pub fn matches(&self, item: &Item) -> bool {
        self.spec.kind.accepts(&item.kind())
            && self.spec.category.accepts(&item.category)
            && self.text_matches(item)
    }

    fn text_matches(&self, item: &Item) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        item.searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

// ============================================================================
// FILTER RESULT
// ============================================================================

/// Matches plus the size of the store they were drawn from
#[derive(Debug, Clone, Serialize)]
pub struct FilterResult<'a> {
    pub items: Vec<&'a Item>,
    /// Items in the store (distinguishes "no matches" from "empty store")
    pub total: usize,
}

impl<'a> FilterResult<'a> {
    pub fn matched(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.items.iter().map(|i| i.id).collect()
    }
}

// ============================================================================
// FILTER ENGINE
// ============================================================================

/// Items from `items` matching `spec`, order preserved
pub fn filter_items<'a>(items: &'a [Item], spec: &FilterSpec) -> Vec<&'a Item> {
    let matcher = spec.matcher();
    items.iter().filter(|item| matcher.matches(item)).collect()
}

/// Run `spec` against the store
pub fn filter<'a>(store: &'a CatalogStore, spec: &FilterSpec) -> FilterResult<'a> {
    let items = filter_items(store.all_items(), spec);

    tracing::debug!(
        kind = ?spec.kind,
        category = ?spec.category,
        query = %spec.query,
        matched = items.len(),
        total = store.item_count(),
        "Filtered catalog"
    );

    FilterResult {
        items,
        total: store.item_count(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::builtin().unwrap()
    }

    #[test]
    fn test_identity_spec_returns_everything_in_order() {
        let store = store();
        let result = filter(&store, &FilterSpec::any());

        assert!(FilterSpec::any().is_identity());
        assert_eq!(result.ids(), vec![1, 2, 3]);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_kind_facet() {
        let store = store();
        let result = filter(&store, &FilterSpec::any().with_kind(ItemKind::Funding));
        assert_eq!(result.ids(), vec![1, 3]);
    }

    #[test]
    fn test_category_facet() {
        let store = store();
        let result = filter(&store, &FilterSpec::any().with_category(Category::Software));
        assert_eq!(result.ids(), vec![2]);
    }

    #[test]
    fn test_absent_category_is_empty_not_error() {
        let store = store();
        let result = filter(&store, &FilterSpec::any().with_category(Category::Energy));
        assert!(result.is_empty());
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let store = store();

        // "AI" appears in item 1's title and category
        let upper = filter(&store, &FilterSpec::any().with_query("AI"));
        let lower = filter(&store, &FilterSpec::any().with_query("ai"));
        assert_eq!(upper.ids(), lower.ids());
        assert!(upper.ids().contains(&1));
    }

    #[test]
    fn test_query_searches_author_fields() {
        let store = store();

        let by_name = filter(&store, &FilterSpec::any().with_query("zhang wei"));
        assert_eq!(by_name.ids(), vec![3]);

        let by_tag = filter(&store, &FilterSpec::any().with_query("Columbia"));
        assert_eq!(by_tag.ids(), vec![1]);
    }

    #[test]
    fn test_query_is_substring_not_tokenized() {
        let store = store();
        let result = filter(&store, &FilterSpec::any().with_query("ductivity sui"));
        assert_eq!(result.ids(), vec![2]);
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let store = store();
        let spec = FilterSpec::any()
            .with_kind(ItemKind::Subscription)
            .with_query("robot");
        assert!(filter(&store, &spec).is_empty());

        let spec = FilterSpec::any()
            .with_kind(ItemKind::Funding)
            .with_category(Category::Hardware)
            .with_query("robot");
        assert_eq!(filter(&store, &spec).ids(), vec![3]);
    }

    #[test]
    fn test_every_item_matches_its_own_facets_and_title() {
        let store = store();
        for item in store.all_items() {
            let needle: String = item.title.chars().skip(2).take(6).collect();
            let spec = FilterSpec::any()
                .with_kind(item.kind())
                .with_category(item.category)
                .with_query(needle.to_uppercase());
            assert!(spec.matches(item), "item {} should match its own facets", item.id);
        }
    }

    #[test]
    fn test_tokens_default_to_any() {
        let spec = FilterSpec::from_tokens(Some("all"), Some("all"), None);
        assert!(spec.is_identity());

        let spec = FilterSpec::from_tokens(Some("bogus"), Some("Gardening"), Some(""));
        assert!(spec.is_identity());

        let spec = FilterSpec::from_tokens(Some("funding"), Some("ai-robotics"), Some("smart"));
        assert_eq!(spec.kind, Facet::Exactly(ItemKind::Funding));
        assert_eq!(spec.category, Facet::Exactly(Category::AiRobotics));
        assert_eq!(spec.query, "smart");
    }

    #[test]
    fn test_spec_from_json_tokens() {
        let spec: FilterSpec = serde_json::from_str(r#"{"kind":"funding"}"#).unwrap();
        assert_eq!(spec, FilterSpec::any().with_kind(ItemKind::Funding));

        let spec: FilterSpec = serde_json::from_str(r#"{"query":"ai"}"#).unwrap();
        assert_eq!(spec, FilterSpec::any().with_query("ai"));

        let spec: FilterSpec =
            serde_json::from_str(r#"{"kind":"Subscription","category":"AI & Robotics"}"#).unwrap();
        assert_eq!(spec.kind, Facet::Exactly(ItemKind::Subscription));
        assert_eq!(spec.category, Facet::Exactly(Category::AiRobotics));
    }

    #[test]
    fn test_malformed_json_tokens_mean_any() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"kind":"bogus","category":"all"}"#).unwrap();
        assert!(spec.is_identity());

        let spec: FilterSpec =
            serde_json::from_str(r#"{"kind":7,"category":null,"query":false}"#).unwrap();
        assert!(spec.is_identity());

        let spec: FilterSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.is_identity());
    }

    #[test]
    fn test_spec_serializes_as_plain_tokens() {
        let spec = FilterSpec::any()
            .with_kind(ItemKind::Funding)
            .with_category(Category::AiRobotics)
            .with_query("smart");

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "funding", "category": "ai-robotics", "query": "smart"})
        );
        assert_eq!(serde_json::from_value::<FilterSpec>(json).unwrap(), spec);

        let json = serde_json::to_value(FilterSpec::any()).unwrap();
        assert_eq!(json["kind"], "all");
        assert_eq!(json["category"], "all");
    }

    #[test]
    fn test_filter_items_on_slice() {
        let store = store();
        let subset = &store.all_items()[1..];
        let matches = filter_items(subset, &FilterSpec::any().with_kind(ItemKind::Funding));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 3);
    }
}
