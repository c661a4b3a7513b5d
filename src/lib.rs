// Tech Catalog - Core Library
// Catalog store, filter engine and selectors shared by the CLI, the API server and tests

pub mod config;
pub mod entities;
pub mod error;
pub mod filter;
pub mod seed;
pub mod selector;
pub mod slug;
pub mod store;
pub mod submission;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{init_tracing, CatalogConfig, DEFAULT_BIND_ADDR};
pub use entities::{
    Author, Category, FeaturedStory, Feed, FeedCard, Item, ItemKind, ItemRecord, Milestone,
    NavigationTopic, Offer, Overview, ProductSpecs, Review, SpecOverview, SpecReview,
    TechnicalAspect, TechnicalSpec, Timeline, TimelineEntry,
};
pub use error::{SeedError, SeedViolation, SubmissionError};
pub use filter::{filter, filter_items, Facet, FilterResult, FilterSpec, ItemMatcher};
pub use seed::SeedData;
pub use selector::{
    find_aspect_by_id, find_entry_in, find_feed_card_by_id, find_item_by_id,
    find_navigation_topic_by_slug, find_spec_review_by_id, find_timeline_entry_by_date,
};
pub use slug::slugify;
pub use store::{CatalogHandle, CatalogStore};
pub use submission::{
    AspectDraft, LoggingSink, MemorySink, ProductRequestDraft, Receipt, ReviewDraft, Submission,
    SubmissionSink,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
