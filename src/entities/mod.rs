// 📦 Entity Models
// Items (marketplace), timelines (topic history) and the home feed

pub mod feed;
pub mod item;
pub mod timeline;

pub use feed::{FeaturedStory, Feed, FeedCard, NavigationTopic, Overview};
pub use item::{
    Author, Category, Item, ItemKind, ItemRecord, Milestone, Offer, ProductSpecs, SpecOverview,
    SpecReview, TechnicalSpec,
};
pub use timeline::{Review, TechnicalAspect, Timeline, TimelineEntry};
