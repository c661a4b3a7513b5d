// 🛒 Item Entity - Marketplace products and catalog cards
//
// Items arrive as loosely shaped `ItemRecord`s (the seed / API payload shape,
// with optional `price` and `fundingGoal`) and become `Item`s once validated.
// In an `Item` the offer is a single enum, so "exactly one of price or
// funding goal" holds by construction.

use crate::error::SeedViolation;
use crate::slug::slugify;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// CATEGORY (facet)
// ============================================================================

/// Fixed set of catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI & Robotics")]
    AiRobotics,
    Software,
    Hardware,
    #[serde(rename = "Consumer Electronics")]
    ConsumerElectronics,
    Computing,
    Energy,
    Telecommunications,
    Transportation,
    Aerospace,
    Semiconductors,
}

impl Category {
    /// Every category, in menu order
    pub fn all() -> &'static [Category] {
        &[
            Category::AiRobotics,
            Category::Software,
            Category::Hardware,
            Category::ConsumerElectronics,
            Category::Computing,
            Category::Energy,
            Category::Telecommunications,
            Category::Transportation,
            Category::Aerospace,
            Category::Semiconductors,
        ]
    }

    /// Display name (also the value stored in seed files)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AiRobotics => "AI & Robotics",
            Category::Software => "Software",
            Category::Hardware => "Hardware",
            Category::ConsumerElectronics => "Consumer Electronics",
            Category::Computing => "Computing",
            Category::Energy => "Energy",
            Category::Telecommunications => "Telecommunications",
            Category::Transportation => "Transportation",
            Category::Aerospace => "Aerospace",
            Category::Semiconductors => "Semiconductors",
        }
    }

    pub fn slug(&self) -> String {
        slugify(self.as_str())
    }

    /// Resolve a UI token: display name (any case) or slug
    ///
    /// Returns None for anything unrecognized, including "all".
    pub fn from_token(token: &str) -> Option<Category> {
        let token = token.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(token) || c.slug() == token.to_lowercase())
    }
}

// ============================================================================
// ITEM KIND (facet)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Project seeking investment (has a funding goal)
    Funding,

    /// Product sold by subscription (has a price)
    Subscription,
}

impl ItemKind {
    pub fn all() -> &'static [ItemKind] {
        &[ItemKind::Funding, ItemKind::Subscription]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Funding => "funding",
            ItemKind::Subscription => "subscription",
        }
    }

    /// Label shown on cards
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Funding => "Seeking Funding",
            ItemKind::Subscription => "Subscription",
        }
    }

    pub fn from_token(token: &str) -> Option<ItemKind> {
        match token.trim().to_lowercase().as_str() {
            "funding" => Some(ItemKind::Funding),
            "subscription" => Some(ItemKind::Subscription),
            _ => None,
        }
    }
}

// ============================================================================
// OFFER
// ============================================================================

/// What the item asks of a buyer; the tag doubles as the item kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Offer {
    Funding {
        #[serde(rename = "fundingGoal")]
        funding_goal: String,
    },
    Subscription { price: String },
}

impl Offer {
    pub fn kind(&self) -> ItemKind {
        match self {
            Offer::Funding { .. } => ItemKind::Funding,
            Offer::Subscription { .. } => ItemKind::Subscription,
        }
    }

    /// Funding goal or price, whichever applies
    pub fn amount(&self) -> &str {
        match self {
            Offer::Funding { funding_goal } => funding_goal,
            Offer::Subscription { price } => price,
        }
    }

    /// Call to action for the offer
    pub fn action_label(&self) -> &'static str {
        match self {
            Offer::Funding { .. } => "Invest Now",
            Offer::Subscription { .. } => "Subscribe",
        }
    }
}

// ============================================================================
// AUTHOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    /// Short affiliation line (e.g., "Indie developer group")
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// ============================================================================
// PRODUCT SPECS (specification page)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecOverview {
    pub vision: String,
    pub problem: String,
    pub solution: String,
}

/// One labelled row of the technical specification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSpec {
    pub label: String,
    pub value: String,
}

/// Roadmap milestone (period keys like "2024 Q1")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    pub title: String,
    pub description: String,
}

/// User review shown on the product specification page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecReview {
    pub id: u32,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Whole stars, 0..=5
    pub rating: u8,
    pub date: NaiveDate,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpecs {
    pub overview: SpecOverview,
    #[serde(default)]
    pub technical: Vec<TechnicalSpec>,
    #[serde(default)]
    pub roadmap: Vec<Milestone>,
    #[serde(default)]
    pub reviews: Vec<SpecReview>,
}

impl ProductSpecs {
    fn violations(&self, item_id: u32) -> Vec<SeedViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for review in &self.reviews {
            if !seen.insert(review.id) {
                violations.push(SeedViolation::DuplicateSpecReviewId {
                    item_id,
                    review_id: review.id,
                });
            }
            if review.rating > 5 {
                violations.push(SeedViolation::SpecReviewRatingOutOfRange {
                    item_id,
                    review_id: review.id,
                    rating: review.rating,
                });
            }
        }

        violations
    }
}

// ============================================================================
// ITEM RECORD (seed shape)
// ============================================================================

/// Item as it appears in seed data, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_goal: Option<String>,
    pub category: Category,
    pub rating: f64,
    pub review_count: u32,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<ProductSpecs>,
}

impl ItemRecord {
    /// Validate the record and turn it into an `Item`
    ///
    /// Collects every violation instead of stopping at the first one.
    pub fn into_item(self) -> Result<Item, Vec<SeedViolation>> {
        let mut violations = Vec::new();

        if !(0.0..=5.0).contains(&self.rating) {
            violations.push(SeedViolation::RatingOutOfRange {
                item_id: self.id,
                rating: self.rating.to_string(),
            });
        }

        if let Some(specs) = &self.specs {
            violations.extend(specs.violations(self.id));
        }

        let offer = match (self.kind, self.price, self.funding_goal) {
            (ItemKind::Funding, None, Some(funding_goal)) => Some(Offer::Funding { funding_goal }),
            (ItemKind::Subscription, Some(price), None) => Some(Offer::Subscription { price }),
            (kind, _, _) => {
                violations.push(SeedViolation::KindMismatch {
                    item_id: self.id,
                    kind: kind.as_str().to_string(),
                });
                None
            }
        };

        match offer {
            Some(offer) if violations.is_empty() => Ok(Item {
                id: self.id,
                title: self.title,
                description: self.description,
                image: self.image,
                offer,
                category: self.category,
                rating: self.rating,
                review_count: self.review_count,
                author: self.author,
                specs: self.specs,
            }),
            _ => Err(violations),
        }
    }
}

// ============================================================================
// ITEM
// ============================================================================

/// Validated catalog item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub offer: Offer,
    pub category: Category,
    pub rating: f64,
    pub review_count: u32,
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<ProductSpecs>,
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        self.offer.kind()
    }

    /// Text fields covered by free-text search
    pub fn searchable_fields(&self) -> [&str; 5] {
        [
            &self.title,
            &self.description,
            &self.author.name,
            &self.author.tag,
            self.category.as_str(),
        ]
    }

    /// Convert back to the seed shape
    pub fn to_record(&self) -> ItemRecord {
        let (price, funding_goal) = match &self.offer {
            Offer::Funding { funding_goal } => (None, Some(funding_goal.clone())),
            Offer::Subscription { price } => (Some(price.clone()), None),
        };

        ItemRecord {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            kind: self.kind(),
            price,
            funding_goal,
            category: self.category,
            rating: self.rating,
            review_count: self.review_count,
            author: self.author.clone(),
            specs: self.specs.clone(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ItemKind, price: Option<&str>, funding_goal: Option<&str>) -> ItemRecord {
        ItemRecord {
            id: 1,
            title: "AI-Powered Smart Home Assistant".to_string(),
            description: "Revolutionary AI assistant".to_string(),
            image: None,
            kind,
            price: price.map(str::to_string),
            funding_goal: funding_goal.map(str::to_string),
            category: Category::AiRobotics,
            rating: 4.5,
            review_count: 28,
            author: Author {
                name: "Tech Innovators Group".to_string(),
                tag: "Columbia University students".to_string(),
                avatar: None,
            },
            specs: None,
        }
    }

    #[test]
    fn test_category_tokens() {
        assert_eq!(Category::from_token("AI & Robotics"), Some(Category::AiRobotics));
        assert_eq!(Category::from_token("ai & robotics"), Some(Category::AiRobotics));
        assert_eq!(Category::from_token("ai-robotics"), Some(Category::AiRobotics));
        assert_eq!(Category::from_token("consumer-electronics"), Some(Category::ConsumerElectronics));
        assert_eq!(Category::from_token("all"), None);
        assert_eq!(Category::from_token("Gardening"), None);
    }

    #[test]
    fn test_kind_tokens() {
        assert_eq!(ItemKind::from_token("funding"), Some(ItemKind::Funding));
        assert_eq!(ItemKind::from_token("Subscription"), Some(ItemKind::Subscription));
        assert_eq!(ItemKind::from_token("all"), None);
    }

    #[test]
    fn test_funding_record_becomes_item() {
        let item = record(ItemKind::Funding, None, Some("$500,000"))
            .into_item()
            .unwrap();

        assert_eq!(item.kind(), ItemKind::Funding);
        assert_eq!(item.offer.amount(), "$500,000");
        assert_eq!(item.offer.action_label(), "Invest Now");
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let violations = record(ItemKind::Funding, Some("$29.99/month"), None)
            .into_item()
            .unwrap_err();
        assert_eq!(
            violations,
            vec![SeedViolation::KindMismatch {
                item_id: 1,
                kind: "funding".to_string()
            }]
        );

        // Both fields populated is also a mismatch
        let both = record(ItemKind::Subscription, Some("$1"), Some("$2")).into_item();
        assert!(both.is_err());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut bad = record(ItemKind::Subscription, Some("$29.99/month"), None);
        bad.rating = 5.5;
        let violations = bad.into_item().unwrap_err();
        assert!(matches!(violations[0], SeedViolation::RatingOutOfRange { item_id: 1, .. }));

        let mut edge = record(ItemKind::Subscription, Some("$29.99/month"), None);
        edge.rating = 5.0;
        assert!(edge.into_item().is_ok());
    }

    #[test]
    fn test_item_serializes_kind_and_amount() {
        let item = record(ItemKind::Funding, None, Some("$500,000"))
            .into_item()
            .unwrap();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["kind"], "funding");
        assert_eq!(json["fundingGoal"], "$500,000");
        assert_eq!(json["category"], "AI & Robotics");
        assert_eq!(json["reviewCount"], 28);
        assert!(json.get("price").is_none());
    }

    #[test]
    fn test_to_record_restores_seed_shape() {
        let original = record(ItemKind::Subscription, Some("$29.99/month"), None);
        let item = original.clone().into_item().unwrap();
        assert_eq!(item.to_record(), original);
    }

    #[test]
    fn test_searchable_fields_include_category_name() {
        let item = record(ItemKind::Funding, None, Some("$500,000"))
            .into_item()
            .unwrap();
        assert!(item.searchable_fields().contains(&"AI & Robotics"));
        assert!(item.searchable_fields().contains(&"Columbia University students"));
    }
}
