// 📰 Feed Entity - Home page content and topic navigation

use crate::slug::slugify;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Hero story at the top of the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedStory {
    pub title: String,
    pub description: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Topic card linking to a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedCard {
    pub id: u32,
    pub topic: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FeedCard {
    pub fn topic_slug(&self) -> String {
        slugify(&self.topic)
    }
}

/// Header menu topic with its link slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTopic {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub overview: Overview,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<FeaturedStory>,
    #[serde(default)]
    pub cards: Vec<FeedCard>,
    /// Topic names for the header menu
    #[serde(default)]
    pub navigation: Vec<String>,
}

impl Feed {
    pub fn navigation_topics(&self) -> Vec<NavigationTopic> {
        self.navigation
            .iter()
            .map(|name| NavigationTopic {
                name: name.clone(),
                slug: slugify(name),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_and_menu_share_slug_rule() {
        let feed = Feed {
            cards: vec![FeedCard {
                id: 4,
                topic: "Apple M3 Chip".to_string(),
                title: "Apple Silicon Evolution".to_string(),
                description: String::new(),
                image: None,
            }],
            navigation: vec!["Apple M3 Chip".to_string(), "AI & Robotics".to_string()],
            ..Default::default()
        };

        let topics = feed.navigation_topics();
        assert_eq!(feed.cards[0].topic_slug(), topics[0].slug);
        assert_eq!(topics[0].slug, "apple-m3-chip");
        assert_eq!(topics[1].slug, "ai-robotics");
    }
}
