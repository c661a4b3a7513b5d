// 🌱 Seed Data - The dataset a CatalogStore is built from
//
// The built-in seed is the content of the live site. A seed file with the
// same shape (JSON, camelCase keys) can replace it until a real backend
// serves the data.

use crate::entities::{
    Author, Category, FeaturedStory, Feed, FeedCard, ItemKind, ItemRecord, Milestone, Overview,
    ProductSpecs, Review, SpecOverview, SpecReview, TechnicalAspect, TechnicalSpec, Timeline,
    TimelineEntry,
};
use crate::error::SeedError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub feed: Feed,
}

impl SeedData {
    /// Parse seed data from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load seed data from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Canonical JSON used for fingerprinting
    pub fn to_canonical_json(&self) -> Result<String, SeedError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The built-in dataset: marketplace, Tesla FSD timeline, home feed
    pub fn builtin() -> Self {
        SeedData {
            items: builtin_items(),
            timeline: builtin_timeline(),
            feed: builtin_feed(),
        }
    }
}

// ============================================================================
// MARKETPLACE
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn author(name: &str, tag: &str, avatar: &str) -> Author {
    Author {
        name: name.to_string(),
        tag: tag.to_string(),
        avatar: Some(avatar.to_string()),
    }
}

fn builtin_items() -> Vec<ItemRecord> {
    vec![
        ItemRecord {
            id: 1,
            title: "AI-Powered Smart Home Assistant".to_string(),
            description: "Revolutionary AI assistant that learns and adapts to your lifestyle. Seeking seed funding for development.".to_string(),
            image: Some("/images/products/smart-home.jpg".to_string()),
            kind: ItemKind::Funding,
            price: None,
            funding_goal: Some("$500,000".to_string()),
            category: Category::AiRobotics,
            rating: 4.5,
            review_count: 28,
            author: author("Tech Innovators Group", "Columbia University students", "/images/avatars/team1.jpg"),
            specs: Some(smart_home_specs()),
        },
        ItemRecord {
            id: 2,
            title: "Developer Productivity Suite".to_string(),
            description: "Complete toolkit for developers to boost productivity. Monthly subscription includes all features.".to_string(),
            image: Some("/images/products/dev-tools.jpg".to_string()),
            kind: ItemKind::Subscription,
            price: Some("$29.99/month".to_string()),
            funding_goal: None,
            category: Category::Software,
            rating: 4.8,
            review_count: 156,
            author: author("CodeCraft Team", "Indie developer group", "/images/avatars/team2.jpg"),
            specs: None,
        },
        ItemRecord {
            id: 3,
            title: "Smart Manufacturing Robot".to_string(),
            description: "Advanced robotic system for automated manufacturing processes with AI integration.".to_string(),
            image: Some("/images/products/robot.jpg".to_string()),
            kind: ItemKind::Funding,
            price: None,
            funding_goal: Some("$2,000,000".to_string()),
            category: Category::Hardware,
            rating: 4.2,
            review_count: 45,
            author: author("Zhang Wei", "DaJi mechanical engineer", "/images/avatars/engineer1.jpg"),
            specs: None,
        },
    ]
}

fn smart_home_specs() -> ProductSpecs {
    let technical = [
        ("Architecture", "Distributed edge computing with cloud backup"),
        ("AI Model", "Custom transformer-based neural network"),
        ("Privacy", "Local processing with encrypted cloud sync"),
        ("Compatibility", "Works with major smart home protocols"),
        ("Hardware", "Custom-designed ARM-based processor"),
    ];

    let roadmap = [
        ("2024 Q1", "Initial Prototype", "Complete working prototype with basic functionality"),
        ("2024 Q2", "Beta Testing", "Limited release to early adopters"),
        ("2024 Q3", "Manufacturing", "Begin mass production"),
        ("2024 Q4", "Market Launch", "Full market release with complete feature set"),
    ];

    ProductSpecs {
        overview: SpecOverview {
            vision: "Create an AI assistant that truly understands and anticipates user needs".to_string(),
            problem: "Current smart home solutions lack true intelligence and adaptability".to_string(),
            solution: "Using advanced machine learning to create a personalized experience".to_string(),
        },
        technical: technical
            .iter()
            .map(|(label, value)| TechnicalSpec {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect(),
        roadmap: roadmap
            .iter()
            .map(|(date, title, description)| Milestone {
                date: date.to_string(),
                title: title.to_string(),
                description: description.to_string(),
            })
            .collect(),
        reviews: vec![
            SpecReview {
                id: 1,
                user: "John Doe".to_string(),
                avatar: Some("/images/avatars/user1.jpg".to_string()),
                rating: 5,
                date: date(2024, 1, 15),
                comment: "Impressive technology and clear development roadmap. The team's background in AI is evident.".to_string(),
            },
            SpecReview {
                id: 2,
                user: "Sarah Chen".to_string(),
                avatar: Some("/images/avatars/user2.jpg".to_string()),
                rating: 4,
                date: date(2024, 1, 14),
                comment: "Strong potential but would like to see more details about privacy protection.".to_string(),
            },
        ],
    }
}

// ============================================================================
// TIMELINE
// ============================================================================

fn aspect(id: u32, title: &str, body: &str, image: &str, reviews: Vec<Review>) -> TechnicalAspect {
    TechnicalAspect {
        id,
        title: title.to_string(),
        body_text: body.to_string(),
        image: Some(image.to_string()),
        reviews,
    }
}

const NEURAL_IMAGE: &str = "/images/topics/tesla-neural.jpg";
const VISION_IMAGE: &str = "/images/topics/tesla-vision.jpg";

fn builtin_timeline() -> Timeline {
    Timeline {
        id: "tesla-fsd-v12".to_string(),
        title: "Tesla's Full Self-Driving Beta: Version 12 Analysis".to_string(),
        image: Some("/images/topics/tesla-fsd-hero.jpg".to_string()),
        entries: vec![
            TimelineEntry {
                date: "2024-01".to_string(),
                title: "Version 12.0 Release".to_string(),
                summary_text: "Initial release of FSD Beta v12".to_string(),
                overview_text: "Tesla's FSD Beta v12.0 marks a revolutionary shift in autonomous driving, introducing a pure vision-based neural network approach that eliminates all hard-coded rules. This release represents the most significant architectural change in the system's history.".to_string(),
                aspects: vec![
                    aspect(
                        1,
                        "Final Neural Network Architecture",
                        "The production release implements a unified single-stack neural network, successfully merging city and highway driving under one AI model. Performance metrics show 30% improvement in complex scenarios.",
                        NEURAL_IMAGE,
                        vec![Review {
                            author: "Dr. Jane Smith".to_string(),
                            body_text: "The unified architecture shows remarkable improvements in handling edge cases, particularly in mixed urban-highway transitions.".to_string(),
                            timestamp: date(2024, 1, 21),
                            approved: true,
                        }],
                    ),
                    aspect(
                        2,
                        "Production Vision System",
                        "Final version brings enhanced object detection with 99.9% accuracy and sub-centimeter precision in distance estimation.",
                        VISION_IMAGE,
                        vec![],
                    ),
                ],
            },
            TimelineEntry {
                date: "2023-12".to_string(),
                title: "Public Beta Testing".to_string(),
                summary_text: "Extended testing phase begins".to_string(),
                overview_text: "The public beta testing phase of FSD v12 begins, with a select group of testers evaluating the new neural network architecture in diverse real-world conditions.".to_string(),
                aspects: vec![
                    aspect(
                        1,
                        "Beta Neural Network Performance",
                        "Initial testing shows promising results with the unified neural network approach, though some edge cases still require refinement.",
                        NEURAL_IMAGE,
                        vec![],
                    ),
                    aspect(
                        2,
                        "Beta Vision System",
                        "Testing reveals improved object detection capabilities, with particular success in challenging weather conditions.",
                        VISION_IMAGE,
                        vec![],
                    ),
                ],
            },
            TimelineEntry {
                date: "2023-11".to_string(),
                title: "Architecture Announcement".to_string(),
                summary_text: "Tesla reveals new neural network approach".to_string(),
                overview_text: "Tesla announces a fundamental redesign of the FSD system, moving to a pure neural network approach and eliminating all hard-coded rules.".to_string(),
                aspects: vec![aspect(
                    1,
                    "Proposed Architecture",
                    "Detailed plans for the new single-stack neural network are revealed, promising better handling of complex scenarios.",
                    NEURAL_IMAGE,
                    vec![],
                )],
            },
            TimelineEntry {
                date: "2023-10".to_string(),
                title: "Development Begins".to_string(),
                summary_text: "Initial work on version 12 starts".to_string(),
                overview_text: "Development of FSD v12 begins with the ambitious goal of creating a pure vision-based neural network system.".to_string(),
                aspects: vec![aspect(
                    1,
                    "Initial Research",
                    "Early research and development work begins on the feasibility of a pure neural network approach.",
                    NEURAL_IMAGE,
                    vec![],
                )],
            },
        ],
    }
}

// ============================================================================
// HOME FEED
// ============================================================================

fn builtin_feed() -> Feed {
    let cards = [
        (1, "Boston Dynamics Atlas", "Evolution of Atlas: From First Steps to Advanced Manipulation", "/images/topics/atlas-timeline.jpg", "A comprehensive timeline of Atlas robot's development from its initial release to the latest capabilities."),
        (2, "Tesla FSD", "Tesla's Full Self-Driving Beta: Version 12 Analysis", "/images/topics/tesla-fsd.jpg", "Deep dive into the latest FSD beta release and its neural network improvements."),
        (3, "SpaceX Starship", "Starship's Second Test Flight: Technical Deep Dive", "/images/topics/starship.jpg", "Analysis of improvements and technical specifications of the latest Starship test."),
        (4, "Apple M3 Chip", "Apple Silicon Evolution: From M1 to M3 Max", "/images/topics/m3-chip.jpg", "Technical analysis of Apple's chip architecture development and performance improvements."),
        (5, "OpenAI GPT", "GPT Architecture Evolution: From GPT-1 to GPT-4", "/images/topics/gpt4.jpg", "Deep dive into the architectural changes and capabilities of GPT models over time."),
        (6, "Quantum Computing", "IBM's Quantum Roadmap: From 27 to 1000+ Qubits", "/images/topics/quantum.jpg", "Comprehensive analysis of IBM's quantum computing development and future plans."),
    ];

    Feed {
        overview: Overview {
            title: "Discover the evolution of technology through comprehensive timelines".to_string(),
            description: "Your go-to platform for in-depth technical evolution timelines and expert analysis of breakthrough technologies.".to_string(),
            features: [
                "Comprehensive timelines",
                "Expert analysis",
                "Topic-based organization",
                "Technical deep-dives",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        },
        featured: Some(FeaturedStory {
            title: "Boston Dynamics' Atlas Robot: Latest Breakthrough in Manipulation".to_string(),
            description: "The newest update brings unprecedented dexterity to robotic hands, allowing Atlas to handle complex objects with human-like precision.".to_string(),
            topic: "Robotics".to_string(),
            image: Some("/images/topics/atlas-hero.jpg".to_string()),
        }),
        cards: cards
            .iter()
            .map(|(id, topic, title, image, description)| FeedCard {
                id: *id,
                topic: topic.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                image: Some(image.to_string()),
            })
            .collect(),
        navigation: [
            "AI & Robotics",
            "Consumer Electronics",
            "Computing",
            "Energy",
            "Telecommunications",
            "Transportation",
            "Aerospace",
            "Semiconductors",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_seed_contents() {
        let seed = SeedData::builtin();

        assert_eq!(seed.items.len(), 3);
        assert_eq!(seed.timeline.dates(), vec!["2024-01", "2023-12", "2023-11", "2023-10"]);
        assert_eq!(seed.feed.cards.len(), 6);
        assert_eq!(seed.feed.navigation.len(), 8);
        assert!(seed.items[0].specs.is_some());
    }

    #[test]
    fn test_canonical_json_parses_back() {
        let seed = SeedData::builtin();
        let json = seed.to_canonical_json().unwrap();
        assert_eq!(SeedData::from_json(&json).unwrap(), seed);
    }

    #[test]
    fn test_feed_and_timeline_are_optional() {
        let seed = SeedData::from_json(r#"{"items": []}"#).unwrap();
        assert!(seed.items.is_empty());
        assert!(seed.timeline.entries.is_empty());
        assert_eq!(seed.feed, Feed::default());
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let json = r#"{"items": [{
            "id": 9, "title": "t", "description": "d", "kind": "funding",
            "fundingGoal": "$1", "category": "Gardening", "rating": 1.0,
            "reviewCount": 0, "author": {"name": "n", "tag": "t"}
        }]}"#;

        assert!(matches!(SeedData::from_json(json), Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SeedData::builtin().to_canonical_json().unwrap()).unwrap();

        let seed = SeedData::from_file(file.path()).unwrap();
        assert_eq!(seed.items[1].title, "Developer Productivity Suite");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SeedData::from_file("/nonexistent/seed.json");
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}
