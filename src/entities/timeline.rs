// 🕰️ Timeline Entity - Dated milestones in a topic's history
//
// A timeline is stored newest-first; insertion order is display order.
// Dates are period keys ("2024-01") and unique within one timeline.

use crate::error::SeedViolation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Expert review attached to a technical aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: String,
    pub body_text: String,
    pub timestamp: NaiveDate,
    pub approved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalAspect {
    /// Unique within the parent entry
    pub id: u32,
    pub title: String,
    pub body_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl TechnicalAspect {
    pub fn approved_reviews(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(|r| r.approved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub date: String,
    pub title: String,
    /// One-line summary shown on the timeline rail
    pub summary_text: String,
    /// Long-form overview of the milestone
    pub overview_text: String,
    #[serde(default)]
    pub aspects: Vec<TechnicalAspect>,
}

impl TimelineEntry {
    fn violations(&self) -> Vec<SeedViolation> {
        let mut seen = HashSet::new();
        self.aspects
            .iter()
            .filter(|a| !seen.insert(a.id))
            .map(|a| SeedViolation::DuplicateAspectId {
                date: self.date.clone(),
                aspect_id: a.id,
            })
            .collect()
    }
}

/// The timeline of one topic (e.g., "tesla-fsd-v12")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Dates in display order
    pub fn dates(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.date.as_str()).collect()
    }

    /// First entry in display order (the newest by convention)
    pub fn latest(&self) -> Option<&TimelineEntry> {
        self.entries.first()
    }

    /// Structural problems: duplicate dates, duplicate aspect ids per entry
    pub fn violations(&self) -> Vec<SeedViolation> {
        let mut violations = Vec::new();
        let mut reported = HashSet::new();
        let mut seen = HashSet::new();

        for entry in &self.entries {
            if !seen.insert(entry.date.as_str()) && reported.insert(entry.date.as_str()) {
                violations.push(SeedViolation::DuplicateTimelineDate {
                    date: entry.date.clone(),
                });
            }
            violations.extend(entry.violations());
        }

        violations
    }
}
