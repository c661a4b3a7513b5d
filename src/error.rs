// ⚠️ Error types
// Seed loading is the only hard failure of the catalog; everything else is absence.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One structural problem found in seed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedViolation {
    /// Item kind does not match the populated price / funding goal field
    KindMismatch { item_id: u32, kind: String },

    /// Two items share the same id
    DuplicateItemId { item_id: u32 },

    /// Rating outside 0.0..=5.0
    RatingOutOfRange { item_id: u32, rating: String },

    /// Two timeline entries share the same date
    DuplicateTimelineDate { date: String },

    /// Two aspects within one timeline entry share the same id
    DuplicateAspectId { date: String, aspect_id: u32 },

    /// Two reviews on one product spec page share the same id
    DuplicateSpecReviewId { item_id: u32, review_id: u32 },

    /// Product spec review rating outside 0..=5
    SpecReviewRatingOutOfRange { item_id: u32, review_id: u32, rating: u8 },
}

impl fmt::Display for SeedViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedViolation::KindMismatch { item_id, kind } => write!(
                f,
                "item {}: kind '{}' requires exactly its own price field",
                item_id, kind
            ),
            SeedViolation::DuplicateItemId { item_id } => {
                write!(f, "item id {} appears more than once", item_id)
            }
            SeedViolation::RatingOutOfRange { item_id, rating } => {
                write!(f, "item {}: rating {} outside 0.0..=5.0", item_id, rating)
            }
            SeedViolation::DuplicateTimelineDate { date } => {
                write!(f, "timeline date {} appears more than once", date)
            }
            SeedViolation::DuplicateAspectId { date, aspect_id } => write!(
                f,
                "timeline entry {}: aspect id {} appears more than once",
                date, aspect_id
            ),
            SeedViolation::DuplicateSpecReviewId { item_id, review_id } => write!(
                f,
                "item {}: spec review id {} appears more than once",
                item_id, review_id
            ),
            SeedViolation::SpecReviewRatingOutOfRange {
                item_id,
                review_id,
                rating,
            } => write!(
                f,
                "item {}: spec review {} rating {} outside 0..=5",
                item_id, review_id, rating
            ),
        }
    }
}

/// Errors raised while turning seed data into a `CatalogStore`
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed JSON")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid seed data: {}", join_violations(.0))]
    Invalid(Vec<SeedViolation>),
}

impl SeedError {
    /// Violations behind an `Invalid` error (empty for IO / parse failures)
    pub fn violations(&self) -> &[SeedViolation] {
        match self {
            SeedError::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[SeedViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by a submission sink
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Submission sink unavailable: {0}")]
    Unavailable(String),
}
