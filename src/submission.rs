// 📮 Submissions - One-way commands from the presentation layer
//
// Reviews, proposed aspects and product requests are handed to a sink and
// acknowledged with a receipt. They are never merged into the CatalogStore,
// and the core does not judge their content.

use crate::error::SubmissionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

// ============================================================================
// DRAFTS
// ============================================================================

/// Technical review for one aspect of a timeline entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub entry_date: String,
    pub aspect_id: u32,
    pub body: String,
}

/// Proposal for a new technical aspect on a timeline entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDraft {
    pub entry_date: String,
    pub title: String,
    pub analysis: String,
}

/// Marketplace request for a product that does not exist yet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequestDraft {
    pub title: String,
    pub description: String,
    /// Free text; requests may name categories the catalog lacks
    pub category: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Submission {
    Review(ReviewDraft),
    Aspect(AspectDraft),
    ProductRequest(ProductRequestDraft),
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Review(_) => "review",
            Submission::Aspect(_) => "aspect",
            Submission::ProductRequest(_) => "product_request",
        }
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub kind: String,
    pub received_at: DateTime<Utc>,
}

impl Receipt {
    pub fn for_submission(submission: &Submission) -> Self {
        Receipt {
            id: uuid::Uuid::new_v4().to_string(),
            kind: submission.kind().to_string(),
            received_at: Utc::now(),
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Destination for submissions (a future backend)
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: Submission) -> Result<Receipt, SubmissionError>;
}

/// Acknowledges every submission and records it in the log
#[derive(Debug, Default)]
pub struct LoggingSink;

impl SubmissionSink for LoggingSink {
    fn submit(&self, submission: Submission) -> Result<Receipt, SubmissionError> {
        let receipt = Receipt::for_submission(&submission);

        match &submission {
            Submission::Review(draft) => tracing::info!(
                receipt = %receipt.id,
                entry_date = %draft.entry_date,
                aspect_id = draft.aspect_id,
                "Review submitted"
            ),
            Submission::Aspect(draft) => tracing::info!(
                receipt = %receipt.id,
                entry_date = %draft.entry_date,
                title = %draft.title,
                "Aspect proposed"
            ),
            Submission::ProductRequest(draft) => tracing::info!(
                receipt = %receipt.id,
                title = %draft.title,
                category = %draft.category,
                "Product requested"
            ),
        }

        Ok(receipt)
    }
}

/// Keeps submissions in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<(Receipt, Submission)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<(Receipt, Submission)> {
        match self.received.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.received.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&self, submission: Submission) -> Result<Receipt, SubmissionError> {
        let receipt = Receipt::for_submission(&submission);
        let mut guard = self
            .received
            .lock()
            .map_err(|_| SubmissionError::Unavailable("memory sink lock poisoned".to_string()))?;
        guard.push((receipt.clone(), submission));
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Submission {
        Submission::ProductRequest(ProductRequestDraft {
            title: "Home energy monitor".to_string(),
            description: "Tracks appliance usage".to_string(),
            category: "Energy".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
    }

    #[test]
    fn test_logging_sink_acknowledges() {
        let receipt = LoggingSink.submit(request()).unwrap();

        assert_eq!(receipt.kind, "product_request");
        assert_eq!(receipt.id.len(), 36);
    }

    #[test]
    fn test_receipts_are_unique() {
        let sink = LoggingSink;
        let a = sink.submit(request()).unwrap();
        let b = sink.submit(request()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_memory_sink_keeps_arrival_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.submit(Submission::Review(ReviewDraft {
            entry_date: "2024-01".to_string(),
            aspect_id: 2,
            body: "Vision accuracy claims need independent data".to_string(),
        }))
        .unwrap();
        sink.submit(request()).unwrap();

        let kinds: Vec<&str> = sink.received().iter().map(|(_, s)| s.kind()).collect();
        assert_eq!(kinds, vec!["review", "product_request"]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_memory_sink_len_tracks_submissions() {
        let sink = MemorySink::new();
        for expected in 1..=3 {
            sink.submit(request()).unwrap();
            assert_eq!(sink.len(), expected);
        }
        assert!(!sink.is_empty());
        assert_eq!(sink.received().len(), 3);
    }

    #[test]
    fn test_empty_drafts_are_not_rejected() {
        let receipt = MemorySink::new()
            .submit(Submission::Aspect(AspectDraft::default()))
            .unwrap();
        assert_eq!(receipt.kind, "aspect");
    }

    #[test]
    fn test_submission_json_shape() {
        let json = serde_json::to_value(Submission::Review(ReviewDraft {
            entry_date: "2023-12".to_string(),
            aspect_id: 1,
            body: "Solid".to_string(),
        }))
        .unwrap();

        assert_eq!(json["type"], "review");
        assert_eq!(json["entryDate"], "2023-12");
        assert_eq!(json["aspectId"], 1);
    }
}
