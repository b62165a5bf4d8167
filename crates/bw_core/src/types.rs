use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest per-publisher sample the operator can request.
pub const MIN_SAMPLE_SIZE: u32 = 3;
/// Largest per-publisher sample the operator can request.
pub const MAX_SAMPLE_SIZE: u32 = 50;
pub const DEFAULT_SAMPLE_SIZE: u32 = 10;

/// One article as it appears in the prepared dataset. Only `provider` and
/// `title` feed the pipeline; the remaining fields come along from the data
/// preparation step and are ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub provider: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Articles covering the same event, in dataset order. The lead record speaks
/// for the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleGroup(pub Vec<ArticleRecord>);

impl ArticleGroup {
    pub fn lead(&self) -> Option<&ArticleRecord> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Verdict for a single headline. Derived per call, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_clickbait: bool,
    pub rationale: String,
}
