use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use bw_core::{ClassificationResult, Result};

use super::ClickbaitModel;
use crate::verdict;

/// Surface markers that make a headline look sensational to the offline model.
const SENSATIONAL_MARKERS: &[&str] = &["!", "you won't believe", "shocking", "..."];

/// Offline stand-in for the real endpoint. Judges headlines by surface
/// markers only, deterministically, and counts how often it is consulted so
/// tests can assert that bounded scans stop calling it.
#[derive(Default)]
pub struct DummyModel {
    calls: AtomicUsize,
}

impl DummyModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel")
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl ClickbaitModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn classify_title(&self, title: &str) -> Result<ClassificationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let lowered = title.to_lowercase();
        let sensational = SENSATIONAL_MARKERS.iter().any(|m| lowered.contains(m));
        let rationale = if sensational {
            format!(
                "The headline \"{title}\" leans on sensational phrasing, so it {}.",
                verdict::CLICKBAIT_PHRASE
            )
        } else {
            format!(
                "The headline \"{title}\" reads as a plain statement and {}.",
                verdict::NOT_CLICKBAIT_PHRASE
            )
        };

        Ok(ClassificationResult {
            is_clickbait: verdict::is_clickbait(&rationale),
            rationale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flags_sensational_titles() {
        let model = DummyModel::new();
        let result = model
            .classify_title("You won't believe what happened next")
            .await
            .unwrap();
        assert!(result.is_clickbait);
        assert!(result.rationale.contains("is clickbait"));
    }

    #[tokio::test]
    async fn clears_plain_titles() {
        let model = DummyModel::new();
        let result = model
            .classify_title("City council approves budget")
            .await
            .unwrap();
        assert!(!result.is_clickbait);
        assert!(result.rationale.contains("is not clickbait"));
    }

    #[tokio::test]
    async fn counts_every_consultation() {
        let model = DummyModel::new();
        assert_eq!(model.calls(), 0);
        model.classify_title("a").await.unwrap();
        model.classify_title("b!").await.unwrap();
        assert_eq!(model.calls(), 2);
    }
}
