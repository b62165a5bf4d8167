use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Running counts for one publisher. `clickbait` never exceeds `total`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PublisherStats {
    pub total: u32,
    pub clickbait: u32,
}

impl PublisherStats {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.clickbait) / f64::from(self.total) * 100.0
        }
    }
}

/// Summary row for one publisher, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherSummary {
    pub publisher: String,
    pub total: u32,
    pub clickbait: u32,
    pub ratio: f64,
}

impl std::fmt::Display for PublisherSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:.2}% ({}/{})",
            self.publisher, self.ratio, self.clickbait, self.total
        )
    }
}

/// Per-publisher clickbait bookkeeping for one scan. Publishers are reported
/// in the order they were first seen so reruns over the same dataset produce
/// the same summary.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    counts: HashMap<String, PublisherStats>,
    order: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, publisher: &str, is_clickbait: bool) {
        if !self.counts.contains_key(publisher) {
            self.order.push(publisher.to_string());
        }
        let stats = self.counts.entry(publisher.to_string()).or_default();
        stats.total += 1;
        if is_clickbait {
            stats.clickbait += 1;
        }
    }

    pub fn total_for(&self, publisher: &str) -> u32 {
        self.counts.get(publisher).map_or(0, |s| s.total)
    }

    pub fn ratio(&self, publisher: &str) -> f64 {
        self.counts.get(publisher).map_or(0.0, |s| s.ratio())
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Summary rows for every publisher with at least one examined headline,
    /// in first-seen order.
    pub fn summary(&self) -> Vec<PublisherSummary> {
        self.order
            .iter()
            .filter_map(|publisher| {
                let stats = self.counts.get(publisher)?;
                if stats.total == 0 {
                    return None;
                }
                Some(PublisherSummary {
                    publisher: publisher.clone(),
                    total: stats.total,
                    clickbait: stats.clickbait,
                    ratio: stats.ratio(),
                })
            })
            .collect()
    }
}
