use serde::Serialize;

use bw_core::types::{DEFAULT_SAMPLE_SIZE, MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE};
use bw_core::{Aggregator, ClassificationResult, Error, PublisherSummary, Result};

/// Where the session stands. One session per process; restarting a scan
/// re-runs it from the beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Ready,
    Scanning,
    Summary,
}

/// One classified headline, rendered to pollers as soon as it is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct ScanItem {
    pub publisher: String,
    pub title: String,
    pub is_clickbait: bool,
    pub rationale: String,
}

/// Everything a client needs to render the UI at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub has_credential: bool,
    pub sample_size: u32,
    pub items: Vec<ScanItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<PublisherSummary>>,
}

/// Explicit session state, mutated only by event handlers. Replaces the
/// rerun-the-whole-script model of the legacy UI.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    api_key: Option<String>,
    sample_size: u32,
    items: Vec<ScanItem>,
    stats: Aggregator,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            api_key: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
            items: Vec::new(),
            stats: Aggregator::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Supply the API credential. A blank key is rejected and the session
    /// stays where it was.
    pub fn set_credential(&mut self, api_key: &str) -> Result<()> {
        if self.phase == Phase::Scanning {
            return Err(Error::Session("scan in progress".to_string()));
        }
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::MissingCredential);
        }
        self.api_key = Some(api_key.to_string());
        if self.phase == Phase::Idle {
            self.phase = Phase::Ready;
        }
        Ok(())
    }

    pub fn set_sample_size(&mut self, sample_size: u32) -> Result<()> {
        if self.phase == Phase::Scanning {
            return Err(Error::Session("scan in progress".to_string()));
        }
        if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&sample_size) {
            return Err(Error::InvalidSampleSize(sample_size));
        }
        self.sample_size = sample_size;
        Ok(())
    }

    /// Move to Scanning, wiping any previous results. Returns the credential
    /// and the per-publisher bound the scan must honor.
    pub fn begin_scan(&mut self) -> Result<(String, u32)> {
        match self.phase {
            Phase::Scanning => Err(Error::Session("scan already running".to_string())),
            Phase::Idle => Err(Error::MissingCredential),
            Phase::Ready | Phase::Summary => {
                let api_key = self.api_key.clone().ok_or(Error::MissingCredential)?;
                self.items.clear();
                self.stats = Aggregator::new();
                self.phase = Phase::Scanning;
                Ok((api_key, self.sample_size))
            }
        }
    }

    pub fn publisher_total(&self, publisher: &str) -> u32 {
        self.stats.total_for(publisher)
    }

    pub fn record_item(&mut self, publisher: &str, title: &str, result: ClassificationResult) {
        self.stats.record(publisher, result.is_clickbait);
        self.items.push(ScanItem {
            publisher: publisher.to_string(),
            title: title.to_string(),
            is_clickbait: result.is_clickbait,
            rationale: result.rationale,
        });
    }

    pub fn finish_scan(&mut self) {
        self.phase = Phase::Summary;
    }

    /// A failed classification aborts the scan. Items recorded so far stay
    /// visible, but no summary is produced.
    pub fn abort_scan(&mut self) {
        self.phase = Phase::Ready;
    }

    pub fn summary(&self) -> Vec<PublisherSummary> {
        self.stats.summary()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            has_credential: self.api_key.is_some(),
            sample_size: self.sample_size,
            items: self.items.clone(),
            summary: match self.phase {
                Phase::Summary => Some(self.summary()),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(is_clickbait: bool) -> ClassificationResult {
        ClassificationResult {
            is_clickbait,
            rationale: String::new(),
        }
    }

    #[test]
    fn blank_credential_keeps_session_idle() {
        let mut session = Session::new();
        assert!(matches!(
            session.set_credential("   "),
            Err(Error::MissingCredential)
        ));
        assert_eq!(session.phase(), Phase::Idle);

        session.set_credential("sk-test").unwrap();
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn sample_size_is_bounded() {
        let mut session = Session::new();
        assert_eq!(session.sample_size(), 10);
        assert!(matches!(
            session.set_sample_size(2),
            Err(Error::InvalidSampleSize(2))
        ));
        assert!(matches!(
            session.set_sample_size(51),
            Err(Error::InvalidSampleSize(51))
        ));
        session.set_sample_size(3).unwrap();
        session.set_sample_size(50).unwrap();
        assert_eq!(session.sample_size(), 50);
    }

    #[test]
    fn scan_needs_a_credential() {
        let mut session = Session::new();
        assert!(matches!(session.begin_scan(), Err(Error::MissingCredential)));

        session.set_credential("sk-test").unwrap();
        let (key, bound) = session.begin_scan().unwrap();
        assert_eq!(key, "sk-test");
        assert_eq!(bound, 10);
        assert_eq!(session.phase(), Phase::Scanning);
    }

    #[test]
    fn concurrent_scan_is_rejected() {
        let mut session = Session::new();
        session.set_credential("sk-test").unwrap();
        session.begin_scan().unwrap();
        assert!(matches!(session.begin_scan(), Err(Error::Session(_))));
        assert!(matches!(
            session.set_sample_size(5),
            Err(Error::Session(_))
        ));
    }

    #[test]
    fn restart_wipes_previous_results() {
        let mut session = Session::new();
        session.set_credential("sk-test").unwrap();
        session.begin_scan().unwrap();
        session.record_item("a", "t", verdict(true));
        session.finish_scan();
        assert_eq!(session.phase(), Phase::Summary);
        assert_eq!(session.summary().len(), 1);

        session.begin_scan().unwrap();
        assert_eq!(session.publisher_total("a"), 0);
        assert!(session.snapshot().items.is_empty());
    }

    #[test]
    fn abort_keeps_items_but_drops_summary() {
        let mut session = Session::new();
        session.set_credential("sk-test").unwrap();
        session.begin_scan().unwrap();
        session.record_item("a", "t", verdict(false));
        session.abort_scan();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Ready);
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.summary.is_none());
    }
}
