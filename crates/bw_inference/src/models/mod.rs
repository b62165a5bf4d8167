use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use bw_core::{ClassificationResult, Error, Result};

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// A model that judges one headline at a time.
#[async_trait]
pub trait ClickbaitModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify a single headline. One blocking round trip per call; there is
    /// no retry, so a failure here fails the caller's whole scan.
    async fn classify_title(&self, title: &str) -> Result<ClassificationResult>;
}

pub fn create_model(kind: &str, api_key: &str) -> Result<Arc<dyn ClickbaitModel>> {
    match kind {
        "openai" => Ok(Arc::new(OpenAiModel::new(api_key)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Classification(format!("unknown model kind: {other}"))),
    }
}
