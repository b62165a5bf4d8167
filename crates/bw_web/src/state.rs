use std::sync::Arc;

use tokio::sync::RwLock;

use bw_core::Result;
use bw_dataset::DatasetLoader;
use bw_inference::ClickbaitModel;

use crate::session::Session;

/// Builds a classifier for a given credential. Injected so tests can swap in
/// an offline model.
pub type ModelFactory = Arc<dyn Fn(&str) -> Result<Arc<dyn ClickbaitModel>> + Send + Sync>;

pub struct AppState {
    pub loader: DatasetLoader,
    pub models: ModelFactory,
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn new(loader: DatasetLoader, models: ModelFactory) -> Self {
        Self {
            loader,
            models,
            session: RwLock::new(Session::new()),
        }
    }
}
