pub mod models;
pub mod verdict;

pub use models::{create_model, ClickbaitModel};

pub mod prelude {
    pub use super::models::{create_model, ClickbaitModel};
    pub use super::verdict;
    pub use bw_core::{ClassificationResult, Error, Result};
}
