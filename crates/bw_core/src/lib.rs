pub mod error;
pub mod stats;
pub mod types;

pub use error::Error;
pub use stats::{Aggregator, PublisherStats, PublisherSummary};
pub use types::{ArticleGroup, ArticleRecord, ClassificationResult};

pub type Result<T> = std::result::Result<T, Error>;
