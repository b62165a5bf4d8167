use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No API key supplied")]
    MissingCredential,

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Sample size {0} is out of range [{min}, {max}]", min = crate::types::MIN_SAMPLE_SIZE, max = crate::types::MAX_SAMPLE_SIZE)]
    InvalidSampleSize(u32),

    #[error("Session error: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, Error>;
