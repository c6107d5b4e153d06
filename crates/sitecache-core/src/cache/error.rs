use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid bucket name: {0:?}")]
    InvalidBucketName(String),

    #[error("Corrupt cache entry {path}: {reason}")]
    CorruptEntry { path: String, reason: String },

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}
