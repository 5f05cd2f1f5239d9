use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to serialize or deserialize a cache entry: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("The cache store is unavailable: {0}")]
    StoreUnavailable(String),
}
