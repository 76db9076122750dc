use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShelfboardError>;

/// Errors surfaced by the persistence cache.
///
/// Board and drag operations degrade silently (not-found ids and malformed
/// input are no-ops) and never produce these.
#[derive(Debug, Error)]
pub enum ShelfboardError {
    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
