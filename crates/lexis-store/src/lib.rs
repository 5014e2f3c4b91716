mod backend;
mod collection;
mod database;

pub use backend::{Backend, JsonFileBackend, MemoryBackend};
pub use collection::Collection;
pub use database::Database;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
