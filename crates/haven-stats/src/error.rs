//! Stats error types.

use haven_store::StoreError;

/// Stats error.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Store failure on a write path.
    #[error("store: {0}")]
    Store(#[from] StoreError),
}
