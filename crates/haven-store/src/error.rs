//! Store error types.

/// Store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend error (network, timeout, protocol).
    #[error("backend error: {0}")]
    Backend(String),

    /// A stored value could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl StoreError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }

    /// Create a decode error from any error type.
    #[inline]
    pub fn decode<E: std::fmt::Display>(err: E) -> Self {
        Self::Decode(err.to_string())
    }
}
