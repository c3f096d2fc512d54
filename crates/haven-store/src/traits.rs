//! Data-access trait for key-value backends.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

/// Key-value store contract.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are called
/// concurrently from every request handler. Absent keys are `Ok(None)` /
/// empty collections, never errors.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a string value. `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a string value without expiry.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write a string value with an expiry.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Atomically increment an integer value by one and (re)set its expiry.
    ///
    /// Returns the value after the increment. A missing key counts from zero.
    async fn incr_ex(&self, key: &str, ttl: Duration) -> Result<i64, StoreError>;

    /// Delete a key of any type. No-op when absent.
    async fn del(&self, key: &str) -> Result<(), StoreError>;

    /// Read all fields of a hash. Empty map when the key does not exist.
    async fn hget_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// Write multiple hash fields, creating the hash if needed.
    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError>;

    /// Add a member to a set. No-op when already present.
    async fn sadd(&self, key: &str, member: &str) -> Result<(), StoreError>;

    /// Remove a member from a set. No-op when absent.
    async fn srem(&self, key: &str, member: &str) -> Result<(), StoreError>;

    /// Read all members of a set. Empty when the key does not exist.
    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Number of members in a set.
    async fn scard(&self, key: &str) -> Result<u64, StoreError>;
}

/// Blanket implementation for `Arc<S>` where `S: KvStore`.
///
/// This allows passing `Arc<dyn KvStore>` directly to components expecting
/// `impl KvStore`.
#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    #[inline]
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    #[inline]
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    #[inline]
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        (**self).set_ex(key, value, ttl).await
    }

    #[inline]
    async fn incr_ex(&self, key: &str, ttl: Duration) -> Result<i64, StoreError> {
        (**self).incr_ex(key, ttl).await
    }

    #[inline]
    async fn del(&self, key: &str) -> Result<(), StoreError> {
        (**self).del(key).await
    }

    #[inline]
    async fn hget_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        (**self).hget_all(key).await
    }

    #[inline]
    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        (**self).hset_all(key, fields).await
    }

    #[inline]
    async fn sadd(&self, key: &str, member: &str) -> Result<(), StoreError> {
        (**self).sadd(key, member).await
    }

    #[inline]
    async fn srem(&self, key: &str, member: &str) -> Result<(), StoreError> {
        (**self).srem(key, member).await
    }

    #[inline]
    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        (**self).smembers(key).await
    }

    #[inline]
    async fn scard(&self, key: &str) -> Result<u64, StoreError> {
        (**self).scard(key).await
    }
}
