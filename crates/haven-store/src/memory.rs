//! In-memory store backend.
//!
//! Suitable for development and tests. Construct one per test run so suites
//! stay isolated and parallel-safe.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::traits::KvStore;

#[derive(Debug, Clone)]
struct StringEntry {
    value: String,
    /// Expiry instant; `None` means the entry never expires.
    expires_at: Option<Instant>,
}

impl StringEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|exp| now < exp)
    }
}

#[derive(Debug, Default)]
struct Inner {
    strings: HashMap<String, StringEntry>,
    hashes: HashMap<String, HashMap<String, String>>,
    sets: HashMap<String, HashSet<String>>,
}

/// In-memory [`KvStore`] backend.
///
/// Expired string entries are evicted lazily on access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut inner = self.inner.write();
        match inner.strings.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                inner.strings.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.write().strings.insert(
            key.to_string(),
            StringEntry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        self.inner.write().strings.insert(
            key.to_string(),
            StringEntry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn incr_ex(&self, key: &str, ttl: Duration) -> Result<i64, StoreError> {
        let now = Instant::now();
        let mut inner = self.inner.write();
        let current = match inner.strings.get(key) {
            Some(entry) if entry.is_live(now) => entry
                .value
                .parse::<i64>()
                .map_err(StoreError::decode)?,
            _ => 0,
        };
        let next = current + 1;
        inner.strings.insert(
            key.to_string(),
            StringEntry {
                value: next.to_string(),
                expires_at: Some(now + ttl),
            },
        );
        Ok(next)
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner.strings.remove(key);
        inner.hashes.remove(key);
        inner.sets.remove(key);
        Ok(())
    }

    async fn hget_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        Ok(self
            .inner
            .read()
            .hashes
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let hash = inner.hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<(), StoreError> {
        self.inner
            .write()
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn srem(&self, key: &str, member: &str) -> Result<(), StoreError> {
        if let Some(set) = self.inner.write().sets.get_mut(key) {
            set.remove(member);
        }
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .inner
            .read()
            .sets
            .get(key)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn scard(&self, key: &str) -> Result<u64, StoreError> {
        Ok(self.inner.read().sets.get(key).map_or(0, |s| s.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        store.del("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_ex_expires() {
        let store = MemoryStore::new();
        store
            .set_ex("k", "v", Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn incr_counts_from_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.incr_ex("n", Duration::from_secs(60)).await.unwrap(), 1);
        assert_eq!(store.incr_ex("n", Duration::from_secs(60)).await.unwrap(), 2);
        assert_eq!(store.incr_ex("n", Duration::from_secs(60)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn incr_restarts_after_expiry() {
        let store = MemoryStore::new();
        assert_eq!(
            store.incr_ex("n", Duration::from_millis(10)).await.unwrap(),
            1
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            store.incr_ex("n", Duration::from_millis(10)).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn incr_rejects_non_numeric() {
        let store = MemoryStore::new();
        store.set("n", "not a number").await.unwrap();
        assert!(matches!(
            store.incr_ex("n", Duration::from_secs(60)).await,
            Err(StoreError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn hash_fields_merge() {
        let store = MemoryStore::new();
        store
            .hset_all("h", &[("a".into(), "1".into()), ("b".into(), "2".into())])
            .await
            .unwrap();
        store
            .hset_all("h", &[("b".into(), "3".into())])
            .await
            .unwrap();

        let all = store.hget_all("h").await.unwrap();
        assert_eq!(all.get("a").map(String::as_str), Some("1"));
        assert_eq!(all.get("b").map(String::as_str), Some("3"));
    }

    #[tokio::test]
    async fn set_membership() {
        let store = MemoryStore::new();
        store.sadd("s", "a").await.unwrap();
        store.sadd("s", "a").await.unwrap();
        store.sadd("s", "b").await.unwrap();
        assert_eq!(store.scard("s").await.unwrap(), 2);

        store.srem("s", "a").await.unwrap();
        assert_eq!(store.smembers("s").await.unwrap(), vec!["b".to_string()]);

        store.srem("s", "missing").await.unwrap();
        assert_eq!(store.scard("s").await.unwrap(), 1);
    }
}
