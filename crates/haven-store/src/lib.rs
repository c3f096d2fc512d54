//! Key-value store contract and backends.
//!
//! Every Haven domain crate talks to the store through [`KvStore`]:
//!
//! - [`MemoryStore`] — in-process backend for development and tests.
//!   Construct one per test; it is never a process-wide singleton.
//! - [`RedisStore`] — production backend over a Redis connection manager.
//!
//! The contract is deliberately the small slice of Redis the domain layer
//! needs: string get/set with optional expiry, an atomic
//! increment-with-expiry, hashes, and sets.

mod error;
mod memory;
mod redis_store;
mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use traits::KvStore;
