//! Display-name and plan resolution from user profiles.
//!
//! Profiles are written by the auth collaborator; this service only reads
//! them. A missing or unreadable profile degrades to whatever fallback the
//! caller has (submitted username, free plan) rather than failing the
//! request.

use std::str::FromStr;

use haven_core::Plan;
use haven_store::KvStore;
use tracing::warn;

use crate::state::SharedStore;

fn profile_key(user_id: &str) -> String {
    format!("user:{user_id}:profile")
}

/// Read-only accessor for `user:{id}:profile` hashes.
#[derive(Clone)]
pub struct ProfileReader {
    store: SharedStore,
}

impl ProfileReader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// The user's display name, if a profile exists.
    pub async fn username(&self, user_id: &str) -> Option<String> {
        self.field(user_id, "username").await
    }

    /// The user's subscription plan, if a profile records one.
    pub async fn plan(&self, user_id: &str) -> Option<Plan> {
        let raw = self.field(user_id, "plan").await?;
        Plan::from_str(&raw).ok()
    }

    async fn field(&self, user_id: &str, name: &str) -> Option<String> {
        match self.store.hget_all(&profile_key(user_id)).await {
            Ok(fields) => fields.get(name).filter(|v| !v.is_empty()).cloned(),
            Err(err) => {
                warn!(user_id, %err, "profile read failed");
                None
            }
        }
    }
}
