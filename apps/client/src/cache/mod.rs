//! Query/Mutation Cache Layer.
//!
//! Every server read goes through a [`QueryCache`] entry addressed by a
//! [`QueryKey`]. Mutations declare which keys they invalidate on success
//! (see [`invalidation`]); invalidation is mark-stale-and-refetch-on-next-
//! observation, never a synchronous refetch. Two concurrent fetches of the
//! same key have no defined relative ordering: the last response to land
//! wins.

pub mod invalidation;
pub mod refresh;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;

/// Ordered tuple identifying one cached resource and its parameters.
///
/// The first part is the resource name (`"resumes"`, `"employer-jobs"`);
/// further parts are canonical JSON renderings of the parameters, so
/// `["admin-users", {..params..}]` and `["admin-users"]` share a prefix and
/// an invalidation of the bare name hits every parameterized variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    parts: Vec<String>,
}

impl QueryKey {
    pub fn of(name: &str) -> Self {
        Self {
            parts: vec![name.to_string()],
        }
    }

    /// Appends a parameter part. Serialization failures cannot occur for the
    /// plain records used as parameters, so this keeps an infallible
    /// signature and stringifies via `Value`.
    pub fn with<P: Serialize>(mut self, param: &P) -> Self {
        let canonical = serde_json::to_value(param)
            .map(|v| v.to_string())
            .unwrap_or_default();
        self.parts.push(canonical);
        self
    }

    pub fn is_prefix_of(&self, other: &QueryKey) -> bool {
        other.parts.starts_with(&self.parts)
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.parts.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Option<Value>,
    status: QueryStatus,
    stale: bool,
}

impl CacheEntry {
    fn fresh(&self) -> Option<&Value> {
        if self.status == QueryStatus::Success && !self.stale {
            self.data.as_ref()
        } else {
            None
        }
    }
}

/// Process-wide cache of server-derived values, shared via `Arc`.
///
/// The lock is never held across an await: a fetch decides under the lock,
/// runs the network call unlocked, then re-locks to store the outcome.
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves fresh cached data, otherwise runs `fetcher` and stores the
    /// outcome under `key`. Errors leave the entry in `Error` status so the
    /// next observation retries.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Value, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ClientError>>,
    {
        {
            let mut entries = self.entries.lock().expect("cache lock poisoned");
            if let Some(entry) = entries.get(key) {
                if let Some(data) = entry.fresh() {
                    return Ok(data.clone());
                }
            }
            let prior = entries.get(key).and_then(|e| e.data.clone());
            entries.insert(
                key.clone(),
                CacheEntry {
                    data: prior,
                    status: QueryStatus::Loading,
                    stale: false,
                },
            );
        }

        let outcome = fetcher().await;

        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match outcome {
            Ok(data) => {
                entries.insert(
                    key.clone(),
                    CacheEntry {
                        data: Some(data.clone()),
                        status: QueryStatus::Success,
                        stale: false,
                    },
                );
                Ok(data)
            }
            Err(err) => {
                if let Some(entry) = entries.get_mut(key) {
                    entry.status = QueryStatus::Error;
                }
                Err(err)
            }
        }
    }

    /// Marks every entry matching one of the prefixes stale. Mounted readers
    /// refetch on their next observation; nothing happens synchronously here.
    pub fn invalidate(&self, prefixes: &[QueryKey]) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        for (key, entry) in entries.iter_mut() {
            if prefixes.iter().any(|p| p.is_prefix_of(key)) {
                debug!("Cache invalidated: {key}");
                entry.stale = true;
            }
        }
    }

    /// Drops every entry. Called on logout and on the global 401 policy so
    /// per-user data never leaks into the next session.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let dropped = entries.len();
        entries.clear();
        debug!("Cache cleared ({dropped} entries dropped)");
    }

    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key)
            .map(|e| e.status)
            .unwrap_or(QueryStatus::Idle)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key)
            .map(|e| e.stale)
            .unwrap_or(false)
    }

    /// Last stored value without triggering a fetch.
    pub fn peek(&self, key: &QueryKey) -> Option<Value> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key)
            .and_then(|e| e.data.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_second_read_serves_cached_data() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let cache = QueryCache::new();
        let key = QueryKey::of("resumes");
        let fetches = AtomicUsize::new(0);
        let fetcher = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok(json!([1, 2]))
        };
        let first = cache.fetch(&key, fetcher).await.unwrap();
        assert_eq!(first, json!([1, 2]));
        let second = cache.fetch(&key, fetcher).await.unwrap();
        assert_eq!(second, json!([1, 2]));
        // the second read was served from cache, not the fetcher
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let cache = QueryCache::new();
        let key = QueryKey::of("employer-jobs");
        cache.fetch(&key, || async { Ok(json!(["old"])) }).await.unwrap();
        cache.invalidate(&[QueryKey::of("employer-jobs")]);
        assert!(cache.is_stale(&key));
        let refetched = cache.fetch(&key, || async { Ok(json!(["new"])) }).await.unwrap();
        assert_eq!(refetched, json!(["new"]));
        assert!(!cache.is_stale(&key));
    }

    #[tokio::test]
    async fn test_prefix_invalidation_hits_parameterized_keys() {
        let cache = QueryCache::new();
        let bare = QueryKey::of("admin-users");
        let parameterized = QueryKey::of("admin-users").with(&json!({"limit": 10}));
        let unrelated = QueryKey::of("admin-system-stats");
        for key in [&bare, &parameterized, &unrelated] {
            cache.fetch(key, || async { Ok(json!(null)) }).await.unwrap();
        }
        cache.invalidate(&[QueryKey::of("admin-users")]);
        assert!(cache.is_stale(&bare));
        assert!(cache.is_stale(&parameterized));
        assert!(!cache.is_stale(&unrelated));
    }

    #[tokio::test]
    async fn test_error_status_retries_on_next_observation() {
        let cache = QueryCache::new();
        let key = QueryKey::of("profile");
        let failed = cache
            .fetch(&key, || async {
                Err(ClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.status(&key), QueryStatus::Error);
        let retried = cache.fetch(&key, || async { Ok(json!("ok")) }).await.unwrap();
        assert_eq!(retried, json!("ok"));
        assert_eq!(cache.status(&key), QueryStatus::Success);
    }

    #[tokio::test]
    async fn test_clear_drops_all_entries() {
        let cache = QueryCache::new();
        cache
            .fetch(&QueryKey::of("resumes"), || async { Ok(json!([])) })
            .await
            .unwrap();
        cache
            .fetch(&QueryKey::of("profile"), || async { Ok(json!({})) })
            .await
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.status(&QueryKey::of("resumes")), QueryStatus::Idle);
    }

    #[test]
    fn test_key_display_and_prefixing() {
        let base = QueryKey::of("employer-job");
        let detail = QueryKey::of("employer-job").with(&"42");
        assert!(base.is_prefix_of(&detail));
        assert!(!detail.is_prefix_of(&base));
        assert_eq!(base.to_string(), "[employer-job]");
    }
}
