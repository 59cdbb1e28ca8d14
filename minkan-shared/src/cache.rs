/// In-process route response cache
///
/// Caches rendered JSON responses keyed by route path, with a TTL and
/// explicit invalidation. Mutations that change what a cached route would
/// return must call [`RouteCache::invalidate`] (or
/// [`RouteCache::invalidate_prefix`]) before responding, so the next read
/// renders fresh data.
///
/// The cache is per-process. Entries are dropped lazily on read when
/// expired; there is no background sweeper.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

struct CacheEntry {
    expires_at: Instant,
    value: serde_json::Value,
}

/// TTL-based response cache keyed by route path
pub struct RouteCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl RouteCache {
    /// Creates a cache where entries live for `ttl` unless invalidated
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached value for a route, or `None` if absent or
    /// expired
    pub async fn get(&self, route: &str) -> Option<serde_json::Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(route) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop the stale entry.
        self.entries.write().await.remove(route);
        None
    }

    /// Stores a rendered response for a route
    pub async fn put(&self, route: impl Into<String>, value: serde_json::Value) {
        let entry = CacheEntry {
            expires_at: Instant::now() + self.ttl,
            value,
        };
        self.entries.write().await.insert(route.into(), entry);
    }

    /// Drops the entry for one route
    pub async fn invalidate(&self, route: &str) {
        self.entries.write().await.remove(route);
    }

    /// Drops every entry whose route starts with the prefix
    ///
    /// Used when a mutation affects a family of routes, for example every
    /// board view of an organization.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        self.entries
            .write()
            .await
            .retain(|route, _| !route.starts_with(prefix));
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = RouteCache::new(Duration::from_secs(60));

        cache.put("/v1/boards/abc", json!({"title": "Roadmap"})).await;

        assert_eq!(
            cache.get("/v1/boards/abc").await,
            Some(json!({"title": "Roadmap"}))
        );
        assert_eq!(cache.get("/v1/boards/other").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let cache = RouteCache::new(Duration::from_secs(60));

        cache.put("/v1/boards/abc", json!(1)).await;
        cache.invalidate("/v1/boards/abc").await;

        assert_eq!(cache.get("/v1/boards/abc").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = RouteCache::new(Duration::from_secs(60));

        cache.put("/v1/boards/a", json!(1)).await;
        cache.put("/v1/boards/b", json!(2)).await;
        cache.put("/v1/notes/c", json!(3)).await;

        cache.invalidate_prefix("/v1/boards/").await;

        assert_eq!(cache.get("/v1/boards/a").await, None);
        assert_eq!(cache.get("/v1/boards/b").await, None);
        assert_eq!(cache.get("/v1/notes/c").await, Some(json!(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = RouteCache::new(Duration::from_secs(30));

        cache.put("/v1/boards/abc", json!(1)).await;
        assert!(cache.get("/v1/boards/abc").await.is_some());

        tokio::time::advance(Duration::from_secs(31)).await;

        assert_eq!(cache.get("/v1/boards/abc").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_refreshes_ttl() {
        let cache = RouteCache::new(Duration::from_secs(30));

        cache.put("/v1/boards/abc", json!(1)).await;
        tokio::time::advance(Duration::from_secs(20)).await;
        cache.put("/v1/boards/abc", json!(2)).await;
        tokio::time::advance(Duration::from_secs(20)).await;

        // 40s after the first put, but only 20s after the refresh.
        assert_eq!(cache.get("/v1/boards/abc").await, Some(json!(2)));
    }
}
