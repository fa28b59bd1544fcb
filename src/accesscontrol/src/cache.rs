//! In-process TTL cache with background eviction
//!
//! Entries expire a fixed duration after they were written. Expired entries
//! are never served; they are dropped lazily on access and swept
//! periodically by an optional background task.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Cache entry with TTL
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Returns the value if not expired, None otherwise
    fn get(&self) -> Option<&V> {
        if self.is_expired() {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses (expired entries count as misses)
    pub misses: usize,
    /// Number of expired entries encountered on access
    pub expirations: usize,
    /// Number of entries currently stored, expired or not
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheInner<K, V> {
    entries: DashMap<K, CacheEntry<V>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    expirations: AtomicUsize,
}

impl<K: Eq + Hash, V> CacheInner<K, V> {
    fn cleanup_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before.saturating_sub(self.entries.len())
    }
}

/// Thread-safe key/value cache with per-entry expiry
pub struct LocalCache<K, V> {
    inner: Arc<CacheInner<K, V>>,
    default_ttl: Duration,
    cleanup_interval: Duration,
    cleanup_task: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> LocalCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache
    ///
    /// No background task is spawned; see [`LocalCache::start_cleanup_task`].
    pub fn new(default_ttl: Duration, cleanup_interval: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: DashMap::new(),
                hits: AtomicUsize::new(0),
                misses: AtomicUsize::new(0),
                expirations: AtomicUsize::new(0),
            }),
            default_ttl,
            cleanup_interval,
            cleanup_task: Mutex::new(None),
        }
    }

    /// Returns a clone of the cached value if present and not expired
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(entry) = self.inner.entries.get(key) {
            if let Some(value) = entry.get() {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                return Some(value.clone());
            }
            drop(entry);
            // A concurrent writer may have refreshed the entry in between.
            self.inner.entries.remove_if(key, |_, entry| entry.is_expired());
            self.inner.expirations.fetch_add(1, Ordering::Relaxed);
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores a value that expires after `ttl`, replacing any previous entry
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.inner.entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Stores a value with the cache's default TTL
    pub fn set_default(&self, key: K, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Removes an entry
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.entries.remove(key).map(|(_, entry)| entry.value)
    }

    /// Removes all entries and resets statistics
    pub fn clear(&self) {
        self.inner.entries.clear();
        self.inner.hits.store(0, Ordering::Relaxed);
        self.inner.misses.store(0, Ordering::Relaxed);
        self.inner.expirations.store(0, Ordering::Relaxed);
    }

    /// Number of stored entries, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Removes expired entries, returning how many were dropped
    pub fn cleanup_expired(&self) -> usize {
        self.inner.cleanup_expired()
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            expirations: self.inner.expirations.load(Ordering::Relaxed),
            entries: self.inner.entries.len(),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    /// Starts the periodic sweep of expired entries
    ///
    /// Must be called from within a Tokio runtime. The task stops on its own
    /// once the cache is dropped. Calling this again replaces the running task.
    pub fn start_cleanup_task(&self) {
        let inner: Weak<CacheInner<K, V>> = Arc::downgrade(&self.inner);
        let period = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;

                let Some(cache) = inner.upgrade() else {
                    break;
                };
                let removed = cache.cleanup_expired();
                if removed > 0 {
                    debug!(removed, "Cleaned up expired cache entries");
                }
            }
        });

        if let Some(previous) = self.cleanup_task.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Stops the background sweep, if running
    pub fn stop_cleanup_task(&self) {
        if let Some(handle) = self.cleanup_task.lock().take() {
            handle.abort();
        }
    }

    /// Returns true while a background sweep is scheduled
    pub fn is_cleanup_running(&self) -> bool {
        self.cleanup_task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<K, V> Drop for LocalCache<K, V> {
    fn drop(&mut self) {
        if let Some(handle) = self.cleanup_task.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> LocalCache<String, Vec<String>> {
        LocalCache::new(Duration::from_secs(30), Duration::from_secs(120))
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_get() {
        let cache = cache();
        assert!(cache.get(&"a".to_string()).is_none());

        cache.set_default("a".to_string(), vec!["x".to_string()]);
        assert_eq!(cache.get(&"a".to_string()), Some(vec!["x".to_string()]));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = cache();
        cache.set("a".to_string(), vec![], Duration::from_secs(30));

        // Still served at exactly the TTL
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(cache.get(&"a".to_string()).is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get(&"a".to_string()).is_none());

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_expired() {
        let cache = cache();
        cache.set("short".to_string(), vec![], Duration::from_secs(1));
        cache.set("long".to_string(), vec![], Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_cleanup() {
        let cache = cache();
        cache.start_cleanup_task();
        assert!(cache.is_cleanup_running());

        cache.set_default("a".to_string(), vec![]);
        assert_eq!(cache.len(), 1);

        // Expired but not yet swept
        tokio::time::advance(Duration::from_secs(31)).await;
        assert_eq!(cache.len(), 1);

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert!(cache.is_empty());

        cache.stop_cleanup_task();
        assert!(!cache.is_cleanup_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove() {
        let cache = cache();
        cache.set_default("a".to_string(), vec!["x".to_string()]);

        assert_eq!(cache.remove(&"a".to_string()), Some(vec!["x".to_string()]));
        assert_eq!(cache.remove(&"a".to_string()), None);
        assert!(cache.get(&"a".to_string()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_configured_durations() {
        let cache = cache();
        assert_eq!(cache.default_ttl(), Duration::from_secs(30));
        assert_eq!(cache.cleanup_interval(), Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear() {
        let cache = cache();
        cache.set_default("a".to_string(), vec![]);
        cache.get(&"a".to_string());
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
