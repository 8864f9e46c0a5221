use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use super::transport::TransportResponse;

/// Eviction policy for the response cache.
///
/// The default (`None`/`None`) keeps entries for the lifetime of the
/// manager. Bounding the cache is the host's call: `max_entries` evicts in
/// insertion order once full, `ttl` expires entries on lookup.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    pub max_entries: Option<usize>,
    pub ttl: Option<Duration>,
}

struct Entry {
    response: TransportResponse,
    stored_at: Instant,
}

/// Response cache keyed by content-kind prefix + resolved URL.
///
/// Only the manager inserts, and only on successful fetches.
pub(crate) struct ResponseCache {
    config: CacheConfig,
    entries: HashMap<String, Entry>,
    // Insertion order, oldest first. Re-inserting a key moves it to the back.
    order: VecDeque<String>,
}

impl ResponseCache {
    pub(crate) fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub(crate) fn get(&mut self, key: &str, now: Instant) -> Option<&TransportResponse> {
        if let Some(ttl) = self.config.ttl {
            let expired = self
                .entries
                .get(key)
                .is_some_and(|e| now.saturating_duration_since(e.stored_at) >= ttl);
            if expired {
                self.remove(key);
                return None;
            }
        }

        self.entries.get(key).map(|e| &e.response)
    }

    pub(crate) fn insert(&mut self, key: String, response: TransportResponse, now: Instant) {
        if self.config.max_entries == Some(0) {
            return;
        }

        if self.entries.contains_key(&key) {
            self.order.retain(|k| *k != key);
        }

        if let Some(max) = self.config.max_entries {
            while self.entries.len() >= max && !self.order.is_empty() {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            Entry {
                response,
                stored_at: now,
            },
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> TransportResponse {
        TransportResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn unbounded_by_default() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(CacheConfig::default());
        for i in 0..100 {
            cache.insert(format!("text::k{i}"), response("x"), now);
        }
        assert_eq!(cache.len(), 100);
        assert!(cache.get("text::k0", now).is_some());
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(CacheConfig {
            max_entries: Some(2),
            ttl: None,
        });
        cache.insert("a".into(), response("1"), now);
        cache.insert("b".into(), response("2"), now);
        cache.insert("c".into(), response("3"), now);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a", now).is_none());
        assert!(cache.get("b", now).is_some());
        assert!(cache.get("c", now).is_some());
    }

    #[test]
    fn reinsert_refreshes_insertion_order() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(CacheConfig {
            max_entries: Some(2),
            ttl: None,
        });
        cache.insert("a".into(), response("1"), now);
        cache.insert("b".into(), response("2"), now);
        cache.insert("a".into(), response("1b"), now);
        cache.insert("c".into(), response("3"), now);

        // "b" was oldest after "a" moved to the back.
        assert!(cache.get("b", now).is_none());
        assert_eq!(cache.get("a", now).unwrap().body, b"1b");
    }

    #[test]
    fn ttl_expires_entries_on_lookup() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(CacheConfig {
            max_entries: None,
            ttl: Some(Duration::from_secs(5)),
        });
        cache.insert("a".into(), response("1"), now);

        assert!(cache.get("a", now + Duration::from_secs(4)).is_some());
        assert!(cache.get("a", now + Duration::from_secs(5)).is_none());
        assert_eq!(cache.len(), 0, "expired entry is removed");
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(CacheConfig {
            max_entries: Some(0),
            ttl: None,
        });
        cache.insert("a".into(), response("1"), now);
        assert_eq!(cache.len(), 0);
    }
}
