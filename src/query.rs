//! Query Cache
//!
//! Request-keyed cache shared by every page. Keys look like request paths
//! (`customers`, `work-orders?status=pending`); mutations invalidate by
//! prefix and every mounted query on an invalidated key refetches once.

use std::collections::HashMap;
use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheEntry {
    /// Last successful payload, kept while a refetch is in flight
    pub value: Option<Value>,
    pub error: Option<ApiError>,
    pub fetching: bool,
    pub stale: bool,
    /// Invalidated while a fetch was in flight; that result is already outdated
    refetch_after: bool,
    /// Bumped whenever the entry settles
    pub revision: u64,
    /// Cache clock at the last `begin` for this key
    last_used: u64,
}

/// Entries kept before the least recently used settled one is dropped.
/// Every distinct search term or filter is its own key.
pub const MAX_ENTRIES: usize = 48;

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    clock: u64,
}

/// `customers` matches `customers`, `customers/4` and `customers?search=x`
pub fn key_matches(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

impl QueryCache {
    pub fn lookup(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Returns true when the caller should start a fetch for `key`.
    /// A key already in flight is never fetched twice.
    pub fn begin(&mut self, key: &str) -> bool {
        self.clock += 1;
        if !self.entries.contains_key(key) {
            self.evict_for_insert();
        }
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| CacheEntry { stale: true, ..Default::default() });
        entry.last_used = self.clock;
        if entry.fetching || !entry.stale {
            return false;
        }
        entry.fetching = true;
        true
    }

    pub fn fulfill(&mut self, key: &str, value: Value) {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.value = Some(value);
        entry.error = None;
        Self::settle(entry);
    }

    /// Failures settle the entry too; it is only retried after invalidation.
    pub fn fail(&mut self, key: &str, error: ApiError) {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.error = Some(error);
        Self::settle(entry);
    }

    fn settle(entry: &mut CacheEntry) {
        entry.fetching = false;
        entry.stale = entry.refetch_after;
        entry.refetch_after = false;
        entry.revision += 1;
    }

    /// Mark every entry under `prefix` stale. Returns how many were hit.
    pub fn invalidate(&mut self, prefix: &str) -> usize {
        let mut hit = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key_matches(key, prefix) {
                if entry.fetching {
                    entry.refetch_after = true;
                } else {
                    entry.stale = true;
                }
                hit += 1;
            }
        }
        hit
    }

    /// Make room for one more key. In-flight entries are never dropped.
    fn evict_for_insert(&mut self) {
        while self.entries.len() >= MAX_ENTRIES {
            let oldest = self
                .entries
                .iter()
                .filter(|(_, e)| !e.fetching)
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(key) => {
                    log::debug!("[QUERY] evict {}", key);
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

/// Cache handle provided through context
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: StoredValue<QueryCache>,
    /// Bumped on every settle/invalidate so mounted queries re-check the cache
    generation: RwSignal<u64>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new(QueryCache::default()),
            generation: RwSignal::new(0),
        }
    }

    pub fn invalidate(&self, prefix: &str) {
        let (hit, total) = self
            .cache
            .try_update_value(|c| (c.invalidate(prefix), c.len()))
            .unwrap_or((0, 0));
        log::debug!("[QUERY] invalidate {} ({}/{} entries)", prefix, hit, total);
        if hit > 0 {
            self.generation.update(|g| *g += 1);
        }
    }

    fn settle<T: Serialize>(&self, key: &str, result: Result<T, ApiError>) {
        let outcome = result.and_then(|v| serde_json::to_value(&v).map_err(ApiError::from));
        self.cache.update_value(|c| match outcome {
            Ok(value) => c.fulfill(key, value),
            Err(e) => {
                log::warn!("[QUERY] {} failed: {}", key, e);
                c.fail(key, e)
            }
        });
        self.generation.update(|g| *g += 1);
    }
}

pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

/// Reactive view of one cache key
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: ReadSignal<Option<T>>,
    pub error: ReadSignal<Option<ApiError>>,
    pub loading: ReadSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Clone + Send + Sync + 'static> QueryState<T> {
    /// Current data or the type's empty value
    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.data.get().unwrap_or_default()
    }
}

/// Subscribe to `key()`, fetching with `fetcher` when the cache has nothing
/// fresh. Re-runs when the key changes or the entry is invalidated.
pub fn use_query<T, K, F, Fut>(key: K, fetcher: F) -> QueryState<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    K: Fn() -> String + 'static,
    F: Fn(String) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let (data, set_data) = signal(None::<T>);
    let (error, set_error) = signal(None::<ApiError>);
    let (loading, set_loading) = signal(false);
    let seen = StoredValue::new(None::<(String, u64)>);

    Effect::new(move |_| {
        let key = key();
        client.generation.track();

        let entry = client.cache.with_value(|c| c.lookup(&key).cloned());
        if let Some(entry) = entry {
            let current = Some((key.clone(), entry.revision));
            if seen.get_value() != current {
                seen.set_value(current);
                let decoded = entry.value.map(serde_json::from_value::<T>);
                match decoded {
                    Some(Ok(value)) => {
                        set_data.set(Some(value));
                        set_error.set(entry.error);
                    }
                    Some(Err(e)) => set_error.set(Some(ApiError::from(e))),
                    None => set_error.set(entry.error),
                }
            }
            set_loading.set(entry.fetching);
        }

        if client.cache.try_update_value(|c| c.begin(&key)).unwrap_or(false) {
            log::debug!("[QUERY] fetch {}", key);
            set_loading.set(true);
            let fetcher = fetcher.clone();
            spawn_local(async move {
                let result = fetcher(key.clone()).await;
                client.settle(&key, result);
            });
        }
    });

    QueryState { data, error, loading }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_matches_prefix_boundaries() {
        assert!(key_matches("customers", "customers"));
        assert!(key_matches("customers/4", "customers"));
        assert!(key_matches("metadata?search=ravi", "metadata"));
        assert!(!key_matches("customers-archive", "customers"));
        assert!(!key_matches("vehicles", "customers"));
    }

    #[test]
    fn test_first_begin_fetches_and_duplicates_are_skipped() {
        let mut cache = QueryCache::default();
        assert!(cache.begin("customers"));
        assert!(!cache.begin("customers"));
        cache.fulfill("customers", json!([1, 2]));
        assert!(!cache.begin("customers"));

        let entry = cache.lookup("customers").unwrap();
        assert_eq!(entry.value, Some(json!([1, 2])));
        assert_eq!(entry.revision, 1);
        assert!(!entry.fetching);
    }

    #[test]
    fn test_invalidate_marks_stale_and_keeps_value() {
        let mut cache = QueryCache::default();
        cache.begin("work-orders");
        cache.fulfill("work-orders", json!([]));
        cache.begin("work-orders?status=pending");
        cache.fulfill("work-orders?status=pending", json!([]));
        cache.begin("workers");
        cache.fulfill("workers", json!([]));

        assert_eq!(cache.invalidate("work-orders"), 2);
        assert!(cache.lookup("work-orders").unwrap().stale);
        assert!(!cache.lookup("workers").unwrap().stale);
        assert_eq!(cache.lookup("work-orders").unwrap().value, Some(json!([])));
        assert!(cache.begin("work-orders"));
    }

    #[test]
    fn test_invalidate_during_fetch_forces_another_fetch() {
        let mut cache = QueryCache::default();
        assert!(cache.begin("inventory"));
        cache.invalidate("inventory");
        cache.fulfill("inventory", json!(["old"]));
        assert!(cache.lookup("inventory").unwrap().stale);
        assert!(cache.begin("inventory"));
        cache.fulfill("inventory", json!(["new"]));
        assert!(!cache.begin("inventory"));
    }

    #[test]
    fn test_failure_settles_until_invalidated() {
        let mut cache = QueryCache::default();
        cache.begin("dashboard/summary");
        cache.fail("dashboard/summary", ApiError::Network("offline".into()));
        assert!(!cache.begin("dashboard/summary"));
        let entry = cache.lookup("dashboard/summary").unwrap();
        assert_eq!(entry.error, Some(ApiError::Network("offline".into())));
        assert_eq!(entry.value, None);

        cache.invalidate("dashboard");
        assert!(cache.begin("dashboard/summary"));
        cache.fulfill("dashboard/summary", json!({}));
        assert_eq!(cache.lookup("dashboard/summary").unwrap().error, None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_search_keys_are_evicted_oldest_first() {
        let mut cache = QueryCache::default();
        cache.begin("customers");
        cache.fulfill("customers", json!([]));
        for i in 0..MAX_ENTRIES {
            let key = format!("metadata?search=q{}", i);
            cache.begin(&key);
            cache.fulfill(&key, json!([]));
            // Still on screen, so it keeps getting used
            cache.begin("customers");
        }
        assert_eq!(cache.len(), MAX_ENTRIES);
        assert!(cache.lookup("customers").is_some());
        assert!(cache.lookup("metadata?search=q0").is_none());
        assert!(cache.lookup(&format!("metadata?search=q{}", MAX_ENTRIES - 1)).is_some());
    }

    #[test]
    fn test_in_flight_entries_survive_eviction() {
        let mut cache = QueryCache::default();
        for i in 0..MAX_ENTRIES {
            cache.begin(&format!("spendings?category=c{}", i));
        }
        assert!(cache.begin("spendings?category=extra"));
        assert_eq!(cache.len(), MAX_ENTRIES + 1);
        assert!(cache.lookup("spendings?category=c0").is_some_and(|e| e.fetching));
    }
}
