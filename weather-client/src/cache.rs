use common::models::WeatherResponse;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_CACHE_SIZE: usize = 10;

/// Values that know when they were observed upstream (Unix seconds).
pub trait Observed {
    fn observed_at(&self) -> i64;
}

impl Observed for WeatherResponse {
    fn observed_at(&self) -> i64 {
        self.dt
    }
}

/// Bounded location cache.
///
/// Keys are normalized (trimmed, uppercased) so that `"  new york "` and
/// `"NEW YORK"` share one slot. When a new key arrives and the cache is full,
/// the entry with the smallest `observed_at` is evicted; ties go to the
/// lexicographically smallest key. Updating an existing key never evicts.
pub struct WeatherCache<V> {
    cache: RwLock<HashMap<String, V>>,
    capacity: usize,
}

impl<V> WeatherCache<V>
where
    V: Observed + Clone,
{
    /// `capacity` must be positive; settings validation guarantees it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn get(&self, location: &str) -> Option<V> {
        let cache = self.cache.read().await;
        cache.get(&normalize_location(location)).cloned()
    }

    pub async fn put(&self, location: &str, value: V) {
        let key = normalize_location(location);
        let mut cache = self.cache.write().await;
        if cache.len() >= self.capacity && !cache.contains_key(&key) {
            evict_oldest_locked(&mut cache);
        }
        cache.insert(key, value);
    }

    /// Removes the entry with the oldest observation. No-op when empty.
    pub async fn evict_oldest(&self) {
        let mut cache = self.cache.write().await;
        evict_oldest_locked(&mut cache);
    }

    /// Snapshot of the normalized keys currently resident.
    pub async fn keys(&self) -> HashSet<String> {
        let cache = self.cache.read().await;
        cache.keys().cloned().collect()
    }

    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}

impl<V> Default for WeatherCache<V>
where
    V: Observed + Clone,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_SIZE)
    }
}

fn evict_oldest_locked<V: Observed>(cache: &mut HashMap<String, V>) {
    let oldest = cache
        .iter()
        .min_by(|(ka, va), (kb, vb)| {
            va.observed_at()
                .cmp(&vb.observed_at())
                .then_with(|| ka.cmp(kb))
        })
        .map(|(key, _)| key.clone());

    if let Some(key) = oldest {
        debug!(location = %key, "Evicting oldest cache entry");
        cache.remove(&key);
    }
}

/// Trims surrounding whitespace and uppercases the location name.
pub fn normalize_location(location: &str) -> String {
    location.trim().to_uppercase()
}
