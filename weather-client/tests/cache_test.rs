mod support;

use common::models::WeatherResponse;
use std::collections::HashSet;
use std::sync::Arc;
use support::weather;
use weather_client::WeatherCache;

#[tokio::test]
async fn test_put_and_get() {
    let cache = WeatherCache::default();
    cache.put("Saint Petersburg", weather("Saint Petersburg", 1740143220)).await;

    assert_eq!(cache.get("Saint Petersburg").await.unwrap().dt, 1740143220);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_missing_key_returns_none() {
    let cache: WeatherCache<WeatherResponse> = WeatherCache::default();
    assert!(cache.get("non-existent").await.is_none());
}

#[tokio::test]
async fn test_put_replaces_existing_entry() {
    let cache = WeatherCache::default();
    cache.put("city1", weather("city1", 1740143220)).await;
    cache.put("CITY1 ", weather("city1", 1740146111)).await;

    assert_eq!(cache.get("city1").await.unwrap().dt, 1740146111);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_normalized_keys_share_a_slot() {
    let cache = WeatherCache::with_capacity(4);
    let value = weather("New York", 42);
    cache.put("  New York  ", value.clone()).await;

    assert_eq!(cache.get("NEW YORK").await, Some(value.clone()));
    assert_eq!(cache.get("new york").await, Some(value));
    assert_eq!(
        cache.keys().await,
        HashSet::from(["NEW YORK".to_string()])
    );
}

#[tokio::test]
async fn test_evicts_oldest_observation_when_full() {
    let cache = WeatherCache::default();
    for i in 1..=10 {
        cache.put(&format!("city{}", i), weather("city", i)).await;
    }

    cache.put("city11", weather("city11", 1740143220)).await;

    assert!(cache.get("city1").await.is_none());
    assert!(cache.get("city11").await.is_some());
    assert_eq!(cache.len().await, 10);
}

#[tokio::test]
async fn test_eviction_uses_observation_time_not_insertion_order() {
    let cache = WeatherCache::with_capacity(2);
    cache.put("A", weather("A", 100)).await;
    cache.put("B", weather("B", 200)).await;
    cache.put("C", weather("C", 150)).await;

    assert!(cache.get("A").await.is_none());
    assert_eq!(
        cache.keys().await,
        HashSet::from(["B".to_string(), "C".to_string()])
    );

    // "C" (150) is now older than "B" (200) despite arriving later
    cache.put("D", weather("D", 300)).await;
    assert!(cache.get("C").await.is_none());
    assert!(cache.get("B").await.is_some());
}

#[tokio::test]
async fn test_update_when_full_does_not_evict() {
    let cache = WeatherCache::with_capacity(3);
    cache.put("A", weather("A", 1)).await;
    cache.put("B", weather("B", 2)).await;
    cache.put("C", weather("C", 3)).await;

    cache.put("b", weather("B", 99)).await;

    assert_eq!(cache.len().await, 3);
    for key in ["A", "B", "C"] {
        assert!(cache.get(key).await.is_some(), "{} should still be cached", key);
    }
    assert_eq!(cache.get("B").await.unwrap().dt, 99);
}

#[tokio::test]
async fn test_never_exceeds_capacity() {
    let cache = WeatherCache::with_capacity(5);
    for i in 0..50 {
        // alternating old and new observations
        let dt = if i % 2 == 0 { i } else { 1000 - i };
        cache.put(&format!("loc-{}", i), weather("loc", dt)).await;
        assert!(cache.len().await <= 5);
    }
    assert_eq!(cache.len().await, 5);
}

#[tokio::test]
async fn test_evict_oldest_and_clear() {
    let cache = WeatherCache::with_capacity(3);
    cache.put("A", weather("A", 10)).await;
    cache.put("B", weather("B", 5)).await;

    cache.evict_oldest().await;
    assert!(cache.get("B").await.is_none());
    assert_eq!(cache.len().await, 1);

    cache.clear().await;
    assert!(cache.is_empty().await);
    assert!(cache.keys().await.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_puts_respect_capacity() {
    let cache = Arc::new(WeatherCache::with_capacity(10));

    let mut handles = Vec::new();
    for worker in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..100 {
                let location = format!("w{}-{}", worker, i);
                cache.put(&location, weather(&location, worker * 1000 + i)).await;
                let _ = cache.keys().await;
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.len().await, 10);
    assert_eq!(cache.keys().await.len(), 10);
}
