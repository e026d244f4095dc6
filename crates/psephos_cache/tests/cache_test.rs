//! Tests for TTL lookup caching.

use psephos_cache::TtlCache;
use serde_json::{Value, json};
use std::thread::sleep;
use std::time::Duration;

#[test]
fn test_insert_and_get() {
    let mut cache = TtlCache::new();
    let value = json!({"name": "General Election", "candidate_count": 4});

    cache.insert("election_info_3", value.clone(), Duration::from_secs(60));

    let entry = cache.get("election_info_3").unwrap();
    assert_eq!(entry.value(), &value);
}

#[test]
fn test_miss_on_unknown_key() {
    let mut cache = TtlCache::new();
    assert!(cache.get("election_info_99").is_none());
}

#[test]
fn test_expiry_evicts_entry() {
    let mut cache = TtlCache::new();

    cache.insert("next_election_id", json!(6), Duration::from_millis(50));
    assert!(cache.get("next_election_id").is_some());

    sleep(Duration::from_millis(120));

    assert!(cache.get("next_election_id").is_none());
    // Lazy eviction removed the entry, not just hid it.
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_insert_overwrites_unconditionally() {
    let mut cache = TtlCache::new();

    cache.insert("total_votes_2", json!(10), Duration::from_secs(60));
    cache.insert("total_votes_2", json!(11), Duration::from_secs(60));

    assert_eq!(cache.get("total_votes_2").unwrap().value(), &json!(11));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_null_sentinel_is_a_hit() {
    let mut cache = TtlCache::new();

    // Negative results are cached as null so a recent failure is not retried.
    cache.insert("election_info_7", Value::Null, Duration::from_secs(30));

    let entry = cache.get("election_info_7").unwrap();
    assert!(entry.value().is_null());
}

#[test]
fn test_remove_and_clear() {
    let mut cache = TtlCache::new();

    cache.insert("a", json!(1), Duration::from_secs(60));
    cache.insert("b", json!(2), Duration::from_secs(60));

    assert!(cache.remove("a").is_some());
    assert!(cache.get("a").is_none());
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cleanup_expired() {
    let mut cache = TtlCache::new();

    cache.insert("short", json!(1), Duration::from_millis(50));
    cache.insert("long", json!(2), Duration::from_secs(60));

    sleep(Duration::from_millis(120));

    let removed = cache.cleanup_expired();
    assert_eq!(removed, 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.get("long").is_some());
}

#[test]
fn test_typed_round_trip() {
    let mut cache = TtlCache::new();

    cache.insert_json("candidates_3", &vec!["Ada", "Grace"], Duration::from_secs(60));

    let names: Vec<String> = cache.get_json("candidates_3").unwrap();
    assert_eq!(names, vec!["Ada".to_string(), "Grace".to_string()]);
}
