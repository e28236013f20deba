use burrow_dns_domain::{RData, RecordClass, RecordType, ResourceRecord};
use burrow_dns_infrastructure::dns::{CacheKey, RecordCache};
use std::sync::Arc;
use std::time::Duration;

fn a_record(name: &str, ttl: u32) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        class: RecordClass::IN,
        ttl,
        rdata: RData::A("127.0.0.1".parse().unwrap()),
    }
}

#[tokio::test]
async fn insert_then_get_returns_the_record() {
    let cache = Arc::new(RecordCache::new());
    cache.insert("example.com.", a_record("example.com.", 60));

    let key = CacheKey::new("example.com.", RecordType::A, RecordClass::IN);
    let records = cache.get(&key);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "example.com.");
}

#[tokio::test]
async fn get_with_wrong_type_or_class_misses() {
    let cache = Arc::new(RecordCache::new());
    cache.insert("example.com.", a_record("example.com.", 60));

    let wrong_type = CacheKey::new("example.com.", RecordType::NS, RecordClass::IN);
    assert!(cache.get(&wrong_type).is_empty());
    let wrong_class = CacheKey::new("example.com.", RecordType::A, RecordClass::CH);
    assert!(cache.get(&wrong_class).is_empty());
}

#[tokio::test]
async fn expired_record_is_hidden_and_its_key_purged() {
    let cache = Arc::new(RecordCache::new());
    cache.insert("expired.com.", a_record("expired.com.", 1));

    let key = CacheKey::new("expired.com.", RecordType::A, RecordClass::IN);
    assert_eq!(cache.get(&key).len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(cache.get(&key).is_empty());
    // The miss above scheduled a cleanup for the key; give it a moment.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(cache.is_empty());
}

#[tokio::test]
async fn zero_ttl_record_is_never_served() {
    let cache = Arc::new(RecordCache::new());
    cache.insert("volatile.com.", a_record("volatile.com.", 0));

    let key = CacheKey::new("volatile.com.", RecordType::A, RecordClass::IN);
    assert!(cache.get(&key).is_empty());
}

#[tokio::test]
async fn multiple_records_accumulate_under_one_key() {
    let cache = Arc::new(RecordCache::new());
    cache.insert("multi.com.", a_record("multi.com.", 10));
    cache.insert("multi.com.", a_record("multi.com.", 10));

    let key = CacheKey::new("multi.com.", RecordType::A, RecordClass::IN);
    assert_eq!(cache.get(&key).len(), 2);
}

#[tokio::test]
async fn sweep_drops_only_dead_entries() {
    let cache = Arc::new(RecordCache::new());
    cache.insert("dead.com.", a_record("dead.com.", 0));
    cache.insert("dead-too.com.", a_record("dead-too.com.", 0));
    cache.insert("alive.com.", a_record("alive.com.", 600));

    let swept = cache.sweep_expired();
    assert_eq!(swept, 2);
    assert_eq!(cache.len(), 1);
    let key = CacheKey::new("alive.com.", RecordType::A, RecordClass::IN);
    assert_eq!(cache.get(&key).len(), 1);
}

#[tokio::test]
async fn concurrent_readers_and_writers_do_not_lose_records() {
    let cache = Arc::new(RecordCache::new());
    let key = CacheKey::new("concurrent.com.", RecordType::A, RecordClass::IN);

    let mut handles = Vec::new();
    for _ in 0..50 {
        let cache = Arc::clone(&cache);
        let key = key.clone();
        handles.push(tokio::spawn(async move {
            cache.insert("concurrent.com.", a_record("concurrent.com.", 10));
            cache.get(&key)
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.get(&key).len(), 50);
}
