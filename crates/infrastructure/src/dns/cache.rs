use burrow_dns_domain::{RecordClass, RecordType, ResourceRecord};
use compact_str::CompactString;
use dashmap::{DashMap, Entry};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: CompactString,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &str, record_type: RecordType, class: RecordClass) -> Self {
        Self {
            name: CompactString::from(name),
            record_type,
            class,
        }
    }
}

#[derive(Clone, Debug)]
struct CachedRecord {
    record: ResourceRecord,
    expires_at: Instant,
}

/// Shared TTL cache for resource records, keyed by (name, type, class).
/// A key holds every record received for it, in no particular order;
/// multi-address answers make duplicates per key the common case.
///
/// Expiry is lazy: readers skip dead entries and kick off an asynchronous
/// per-key cleanup when they notice one. A periodic sweep
/// ([`super::CacheMaintenance`]) covers keys nobody reads.
pub struct RecordCache {
    records: Arc<DashMap<CacheKey, Vec<CachedRecord>, FxBuildHasher>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    /// Live records for the key. An empty result means not found; any
    /// expired entry observed on the way schedules a cleanup for this key.
    pub fn get(&self, key: &CacheKey) -> Vec<ResourceRecord> {
        let Some(entries) = self.records.get(key) else {
            return Vec::new();
        };
        let now = Instant::now();
        let mut live = Vec::with_capacity(entries.len());
        let mut saw_expired = false;
        for cached in entries.iter() {
            if cached.expires_at > now {
                live.push(cached.record.clone());
            } else {
                saw_expired = true;
            }
        }
        drop(entries);

        if saw_expired {
            let records = Arc::clone(&self.records);
            let key = key.clone();
            tokio::spawn(async move {
                Self::clear_expired_in(&records, &key);
            });
        }
        live
    }

    /// Appends `record` under `(name, record type, class)`, expiring TTL
    /// seconds from now. A zero TTL is legal and expires immediately.
    pub fn insert(&self, name: &str, record: ResourceRecord) {
        let key = CacheKey::new(name, record.record_type(), record.class);
        let expires_at = Instant::now() + Duration::from_secs(u64::from(record.ttl));
        self.records
            .entry(key)
            .or_insert_with(Vec::new)
            .push(CachedRecord { record, expires_at });
    }

    /// Drops dead entries for one key, removing the key when nothing
    /// lives. Liveness is re-checked under the write guard: an insert may
    /// have landed since the reader saw the expired entry.
    pub fn clear_expired(&self, key: &CacheKey) {
        Self::clear_expired_in(&self.records, key);
    }

    fn clear_expired_in(
        records: &DashMap<CacheKey, Vec<CachedRecord>, FxBuildHasher>,
        key: &CacheKey,
    ) {
        let now = Instant::now();
        if let Entry::Occupied(mut occupied) = records.entry(key.clone()) {
            occupied.get_mut().retain(|cached| cached.expires_at > now);
            if occupied.get().is_empty() {
                occupied.remove();
            } else {
                debug!(name = %key.name, live = occupied.get().len(), "cache key cleaned");
            }
        }
    }

    /// Full sweep for the background maintenance task. Returns how many
    /// records were dropped.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut swept = 0usize;
        self.records.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|cached| cached.expires_at > now);
            swept += before - entries.len();
            !entries.is_empty()
        });
        swept
    }

    /// Number of keys currently held (dead entries included until a
    /// cleanup or sweep reaps them).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}
