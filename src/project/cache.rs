//! Bounded assembly caching.

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use crate::{
    metadata::{
        entity::AssemblyRc, identity::AssemblyIdentity, reader::MetadataReader,
    },
    Result,
};

/// Default capacity of an [`AssemblyCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Bounded least-recently-used cache of loaded assemblies.
///
/// Keeps at most `capacity` entries resident; inserting beyond that evicts the
/// entry that has gone longest without a hit. Eviction never affects analysis
/// results, only how often the backing reader reloads.
///
/// Interior mutability behind a [`Mutex`] so the cache can sit behind the
/// `&self` methods of [`MetadataReader`].
#[derive(Debug)]
pub struct AssemblyCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<AssemblyIdentity, AssemblyRc>,
    // Front is least recently used.
    order: VecDeque<AssemblyIdentity>,
}

impl AssemblyCache {
    /// Create a cache holding at most `capacity` assemblies.
    ///
    /// A zero capacity disables retention entirely; lookups always miss.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Maximum number of resident entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up an assembly, refreshing its recency on a hit.
    #[must_use]
    pub fn get(&self, identity: &AssemblyIdentity) -> Option<AssemblyRc> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let found = inner.entries.get(identity).cloned();
        if found.is_some() {
            Self::touch(&mut inner, identity);
        }
        found
    }

    /// Insert an assembly, evicting the least recently used entry when full.
    pub fn insert(&self, assembly: AssemblyRc) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let identity = assembly.identity.clone();

        if inner.entries.insert(identity.clone(), assembly).is_some() {
            Self::touch(&mut inner, &identity);
            return;
        }

        inner.order.push_back(identity);
        while inner.entries.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.entries.remove(&evicted);
            }
        }
    }

    /// Number of resident entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entries
            .len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every resident entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.entries.clear();
        inner.order.clear();
    }

    fn touch(inner: &mut CacheInner, identity: &AssemblyIdentity) {
        if let Some(position) = inner.order.iter().position(|id| id == identity) {
            inner.order.remove(position);
        }
        inner.order.push_back(identity.clone());
    }
}

impl Default for AssemblyCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

/// [`MetadataReader`] decorator that serves repeated assembly lookups from an
/// [`AssemblyCache`].
///
/// Only successful resolutions are cached. Failures pass through uncached so the
/// inner reader's error surface stays intact; per the reader contract they would
/// fail identically anyway.
#[derive(Debug)]
pub struct CachingReader<R> {
    inner: R,
    cache: AssemblyCache,
}

impl<R: MetadataReader> CachingReader<R> {
    /// Wrap `inner` with a default-capacity cache.
    pub fn new(inner: R) -> Self {
        Self::with_cache(inner, AssemblyCache::default())
    }

    /// Wrap `inner` with a specific cache.
    pub fn with_cache(inner: R, cache: AssemblyCache) -> Self {
        Self { inner, cache }
    }

    /// The cache in use.
    #[must_use]
    pub fn cache(&self) -> &AssemblyCache {
        &self.cache
    }

    /// The wrapped reader.
    #[must_use]
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: MetadataReader> MetadataReader for CachingReader<R> {
    fn assembly(&self, identity: &AssemblyIdentity) -> Result<AssemblyRc> {
        if let Some(hit) = self.cache.get(identity) {
            return Ok(hit);
        }
        let loaded = self.inner.assembly(identity)?;
        self.cache.insert(loaded.clone());
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::metadata::{
        entity::AssemblyBuilder,
        identity::AssemblyVersion,
        reader::MemoryReader,
    };

    fn asm(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0), None, None)
    }

    fn seeded_reader(names: &[&str]) -> MemoryReader {
        let mut reader = MemoryReader::new();
        for name in names {
            reader.insert(
                AssemblyBuilder::new(*name, AssemblyVersion::new(1, 0, 0, 0))
                    .build()
                    .unwrap(),
            );
        }
        reader
    }

    /// Reader that counts how often the backing store is actually hit.
    struct CountingReader {
        inner: MemoryReader,
        loads: Arc<AtomicUsize>,
    }

    impl MetadataReader for CountingReader {
        fn assembly(&self, identity: &AssemblyIdentity) -> Result<AssemblyRc> {
            self.loads.fetch_add(1, Ordering::Relaxed);
            self.inner.assembly(identity)
        }
    }

    #[test]
    fn test_repeat_lookups_hit_the_cache() {
        let loads = Arc::new(AtomicUsize::new(0));
        let reader = CachingReader::new(CountingReader {
            inner: seeded_reader(&["Lib"]),
            loads: loads.clone(),
        });

        for _ in 0..3 {
            reader.assembly(&asm("Lib")).unwrap();
        }
        assert_eq!(loads.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_eviction_is_least_recently_used() {
        let cache = AssemblyCache::with_capacity(2);
        let reader = seeded_reader(&["A", "B", "C"]);
        let caching = CachingReader::with_cache(reader, cache);

        caching.assembly(&asm("A")).unwrap();
        caching.assembly(&asm("B")).unwrap();
        // Refresh A so B becomes the eviction victim.
        caching.assembly(&asm("A")).unwrap();
        caching.assembly(&asm("C")).unwrap();

        assert_eq!(caching.cache().len(), 2);
        assert!(caching.cache().get(&asm("A")).is_some());
        assert!(caching.cache().get(&asm("B")).is_none());
    }

    #[test]
    fn test_failures_are_not_cached() {
        let reader = CachingReader::new(seeded_reader(&[]));
        assert!(reader.assembly(&asm("Ghost")).is_err());
        assert!(reader.cache().is_empty());
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let caching =
            CachingReader::with_cache(seeded_reader(&["Lib"]), AssemblyCache::with_capacity(0));
        caching.assembly(&asm("Lib")).unwrap();
        assert!(caching.cache().is_empty());
    }
}
