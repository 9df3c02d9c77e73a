use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use hashbrown::HashMap;

use crate::coord::{ChunkCoord, TileCoord};
use crate::tile::TileResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
    pub budget: usize,
}

#[derive(Clone, Debug)]
struct CacheEntry {
    revision: u64,
    tile: Arc<TileResult>,
}

/// Bounded tile cache with FIFO trimming.
///
/// Entries carry the parameter revision they were computed under; a lookup
/// with a newer revision drops the stale entry instead of returning it.
///
/// Writers lock `order` before `entries` and hold both while mutating, so the
/// queue and the map always hold the same coordinates.
#[derive(Debug)]
pub struct TerrainCache {
    entries: RwLock<HashMap<TileCoord, CacheEntry>>,
    order: Mutex<VecDeque<TileCoord>>,
    budget: AtomicUsize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl TerrainCache {
    pub fn new(budget: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            order: Mutex::new(VecDeque::new()),
            budget: AtomicUsize::new(budget.max(1)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn get(&self, coord: TileCoord, revision: u64) -> Option<Arc<TileResult>> {
        if let Some(entry) = self.lookup(coord) {
            if entry.revision == revision {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.tile);
            }
            self.remove_entry(coord);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores a tile. A racing insert for the same coordinate replaces the
    /// value but keeps the original queue position.
    pub fn insert(&self, coord: TileCoord, revision: u64, tile: Arc<TileResult>) {
        {
            let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            if entries.insert(coord, CacheEntry { revision, tile }).is_none() {
                order.push_back(coord);
            }
        }
        self.trim();
    }

    #[inline]
    pub fn budget(&self) -> usize {
        self.budget.load(Ordering::Relaxed)
    }

    /// Sets a new budget and trims toward it.
    pub fn set_budget(&self, budget: usize) {
        self.budget.store(budget.max(1), Ordering::Relaxed);
        self.trim();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&coord)
    }

    pub fn snapshot(&self) -> TerrainCacheStats {
        TerrainCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.len(),
            budget: self.budget(),
        }
    }

    /// Drops every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let evicted = entries.len();
        entries.clear();
        order.clear();
        self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
        evicted
    }

    /// Drops every entry inside a chunk rectangle. Returns how many were removed.
    pub fn remove_chunk(&self, chunk: ChunkCoord, chunk_size: u32) -> usize {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|coord, _| !chunk.contains(*coord, chunk_size));
        let removed = before - entries.len();
        if removed > 0 {
            order.retain(|coord| !chunk.contains(*coord, chunk_size));
            self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        }
        removed
    }

    fn lookup(&self, coord: TileCoord) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&coord)
            .cloned()
    }

    fn remove_entry(&self, coord: TileCoord) {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(&coord).is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
            if let Some(pos) = order.iter().position(|c| *c == coord) {
                order.remove(pos);
            }
        }
    }

    /// Over budget: evict the oldest half of the excess, at least one entry.
    fn trim(&self) {
        let budget = self.budget();
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        if order.len() <= budget {
            return;
        }
        let excess = order.len() - budget;
        let count = excess.div_ceil(2).max(1);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut evicted = 0u64;
        for coord in order.drain(..count) {
            if entries.remove(&coord).is_some() {
                evicted += 1;
            }
        }
        self.evictions.fetch_add(evicted, Ordering::Relaxed);
        log::debug!(
            "terrain cache trimmed {} entries (budget {}, remaining {})",
            evicted,
            budget,
            entries.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeId;
    use crate::rarity::Rarity;
    use crate::tile::{Biome, TileFeatures};

    fn tile(height: f64) -> Arc<TileResult> {
        Arc::new(TileResult {
            features: TileFeatures {
                height,
                ..TileFeatures::default()
            },
            biome: Biome {
                id: BiomeId::Plains,
                rarity: Rarity::Common,
            },
        })
    }

    #[test]
    fn hit_returns_same_arc() {
        let cache = TerrainCache::new(8);
        let t = tile(0.5);
        cache.insert(TileCoord::new(1, 2), 0, Arc::clone(&t));
        let got = cache.get(TileCoord::new(1, 2), 0).unwrap();
        assert!(Arc::ptr_eq(&got, &t));
        let stats = cache.snapshot();
        assert_eq!((stats.hits, stats.misses), (1, 0));
    }

    #[test]
    fn stale_revision_is_dropped() {
        let cache = TerrainCache::new(8);
        cache.insert(TileCoord::new(0, 0), 1, tile(0.1));
        assert!(cache.get(TileCoord::new(0, 0), 2).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.snapshot().evictions, 1);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let cache = TerrainCache::new(4);
        for i in 0..5 {
            cache.insert(TileCoord::new(i, 0), 0, tile(0.0));
        }
        assert_eq!(cache.len(), 4);
        assert!(!cache.contains(TileCoord::new(0, 0)));
        assert!((1..5).all(|i| cache.contains(TileCoord::new(i, 0))));
    }

    #[test]
    fn shrinking_budget_trims_half_the_excess() {
        let cache = TerrainCache::new(100);
        for i in 0..20 {
            cache.insert(TileCoord::new(i, 0), 0, tile(0.0));
        }
        cache.set_budget(10);
        // Excess of 10 drops the 5 oldest.
        assert_eq!(cache.len(), 15);
        assert!(!cache.contains(TileCoord::new(4, 0)));
        assert!(cache.contains(TileCoord::new(5, 0)));
        // Next insert trims half of the new excess of 6.
        cache.insert(TileCoord::new(100, 0), 0, tile(0.0));
        assert_eq!(cache.len(), 13);
    }

    #[test]
    fn duplicate_insert_keeps_single_entry() {
        let cache = TerrainCache::new(4);
        cache.insert(TileCoord::new(3, 3), 0, tile(0.2));
        cache.insert(TileCoord::new(3, 3), 0, tile(0.2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.order.lock().unwrap().len(), 1);
    }

    #[test]
    fn remove_chunk_only_touches_its_rectangle() {
        let cache = TerrainCache::new(1_000);
        for x in -8..8 {
            for y in -8..8 {
                cache.insert(TileCoord::new(x, y), 0, tile(0.0));
            }
        }
        let removed = cache.remove_chunk(ChunkCoord::new(-1, -1), 4);
        assert_eq!(removed, 16);
        assert!(!cache.contains(TileCoord::new(-1, -1)));
        assert!(!cache.contains(TileCoord::new(-4, -4)));
        assert!(cache.contains(TileCoord::new(-5, -1)));
        assert!(cache.contains(TileCoord::new(0, 0)));
        assert_eq!(cache.order.lock().unwrap().len(), cache.len());
    }

    #[test]
    fn clear_counts_evictions() {
        let cache = TerrainCache::new(16);
        for i in 0..6 {
            cache.insert(TileCoord::new(0, i), 0, tile(0.0));
        }
        assert_eq!(cache.clear(), 6);
        assert!(cache.is_empty());
        assert_eq!(cache.snapshot().evictions, 6);
    }

    #[test]
    fn queue_matches_map_under_concurrent_invalidation() {
        let cache = TerrainCache::new(64);
        std::thread::scope(|s| {
            for t in 0..4 {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..2_000 {
                        cache.insert(TileCoord::new(i % 40, t), 0, tile(0.0));
                    }
                });
            }
            let cache = &cache;
            s.spawn(move || {
                for i in 0..500 {
                    if i % 3 == 0 {
                        cache.clear();
                    } else {
                        cache.remove_chunk(ChunkCoord::new(i % 5, 0), 8);
                    }
                }
            });
        });
        let order = cache.order.lock().unwrap();
        let entries = cache.entries.read().unwrap();
        assert_eq!(order.len(), entries.len());
        assert!(order.iter().all(|c| entries.contains_key(c)));
    }
}
