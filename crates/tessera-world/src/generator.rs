use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;

use crate::cache::{TerrainCache, TerrainCacheStats};
use crate::config::{WorldGenConfig, WorldGenParams};
use crate::coord::{ChunkCoord, DEFAULT_CHUNK_SIZE, TileCoord};
use crate::error::TerrainError;
use crate::layers::WorldLayers;
use crate::tile::TileResult;

#[derive(Clone, Debug)]
struct LayerState {
    layers: Arc<WorldLayers>,
    revision: u64,
}

/// Cached entry point for tile generation.
///
/// Owned by the caller and shared by reference; there is no global instance.
#[derive(Debug)]
pub struct TerrainGenerator {
    seed: i64,
    chunk_size: u32,
    state: RwLock<LayerState>,
    cache: TerrainCache,
    tiles_computed: AtomicU64,
}

#[derive(Clone, Debug)]
pub struct TerrainGeneratorBuilder {
    seed: Option<i64>,
    initial_cache_size: usize,
    chunk_size: u32,
    params: WorldGenParams,
}

impl Default for TerrainGeneratorBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            initial_cache_size: crate::config::CacheConfig::default().initial_size,
            chunk_size: DEFAULT_CHUNK_SIZE,
            params: WorldGenParams::default(),
        }
    }
}

impl TerrainGeneratorBuilder {
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn initial_cache_size(mut self, size: usize) -> Self {
        self.initial_cache_size = size;
        self
    }

    pub fn chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn params(mut self, params: WorldGenParams) -> Self {
        self.params = params;
        self
    }

    pub fn build(self) -> Result<TerrainGenerator, TerrainError> {
        let seed = self.seed.ok_or(TerrainError::MissingSeed)?;
        let layers = Arc::new(WorldLayers::new(seed, Arc::new(self.params)));
        log::info!(
            "terrain generator ready: seed={} cache_budget={} chunk_size={}",
            seed,
            self.initial_cache_size,
            self.chunk_size
        );
        Ok(TerrainGenerator {
            seed,
            chunk_size: self.chunk_size,
            state: RwLock::new(LayerState {
                layers,
                revision: 0,
            }),
            cache: TerrainCache::new(self.initial_cache_size),
            tiles_computed: AtomicU64::new(0),
        })
    }
}

impl TerrainGenerator {
    pub fn builder() -> TerrainGeneratorBuilder {
        TerrainGeneratorBuilder::default()
    }

    /// Generator with default parameters for a known seed.
    pub fn new(seed: i64, initial_cache_size: usize) -> Self {
        let layers = Arc::new(WorldLayers::new(seed, Arc::new(WorldGenParams::default())));
        Self {
            seed,
            chunk_size: DEFAULT_CHUNK_SIZE,
            state: RwLock::new(LayerState {
                layers,
                revision: 0,
            }),
            cache: TerrainCache::new(initial_cache_size),
            tiles_computed: AtomicU64::new(0),
        }
    }

    pub fn from_config(cfg: &WorldGenConfig) -> Result<Self, TerrainError> {
        let mut builder = Self::builder()
            .initial_cache_size(cfg.cache.initial_size)
            .chunk_size(cfg.cache.chunk_size)
            .params(WorldGenParams::from_config(cfg));
        if let Some(seed) = cfg.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    #[inline]
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    fn snapshot(&self) -> LayerState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current layer bundle; neighbor queries through it never touch the cache.
    pub fn layers(&self) -> Arc<WorldLayers> {
        self.snapshot().layers
    }

    pub fn params(&self) -> Arc<WorldGenParams> {
        Arc::clone(self.snapshot().layers.params())
    }

    /// Bumped by every `update_params`.
    pub fn revision(&self) -> u64 {
        self.snapshot().revision
    }

    pub fn get_terrain_data(&self, x: i32, y: i32) -> Arc<TileResult> {
        let coord = TileCoord::new(x, y);
        let LayerState { layers, revision } = self.snapshot();
        if let Some(tile) = self.cache.get(coord, revision) {
            return tile;
        }
        let tile = Arc::new(self.run_pipeline(&layers, x, y));
        self.cache.insert(coord, revision, Arc::clone(&tile));
        tile
    }

    /// Runs the pipeline without reading or writing the cache.
    pub fn compute_uncached(&self, x: i32, y: i32) -> TileResult {
        let layers = self.layers();
        self.run_pipeline(&layers, x, y)
    }

    fn run_pipeline(&self, layers: &WorldLayers, x: i32, y: i32) -> TileResult {
        self.tiles_computed.fetch_add(1, Ordering::Relaxed);
        layers.compute_tile(x, y)
    }

    /// Row-major tiles of a `width` x `height` rectangle, computed in parallel.
    pub fn sample_region(&self, x0: i32, y0: i32, width: u32, height: u32) -> Vec<Arc<TileResult>> {
        let w = width as usize;
        let total = w * height as usize;
        (0..total)
            .into_par_iter()
            .map(|i| {
                let dx = (i % w) as i32;
                let dy = (i / w) as i32;
                self.get_terrain_data(x0.wrapping_add(dx), y0.wrapping_add(dy))
            })
            .collect()
    }

    /// Sizes the cache for a viewport: one and a half screens, never less
    /// than four chunks. Returns the new budget.
    pub fn update_cache_size(
        &self,
        visible_cols: u32,
        visible_rows: u32,
        chunk_size: Option<u32>,
    ) -> usize {
        let chunk = chunk_size.unwrap_or(self.chunk_size).max(1) as usize;
        let area = (visible_cols as usize).saturating_mul(visible_rows as usize);
        let floor = chunk.saturating_mul(chunk).saturating_mul(4);
        let budget = area.saturating_mul(3).div_ceil(2).max(floor);
        let previous = self.cache.budget();
        self.cache.set_budget(budget);
        if budget != previous {
            log::info!(
                "terrain cache budget {} -> {} for {}x{} view",
                previous,
                budget,
                visible_cols,
                visible_rows
            );
        }
        budget
    }

    /// Forgets every cached tile in one chunk so the next request recomputes it.
    pub fn clear_chunk_from_cache(
        &self,
        chunk_x: i32,
        chunk_y: i32,
        chunk_size: Option<u32>,
    ) -> usize {
        let size = chunk_size.unwrap_or(self.chunk_size).max(1);
        let removed = self
            .cache
            .remove_chunk(ChunkCoord::new(chunk_x, chunk_y), size);
        log::debug!(
            "cleared chunk ({}, {}) size {}: {} tiles",
            chunk_x,
            chunk_y,
            size,
            removed
        );
        removed
    }

    pub fn clear_cache(&self) {
        let removed = self.cache.clear();
        log::debug!("terrain cache cleared ({} tiles)", removed);
    }

    pub fn cache_stats(&self) -> TerrainCacheStats {
        self.cache.snapshot()
    }

    /// Number of pipeline runs so far, cached or not.
    pub fn tiles_computed(&self) -> u64 {
        self.tiles_computed.load(Ordering::Relaxed)
    }

    /// Swaps in new parameters for the same seed and drops every cached tile.
    pub fn update_params(&self, params: WorldGenParams) {
        let layers = Arc::new(WorldLayers::new(self.seed, Arc::new(params)));
        let revision = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.layers = layers;
            state.revision += 1;
            state.revision
        };
        self.cache.clear();
        log::info!("worldgen params updated (revision {})", revision);
    }
}
