//! Seeded, infinite 2D terrain: layered noise fields, hydrology, volcanism,
//! biome classification and a bounded tile cache.
#![forbid(unsafe_code)]

pub mod biome;
pub mod cache;
pub mod config;
pub mod continent;
pub mod coord;
pub mod error;
pub mod generator;
pub mod height;
pub mod hydrology;
pub mod layers;
pub mod moisture;
pub mod rarity;
pub mod sources;
pub mod tile;
pub mod volcanic;

pub use biome::{BiomeClassifier, BiomeId, BiomeParams};
pub use cache::{TerrainCache, TerrainCacheStats};
pub use config::{
    CacheConfig, WorldGenConfig, WorldGenParams, load_config_from_path, load_params_from_path,
    parse_config,
};
pub use coord::{ChunkCoord, DEFAULT_CHUNK_SIZE, TileCoord};
pub use error::TerrainError;
pub use generator::{TerrainGenerator, TerrainGeneratorBuilder};
pub use hydrology::{HydrologyNetwork, HydrologyParams, RiverSample, RiverWidth};
pub use layers::WorldLayers;
pub use rarity::{Rarity, rarity, rarity_score};
pub use sources::{HeightSource, WaterSource};
pub use tessera_noise::{FbmParams, NoiseField};
pub use tile::{Biome, TileFeatures, TileResult};
