//! TOML world generation config and the flattened parameter snapshot.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::biome::BiomeParams;
use crate::continent::ContinentParams;
use crate::coord::DEFAULT_CHUNK_SIZE;
use crate::error::TerrainError;
use crate::height::HeightParams;
use crate::hydrology::HydrologyParams;
use crate::moisture::MoistureParams;
use crate::volcanic::VolcanicParams;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    /// World seed. Optional here so a config can be shared between worlds;
    /// building a generator without one fails.
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default = "default_water_level")]
    pub water_level: f64,
    #[serde(default)]
    pub continent: ContinentParams,
    #[serde(default)]
    pub height: HeightParams,
    #[serde(default)]
    pub moisture: MoistureParams,
    #[serde(default)]
    pub hydrology: HydrologyParams,
    #[serde(default)]
    pub volcanic: VolcanicParams,
    #[serde(default)]
    pub biomes: BiomeParams,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_water_level() -> f64 {
    0.35
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            water_level: default_water_level(),
            continent: ContinentParams::default(),
            height: HeightParams::default(),
            moisture: MoistureParams::default(),
            hydrology: HydrologyParams::default(),
            volcanic: VolcanicParams::default(),
            biomes: BiomeParams::default(),
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_initial_size")]
    pub initial_size: usize,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
}

fn default_initial_size() -> usize {
    10_000
}
fn default_chunk_size() -> u32 {
    DEFAULT_CHUNK_SIZE
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_size: default_initial_size(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Everything the terrain layers read, minus the seed and cache sizing.
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub water_level: f64,
    pub continent: ContinentParams,
    pub height: HeightParams,
    pub moisture: MoistureParams,
    pub hydrology: HydrologyParams,
    pub volcanic: VolcanicParams,
    pub biomes: BiomeParams,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            water_level: cfg.water_level.clamp(0.0, 1.0),
            continent: cfg.continent.clone(),
            height: cfg.height.clone(),
            moisture: cfg.moisture.clone(),
            hydrology: cfg.hydrology.clone(),
            volcanic: cfg.volcanic.clone(),
            biomes: cfg.biomes.clone(),
        }
    }
}

pub fn parse_config(text: &str) -> Result<WorldGenConfig, TerrainError> {
    Ok(toml::from_str(text)?)
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, TerrainError> {
    let text = fs::read_to_string(path).map_err(|source| TerrainError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, TerrainError> {
    load_config_from_path(path).map(|cfg| WorldGenParams::from_config(&cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.water_level, 0.35);
        assert_eq!(cfg.cache.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(cfg.biomes.peak_height, BiomeParams::default().peak_height);
    }

    #[test]
    fn sections_override_individual_fields() {
        let cfg = parse_config(
            r#"
seed = 8675309
water_level = 0.4

[moisture]
wind = [-1.0, 0.0]

[hydrology]
river_threshold = 0.3

[hydrology.channel]
scale = 0.02

[cache]
initial_size = 512
"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(8_675_309));
        assert_eq!(cfg.water_level, 0.4);
        assert_eq!(cfg.moisture.wind, [-1.0, 0.0]);
        assert_eq!(cfg.hydrology.river_threshold, 0.3);
        assert_eq!(cfg.hydrology.channel.scale, 0.02);
        assert_eq!(
            cfg.hydrology.lake_threshold,
            HydrologyParams::default().lake_threshold
        );
        assert_eq!(cfg.cache.initial_size, 512);
        assert_eq!(cfg.cache.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn bundled_worldgen_toml_parses() {
        let cfg = parse_config(include_str!("../../../worldgen.toml")).unwrap();
        assert_eq!(cfg.seed, Some(8_675_309));
        assert!(cfg.height.mountain.ridged);
        let params = WorldGenParams::from_config(&cfg);
        assert_eq!(params.water_level, 0.35);
    }

    #[test]
    fn params_load_from_bundled_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../worldgen.toml");
        let params = load_params_from_path(&path).unwrap();
        assert_eq!(params.water_level, 0.35);
        assert!(params.height.mountain.ridged);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let err = parse_config("seed = \"not a number\"").unwrap_err();
        assert!(matches!(err, TerrainError::Config(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config_from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        match err {
            TerrainError::Io { path, .. } => assert!(path.ends_with("here.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
