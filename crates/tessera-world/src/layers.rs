use std::sync::Arc;

use crate::biome::BiomeClassifier;
use crate::config::WorldGenParams;
use crate::height::HeightField;
use crate::hydrology::{HydrologyNetwork, RiverSample};
use crate::moisture::MoistureField;
use crate::rarity::rarity;
use crate::sources::{HeightSource, WaterSource};
use crate::tile::{Biome, TileFeatures, TileResult};
use crate::volcanic::VolcanicField;

// Sub-seed offsets; each layer reads its own permutation.
pub const HEIGHT_SEED_OFFSET: i64 = 10_000;
pub const CONTINENT_SEED_OFFSET: i64 = 20_000;
pub const MOISTURE_SEED_OFFSET: i64 = 30_000;
pub const RIVER_SEED_OFFSET: i64 = 40_000;
pub const LAKE_SEED_OFFSET: i64 = 50_000;
pub const CAPILLARY_SEED_OFFSET: i64 = 60_000;
pub const LAVA_SEED_OFFSET: i64 = 70_000;
pub const SCORCHED_SEED_OFFSET: i64 = 80_000;

/// Every terrain layer for one seed and one parameter snapshot.
///
/// This is the uncached side of generation: neighbor queries made by moisture,
/// hydrology and volcanic layers go straight through here.
#[derive(Clone, Debug)]
pub struct WorldLayers {
    seed: i64,
    params: Arc<WorldGenParams>,
    height: HeightField,
    moisture: MoistureField,
    hydrology: HydrologyNetwork,
    volcanic: VolcanicField,
    classifier: BiomeClassifier,
}

impl WorldLayers {
    pub fn new(seed: i64, params: Arc<WorldGenParams>) -> Self {
        let sub = |offset: i64| seed.wrapping_add(offset);
        let wl = params.water_level;
        Self {
            height: HeightField::new(
                sub(HEIGHT_SEED_OFFSET),
                sub(CONTINENT_SEED_OFFSET),
                params.height.clone(),
                params.continent.clone(),
            ),
            moisture: MoistureField::new(sub(MOISTURE_SEED_OFFSET), params.moisture.clone(), wl),
            hydrology: HydrologyNetwork::new(
                sub(RIVER_SEED_OFFSET),
                sub(LAKE_SEED_OFFSET),
                sub(CAPILLARY_SEED_OFFSET),
                params.hydrology.clone(),
                wl,
            ),
            volcanic: VolcanicField::new(
                sub(LAVA_SEED_OFFSET),
                sub(SCORCHED_SEED_OFFSET),
                params.volcanic.clone(),
            ),
            classifier: BiomeClassifier::new(params.biomes.clone(), wl),
            seed,
            params,
        }
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    #[inline]
    pub fn params(&self) -> &Arc<WorldGenParams> {
        &self.params
    }

    /// Central-difference gradient magnitude over the four cardinal neighbors.
    pub fn slope(&self, x: i32, y: i32) -> f64 {
        let east = self.height_at(x.wrapping_add(1), y);
        let west = self.height_at(x.wrapping_sub(1), y);
        let south = self.height_at(x, y.wrapping_add(1));
        let north = self.height_at(x, y.wrapping_sub(1));
        let dx = (east - west) * 0.5;
        let dy = (south - north) * 0.5;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn river_sample(&self, x: i32, y: i32) -> RiverSample {
        let h = self.height_at(x, y);
        self.hydrology.river(self, x, y, h)
    }

    /// Layer values for one tile, in pipeline order.
    pub fn features(&self, x: i32, y: i32) -> TileFeatures {
        let sample = self.height.sample(x, y);
        let height = sample.height;
        let moisture = self.moisture.moisture(self, x, y, height);
        let slope = self.slope(x, y);
        let (is_cliff, is_high_cliff) = self.classifier.cliff_flags(slope, height);

        let river = self.hydrology.river(self, x, y, height).value;
        let lake = self.hydrology.lake(self, self, x, y, height, river);
        let capillary = if self.hydrology.capillary_allowed(river, lake) {
            self.hydrology.capillary(self, x, y, height)
        } else {
            0.0
        };

        let lava = self.volcanic.lava(x, y, height);
        let scorched = self.volcanic.scorched(self, x, y, height, lava, river);

        TileFeatures {
            height,
            moisture,
            continent: sample.continent,
            slope,
            river,
            capillary,
            lake,
            lava,
            scorched,
            is_cliff,
            is_high_cliff,
        }
    }

    pub fn compute_tile(&self, x: i32, y: i32) -> TileResult {
        let features = self.features(x, y);
        let biome = Biome {
            id: self.classifier.classify(&features),
            rarity: rarity(&features),
        };
        TileResult { features, biome }
    }
}

impl HeightSource for WorldLayers {
    #[inline]
    fn height_at(&self, x: i32, y: i32) -> f64 {
        self.height.height(x, y)
    }
}

impl WaterSource for WorldLayers {
    fn river_at(&self, x: i32, y: i32) -> f64 {
        let h = self.height_at(x, y);
        self.hydrology.river_value(self, x, y, h)
    }
}
