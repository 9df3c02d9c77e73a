//! Rivers, lakes, and capillary streams.
//!
//! Evaluation order is fixed: river first, then lake (which reads the river
//! value), then capillary only where neither claimed the tile.

mod capillary;
mod lake;
mod river;

use serde::Deserialize;
use tessera_noise::{FbmParams, NoiseField};

pub use self::river::{RiverSample, RiverWidth};

#[derive(Clone, Debug, Deserialize)]
pub struct HydrologyParams {
    // --- rivers ---
    #[serde(default = "d_channel")]
    pub channel: FbmParams,
    #[serde(default = "d_snowline")]
    pub snowline: f64,
    #[serde(default = "d_source_height")]
    pub mountain_source_height: f64,
    #[serde(default = "d_source_gradient")]
    pub mountain_source_gradient: f64,
    #[serde(default = "d_flat_gradient")]
    pub flat_gradient: f64,
    #[serde(default = "d_weak_channel")]
    pub weak_channel: f64,
    /// Height above water level past which a tile without a downhill neighbor cannot hold a river.
    #[serde(default = "d_uphill_margin")]
    pub uphill_margin: f64,
    #[serde(default = "d_water_radius")]
    pub water_scan_radius: i32,
    #[serde(default = "d_ocean_depth")]
    pub ocean_depth: f64,
    #[serde(default = "d_water_blend")]
    pub water_blend: f64,
    #[serde(default = "d_branch")]
    pub branch: FbmParams,
    #[serde(default = "d_arterial")]
    pub arterial: FbmParams,
    #[serde(default = "d_density")]
    pub river_density: f64,
    #[serde(default = "d_river_threshold")]
    pub river_threshold: f64,
    #[serde(default = "d_near_water_threshold")]
    pub near_water_threshold: f64,
    #[serde(default = "d_source_threshold")]
    pub mountain_source_threshold: f64,
    /// Normalized strength below which a river is drawn as a narrowed stream.
    #[serde(default = "d_stream_band")]
    pub stream_band: f64,

    // --- lakes ---
    #[serde(default = "d_lake")]
    pub lake: FbmParams,
    #[serde(default = "d_lake_below")]
    pub lake_below_water: f64,
    #[serde(default = "d_lake_max")]
    pub lake_max_height: f64,
    #[serde(default = "d_flatness_scale")]
    pub flatness_scale: f64,
    #[serde(default = "d_lake_threshold")]
    pub lake_threshold: f64,
    #[serde(default = "d_pond")]
    pub pond: FbmParams,
    #[serde(default = "d_pond_min_above")]
    pub pond_min_above_water: f64,
    #[serde(default = "d_pond_max")]
    pub pond_max_height: f64,
    #[serde(default = "d_pond_threshold")]
    pub pond_threshold: f64,
    #[serde(default = "d_pond_radius")]
    pub pond_river_radius: i32,

    // --- capillaries ---
    #[serde(default = "d_capillary")]
    pub capillary: FbmParams,
    #[serde(default = "d_network")]
    pub network: FbmParams,
    #[serde(default = "d_capillary_gate")]
    pub capillary_gate: f64,
    #[serde(default = "d_capillary_max")]
    pub capillary_max: f64,
    #[serde(default = "d_capillary_radius")]
    pub capillary_radius: i32,
    #[serde(default = "d_capillary_max_height")]
    pub capillary_max_height: f64,
}
fn d_channel() -> FbmParams {
    FbmParams::new(0.006, 3).ridged()
}
fn d_snowline() -> f64 {
    0.95
}
fn d_source_height() -> f64 {
    0.82
}
fn d_source_gradient() -> f64 {
    0.025
}
fn d_flat_gradient() -> f64 {
    0.002
}
fn d_weak_channel() -> f64 {
    0.35
}
fn d_uphill_margin() -> f64 {
    0.05
}
fn d_water_radius() -> i32 {
    4
}
fn d_ocean_depth() -> f64 {
    0.1
}
fn d_water_blend() -> f64 {
    0.35
}
fn d_branch() -> FbmParams {
    FbmParams::new(0.02, 2).ridged()
}
fn d_arterial() -> FbmParams {
    FbmParams::new(0.0015, 3).ridged()
}
fn d_density() -> f64 {
    0.9
}
fn d_river_threshold() -> f64 {
    0.22
}
fn d_near_water_threshold() -> f64 {
    0.17
}
fn d_source_threshold() -> f64 {
    0.15
}
fn d_stream_band() -> f64 {
    0.15
}
fn d_lake() -> FbmParams {
    FbmParams::new(0.01, 3)
}
fn d_lake_below() -> f64 {
    0.01
}
fn d_lake_max() -> f64 {
    0.78
}
fn d_flatness_scale() -> f64 {
    0.02
}
fn d_lake_threshold() -> f64 {
    0.62
}
fn d_pond() -> FbmParams {
    FbmParams::new(0.045, 2)
}
fn d_pond_min_above() -> f64 {
    0.05
}
fn d_pond_max() -> f64 {
    0.7
}
fn d_pond_threshold() -> f64 {
    0.8
}
fn d_pond_radius() -> i32 {
    2
}
fn d_capillary() -> FbmParams {
    FbmParams::new(0.03, 2).ridged()
}
fn d_network() -> FbmParams {
    FbmParams::new(0.008, 2)
}
fn d_capillary_gate() -> f64 {
    0.02
}
fn d_capillary_max() -> f64 {
    0.02
}
fn d_capillary_radius() -> i32 {
    5
}
fn d_capillary_max_height() -> f64 {
    0.85
}
impl Default for HydrologyParams {
    fn default() -> Self {
        Self {
            channel: d_channel(),
            snowline: d_snowline(),
            mountain_source_height: d_source_height(),
            mountain_source_gradient: d_source_gradient(),
            flat_gradient: d_flat_gradient(),
            weak_channel: d_weak_channel(),
            uphill_margin: d_uphill_margin(),
            water_scan_radius: d_water_radius(),
            ocean_depth: d_ocean_depth(),
            water_blend: d_water_blend(),
            branch: d_branch(),
            arterial: d_arterial(),
            river_density: d_density(),
            river_threshold: d_river_threshold(),
            near_water_threshold: d_near_water_threshold(),
            mountain_source_threshold: d_source_threshold(),
            stream_band: d_stream_band(),
            lake: d_lake(),
            lake_below_water: d_lake_below(),
            lake_max_height: d_lake_max(),
            flatness_scale: d_flatness_scale(),
            lake_threshold: d_lake_threshold(),
            pond: d_pond(),
            pond_min_above_water: d_pond_min_above(),
            pond_max_height: d_pond_max(),
            pond_threshold: d_pond_threshold(),
            pond_river_radius: d_pond_radius(),
            capillary: d_capillary(),
            network: d_network(),
            capillary_gate: d_capillary_gate(),
            capillary_max: d_capillary_max(),
            capillary_radius: d_capillary_radius(),
            capillary_max_height: d_capillary_max_height(),
        }
    }
}

/// Derives water features from the height field; each channel owns its own noise.
#[derive(Clone, Debug)]
pub struct HydrologyNetwork {
    river_noise: NoiseField,
    lake_noise: NoiseField,
    capillary_noise: NoiseField,
    params: HydrologyParams,
    water_level: f64,
}

impl HydrologyNetwork {
    pub fn new(
        river_seed: i64,
        lake_seed: i64,
        capillary_seed: i64,
        params: HydrologyParams,
        water_level: f64,
    ) -> Self {
        Self {
            river_noise: NoiseField::new(river_seed),
            lake_noise: NoiseField::new(lake_seed),
            capillary_noise: NoiseField::new(capillary_seed),
            params,
            water_level,
        }
    }

    #[inline]
    pub fn params(&self) -> &HydrologyParams {
        &self.params
    }

    #[inline]
    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    /// Whether the capillary channel may be evaluated for a tile with these values.
    #[inline]
    pub fn capillary_allowed(&self, river: f64, lake: f64) -> bool {
        river < self.params.capillary_gate && lake < self.params.capillary_gate
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::sources::{HeightSource, WaterSource};

    /// Plane tilted along +x: height drops by `slope` per tile eastward.
    pub struct Tilted {
        pub origin: f64,
        pub slope: f64,
    }
    impl HeightSource for Tilted {
        fn height_at(&self, x: i32, _y: i32) -> f64 {
            (self.origin - self.slope * x as f64).clamp(0.0, 1.0)
        }
    }

    pub struct Flat(pub f64);
    impl HeightSource for Flat {
        fn height_at(&self, _x: i32, _y: i32) -> f64 {
            self.0
        }
    }

    /// A single raised tile at the origin inside flat ground.
    pub struct Bump {
        pub ground: f64,
        pub peak: f64,
    }
    impl HeightSource for Bump {
        fn height_at(&self, x: i32, y: i32) -> f64 {
            if x == 0 && y == 0 {
                self.peak
            } else {
                self.ground
            }
        }
    }

    pub struct NoRivers;
    impl WaterSource for NoRivers {
        fn river_at(&self, _x: i32, _y: i32) -> f64 {
            0.0
        }
    }

    pub struct RiversEverywhere;
    impl WaterSource for RiversEverywhere {
        fn river_at(&self, _x: i32, _y: i32) -> f64 {
            0.5
        }
    }
}
