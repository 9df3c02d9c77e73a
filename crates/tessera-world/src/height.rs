use serde::Deserialize;
use tessera_noise::{FbmParams, NoiseField};

use crate::continent::{ContinentField, ContinentParams};
use crate::sources::HeightSource;

// Coordinate shifts that give each sub-layer its own slice of the height noise field.
const REGIONAL_OFFSET: f64 = 31_337.0;
const MOUNTAIN_OFFSET: f64 = -12_011.0;
const DETAIL_OFFSET: f64 = 4_243.0;

#[derive(Clone, Debug, Deserialize)]
pub struct HeightParams {
    #[serde(default = "d_base")]
    pub base: FbmParams,
    #[serde(default = "d_continent_influence")]
    pub continent_influence: f64,
    #[serde(default = "d_regional")]
    pub regional: FbmParams,
    #[serde(default = "d_regional_variance")]
    pub regional_variance: f64,
    #[serde(default = "d_mountain")]
    pub mountain: FbmParams,
    #[serde(default = "d_mountain_threshold")]
    pub mountain_threshold: f64,
    #[serde(default = "d_mountain_boost")]
    pub mountain_boost: f64,
    #[serde(default)]
    pub height_bias: f64,
    #[serde(default = "d_peak_exponent")]
    pub peak_exponent: f64,
    #[serde(default = "d_detail")]
    pub detail: FbmParams,
    /// Half-width of the detail jitter band.
    #[serde(default = "d_detail_amount")]
    pub detail_amount: f64,
}
fn d_base() -> FbmParams {
    FbmParams::new(0.004, 6)
}
fn d_continent_influence() -> f64 {
    0.55
}
fn d_regional() -> FbmParams {
    FbmParams::new(0.0008, 2)
}
fn d_regional_variance() -> f64 {
    0.2
}
fn d_mountain() -> FbmParams {
    FbmParams::new(0.0035, 4).ridged()
}
fn d_mountain_threshold() -> f64 {
    0.65
}
fn d_mountain_boost() -> f64 {
    0.9
}
fn d_peak_exponent() -> f64 {
    1.15
}
fn d_detail() -> FbmParams {
    FbmParams::new(0.08, 2)
}
fn d_detail_amount() -> f64 {
    0.04
}
impl Default for HeightParams {
    fn default() -> Self {
        Self {
            base: d_base(),
            continent_influence: d_continent_influence(),
            regional: d_regional(),
            regional_variance: d_regional_variance(),
            mountain: d_mountain(),
            mountain_threshold: d_mountain_threshold(),
            mountain_boost: d_mountain_boost(),
            height_bias: 0.0,
            peak_exponent: d_peak_exponent(),
            detail: d_detail(),
            detail_amount: d_detail_amount(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub height: f64,
    pub continent: f64,
}

/// Elevation in `[0, 1]`, callable for any tile without side effects.
#[derive(Clone, Debug)]
pub struct HeightField {
    noise: NoiseField,
    continent: ContinentField,
    params: HeightParams,
}

impl HeightField {
    pub fn new(
        height_seed: i64,
        continent_seed: i64,
        params: HeightParams,
        continent: ContinentParams,
    ) -> Self {
        Self {
            noise: NoiseField::new(height_seed),
            continent: ContinentField::new(continent_seed, continent),
            params,
        }
    }

    pub fn sample(&self, x: i32, y: i32) -> HeightSample {
        let continent = self.continent.continent_value(x, y);
        let height = self.height_with_continent(x, y, continent);
        HeightSample { height, continent }
    }

    #[inline]
    pub fn height(&self, x: i32, y: i32) -> f64 {
        self.sample(x, y).height
    }

    fn height_with_continent(&self, x: i32, y: i32, continent: f64) -> f64 {
        let p = &self.params;
        let (fx, fy) = (x as f64, y as f64);

        let base = self.noise.fbm(fx, fy, &p.base);
        let mut h = base * (1.0 - p.continent_influence) + continent * p.continent_influence;

        let regional = self
            .noise
            .fbm(fx + REGIONAL_OFFSET, fy + REGIONAL_OFFSET, &p.regional);
        h += (regional - 0.5) * p.regional_variance;

        let mountain = self
            .noise
            .fbm(fx + MOUNTAIN_OFFSET, fy - MOUNTAIN_OFFSET, &p.mountain);
        if mountain > p.mountain_threshold {
            h += (mountain - p.mountain_threshold) * p.mountain_boost;
        }

        h += p.height_bias;
        h = h.max(0.0).powf(p.peak_exponent);

        let detail = self
            .noise
            .fbm(fx - DETAIL_OFFSET, fy + DETAIL_OFFSET, &p.detail);
        h += (detail - 0.5) * 2.0 * p.detail_amount;

        h.clamp(0.0, 1.0)
    }
}

impl HeightSource for HeightField {
    #[inline]
    fn height_at(&self, x: i32, y: i32) -> f64 {
        self.height(x, y)
    }
}
