use serde::Deserialize;
use tessera_noise::{FbmParams, NoiseField};

/// Coordinate shift separating the coastline-edge noise from the base landmass noise.
const EDGE_OFFSET: f64 = 7_919.0;

#[derive(Clone, Debug, Deserialize)]
pub struct ContinentParams {
    #[serde(default = "d_scale")]
    pub scale: f64,
    #[serde(default = "d_octaves")]
    pub octaves: u32,
    #[serde(default = "d_threshold")]
    pub threshold: f64,
    #[serde(default = "d_edge_scale")]
    pub edge_scale: f64,
    #[serde(default = "d_edge_octaves")]
    pub edge_octaves: u32,
    #[serde(default = "d_edge_amount")]
    pub edge_amount: f64,
    #[serde(default = "d_sharpness")]
    pub sharpness: f64,
}
fn d_scale() -> f64 {
    0.0012
}
fn d_octaves() -> u32 {
    4
}
fn d_threshold() -> f64 {
    0.5
}
fn d_edge_scale() -> f64 {
    0.006
}
fn d_edge_octaves() -> u32 {
    3
}
fn d_edge_amount() -> f64 {
    0.25
}
fn d_sharpness() -> f64 {
    14.0
}
impl Default for ContinentParams {
    fn default() -> Self {
        Self {
            scale: d_scale(),
            octaves: d_octaves(),
            threshold: d_threshold(),
            edge_scale: d_edge_scale(),
            edge_octaves: d_edge_octaves(),
            edge_amount: d_edge_amount(),
            sharpness: d_sharpness(),
        }
    }
}

/// Large-scale landmass mask: near 0 in deep ocean, near 1 in continental interiors.
#[derive(Clone, Debug)]
pub struct ContinentField {
    noise: NoiseField,
    base: FbmParams,
    edge: FbmParams,
    params: ContinentParams,
}

impl ContinentField {
    pub fn new(seed: i64, params: ContinentParams) -> Self {
        let base = FbmParams::new(params.scale, params.octaves);
        let edge = FbmParams::new(params.edge_scale, params.edge_octaves).with_persistence(0.55);
        Self {
            noise: NoiseField::new(seed),
            base,
            edge,
            params,
        }
    }

    pub fn continent_value(&self, x: i32, y: i32) -> f64 {
        let (fx, fy) = (x as f64, y as f64);
        let base = self.noise.fbm(fx, fy, &self.base);
        let edge = self
            .noise
            .fbm(fx + EDGE_OFFSET, fy - EDGE_OFFSET, &self.edge);
        let p = &self.params;
        let combined = base + edge * p.edge_amount - p.edge_amount / 2.0;
        sigmoid(p.sharpness * (combined - p.threshold))
    }
}

#[inline]
pub(crate) fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}
