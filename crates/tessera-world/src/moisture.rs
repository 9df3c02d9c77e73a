use serde::Deserialize;
use tessera_noise::{FbmParams, NoiseField};

use crate::sources::HeightSource;

const REGION_OFFSET: f64 = -27_183.0;

#[derive(Clone, Debug, Deserialize)]
pub struct MoistureParams {
    #[serde(default = "d_base")]
    pub base: FbmParams,
    #[serde(default = "d_region")]
    pub region: FbmParams,
    #[serde(default = "d_influence")]
    pub moisture_influence: f64,
    #[serde(default = "d_radius")]
    pub proximity_radius: i32,
    /// Accumulated proximity weight that saturates the boost.
    #[serde(default = "d_saturation")]
    pub proximity_saturation: f64,
    #[serde(default = "d_boost")]
    pub proximity_boost: f64,
    /// Depth below water level at which a neighbor counts as large water.
    #[serde(default = "d_large_depth")]
    pub large_water_depth: f64,
    #[serde(default = "d_large_multiplier")]
    pub large_water_multiplier: f64,
    /// Direction the wind blows toward; identical for every seed.
    #[serde(default = "d_wind")]
    pub wind: [f64; 2],
    #[serde(default = "d_shadow_steps")]
    pub rain_shadow_steps: u32,
    #[serde(default = "d_shadow_step_length")]
    pub rain_shadow_step_length: f64,
    #[serde(default = "d_shadow_strength")]
    pub rain_shadow_strength: f64,
    #[serde(default = "d_shadow_floor")]
    pub rain_shadow_floor: f64,
    #[serde(default = "d_contrast")]
    pub moisture_contrast: f64,
}
fn d_base() -> FbmParams {
    FbmParams::new(0.003, 4)
}
fn d_region() -> FbmParams {
    FbmParams::new(0.0007, 2)
}
fn d_influence() -> f64 {
    0.35
}
fn d_radius() -> i32 {
    7
}
fn d_saturation() -> f64 {
    400.0
}
fn d_boost() -> f64 {
    0.35
}
fn d_large_depth() -> f64 {
    0.1
}
fn d_large_multiplier() -> f64 {
    1.6
}
fn d_wind() -> [f64; 2] {
    [1.0, 0.35]
}
fn d_shadow_steps() -> u32 {
    6
}
fn d_shadow_step_length() -> f64 {
    3.0
}
fn d_shadow_strength() -> f64 {
    2.5
}
fn d_shadow_floor() -> f64 {
    0.4
}
fn d_contrast() -> f64 {
    1.25
}
impl Default for MoistureParams {
    fn default() -> Self {
        Self {
            base: d_base(),
            region: d_region(),
            moisture_influence: d_influence(),
            proximity_radius: d_radius(),
            proximity_saturation: d_saturation(),
            proximity_boost: d_boost(),
            large_water_depth: d_large_depth(),
            large_water_multiplier: d_large_multiplier(),
            wind: d_wind(),
            rain_shadow_steps: d_shadow_steps(),
            rain_shadow_step_length: d_shadow_step_length(),
            rain_shadow_strength: d_shadow_strength(),
            rain_shadow_floor: d_shadow_floor(),
            moisture_contrast: d_contrast(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MoistureField {
    noise: NoiseField,
    params: MoistureParams,
    water_level: f64,
    /// Unit vector pointing upwind.
    upwind: (f64, f64),
}

impl MoistureField {
    pub fn new(seed: i64, params: MoistureParams, water_level: f64) -> Self {
        let [wx, wy] = params.wind;
        let len = (wx * wx + wy * wy).sqrt();
        let upwind = if len > 0.0 {
            (-wx / len, -wy / len)
        } else {
            (0.0, 0.0)
        };
        Self {
            noise: NoiseField::new(seed),
            params,
            water_level,
            upwind,
        }
    }

    pub fn moisture<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> f64 {
        let p = &self.params;
        let (fx, fy) = (x as f64, y as f64);
        let base = self.noise.fbm(fx, fy, &p.base);
        let region = self
            .noise
            .fbm(fx + REGION_OFFSET, fy + REGION_OFFSET, &p.region);
        let shifted = base + (region - 0.5) * p.moisture_influence;

        let m = shifted
            * self.water_proximity_factor(heights, x, y)
            * self.rain_shadow_factor(heights, x, y, height)
            * self.elevation_factor(height);
        m.clamp(0.0, 1.0).powf(p.moisture_contrast)
    }

    /// `1.0` inland, up to `1.0 + proximity_boost` surrounded by water.
    pub fn water_proximity_factor<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
    ) -> f64 {
        let p = &self.params;
        let radius = p.proximity_radius.max(0);
        let r = radius as f64;
        let large_below = self.water_level - p.large_water_depth;
        let mut acc = 0.0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                if dist > r {
                    continue;
                }
                let nh = heights.height_at(x.wrapping_add(dx), y.wrapping_add(dy));
                if nh >= self.water_level {
                    continue;
                }
                let mut w = (r - dist) * (r - dist);
                if nh < large_below {
                    w *= p.large_water_multiplier;
                }
                acc += w;
            }
        }
        let saturation = p.proximity_saturation.max(f64::EPSILON);
        1.0 + (acc / saturation).min(1.0) * p.proximity_boost
    }

    /// Walks upwind and dries the tile by the tallest barrier found, floored.
    pub fn rain_shadow_factor<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> f64 {
        let p = &self.params;
        let (ux, uy) = self.upwind;
        let mut max_excess: f64 = 0.0;
        for step in 1..=p.rain_shadow_steps {
            let d = step as f64 * p.rain_shadow_step_length;
            let sx = x.wrapping_add((ux * d).round() as i32);
            let sy = y.wrapping_add((uy * d).round() as i32);
            let excess = heights.height_at(sx, sy) - height;
            max_excess = max_excess.max(excess);
        }
        (1.0 - max_excess * p.rain_shadow_strength).max(p.rain_shadow_floor)
    }

    pub fn elevation_factor(&self, height: f64) -> f64 {
        if height > 0.8 {
            0.8
        } else if (0.5..=0.7).contains(&height) {
            1.1
        } else if height >= self.water_level && height < self.water_level + 0.05 {
            1.2
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(f64);
    impl HeightSource for Flat {
        fn height_at(&self, _x: i32, _y: i32) -> f64 {
            self.0
        }
    }

    /// A wall to the west (upwind for the default wind), ocean elsewhere.
    struct WestRidge;
    impl HeightSource for WestRidge {
        fn height_at(&self, x: i32, _y: i32) -> f64 {
            if x < -2 { 0.95 } else { 0.45 }
        }
    }

    fn field() -> MoistureField {
        MoistureField::new(30_001, MoistureParams::default(), 0.35)
    }

    #[test]
    fn proximity_is_neutral_inland() {
        assert_eq!(field().water_proximity_factor(&Flat(0.6), 0, 0), 1.0);
    }

    #[test]
    fn proximity_saturates_in_open_ocean() {
        let f = field();
        let factor = f.water_proximity_factor(&Flat(0.0), 0, 0);
        assert!((factor - 1.35).abs() < 1e-12);
    }

    #[test]
    fn rain_shadow_is_floored() {
        let f = field();
        assert_eq!(f.rain_shadow_factor(&Flat(0.5), 0, 0, 0.5), 1.0);
        assert_eq!(f.rain_shadow_factor(&WestRidge, 0, 0, 0.45), 0.4);
    }

    #[test]
    fn elevation_bands() {
        let f = field();
        assert_eq!(f.elevation_factor(0.9), 0.8);
        assert_eq!(f.elevation_factor(0.6), 1.1);
        assert_eq!(f.elevation_factor(0.37), 1.2);
        assert_eq!(f.elevation_factor(0.45), 1.0);
    }

    #[test]
    fn moisture_in_unit_range() {
        let f = field();
        for h in [0.0, 0.3, 0.36, 0.6, 0.9, 1.0] {
            for i in 0..40 {
                let m = f.moisture(&Flat(h), i * 37, -i * 13, h);
                assert!((0.0..=1.0).contains(&m));
            }
        }
    }
}
