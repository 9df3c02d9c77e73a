use serde::Deserialize;
use tessera_noise::{FbmParams, NoiseField};

use crate::sources::{CARDINALS, HeightSource};

const SCORCH_OFFSET: f64 = 14_699.0;
/// River strength past which a tile is never scorched.
const WET_RIVER: f64 = 0.1;
/// Distance of the lava probe around a tile when looking for nearby flows.
const LAVA_PROBE: i32 = 2;

#[derive(Clone, Debug, Deserialize)]
pub struct VolcanicParams {
    #[serde(default = "d_lava")]
    pub lava: FbmParams,
    #[serde(default = "d_lava_min_height")]
    pub lava_min_height: f64,
    #[serde(default = "d_lava_threshold")]
    pub lava_threshold: f64,
    #[serde(default = "d_concentration")]
    pub lava_concentration: f64,
    #[serde(default = "d_flow_intensity")]
    pub flow_intensity: f64,
    #[serde(default = "d_scorched")]
    pub scorched: FbmParams,
    #[serde(default = "d_scorched_min_height")]
    pub scorched_min_height: f64,
    #[serde(default = "d_scorched_threshold")]
    pub scorched_threshold: f64,
    #[serde(default = "d_scorched_frequency")]
    pub scorched_frequency: f64,
}
fn d_lava() -> FbmParams {
    FbmParams::new(0.012, 3)
}
fn d_lava_min_height() -> f64 {
    0.6
}
fn d_lava_threshold() -> f64 {
    0.7
}
fn d_concentration() -> f64 {
    1.4
}
fn d_flow_intensity() -> f64 {
    0.85
}
fn d_scorched() -> FbmParams {
    FbmParams::new(0.02, 3)
}
fn d_scorched_min_height() -> f64 {
    0.7
}
fn d_scorched_threshold() -> f64 {
    0.72
}
fn d_scorched_frequency() -> f64 {
    0.7
}
impl Default for VolcanicParams {
    fn default() -> Self {
        Self {
            lava: d_lava(),
            lava_min_height: d_lava_min_height(),
            lava_threshold: d_lava_threshold(),
            lava_concentration: d_concentration(),
            flow_intensity: d_flow_intensity(),
            scorched: d_scorched(),
            scorched_min_height: d_scorched_min_height(),
            scorched_threshold: d_scorched_threshold(),
            scorched_frequency: d_scorched_frequency(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct VolcanicField {
    lava_noise: NoiseField,
    scorched_noise: NoiseField,
    params: VolcanicParams,
}

impl VolcanicField {
    pub fn new(lava_seed: i64, scorched_seed: i64, params: VolcanicParams) -> Self {
        Self {
            lava_noise: NoiseField::new(lava_seed),
            scorched_noise: NoiseField::new(scorched_seed),
            params,
        }
    }

    pub fn lava(&self, x: i32, y: i32, height: f64) -> f64 {
        let p = &self.params;
        if height < p.lava_min_height {
            return 0.0;
        }
        let n = self.lava_noise.fbm(x as f64, y as f64, &p.lava);
        if n <= p.lava_threshold {
            return 0.0;
        }
        let excess = (n - p.lava_threshold) / (1.0 - p.lava_threshold).max(f64::EPSILON);
        (excess * p.lava_concentration * p.flow_intensity).clamp(0.0, 1.0)
    }

    /// Burnt ground around lava and on exposed high terrain. Always zero on flowing water.
    pub fn scorched<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
        lava: f64,
        river: f64,
    ) -> f64 {
        if river > WET_RIVER {
            return 0.0;
        }
        let p = &self.params;
        let noise = self.scorched_noise.fbm(
            x as f64 + SCORCH_OFFSET,
            y as f64 - SCORCH_OFFSET,
            &p.scorched,
        );
        let base = if lava > 0.0 {
            0.6 + lava * 0.4
        } else if self.lava_nearby(heights, x, y, height) {
            0.35 + noise * 0.3
        } else if height > p.scorched_min_height && noise > p.scorched_threshold {
            (noise - p.scorched_threshold) / (1.0 - p.scorched_threshold).max(f64::EPSILON)
        } else {
            0.0
        };
        (base * p.scorched_frequency).clamp(0.0, 1.0)
    }

    fn lava_nearby<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> bool {
        // Lava only forms above its minimum height; skip the probes well below it.
        if height < self.params.lava_min_height - 0.05 {
            return false;
        }
        CARDINALS.iter().any(|&(ox, oy)| {
            let (nx, ny) = (
                x.wrapping_add(ox * LAVA_PROBE),
                y.wrapping_add(oy * LAVA_PROBE),
            );
            self.lava(nx, ny, heights.height_at(nx, ny)) > 0.0
        })
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

    fn field() -> VolcanicField {
        VolcanicField::new(70_003, 80_003, VolcanicParams::default())
    }

    #[test]
    fn no_lava_in_lowlands() {
        let f = field();
        for i in 0..500 {
            assert_eq!(f.lava(i * 7, i * 3, 0.4), 0.0);
        }
    }

    #[test]
    fn lava_is_bounded() {
        let f = field();
        for i in -500..500 {
            let v = f.lava(i * 5, -i * 9, 0.9);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn rivers_extinguish_scorching() {
        let f = field();
        let ground = Flat(0.9);
        for i in 0..200 {
            assert_eq!(f.scorched(&ground, i, i, 0.9, 1.0, 0.2), 0.0);
        }
    }

    #[test]
    fn lava_tiles_are_scorched() {
        let f = field();
        let v = f.scorched(&Flat(0.9), 0, 0, 0.9, 0.5, 0.0);
        assert!((v - 0.8 * 0.7).abs() < 1e-12);
    }
}
