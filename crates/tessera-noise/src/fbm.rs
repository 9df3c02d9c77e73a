use serde::{Deserialize, Serialize};

/// Fractal composition controls.
///
/// `scale` converts world coordinates into noise space; `frequency` and
/// `amplitude` seed the first octave and are then multiplied by `lacunarity`
/// and `persistence` for each following octave.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FbmParams {
    #[serde(default = "d_scale")]
    pub scale: f64,
    #[serde(default = "d_octaves")]
    pub octaves: u32,
    #[serde(default = "d_persistence")]
    pub persistence: f64,
    #[serde(default = "d_lacunarity")]
    pub lacunarity: f64,
    #[serde(default = "d_one")]
    pub amplitude: f64,
    #[serde(default = "d_one")]
    pub frequency: f64,
    #[serde(default)]
    pub ridged: bool,
}

fn d_scale() -> f64 {
    0.01
}
fn d_octaves() -> u32 {
    4
}
fn d_persistence() -> f64 {
    0.5
}
fn d_lacunarity() -> f64 {
    2.0
}
fn d_one() -> f64 {
    1.0
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            scale: d_scale(),
            octaves: d_octaves(),
            persistence: d_persistence(),
            lacunarity: d_lacunarity(),
            amplitude: d_one(),
            frequency: d_one(),
            ridged: false,
        }
    }
}

impl FbmParams {
    pub const fn new(scale: f64, octaves: u32) -> Self {
        Self {
            scale,
            octaves,
            persistence: 0.5,
            lacunarity: 2.0,
            amplitude: 1.0,
            frequency: 1.0,
            ridged: false,
        }
    }

    #[inline]
    pub const fn with_octaves(self, octaves: u32) -> Self {
        Self { octaves, ..self }
    }

    #[inline]
    pub const fn with_persistence(self, persistence: f64) -> Self {
        Self {
            persistence,
            ..self
        }
    }

    #[inline]
    pub const fn ridged(self) -> Self {
        Self {
            ridged: true,
            ..self
        }
    }
}
