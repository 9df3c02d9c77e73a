//! Seeded 2D simplex noise and fractal composition for terrain layers.
#![forbid(unsafe_code)]

mod fbm;
mod simplex;

pub use fbm::FbmParams;
pub use simplex::NoiseField;
