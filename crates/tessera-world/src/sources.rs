//! Neighbor query seams between terrain layers.
//!
//! Hydrology and volcanic layers look at heights (and river strength) of tiles
//! other than the one being generated. These traits let them do that through
//! the layer bundle directly, never through the tile cache.

pub trait HeightSource {
    fn height_at(&self, x: i32, y: i32) -> f64;
}

pub trait WaterSource {
    /// River strength at a tile, `0.0` when no river passes through it.
    fn river_at(&self, x: i32, y: i32) -> f64;
}

impl<T: HeightSource + ?Sized> HeightSource for &T {
    #[inline]
    fn height_at(&self, x: i32, y: i32) -> f64 {
        (**self).height_at(x, y)
    }
}

impl<T: WaterSource + ?Sized> WaterSource for &T {
    #[inline]
    fn river_at(&self, x: i32, y: i32) -> f64 {
        (**self).river_at(x, y)
    }
}

/// Offsets of the eight surrounding tiles with their gradient weights.
pub(crate) const NEIGHBORS8: [(i32, i32, f64); 8] = [
    (1, 0, 0.6),
    (-1, 0, 0.6),
    (0, 1, 0.6),
    (0, -1, 0.6),
    (1, 1, 0.2),
    (1, -1, 0.2),
    (-1, 1, 0.2),
    (-1, -1, 0.2),
];

pub(crate) const CARDINALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
