use serde::{Deserialize, Serialize};

/// Chunk edge length used when callers do not pass one.
pub const DEFAULT_CHUNK_SIZE: u32 = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// Chunk containing this tile. Negative coordinates round toward negative infinity.
    #[inline]
    pub fn chunk(self, chunk_size: u32) -> ChunkCoord {
        let size = chunk_size.max(1) as i64;
        ChunkCoord {
            cx: (self.x as i64).div_euclid(size) as i32,
            cy: (self.y as i64).div_euclid(size) as i32,
        }
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<TileCoord> for (i32, i32) {
    fn from(value: TileCoord) -> Self {
        (value.x, value.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    #[inline]
    pub fn contains(self, tile: TileCoord, chunk_size: u32) -> bool {
        tile.chunk(chunk_size) == self
    }

    /// Inclusive tile bounds `(min, max)` of this chunk.
    pub fn tile_bounds(self, chunk_size: u32) -> (TileCoord, TileCoord) {
        let size = chunk_size.max(1) as i64;
        let min_x = self.cx as i64 * size;
        let min_y = self.cy as i64 * size;
        let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        (
            TileCoord::new(clamp(min_x), clamp(min_y)),
            TileCoord::new(clamp(min_x + size - 1), clamp(min_y + size - 1)),
        )
    }
}
