use super::HydrologyNetwork;
use crate::sources::{CARDINALS, HeightSource};

const CHANNEL_OFFSET: f64 = 2_719.0;
const NETWORK_OFFSET: f64 = -6_151.0;

/// Ridged channel strength a capillary needs before anything else is sampled.
const CHANNEL_GATE: f64 = 0.78;
const MIN_STRENGTH: f64 = 0.15;
/// Capillaries start just above the shoreline.
const SHORE_CLEARANCE: f64 = 0.01;

impl HydrologyNetwork {
    /// Tiny feeder-stream value in `[0, capillary_max]`.
    ///
    /// Callers only evaluate this where [`HydrologyNetwork::capillary_allowed`] holds.
    pub fn capillary<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> f64 {
        let p = &self.params;
        if height < self.water_level + SHORE_CLEARANCE || height > p.capillary_max_height {
            return 0.0;
        }
        let (fx, fy) = (x as f64, y as f64);
        let channel = self
            .capillary_noise
            .fbm(fx + CHANNEL_OFFSET, fy + CHANNEL_OFFSET, &p.capillary);
        if channel < CHANNEL_GATE {
            return 0.0;
        }
        let network = self
            .capillary_noise
            .fbm(fx + NETWORK_OFFSET, fy - NETWORK_OFFSET, &p.network);

        let reach = self.water_reach(heights, x, y, height);
        let strength = ((channel - CHANNEL_GATE) / (1.0 - CHANNEL_GATE))
            * (0.5 + 0.5 * network)
            * (0.6 + 0.4 * reach);
        if strength < MIN_STRENGTH {
            return 0.0;
        }
        (strength * p.capillary_max).min(p.capillary_max)
    }

    /// Closeness of the nearest water tile, weighted by whether it lies downhill.
    fn water_reach<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> f64 {
        let radius = self.params.capillary_radius.max(0);
        let mut nearest: Option<(f64, i32, i32)> = None;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                if dist > radius as f64 || nearest.is_some_and(|(d, _, _)| d <= dist) {
                    continue;
                }
                if heights.height_at(x.wrapping_add(dx), y.wrapping_add(dy)) < self.water_level {
                    nearest = Some((dist, dx, dy));
                }
            }
        }
        let Some((dist, wx, wy)) = nearest else {
            return 0.0;
        };
        let proximity = 1.0 - dist / (radius as f64 + 1.0);

        let (mut gx, mut gy) = (0.0, 0.0);
        for (ox, oy) in CARDINALS {
            let drop = height - heights.height_at(x.wrapping_add(ox), y.wrapping_add(oy));
            gx += drop * ox as f64;
            gy += drop * oy as f64;
        }
        let glen = (gx * gx + gy * gy).sqrt();
        let toward = if glen > 0.0 {
            ((gx * wx as f64 + gy * wy as f64) / (glen * dist)).max(0.0)
        } else {
            0.0
        };
        proximity * (0.5 + 0.5 * toward)
    }
}
