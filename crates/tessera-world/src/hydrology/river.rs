use super::HydrologyNetwork;
use crate::sources::{HeightSource, NEIGHBORS8};

// Each river sub-noise reads its own region of the river noise field.
const CHANNEL_OFFSET: f64 = 5_000.0;
const BRANCH_OFFSET: f64 = -3_307.0;
const ARTERIAL_OFFSET: f64 = 9_173.0;

/// Base strength every river above threshold starts from, before width scaling.
const RIVER_FLOOR: f64 = 0.12;

/// Width tier of a river tile. Order of the modifiers is an invariant:
/// stream < mountain < standard < arterial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiverWidth {
    /// Borderline strength, drawn 40-60% narrower than a standard river.
    Stream,
    /// Narrow, fast water near its mountain source.
    Mountain,
    Standard,
    /// Major channel marked by the arterial noise.
    Arterial,
}

impl RiverWidth {
    /// Width multiplier; `band_position` is where a stream sits inside the stream band (0..1).
    pub fn modifier(self, band_position: f64) -> f64 {
        match self {
            RiverWidth::Stream => 0.4 + 0.2 * band_position.clamp(0.0, 1.0),
            RiverWidth::Mountain => 0.75,
            RiverWidth::Standard => 1.0,
            RiverWidth::Arterial => 1.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiverSample {
    pub value: f64,
    pub mountain_source: bool,
    pub width: Option<RiverWidth>,
}

impl RiverSample {
    const DRY: RiverSample = RiverSample {
        value: 0.0,
        mountain_source: false,
        width: None,
    };

    fn dry(mountain_source: bool) -> Self {
        Self {
            mountain_source,
            ..Self::DRY
        }
    }

    #[inline]
    pub fn is_river(&self) -> bool {
        self.value > 0.0
    }
}

struct Gradient {
    /// Downhill direction, not normalized.
    dx: f64,
    dy: f64,
    magnitude: f64,
    lowest_neighbor: f64,
}

struct WaterPull {
    direction: (f64, f64),
    network: f64,
}

impl HydrologyNetwork {
    pub fn river<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> RiverSample {
        let p = &self.params;
        if height > p.snowline {
            return RiverSample::DRY;
        }
        let (fx, fy) = (x as f64, y as f64);
        let channel = self
            .river_noise
            .fbm(fx + CHANNEL_OFFSET, fy + CHANNEL_OFFSET, &p.channel);

        let grad = gradient(heights, x, y, height);
        let height_drop = height - grad.lowest_neighbor;
        let mountain_source =
            height > p.mountain_source_height && grad.magnitude > p.mountain_source_gradient;

        if grad.magnitude < p.flat_gradient
            && channel < p.weak_channel
            && height_drop <= 0.0
            && !mountain_source
        {
            return RiverSample::dry(mountain_source);
        }
        // Water never climbs: well above sea level a river needs a lower neighbor.
        if height_drop <= 0.0 && height > self.water_level + p.uphill_margin && !mountain_source {
            return RiverSample::dry(mountain_source);
        }

        let pull = self.water_pull(heights, x, y);

        let downhill = normalize(grad.dx, grad.dy);
        let blend = if pull.network > 0.0 {
            p.water_blend
        } else {
            0.0
        };
        let flow = normalize(
            downhill.0 * (1.0 - blend) + pull.direction.0 * blend,
            downhill.1 * (1.0 - blend) + pull.direction.1 * blend,
        );
        let alignment = (downhill.0 * flow.0 + downhill.1 * flow.1).max(0.0);

        let ridge = ((channel - 0.6) / 0.4).max(0.0);
        let mut value = ridge * 0.55;
        value += (pull.network / 6.0).min(1.0) * 0.15;
        value += (height_drop * 10.0).clamp(0.0, 1.0) * 0.12;
        if mountain_source {
            value += 0.1;
        }
        if grad.magnitude > 0.01 || mountain_source {
            let branch = self
                .river_noise
                .fbm(fx + BRANCH_OFFSET, fy - BRANCH_OFFSET, &p.branch);
            value += ((branch - 0.75) / 0.25).max(0.0) * 0.2;
        }
        let arterial = self
            .river_noise
            .fbm(fx - ARTERIAL_OFFSET, fy + ARTERIAL_OFFSET, &p.arterial);
        let arterial_term = ((arterial - 0.8) / 0.2).max(0.0) * 0.45;
        value += arterial_term;

        let flow_constraint = (0.6 + grad.magnitude * 8.0).min(1.15) * (0.85 + 0.15 * alignment);
        value *= flow_constraint * p.river_density;

        let mut threshold = p.river_threshold;
        if pull.network > 0.0 {
            threshold = threshold.min(p.near_water_threshold);
        }
        if mountain_source {
            threshold = threshold.min(p.mountain_source_threshold);
        }
        if value < threshold {
            return RiverSample::dry(mountain_source);
        }

        let strength = ((value - threshold) / (1.0 - threshold).max(f64::EPSILON)).clamp(0.0, 1.0);
        let stream_band = p.stream_band.max(f64::EPSILON);
        let width = if arterial_term > 0.15 {
            RiverWidth::Arterial
        } else if strength < stream_band {
            RiverWidth::Stream
        } else if mountain_source {
            RiverWidth::Mountain
        } else {
            RiverWidth::Standard
        };
        let modifier = width.modifier(strength / stream_band);
        RiverSample {
            value: ((RIVER_FLOOR + strength * (1.0 - RIVER_FLOOR)) * modifier).clamp(0.0, 1.0),
            mountain_source,
            width: Some(width),
        }
    }

    #[inline]
    pub fn river_value<H: HeightSource + ?Sized>(
        &self,
        heights: &H,
        x: i32,
        y: i32,
        height: f64,
    ) -> f64 {
        self.river(heights, x, y, height).value
    }

    fn water_pull<H: HeightSource + ?Sized>(&self, heights: &H, x: i32, y: i32) -> WaterPull {
        let p = &self.params;
        let radius = p.water_scan_radius.max(0);
        let r = radius as f64;
        let ocean_below = self.water_level - p.ocean_depth;
        let (mut dir_x, mut dir_y, mut network) = (0.0, 0.0, 0.0);
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
                let mut pull = 1.0 - dist / (r + 1.0);
                if nh < ocean_below {
                    pull *= 2.0;
                }
                dir_x += dx as f64 / dist * pull;
                dir_y += dy as f64 / dist * pull;
                network += pull;
            }
        }
        WaterPull {
            direction: normalize(dir_x, dir_y),
            network,
        }
    }
}

fn gradient<H: HeightSource + ?Sized>(heights: &H, x: i32, y: i32, height: f64) -> Gradient {
    let (mut dx, mut dy) = (0.0, 0.0);
    let mut lowest = f64::INFINITY;
    for (ox, oy, weight) in NEIGHBORS8 {
        let nh = heights.height_at(x.wrapping_add(ox), y.wrapping_add(oy));
        let diff = height - nh;
        dx += diff * ox as f64 * weight;
        dy += diff * oy as f64 * weight;
        lowest = lowest.min(nh);
    }
    Gradient {
        dx,
        dy,
        magnitude: (dx * dx + dy * dy).sqrt(),
        lowest_neighbor: lowest,
    }
}

#[inline]
fn normalize(x: f64, y: f64) -> (f64, f64) {
    let len = (x * x + y * y).sqrt();
    if len > 0.0 {
        (x / len, y / len)
    } else {
        (0.0, 0.0)
    }
}
