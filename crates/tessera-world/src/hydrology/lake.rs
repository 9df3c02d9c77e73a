use super::HydrologyNetwork;
use crate::sources::{CARDINALS, HeightSource, NEIGHBORS8, WaterSource};

const LAKE_OFFSET: f64 = 1_201.0;
const POND_OFFSET: f64 = -8_821.0;

/// River strength above which a tile counts as "on" a river for lake placement.
const ON_RIVER: f64 = 0.1;
/// Lake values never start below this once the threshold is crossed.
const LAKE_FLOOR: f64 = 0.3;

const RIVER_ADJACENT_BONUS: f64 = 0.15;
const ON_RIVER_PENALTY: f64 = 0.3;

impl HydrologyNetwork {
    /// Lake strength in `[0, 1]`: the larger of the basin lake and the small-pond channel.
    pub fn lake<H, W>(
        &self,
        heights: &H,
        water: &W,
        x: i32,
        y: i32,
        height: f64,
        river: f64,
    ) -> f64
    where
        H: HeightSource + ?Sized,
        W: WaterSource + ?Sized,
    {
        let basin = self.basin_lake(heights, water, x, y, height, river);
        let pond = self.pond(water, x, y, height, river);
        basin.max(pond).min(1.0)
    }

    fn basin_lake<H, W>(
        &self,
        heights: &H,
        water: &W,
        x: i32,
        y: i32,
        height: f64,
        river: f64,
    ) -> f64
    where
        H: HeightSource + ?Sized,
        W: WaterSource + ?Sized,
    {
        let p = &self.params;
        if height < self.water_level - p.lake_below_water || height > p.lake_max_height {
            return 0.0;
        }

        let mut slope_sum = 0.0;
        for (ox, oy, _) in NEIGHBORS8 {
            let nh = heights.height_at(x.wrapping_add(ox), y.wrapping_add(oy));
            slope_sum += (height - nh).abs();
        }
        let flatness =
            (1.0 - (slope_sum / 8.0) / p.flatness_scale.max(f64::EPSILON)).clamp(0.0, 1.0);
        let depression = CARDINALS.iter().all(|&(ox, oy)| {
            height < heights.height_at(x.wrapping_add(ox), y.wrapping_add(oy))
        });

        let shape = self.lake_noise.fbm(
            x as f64 + LAKE_OFFSET,
            y as f64 - LAKE_OFFSET,
            &p.lake,
        );
        let mut raw = shape * 0.5 + flatness * 0.2;
        if depression {
            raw += 0.2;
        }
        let on_river = river > ON_RIVER;
        if on_river {
            raw -= ON_RIVER_PENALTY;
        }
        // Adjacency can only add the bonus; skip the neighbor river probes when even
        // that cannot lift the tile over the threshold.
        if !on_river && raw + RIVER_ADJACENT_BONUS > p.lake_threshold {
            let adjacent = CARDINALS.iter().any(|&(ox, oy)| {
                water.river_at(x.wrapping_add(ox), y.wrapping_add(oy)) > ON_RIVER
            });
            if adjacent {
                raw += RIVER_ADJACENT_BONUS;
            }
        }

        rescale_over(raw, p.lake_threshold, LAKE_FLOOR, 1.0)
    }

    fn pond<W: WaterSource + ?Sized>(
        &self,
        water: &W,
        x: i32,
        y: i32,
        height: f64,
        river: f64,
    ) -> f64 {
        let p = &self.params;
        if height < self.water_level + p.pond_min_above_water || height > p.pond_max_height {
            return 0.0;
        }
        let noise = self.lake_noise.fbm(
            x as f64 + POND_OFFSET,
            y as f64 + POND_OFFSET,
            &p.pond,
        );
        if noise <= p.pond_threshold {
            return 0.0;
        }
        if river > ON_RIVER {
            return 0.0;
        }
        let r = p.pond_river_radius.max(0);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if water.river_at(x.wrapping_add(dx), y.wrapping_add(dy)) > ON_RIVER {
                    return 0.0;
                }
            }
        }
        rescale_over(noise, p.pond_threshold, LAKE_FLOOR, 0.7)
    }
}

/// Maps `value` in `(threshold, 1]` onto `(floor, ceil]`; zero at or below the threshold.
fn rescale_over(value: f64, threshold: f64, floor: f64, ceil: f64) -> f64 {
    if value <= threshold {
        return 0.0;
    }
    let t = ((value - threshold) / (1.0 - threshold).max(f64::EPSILON)).clamp(0.0, 1.0);
    floor + t * (ceil - floor)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{Bump, Flat, NoRivers, RiversEverywhere};
    use super::super::{HydrologyNetwork, HydrologyParams};
    use super::*;

    fn network() -> HydrologyNetwork {
        HydrologyNetwork::new(40_011, 50_011, 60_011, HydrologyParams::default(), 0.35)
    }

    #[test]
    fn rescale_starts_at_floor() {
        assert_eq!(rescale_over(0.5, 0.6, 0.3, 1.0), 0.0);
        assert_eq!(rescale_over(0.6, 0.6, 0.3, 1.0), 0.0);
        assert!(rescale_over(0.6001, 0.6, 0.3, 1.0) > 0.3);
        assert!((rescale_over(1.0, 0.6, 0.3, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn outside_band_is_dry() {
        let n = network();
        assert_eq!(n.lake(&Flat(0.1), &NoRivers, 0, 0, 0.1, 0.0), 0.0);
        assert_eq!(n.lake(&Flat(0.9), &NoRivers, 0, 0, 0.9, 0.0), 0.0);
    }

    #[test]
    fn depressions_favor_lakes() {
        let n = network();
        let mut with = 0;
        let mut without = 0;
        let basin = Bump {
            ground: 0.505,
            peak: 0.5,
        };
        for i in 0..400 {
            // Shift the evaluated coordinate so the lake noise varies while the
            // synthetic terrain stays a one-tile basin at the origin.
            let shifted = Shifted {
                inner: &basin,
                dx: i * 7,
                dy: -i * 3,
            };
            if n.lake(&shifted, &NoRivers, i * 7, -i * 3, 0.5, 0.0) > 0.0 {
                with += 1;
            }
            if n.lake(&Flat(0.5), &NoRivers, i * 7, -i * 3, 0.5, 0.0) > 0.0 {
                without += 1;
            }
        }
        assert!(with >= without);
    }

    #[test]
    fn lake_values_cross_above_floor() {
        let n = network();
        for i in 0..500 {
            let v = n.lake(&Flat(0.5), &NoRivers, i * 13, i * 5, 0.5, 0.0);
            assert!(v == 0.0 || (LAKE_FLOOR..=1.0).contains(&v));
        }
    }

    #[test]
    fn ponds_are_suppressed_near_rivers() {
        let n = network();
        for i in 0..500 {
            let v = n.pond(&RiversEverywhere, i * 11, -i * 17, 0.5, 0.0);
            assert_eq!(v, 0.0);
        }
    }

    struct Shifted<'a> {
        inner: &'a Bump,
        dx: i32,
        dy: i32,
    }
    impl HeightSource for Shifted<'_> {
        fn height_at(&self, x: i32, y: i32) -> f64 {
            self.inner.height_at(x - self.dx, y - self.dy)
        }
    }
}
