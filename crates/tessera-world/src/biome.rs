//! Biome identities and the ordered classification table.
//!
//! The first matching rule wins: lava, open water, lakes, rivers, streams,
//! rivulets, scorched land, cliffs, then the height bands split by moisture.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tile::TileFeatures;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiomeId {
    // Lava tiers
    MagmaCore,
    LavaFlow,
    CoolingLava,
    // Open water
    DeepOcean,
    Ocean,
    Sea,
    Shallows,
    // Still water
    AlpineLake,
    DeepLake,
    Lake,
    // Running water
    MountainRiver,
    GreatRiver,
    River,
    Stream,
    Rivulet,
    // Volcanic land
    Ashlands,
    ScorchedEarth,
    CinderFields,
    // Cliffs
    HighCliff,
    Cliff,
    // Peak band
    BareSummit,
    WindsweptPeak,
    RockyPeak,
    SnowyPeak,
    IcePeak,
    Glacier,
    // Mountain band
    BarrenRidge,
    ScreeSlopes,
    AlpineTundra,
    AlpineMeadow,
    MountainForest,
    ConiferForest,
    CloudForest,
    // Upland band
    HighDesert,
    RockyBadlands,
    Steppe,
    Highlands,
    UplandWoods,
    Moorland,
    HighlandBog,
    // Midland band
    Desert,
    Scrubland,
    DryGrassland,
    Prairie,
    Meadow,
    Woodland,
    DeciduousForest,
    Rainforest,
    // Lowland band
    SaltFlats,
    Dunes,
    Savanna,
    Grassland,
    Plains,
    Forest,
    Jungle,
    Wetland,
    Swamp,
    // Coast band
    RockyShore,
    Beach,
    CoastalScrub,
    TidalFlats,
    SaltMarsh,
    Mangrove,
}

struct BiomeInfo {
    name: &'static str,
    color: &'static str,
    glyph: char,
}

const fn info(name: &'static str, color: &'static str, glyph: char) -> BiomeInfo {
    BiomeInfo { name, color, glyph }
}

impl BiomeId {
    pub const ALL: [BiomeId; 63] = [
        BiomeId::MagmaCore,
        BiomeId::LavaFlow,
        BiomeId::CoolingLava,
        BiomeId::DeepOcean,
        BiomeId::Ocean,
        BiomeId::Sea,
        BiomeId::Shallows,
        BiomeId::AlpineLake,
        BiomeId::DeepLake,
        BiomeId::Lake,
        BiomeId::MountainRiver,
        BiomeId::GreatRiver,
        BiomeId::River,
        BiomeId::Stream,
        BiomeId::Rivulet,
        BiomeId::Ashlands,
        BiomeId::ScorchedEarth,
        BiomeId::CinderFields,
        BiomeId::HighCliff,
        BiomeId::Cliff,
        BiomeId::BareSummit,
        BiomeId::WindsweptPeak,
        BiomeId::RockyPeak,
        BiomeId::SnowyPeak,
        BiomeId::IcePeak,
        BiomeId::Glacier,
        BiomeId::BarrenRidge,
        BiomeId::ScreeSlopes,
        BiomeId::AlpineTundra,
        BiomeId::AlpineMeadow,
        BiomeId::MountainForest,
        BiomeId::ConiferForest,
        BiomeId::CloudForest,
        BiomeId::HighDesert,
        BiomeId::RockyBadlands,
        BiomeId::Steppe,
        BiomeId::Highlands,
        BiomeId::UplandWoods,
        BiomeId::Moorland,
        BiomeId::HighlandBog,
        BiomeId::Desert,
        BiomeId::Scrubland,
        BiomeId::DryGrassland,
        BiomeId::Prairie,
        BiomeId::Meadow,
        BiomeId::Woodland,
        BiomeId::DeciduousForest,
        BiomeId::Rainforest,
        BiomeId::SaltFlats,
        BiomeId::Dunes,
        BiomeId::Savanna,
        BiomeId::Grassland,
        BiomeId::Plains,
        BiomeId::Forest,
        BiomeId::Jungle,
        BiomeId::Wetland,
        BiomeId::Swamp,
        BiomeId::RockyShore,
        BiomeId::Beach,
        BiomeId::CoastalScrub,
        BiomeId::TidalFlats,
        BiomeId::SaltMarsh,
        BiomeId::Mangrove,
    ];

    fn info(self) -> BiomeInfo {
        use BiomeId::*;
        match self {
            MagmaCore => info("Magma Core", "#ff3300", '&'),
            LavaFlow => info("Lava Flow", "#e25822", '%'),
            CoolingLava => info("Cooling Lava", "#8b2500", '$'),
            DeepOcean => info("Deep Ocean", "#0b1f4d", '~'),
            Ocean => info("Ocean", "#1a3f7a", '~'),
            Sea => info("Sea", "#2a5d9f", '-'),
            Shallows => info("Shallows", "#4f8fcf", '.'),
            AlpineLake => info("Alpine Lake", "#6fb7d9", 'O'),
            DeepLake => info("Deep Lake", "#1f5f8b", '0'),
            Lake => info("Lake", "#3a7fbf", 'o'),
            MountainRiver => info("Mountain River", "#5aa0d0", '|'),
            GreatRiver => info("Great River", "#2e6fb0", '='),
            River => info("River", "#3d85c6", '/'),
            Stream => info("Stream", "#66a3d9", ':'),
            Rivulet => info("Rivulet", "#8cbfe6", ','),
            Ashlands => info("Ashlands", "#3b3030", 'X'),
            ScorchedEarth => info("Scorched Earth", "#5c4033", 'x'),
            CinderFields => info("Cinder Fields", "#6e5a4f", ';'),
            HighCliff => info("High Cliff", "#5a5a5a", '#'),
            Cliff => info("Cliff", "#7a7a7a", 'H'),
            BareSummit => info("Bare Summit", "#9e9e9e", 'A'),
            WindsweptPeak => info("Windswept Peak", "#b0aca6", 'W'),
            RockyPeak => info("Rocky Peak", "#8d8680", 'R'),
            SnowyPeak => info("Snowy Peak", "#eef2f5", 'S'),
            IcePeak => info("Ice Peak", "#d6ecf5", 'I'),
            Glacier => info("Glacier", "#c8e6f0", 'G'),
            BarrenRidge => info("Barren Ridge", "#8a7f72", 'b'),
            ScreeSlopes => info("Scree Slopes", "#998e80", 'k'),
            AlpineTundra => info("Alpine Tundra", "#a5a38b", 't'),
            AlpineMeadow => info("Alpine Meadow", "#8fae6b", 'm'),
            MountainForest => info("Mountain Forest", "#3f6b3a", 'F'),
            ConiferForest => info("Conifer Forest", "#2f5a3a", 'C'),
            CloudForest => info("Cloud Forest", "#4e7f62", 'c'),
            HighDesert => info("High Desert", "#c9b07a", 'd'),
            RockyBadlands => info("Rocky Badlands", "#b5654a", 'B'),
            Steppe => info("Steppe", "#b8b36b", 'e'),
            Highlands => info("Highlands", "#8f9f5a", 'h'),
            UplandWoods => info("Upland Woods", "#5b7d3f", 'U'),
            Moorland => info("Moorland", "#7d6f8a", 'M'),
            HighlandBog => info("Highland Bog", "#5e6b4a", 'q'),
            Desert => info("Desert", "#e3c98f", 'D'),
            Scrubland => info("Scrubland", "#b9a46a", 'r'),
            DryGrassland => info("Dry Grassland", "#c2b85f", 'g'),
            Prairie => info("Prairie", "#a8bf5c", 'p'),
            Meadow => info("Meadow", "#8ccf5f", '"'),
            Woodland => info("Woodland", "#5f9a45", 'w'),
            DeciduousForest => info("Deciduous Forest", "#3f7f35", 'T'),
            Rainforest => info("Rainforest", "#1f6b2f", 'Y'),
            SaltFlats => info("Salt Flats", "#ece6d2", '_'),
            Dunes => info("Dunes", "#e8cf8a", 'n'),
            Savanna => info("Savanna", "#c8b45a", 'v'),
            Grassland => info("Grassland", "#9fc45a", '\''),
            Plains => info("Plains", "#a9d06b", '`'),
            Forest => info("Forest", "#3d8b3d", 'f'),
            Jungle => info("Jungle", "#1e7a3a", 'J'),
            Wetland => info("Wetland", "#5f8f6f", 'l'),
            Swamp => info("Swamp", "#4a5f3a", 's'),
            RockyShore => info("Rocky Shore", "#8f8a80", 'z'),
            Beach => info("Beach", "#f2dfa0", '*'),
            CoastalScrub => info("Coastal Scrub", "#b8b88a", 'j'),
            TidalFlats => info("Tidal Flats", "#a89f84", 'i'),
            SaltMarsh => info("Salt Marsh", "#7f9f7a", 'y'),
            Mangrove => info("Mangrove", "#3f6f4f", 'N'),
        }
    }

    /// Display name; stable across releases, used at the serialization boundary.
    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Display color as `#rrggbb`.
    #[inline]
    pub fn color(self) -> &'static str {
        self.info().color
    }

    /// Single character used by text maps.
    #[inline]
    pub fn glyph(self) -> char {
        self.info().glyph
    }

    pub fn is_water(self) -> bool {
        use BiomeId::*;
        matches!(
            self,
            DeepOcean
                | Ocean
                | Sea
                | Shallows
                | AlpineLake
                | DeepLake
                | Lake
                | MountainRiver
                | GreatRiver
                | River
                | Stream
                | Rivulet
        )
    }

    pub fn is_river(self) -> bool {
        matches!(
            self,
            BiomeId::MountainRiver | BiomeId::GreatRiver | BiomeId::River
        )
    }

    pub fn from_name(name: &str) -> Option<BiomeId> {
        BiomeId::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BiomeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BiomeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        BiomeId::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown biome `{name}`")))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BiomeParams {
    #[serde(default = "d_magma")]
    pub magma_lava: f64,
    #[serde(default = "d_flow")]
    pub flow_lava: f64,
    #[serde(default = "d_cooling")]
    pub cooling_lava: f64,
    /// Continent value below which submerged tiles count as open ocean.
    #[serde(default = "d_ocean_continent")]
    pub ocean_continent: f64,
    #[serde(default = "d_deep_ocean_depth")]
    pub deep_ocean_depth: f64,
    #[serde(default = "d_sea_depth")]
    pub sea_depth: f64,
    #[serde(default = "d_lake_threshold")]
    pub lake_threshold: f64,
    #[serde(default = "d_alpine_lake_height")]
    pub alpine_lake_height: f64,
    #[serde(default = "d_deep_lake")]
    pub deep_lake: f64,
    #[serde(default = "d_river_min")]
    pub river_min: f64,
    #[serde(default = "d_great_river")]
    pub great_river: f64,
    #[serde(default = "d_mountain_river_height")]
    pub mountain_river_height: f64,
    #[serde(default = "d_stream_min")]
    pub stream_min: f64,
    #[serde(default = "d_capillary_min")]
    pub capillary_min: f64,
    #[serde(default = "d_ashlands")]
    pub ashlands: f64,
    #[serde(default = "d_scorched_earth")]
    pub scorched_earth: f64,
    #[serde(default = "d_cinder")]
    pub cinder_fields: f64,
    #[serde(default = "d_cliff_slope")]
    pub cliff_slope: f64,
    #[serde(default = "d_high_cliff_slope")]
    pub high_cliff_slope: f64,
    #[serde(default = "d_high_cliff_height")]
    pub high_cliff_height: f64,
    #[serde(default = "d_peak")]
    pub peak_height: f64,
    #[serde(default = "d_mountain")]
    pub mountain_height: f64,
    #[serde(default = "d_upland")]
    pub upland_height: f64,
    #[serde(default = "d_midland")]
    pub midland_height: f64,
    /// Band above water level that is drawn as coast.
    #[serde(default = "d_coast_band")]
    pub coast_band: f64,
}
fn d_magma() -> f64 {
    0.6
}
fn d_flow() -> f64 {
    0.3
}
fn d_cooling() -> f64 {
    0.05
}
fn d_ocean_continent() -> f64 {
    0.25
}
fn d_deep_ocean_depth() -> f64 {
    0.12
}
fn d_sea_depth() -> f64 {
    0.05
}
fn d_lake_threshold() -> f64 {
    0.25
}
fn d_alpine_lake_height() -> f64 {
    0.65
}
fn d_deep_lake() -> f64 {
    0.7
}
fn d_river_min() -> f64 {
    0.15
}
fn d_great_river() -> f64 {
    0.6
}
fn d_mountain_river_height() -> f64 {
    0.7
}
fn d_stream_min() -> f64 {
    0.04
}
fn d_capillary_min() -> f64 {
    0.002
}
fn d_ashlands() -> f64 {
    0.45
}
fn d_scorched_earth() -> f64 {
    0.25
}
fn d_cinder() -> f64 {
    0.08
}
fn d_cliff_slope() -> f64 {
    0.045
}
fn d_high_cliff_slope() -> f64 {
    0.07
}
fn d_high_cliff_height() -> f64 {
    0.6
}
fn d_peak() -> f64 {
    0.85
}
fn d_mountain() -> f64 {
    0.72
}
fn d_upland() -> f64 {
    0.6
}
fn d_midland() -> f64 {
    0.48
}
fn d_coast_band() -> f64 {
    0.04
}
impl Default for BiomeParams {
    fn default() -> Self {
        Self {
            magma_lava: d_magma(),
            flow_lava: d_flow(),
            cooling_lava: d_cooling(),
            ocean_continent: d_ocean_continent(),
            deep_ocean_depth: d_deep_ocean_depth(),
            sea_depth: d_sea_depth(),
            lake_threshold: d_lake_threshold(),
            alpine_lake_height: d_alpine_lake_height(),
            deep_lake: d_deep_lake(),
            river_min: d_river_min(),
            great_river: d_great_river(),
            mountain_river_height: d_mountain_river_height(),
            stream_min: d_stream_min(),
            capillary_min: d_capillary_min(),
            ashlands: d_ashlands(),
            scorched_earth: d_scorched_earth(),
            cinder_fields: d_cinder(),
            cliff_slope: d_cliff_slope(),
            high_cliff_slope: d_high_cliff_slope(),
            high_cliff_height: d_high_cliff_height(),
            peak_height: d_peak(),
            mountain_height: d_mountain(),
            upland_height: d_upland(),
            midland_height: d_midland(),
            coast_band: d_coast_band(),
        }
    }
}

// Moisture bins per height band: first upper bound above the moisture wins.
const PEAK: &[(f64, BiomeId)] = &[
    (0.15, BiomeId::BareSummit),
    (0.3, BiomeId::WindsweptPeak),
    (0.45, BiomeId::RockyPeak),
    (0.65, BiomeId::SnowyPeak),
    (0.8, BiomeId::IcePeak),
    (f64::INFINITY, BiomeId::Glacier),
];
const MOUNTAIN: &[(f64, BiomeId)] = &[
    (0.12, BiomeId::BarrenRidge),
    (0.25, BiomeId::ScreeSlopes),
    (0.4, BiomeId::AlpineTundra),
    (0.55, BiomeId::AlpineMeadow),
    (0.7, BiomeId::MountainForest),
    (0.85, BiomeId::ConiferForest),
    (f64::INFINITY, BiomeId::CloudForest),
];
const UPLAND: &[(f64, BiomeId)] = &[
    (0.12, BiomeId::HighDesert),
    (0.25, BiomeId::RockyBadlands),
    (0.4, BiomeId::Steppe),
    (0.55, BiomeId::Highlands),
    (0.7, BiomeId::UplandWoods),
    (0.85, BiomeId::Moorland),
    (f64::INFINITY, BiomeId::HighlandBog),
];
const MIDLAND: &[(f64, BiomeId)] = &[
    (0.1, BiomeId::Desert),
    (0.2, BiomeId::Scrubland),
    (0.32, BiomeId::DryGrassland),
    (0.44, BiomeId::Prairie),
    (0.56, BiomeId::Meadow),
    (0.68, BiomeId::Woodland),
    (0.8, BiomeId::DeciduousForest),
    (f64::INFINITY, BiomeId::Rainforest),
];
const LOWLAND: &[(f64, BiomeId)] = &[
    (0.08, BiomeId::SaltFlats),
    (0.16, BiomeId::Dunes),
    (0.26, BiomeId::Savanna),
    (0.36, BiomeId::Grassland),
    (0.46, BiomeId::Plains),
    (0.56, BiomeId::Forest),
    (0.68, BiomeId::Jungle),
    (0.8, BiomeId::Wetland),
    (f64::INFINITY, BiomeId::Swamp),
];
const COAST: &[(f64, BiomeId)] = &[
    (0.2, BiomeId::RockyShore),
    (0.4, BiomeId::Beach),
    (0.55, BiomeId::CoastalScrub),
    (0.7, BiomeId::TidalFlats),
    (0.85, BiomeId::SaltMarsh),
    (f64::INFINITY, BiomeId::Mangrove),
];

fn by_moisture(bins: &[(f64, BiomeId)], moisture: f64) -> BiomeId {
    bins.iter()
        .find(|(upper, _)| moisture < *upper)
        .or(bins.last())
        .map(|(_, id)| *id)
        .unwrap_or(BiomeId::Plains)
}

/// Biome decision table bound to a water level.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    params: BiomeParams,
    water_level: f64,
}

impl BiomeClassifier {
    pub fn new(params: BiomeParams, water_level: f64) -> Self {
        Self {
            params,
            water_level,
        }
    }

    pub fn params(&self) -> &BiomeParams {
        &self.params
    }

    /// `(is_cliff, is_high_cliff)` for a slope at a height. A high cliff is
    /// always a cliff as well.
    pub fn cliff_flags(&self, slope: f64, height: f64) -> (bool, bool) {
        let p = &self.params;
        let high = slope > p.high_cliff_slope && height > p.high_cliff_height;
        (high || slope > p.cliff_slope, high)
    }

    pub fn classify(&self, f: &TileFeatures) -> BiomeId {
        let p = &self.params;
        let wl = self.water_level;

        if f.lava >= p.magma_lava {
            return BiomeId::MagmaCore;
        }
        if f.lava >= p.flow_lava {
            return BiomeId::LavaFlow;
        }
        if f.lava >= p.cooling_lava {
            return BiomeId::CoolingLava;
        }

        if f.height < wl {
            if f.continent < p.ocean_continent {
                return if f.height < wl - p.deep_ocean_depth {
                    BiomeId::DeepOcean
                } else {
                    BiomeId::Ocean
                };
            }
            return if f.height < wl - p.sea_depth {
                BiomeId::Sea
            } else {
                BiomeId::Shallows
            };
        }

        if f.lake > p.lake_threshold {
            if f.height > p.alpine_lake_height {
                return BiomeId::AlpineLake;
            }
            if f.lake > p.deep_lake {
                return BiomeId::DeepLake;
            }
            return BiomeId::Lake;
        }

        if f.river > p.river_min {
            if f.height > p.mountain_river_height {
                return BiomeId::MountainRiver;
            }
            if f.river > p.great_river {
                return BiomeId::GreatRiver;
            }
            return BiomeId::River;
        }
        if f.river > p.stream_min {
            return BiomeId::Stream;
        }
        if f.capillary > p.capillary_min {
            return BiomeId::Rivulet;
        }

        if f.scorched > p.ashlands {
            return BiomeId::Ashlands;
        }
        if f.scorched > p.scorched_earth {
            return BiomeId::ScorchedEarth;
        }
        if f.scorched > p.cinder_fields {
            return BiomeId::CinderFields;
        }

        if f.is_high_cliff {
            return BiomeId::HighCliff;
        }
        if f.is_cliff {
            return BiomeId::Cliff;
        }

        let bins = if f.height >= p.peak_height {
            PEAK
        } else if f.height >= p.mountain_height {
            MOUNTAIN
        } else if f.height >= p.upland_height {
            UPLAND
        } else if f.height >= p.midland_height {
            MIDLAND
        } else if f.height >= wl + p.coast_band {
            LOWLAND
        } else {
            COAST
        };
        by_moisture(bins, f.moisture)
    }
}
