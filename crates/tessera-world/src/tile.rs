use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::biome::BiomeId;
use crate::rarity::Rarity;

/// Every layer value of a tile; the input to biome classification and rarity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileFeatures {
    pub height: f64,
    pub moisture: f64,
    pub continent: f64,
    pub slope: f64,
    #[serde(rename = "riverValue")]
    pub river: f64,
    #[serde(rename = "capillaryValue")]
    pub capillary: f64,
    #[serde(rename = "lakeValue")]
    pub lake: f64,
    #[serde(rename = "lavaValue")]
    pub lava: f64,
    #[serde(rename = "scorchedValue")]
    pub scorched: f64,
    pub is_cliff: bool,
    pub is_high_cliff: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Biome {
    pub id: BiomeId,
    pub rarity: Rarity,
}

impl Biome {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    #[inline]
    pub fn color(&self) -> &'static str {
        self.id.color()
    }
}

impl Serialize for Biome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Biome", 3)?;
        s.serialize_field("name", self.id.name())?;
        s.serialize_field("color", self.id.color())?;
        s.serialize_field("rarity", &self.rarity)?;
        s.end()
    }
}

/// Fully computed tile. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileResult {
    #[serde(flatten)]
    pub features: TileFeatures,
    pub biome: Biome,
}

impl TileResult {
    #[inline]
    pub fn height(&self) -> f64 {
        self.features.height
    }

    #[inline]
    pub fn moisture(&self) -> f64 {
        self.features.moisture
    }

    #[inline]
    pub fn biome_name(&self) -> &'static str {
        self.biome.name()
    }
}
