use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::TileFeatures;

/// Score boundaries between consecutive tiers.
const TIER_THRESHOLDS: [f64; 5] = [4.0, 8.0, 13.0, 18.0, 25.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn from_score(score: f64) -> Rarity {
        let tier = TIER_THRESHOLDS.iter().take_while(|t| score >= **t).count();
        Rarity::ALL[tier]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How statistically extreme a tile's parameters are. Higher is rarer.
pub fn rarity_score(features: &TileFeatures) -> f64 {
    let height_dev = ((features.height - 0.5).abs() * 2.0).powf(2.5) * 12.0;
    let moisture_dev = ((features.moisture - 0.5).abs() * 2.0).powf(2.5) * 9.0;
    let slope_excess = (features.slope - 0.08).max(0.0) * 80.0;
    let lava = features.lava * 8.0;
    let scorched = features.scorched * 5.0;
    let cliff = if features.is_cliff || features.is_high_cliff {
        4.0
    } else {
        0.0
    };
    height_dev + moisture_dev + slope_excess + lava + scorched + cliff
}

#[inline]
pub fn rarity(features: &TileFeatures) -> Rarity {
    Rarity::from_score(rarity_score(features))
}
