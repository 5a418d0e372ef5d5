//! Typed view over the upstream player document, used for text rendering.

use serde::{Deserialize, Serialize};


/// Village name the API uses for the main base.
pub const HOME_VILLAGE: &str = "home";

/// Player document from `/players/{tag}`.
///
/// Lenient on purpose: only `tag` and `name` are required, every counter
/// defaults to zero and every list to empty. The proxy never builds this
/// type; it exists for text rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Player {
    pub tag: String,
    pub name: String,
    #[serde(rename = "townHallLevel", default)]
    pub town_hall_level: u32,
    #[serde(rename = "expLevel", default)]
    pub exp_level: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(rename = "bestTrophies", default)]
    pub best_trophies: u32,
    #[serde(rename = "warStars", default)]
    pub war_stars: u32,
    #[serde(rename = "attackWins", default)]
    pub attack_wins: u32,
    #[serde(rename = "defenseWins", default)]
    pub defense_wins: u32,
    #[serde(default)]
    pub donations: u32,
    #[serde(rename = "donationsReceived", default)]
    pub donations_received: u32,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "warPreference", default)]
    pub war_preference: Option<String>,
    #[serde(default)]
    pub clan: Option<ClanInfo>,
    #[serde(default)]
    pub league: Option<League>,
    #[serde(default)]
    pub troops: Vec<Unit>,
    #[serde(default)]
    pub heroes: Vec<Unit>,
    #[serde(default)]
    pub spells: Vec<Unit>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClanInfo {
    pub tag: String,
    pub name: String,
    #[serde(rename = "clanLevel", default)]
    pub clan_level: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub id: u64,
    pub name: String,
}

/// A troop, hero or spell with its upgrade level.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Unit {
    pub name: String,
    pub level: u32,
    #[serde(rename = "maxLevel")]
    pub max_level: u32,
    #[serde(default)]
    pub village: String,
}

impl Unit {
    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    pub fn is_home(&self) -> bool {
        self.village.is_empty() || self.village == HOME_VILLAGE
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Achievement {
    pub name: String,
    pub stars: u8,
    pub value: i64,
    pub target: i64,
    #[serde(default)]
    pub info: String,
    #[serde(rename = "completionInfo", default)]
    pub completion_info: Option<String>,
    #[serde(default)]
    pub village: String,
}

impl Achievement {
    pub fn is_complete(&self) -> bool {
        self.value >= self.target
    }
}
