//! Value types for CLI arguments.

use crate::error::{ClashError, Result};
use std::fmt;
use std::str::FromStr;

/// Section of a player's statistics to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Town hall, trophies, war stars, donations, clan and league.
    #[default]
    Overview,
    /// Heroes, troops and spells with their levels.
    Troops,
    Achievements,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            View::Overview => "overview",
            View::Troops => "troops",
            View::Achievements => "achievements",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for View {
    type Err = ClashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "overview" => Ok(View::Overview),
            "troops" => Ok(View::Troops),
            "achievements" => Ok(View::Achievements),
            _ => Err(ClashError::InvalidView {
                view: s.to_string(),
            }),
        }
    }
}
