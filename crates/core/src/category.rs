//! Media categories shared by favorites and recently viewed items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kind of catalog item a favorite or recent row refers to.
///
/// Stored in the database as its lowercase singular name (see
/// [`Category::as_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anime,
    #[serde(alias = "games")]
    Game,
    Music,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Anime, Category::Game, Category::Music];

    /// Value persisted in the `category` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Anime => "anime",
            Category::Game => "game",
            Category::Music => "music",
        }
    }

    /// Collection name used for favorites paths and profile counters.
    pub fn collection_name(self) -> &'static str {
        match self {
            Category::Anime => "anime",
            Category::Game => "games",
            Category::Music => "music",
        }
    }

    /// Parse a URL path segment. Both `game` and `games` are accepted so
    /// that `/favorites/games` and `/recent/game` resolve to the same value.
    pub fn parse(segment: &str) -> Result<Self, CoreError> {
        match segment.to_ascii_lowercase().as_str() {
            "anime" => Ok(Category::Anime),
            "game" | "games" => Ok(Category::Game),
            "music" => Ok(Category::Music),
            other => Err(CoreError::Validation(format!(
                "Unknown category '{other}'. Must be one of: anime, games, music"
            ))),
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
