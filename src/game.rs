// src/game.rs
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A community player count. The API writes the top bucket as `"5+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCount {
    Exactly(u32),
    OrMore(u32),
}

impl PlayerCount {
    pub fn count(self) -> u32 {
        match self {
            PlayerCount::Exactly(n) | PlayerCount::OrMore(n) => n,
        }
    }

    pub fn is_open_ended(self) -> bool {
        matches!(self, PlayerCount::OrMore(_))
    }
}

impl FromStr for PlayerCount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let invalid = || ParseError::InvalidPlayerCount {
            item: "?".into(),
            value: s.to_string(),
        };
        match t.strip_suffix('+') {
            Some(n) => n.trim().parse().map(PlayerCount::OrMore).map_err(|_| invalid()),
            None => t.parse().map(PlayerCount::Exactly).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerCount::Exactly(n) => write!(f, "{n}"),
            PlayerCount::OrMore(n) => write!(f, "{n}+"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    BaseGame,
    /// Carries the canonical name of the game it expands.
    Expansion { expands: String },
}

/// A single game or expansion from the `thing` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,

    pub description: String,
    pub year: i32,
    /// Publisher (min, max)
    pub players: (u32, u32),
    /// Minutes (min, max)
    pub playtime: (u32, u32),
    pub min_age: u32,
    pub image_url: String,
    pub thumbnail_url: String,

    /// Average rating out of 10
    pub rating: f64,
    /// Average weight out of 5
    pub complexity: f64,

    pub community_min_players: Option<PlayerCount>,
    pub community_max_players: Option<PlayerCount>,
    pub community_best_players: Option<PlayerCount>,
    pub community_min_age: Option<String>,
    pub community_language_dependence: Option<String>,

    pub categories: Vec<String>,
    pub mechanics: Vec<String>,
    pub artists: Vec<String>,
    pub publishers: Vec<String>,
    pub designers: Vec<String>,
    pub compilations: Vec<String>,
    pub families: Vec<String>,

    /// Owned expansions, filled in by `Collection::fetch`.
    pub expansions: Vec<GameRecord>,
}

impl GameRecord {
    pub fn is_expansion(&self) -> bool {
        matches!(self.kind, ItemKind::Expansion { .. })
    }

    pub fn expands_name(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Expansion { expands } => Some(expands),
            ItemKind::BaseGame => None,
        }
    }

    /// Whether `player_count` is a sensible table size, preferring the
    /// community range and falling back to the publisher's.
    pub fn good_for_players(&self, player_count: u32) -> bool {
        let min = self
            .community_min_players
            .map(PlayerCount::count)
            .unwrap_or(self.players.0);
        let max = self
            .community_max_players
            .unwrap_or(PlayerCount::Exactly(self.players.1));

        if max.is_open_ended() {
            min <= player_count
        } else {
            (min..=max.count()).contains(&player_count)
        }
    }
}
