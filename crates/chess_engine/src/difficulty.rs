use std::{fmt, str::FromStr};

use thiserror::Error;

/// How hard the engine tries: search depth and how often it plays a weaker move on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or expert)")]
pub struct ParseDifficultyError(String);

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn base_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Depth actually searched for a requested base depth. Only Expert looks one ply
    /// further, and only in the endgame.
    pub fn search_depth(self, base_depth: u8, endgame: bool) -> u8 {
        let depth = match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => base_depth.min(3),
            Difficulty::Hard => base_depth.min(4),
            Difficulty::Expert if endgame => base_depth.saturating_add(1).min(5),
            Difficulty::Expert => base_depth.min(4),
        };
        depth.max(1)
    }

    /// Percent chance of playing a random legal move without searching.
    pub fn random_move_chance(self) -> u32 {
        match self {
            Difficulty::Easy => 40,
            _ => 0,
        }
    }

    /// Percent chance of replacing the best move with another move scored within
    /// `GOOD_MOVE_MARGIN` of it.
    pub fn substitution_chance(self) -> u32 {
        match self {
            Difficulty::Medium => 20,
            Difficulty::Hard => 5,
            Difficulty::Easy | Difficulty::Expert => 0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
