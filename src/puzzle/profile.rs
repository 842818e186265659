//! Difficulty tiers and the generation thresholds attached to each

use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::puzzle::error::{ParseDifficultyError, ParseRegionError};

/// Bumped whenever a value in the profile table changes, since that changes generated puzzles
pub const PROFILE_TABLE_VERSION: u32 = 1;

/// Grid size and acceptance thresholds for one difficulty tier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// the largest width and height of a finished puzzle, and the longest usable answer
    pub grid_size: usize,
    /// fewer placed words than this is a failed generation
    pub min_words: usize,
    /// placing this many words ends the retry loop early
    pub target_words: usize,
    /// how many candidates to ask the content provider for
    pub fetch_count: usize,
}

const EASY: DifficultyProfile = DifficultyProfile {
    grid_size: 11,
    min_words: 4,
    target_words: 8,
    fetch_count: 18,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    grid_size: 13,
    min_words: 5,
    target_words: 10,
    fetch_count: 20,
};

const HARD: DifficultyProfile = DifficultyProfile {
    grid_size: 15,
    min_words: 6,
    target_words: 12,
    fetch_count: 25,
};

const EXPERT: DifficultyProfile = DifficultyProfile {
    grid_size: 17,
    min_words: 7,
    target_words: 14,
    fetch_count: 30,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
            Difficulty::Expert => &EXPERT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    /// Guidance for the content provider on how obscure answers and clues may be
    pub fn steering(self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "Use extremely popular, well-known mainstream answers. \
                 Simple, direct clues suitable for beginners."
            }
            Difficulty::Medium => {
                "Standard trivia difficulty. A mix of famous hits and some specific knowledge."
            }
            Difficulty::Hard => {
                "Use obscure facts, deep cuts, b-sides, or slightly cryptic trivia."
            }
            Difficulty::Expert => {
                "Use specialist trivia and cryptic, wordplay-heavy clues for seasoned solvers."
            }
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// Which audience the pop culture references should favor
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Usa,
    Uk,
    Mix,
}

impl Region {
    pub fn hint(self) -> &'static str {
        match self {
            Region::Usa => {
                "Prioritize American pop culture, US TV shows, Hollywood movies, \
                 and US spelling (e.g. Color)."
            }
            Region::Uk => {
                "Prioritize British pop culture, UK TV shows, British bands, \
                 and UK spelling (e.g. Colour)."
            }
            Region::Mix => "Include a diverse mix of US and UK pop culture.",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Mix
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::Usa => "USA",
            Region::Uk => "UK",
            Region::Mix => "Mix",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usa" | "us" => Ok(Region::Usa),
            "uk" | "gb" => Ok(Region::Uk),
            "mix" => Ok(Region::Mix),
            _ => Err(ParseRegionError(s.to_string())),
        }
    }
}
