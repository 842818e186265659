//! Crossword layout, numbering, and the retry loop that picks the densest grid

pub use self::direction::Direction;
pub use self::generate::{generate, GenerateOptions};
pub use self::layout::{layout, PlacedWord, ScratchGrid};
pub use self::normalize::{normalize, Normalized};
pub use self::profile::{Difficulty, DifficultyProfile, Region, PROFILE_TABLE_VERSION};
pub use self::puzzle::{Cell, Clue, Puzzle};
pub use self::validate::can_place;

pub mod error;

mod direction;
mod generate;
mod layout;
mod normalize;
mod profile;
mod puzzle;
mod validate;
