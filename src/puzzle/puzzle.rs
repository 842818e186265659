use std::fmt;
use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collections::Grid;
use crate::puzzle::normalize::Normalized;
use crate::puzzle::{Difficulty, Direction};

/// A square of a finished puzzle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Black,
    Letter(char),
}

impl Cell {
    pub fn is_black(self) -> bool {
        self == Cell::Black
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Black => None,
            Cell::Letter(letter) => Some(letter),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Black => write!(f, "#"),
            Cell::Letter(letter) => write!(f, "{}", letter),
        }
    }
}

/// Black cells serialize as `null`
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Black => serializer.serialize_none(),
            Cell::Letter(letter) => serializer.serialize_char(*letter),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<char>::deserialize(deserializer)?.map_or(Cell::Black, Cell::Letter))
    }
}

/// A numbered entry of a finished puzzle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub number: u32,
    pub direction: Direction,
    pub text: String,
    pub answer: String,
    pub row: usize,
    pub col: usize,
}

/// A finished crossword. The grid and clue geometry never change after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    theme: String,
    difficulty: Difficulty,
    width: usize,
    height: usize,
    grid: Grid<Cell>,
    clues: Vec<Clue>,
    lite: bool,
}

impl Puzzle {
    pub(crate) fn new(theme: &str, difficulty: Difficulty, normalized: Normalized, lite: bool) -> Self {
        let theme = if lite {
            format!("{} (Lite)", theme)
        } else {
            theme.to_string()
        };
        Self {
            theme,
            difficulty,
            width: normalized.width,
            height: normalized.height,
            grid: normalized.grid,
            clues: normalized.clues,
            lite,
        }
    }

    /// The theme, suffixed with "(Lite)" when fewer words than targeted were placed
    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn title(&self) -> String {
        format!("{} Crossword", self.theme)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// All clues ordered by number, across before down for a shared number
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn clues_in(&self, direction: Direction) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(move |c| c.direction == direction)
    }

    pub fn word_count(&self) -> usize {
        self.clues.len()
    }

    pub fn is_lite(&self) -> bool {
        self.lite
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title(), self.difficulty)?;
        write!(f, "{}", self.grid)?;
        for &direction in &[Direction::Across, Direction::Down] {
            writeln!(f)?;
            writeln!(f, "{}", direction)?;
            for clue in self.clues_in(direction) {
                writeln!(f, "{:>3}. {} ({})", clue.number, clue.text, clue.answer.len())?;
            }
        }
        Ok(())
    }
}
