//! Greedy intersection search that packs candidates into a scratch grid

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::collections::{Coord, Grid};
use crate::puzzle::validate::can_place;
use crate::puzzle::Direction;
use crate::source::WordCandidate;

/// Working buffer for one layout run. `None` is a blank cell.
pub type ScratchGrid = Grid<Option<char>>;

/// A candidate committed to a position and orientation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
    pub answer: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl PlacedWord {
    pub fn len(&self) -> usize {
        self.answer.len()
    }

    pub fn start(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Every letter paired with the coordinate it occupies
    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        let (row, col, direction) = (self.row, self.col, self.direction);
        self.answer.chars().enumerate().map(move |(i, letter)| {
            let coord = match direction {
                Direction::Across => Coord::new(row, col + i),
                Direction::Down => Coord::new(row + i, col),
            };
            (coord, letter)
        })
    }
}

/// Inclusive rectangle covering a set of words
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl Bounds {
    pub fn span(row: usize, col: usize, len: usize, direction: Direction) -> Bounds {
        let last = len.saturating_sub(1);
        let (max_row, max_col) = match direction {
            Direction::Across => (row, col + last),
            Direction::Down => (row + last, col),
        };
        Bounds {
            min_row: row,
            min_col: col,
            max_row,
            max_col,
        }
    }

    pub fn of(words: &[PlacedWord]) -> Option<Bounds> {
        words
            .iter()
            .map(|w| Bounds::span(w.row, w.col, w.len(), w.direction))
            .fold1(Bounds::union)
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_row: self.min_row.min(other.min_row),
            min_col: self.min_col.min(other.min_col),
            max_row: self.max_row.max(other.max_row),
            max_col: self.max_col.max(other.max_col),
        }
    }

    pub fn width(self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(self) -> usize {
        self.max_row - self.min_row + 1
    }
}

/// Places `candidates` in order: the first is the seed word, centered horizontally, and every
/// later candidate is attached perpendicular to a word already on the grid. Candidates that
/// cannot be attached anywhere are dropped.
///
/// Returns `None` only if the seed word cannot be placed. Coordinates of the result are in
/// scratch grid space; the bounding box of the result never exceeds `grid_size` on either side.
pub fn layout<R: Rng + ?Sized>(
    candidates: &[WordCandidate],
    grid_size: usize,
    scratch_size: usize,
    rng: &mut R,
) -> Option<Vec<PlacedWord>> {
    let (seed, rest) = candidates.split_first()?;
    let mut context = LayoutContext::new(grid_size, scratch_size);
    if !context.place_seed(seed) {
        debug!("Seed word {} does not fit", seed.answer);
        return None;
    }
    for candidate in rest {
        if !context.attach(candidate, rng) {
            debug!("No crossing found for {}", candidate.answer);
        }
    }
    Some(context.placed)
}

struct LayoutContext {
    grid: ScratchGrid,
    placed: Vec<PlacedWord>,
    bounds: Option<Bounds>,
    grid_size: usize,
}

impl LayoutContext {
    fn new(grid_size: usize, scratch_size: usize) -> Self {
        Self {
            grid: Grid::square(scratch_size, None),
            placed: Vec::new(),
            bounds: None,
            grid_size,
        }
    }

    fn place_seed(&mut self, seed: &WordCandidate) -> bool {
        let mid = (self.grid.width() / 2) as isize;
        let col = mid - (seed.answer.len() / 2) as isize;
        if !self.is_legal(&seed.answer, mid, col, Direction::Across) {
            return false;
        }
        self.commit(seed, mid as usize, col as usize, Direction::Across);
        true
    }

    fn attach<R: Rng + ?Sized>(&mut self, candidate: &WordCandidate, rng: &mut R) -> bool {
        let mut targets: Vec<usize> = (0..self.placed.len()).collect();
        targets.shuffle(rng);
        for target in targets {
            if let Some((row, col, direction)) = self.find_crossing(&candidate.answer, target) {
                self.commit(candidate, row, col, direction);
                return true;
            }
        }
        false
    }

    /// First legal position where `answer` crosses the placed word at index `target`
    fn find_crossing(&self, answer: &str, target: usize) -> Option<(usize, usize, Direction)> {
        let target = &self.placed[target];
        let direction = target.direction.perpendicular();
        for (i, letter) in answer.chars().enumerate() {
            for (j, target_letter) in target.answer.chars().enumerate() {
                if letter != target_letter {
                    continue;
                }
                let (cross_row, cross_col) =
                    target
                        .direction
                        .advance(target.row as isize, target.col as isize, j as isize);
                let (row, col) = direction.advance(cross_row, cross_col, -(i as isize));
                if self.is_legal(answer, row, col, direction) {
                    return Some((row as usize, col as usize, direction));
                }
            }
        }
        None
    }

    fn is_legal(&self, answer: &str, row: isize, col: isize, direction: Direction) -> bool {
        can_place(&self.grid, answer, row, col, direction)
            && self.fits(answer.len(), row as usize, col as usize, direction)
    }

    /// True if the word keeps the bounding box of the layout within the final grid size
    fn fits(&self, len: usize, row: usize, col: usize, direction: Direction) -> bool {
        let span = Bounds::span(row, col, len, direction);
        let bounds = self.bounds.map_or(span, |b| b.union(span));
        bounds.width() <= self.grid_size && bounds.height() <= self.grid_size
    }

    fn commit(&mut self, candidate: &WordCandidate, row: usize, col: usize, direction: Direction) {
        let word = PlacedWord {
            answer: candidate.answer.clone(),
            clue: candidate.clue.clone(),
            row,
            col,
            direction,
        };
        for (coord, letter) in word.cells() {
            self.grid[coord] = Some(letter);
        }
        let span = Bounds::span(row, col, word.len(), direction);
        self.bounds = Some(self.bounds.map_or(span, |b| b.union(span)));
        self.placed.push(word);
    }
}
