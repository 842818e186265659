use itertools::Itertools;

use crate::collections::Grid;
use crate::puzzle::layout::{Bounds, PlacedWord};
use crate::puzzle::{Cell, Clue};

/// A cropped, numbered layout
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub width: usize,
    pub height: usize,
    pub grid: Grid<Cell>,
    pub clues: Vec<Clue>,
}

/// Crops placed words to their bounding box, pads small results up to
/// `min(min_dimension, grid_size)` on each side and numbers the clues.
///
/// A cell that starts a word gets the next number in row-major order; a cell that starts both
/// an across and a down word shares one number between them.
pub fn normalize(placed: &[PlacedWord], grid_size: usize, min_dimension: usize) -> Normalized {
    let floor = min_dimension.min(grid_size);
    let bounds = match Bounds::of(placed) {
        Some(bounds) => bounds,
        None => {
            return Normalized {
                width: floor,
                height: floor,
                grid: Grid::with_value(floor, floor, Cell::Black),
                clues: Vec::new(),
            }
        }
    };
    let width = bounds.width().max(floor);
    let height = bounds.height().max(floor);

    let mut words: Vec<PlacedWord> = placed
        .iter()
        .map(|w| PlacedWord {
            row: w.row - bounds.min_row,
            col: w.col - bounds.min_col,
            ..w.clone()
        })
        .collect();
    words.sort_by_key(|w| (w.row, w.col, w.direction));

    let mut grid = Grid::with_value(width, height, Cell::Black);
    for word in &words {
        for (coord, letter) in word.cells() {
            grid[coord] = Cell::Letter(letter);
        }
    }

    let mut clues = Vec::with_capacity(words.len());
    let starts = words.iter().group_by(|w| w.start());
    for (number, (_, starting)) in (1..).zip(&starts) {
        for word in starting {
            clues.push(Clue {
                number,
                direction: word.direction,
                text: word.clue.clone(),
                answer: word.answer.clone(),
                row: word.row,
                col: word.col,
            });
        }
    }

    Normalized {
        width,
        height,
        grid,
        clues,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::collections::Coord;
    use crate::puzzle::layout::PlacedWord;
    use crate::puzzle::Cell;
    use crate::puzzle::Direction::{self, Across, Down};

    fn word(answer: &str, row: usize, col: usize, direction: Direction) -> PlacedWord {
        PlacedWord {
            answer: answer.to_string(),
            clue: answer.to_lowercase(),
            row,
            col,
            direction,
        }
    }

    #[test]
    fn crops_and_rebases() {
        let placed = vec![word("FRIENDS", 20, 17, Across), word("ROSS", 20, 18, Down)];
        let normalized = normalize(&placed, 11, 3);
        assert_eq!((7, 4), (normalized.width, normalized.height));
        assert_eq!(Cell::Letter('F'), normalized.grid[Coord::new(0, 0)]);
        assert_eq!(Cell::Letter('S'), normalized.grid[Coord::new(3, 1)]);
        assert_eq!(Cell::Black, normalized.grid[Coord::new(3, 0)]);
    }

    #[test]
    fn pads_to_floor() {
        let normalized = normalize(&[word("ROSS", 20, 18, Across)], 11, 10);
        assert_eq!((10, 10), (normalized.width, normalized.height));
        assert_eq!(Cell::Black, normalized.grid[Coord::new(9, 9)]);
    }

    #[test]
    fn floor_never_exceeds_grid_size() {
        let normalized = normalize(&[word("ROSS", 20, 18, Across)], 6, 10);
        assert_eq!((6, 6), (normalized.width, normalized.height));
    }

    #[test]
    fn shared_start_shares_number() {
        // FRIENDS across and FIST down both start at the F
        let placed = vec![
            word("FIST", 4, 4, Down),
            word("FRIENDS", 4, 4, Across),
            word("DUNE", 4, 9, Down),
            word("SET", 7, 2, Across),
        ];
        let normalized = normalize(&placed, 11, 3);
        let numbered: Vec<(u32, Direction, &str)> = normalized
            .clues
            .iter()
            .map(|c| (c.number, c.direction, c.answer.as_str()))
            .collect();
        assert_eq!(
            vec![
                (1, Across, "FRIENDS"),
                (1, Down, "FIST"),
                (2, Down, "DUNE"),
                (3, Across, "SET"),
            ],
            numbered
        );
    }

    #[test]
    fn nothing_placed() {
        let normalized = normalize(&[], 11, 10);
        assert!(normalized.clues.is_empty());
        assert_eq!((10, 10), (normalized.width, normalized.height));
    }
}
