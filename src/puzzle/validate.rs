use crate::puzzle::layout::ScratchGrid;
use crate::puzzle::Direction;

/// Checks whether `word` may be written starting at `(row, col)` and running in `direction`.
///
/// A placement is legal when:
/// * it starts inside the grid and ends inside the grid
/// * the cells just before the first letter and just after the last letter are blank or off-grid
/// * every letter lands on a blank cell or on a cell that already holds the same letter
/// * every letter written to a blank cell has blank neighbors on both sides across the word
/// * no two consecutive letters land on cells that were already filled
///
/// The last rule rejects laying a word over a parallel word, which would merge the two runs.
pub fn can_place(grid: &ScratchGrid, word: &str, row: isize, col: isize, direction: Direction) -> bool {
    let letters: Vec<char> = word.chars().collect();
    let len = letters.len() as isize;
    if len == 0 || row < 0 || col < 0 {
        return false;
    }
    let (end_row, end_col) = direction.advance(row, col, len - 1);
    if !grid.contains(end_row, end_col) {
        return false;
    }

    let (before_row, before_col) = direction.advance(row, col, -1);
    let (after_row, after_col) = direction.advance(row, col, len);
    if is_filled(grid, before_row, before_col) || is_filled(grid, after_row, after_col) {
        return false;
    }

    let (side_row, side_col) = direction.perpendicular().delta();
    let mut previous_filled = false;
    for (i, &letter) in letters.iter().enumerate() {
        let (r, c) = direction.advance(row, col, i as isize);
        match grid.get_signed(r, c).copied().flatten() {
            Some(existing) => {
                if existing != letter || previous_filled {
                    return false;
                }
                previous_filled = true;
            }
            None => {
                if is_filled(grid, r - side_row, c - side_col)
                    || is_filled(grid, r + side_row, c + side_col)
                {
                    return false;
                }
                previous_filled = false;
            }
        }
    }
    true
}

fn is_filled(grid: &ScratchGrid, row: isize, col: isize) -> bool {
    matches!(grid.get_signed(row, col), Some(Some(_)))
}
