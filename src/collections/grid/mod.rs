mod coord;

pub use self::coord::Coord;

use std::fmt;
use std::fmt::Display;
use std::ops::{Index, IndexMut};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A container of elements laid out in rows and columns
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    elements: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a new `Grid` with the given dimensions, filled with a specified value
    pub fn with_value(width: usize, height: usize, val: T) -> Grid<T>
    where
        T: Clone,
    {
        Grid {
            width,
            height,
            elements: vec![val; width * height],
        }
    }

    /// Create a new square `Grid` filled with a specified value
    pub fn square(width: usize, val: T) -> Grid<T>
    where
        T: Clone,
    {
        Self::with_value(width, width, val)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the (possibly negative) position lies inside the grid
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        if coord.row() < self.height && coord.col() < self.width {
            Some(&self.elements[self.offset(coord)])
        } else {
            None
        }
    }

    /// Like `get` but accepts positions that may fall off the top or left edge
    pub fn get_signed(&self, row: isize, col: isize) -> Option<&T> {
        if self.contains(row, col) {
            self.get(Coord::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Returns an iterator over the rows of the grid
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.width.max(1))
    }

    fn offset(&self, coord: Coord) -> usize {
        coord.row() * self.width + coord.col()
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &Self::Output {
        assert!(coord.col() < self.width, "column {} out of bounds", coord.col());
        &self.elements[self.offset(coord)]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        assert!(coord.col() < self.width, "column {} out of bounds", coord.col());
        let offset = self.offset(coord);
        &mut self.elements[offset]
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for element in row {
                write!(f, "{} ", element)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serialized as a list of rows
impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// Rows must all have the same length
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: Vec<Vec<T>> = Vec::deserialize(deserializer)?;
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(D::Error::custom("grid rows differ in length"));
        }
        Ok(Grid {
            width,
            height: rows.len(),
            elements: rows.into_iter().flatten().collect(),
        })
    }
}
