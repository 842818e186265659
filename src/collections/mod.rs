pub mod grid;

pub use self::grid::{Coord, Grid};
