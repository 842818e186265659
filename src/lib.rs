//! Generate themed pop culture crossword puzzles

#![warn(rust_2018_idioms)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod generator;
pub mod puzzle;
pub mod session;
pub mod source;

pub use crate::generator::PuzzleGenerator;
