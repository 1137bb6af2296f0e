// vim: set ai et ts=4 sw=4 sts=4:
//! Crossword generator.
//!
//! A grid structure and a word list are turned into a constraint satisfaction problem: each
//! horizontal or vertical word slot is a variable whose domain is the vocabulary. The solver
//! prunes domains by word length (node consistency) and by shared letters (AC-3), then runs a
//! backtracking search ordered by minimum remaining values and least constraining value.
pub mod util;
pub mod grid;
pub mod words;
pub mod puzzle;

pub use grid::{Grid, Error};
pub use puzzle::{Crossword, Variable, Assignment, Solver, SolveStats};
pub use words::Vocabulary;
