// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::io;
use std::error;
use yaml_rust::{Yaml, ScanError};

use super::util::{Direction, Direction::*};
use super::puzzle::Variable;

/// (row, col) coordinates of a square, row 0 at the top.
pub type Cell = (usize, usize);

// ------------------------------------------------

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Yaml(ScanError),
    Structure(String),  // grid could not be built or holds no word slots
    Vocabulary(String), // word list missing, empty or malformed
}
impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}
impl From<ScanError> for Error {
    fn from(other: ScanError) -> Self {
        Error::Yaml(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(x)         => write!(f, "I/O error: {}", x),
            Error::Yaml(x)       => write!(f, "YAML error: {}", x),
            Error::Structure(s)  => write!(f, "Invalid structure: {}", s),
            Error::Vocabulary(s) => write!(f, "Invalid vocabulary: {}", s),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(x)   => Some(x),
            Error::Yaml(x) => Some(x),
            _              => None,
        }
    }
}

// ------------------------------------------------

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    squares: Vec<Vec<bool>>, // true if the square can hold a letter
}
impl Grid {
    pub fn new(squares: Vec<Vec<bool>>) -> Result<Self, Error>
    {
        // short rows are padded out with blocked squares up to the widest row
        let width = squares.iter().map(|row| row.len()).max().unwrap_or(0);
        if width == 0 {
            return Err(Error::Structure("grid has no squares".to_string()));
        }
        let squares = squares.into_iter()
                             .map(|mut row| { row.resize(width, false); row })
                             .collect();
        Ok(Grid { squares })
    }

    /// Parses the plain text notation: one line per row, `_` marks a fillable square and
    /// any other character a blocked one.
    pub fn parse(text: &str) -> Result<Self, Error>
    {
        Self::new(text.lines()
                      .map(|line| Self::_parse_row(line))
                      .collect())
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Self, Error>
    {
        let rows = doc["structure"].as_vec().ok_or_else(||
            Error::Structure("expected a `structure` key holding a list of rows".to_string())
        )?;
        let mut squares = Vec::<Vec<bool>>::new();
        for (y, row) in rows.iter().enumerate() {
            match row.as_str() {
                Some(line) => squares.push(Self::_parse_row(line)),
                None       => return Err(Error::Structure(format!("row {} is not a string: {:?}", y, row))),
            }
        }
        Self::new(squares)
    }

    fn _parse_row(line: &str) -> Vec<bool> {
        line.chars().map(|c| c == '_').collect()
    }

    pub fn width(&self) -> usize { self.squares[0].len() }
    pub fn height(&self) -> usize { self.squares.len() }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.squares[row][col]
    }

    fn _step(cell: Cell, direction: Direction, k: usize) -> Cell {
        match direction {
            Across => (cell.0, cell.1 + k),
            Down   => (cell.0 + k, cell.1),
        }
    }

    fn _starts_slot(&self, row: usize, col: usize, direction: Direction) -> bool {
        if !self.is_open(row, col) { return false; }
        match direction {
            Across => col == 0 || !self.is_open(row, col-1),
            Down   => row == 0 || !self.is_open(row-1, col),
        }
    }

    fn _slot_length(&self, start: Cell, direction: Direction) -> usize {
        let mut length = 0;
        loop {
            let (row, col) = Self::_step(start, direction, length);
            if !self.is_open(row, col) { break; }
            length += 1;
        }
        length
    }

    /// Derives the word slots in this grid, in row-major order with the across slot of a
    /// square listed before its down slot. Single squares are not slots.
    pub fn variables(&self) -> Vec<Variable>
    {
        let mut result = Vec::<Variable>::new();
        for row in 0..self.height() {
            for col in 0..self.width() {
                for &direction in &[Across, Down] {
                    if !self._starts_slot(row, col, direction) { continue; }
                    let length = self._slot_length((row, col), direction);
                    if length > 1 {
                        result.push(Variable::new(row, col, direction, length));
                    }
                }
            }
        }
        result
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.squares {
            let line: String = row.iter().map(|&open| if open { '_' } else { '#' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}
