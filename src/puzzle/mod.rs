// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

pub use self::solver::{Solver, SolveStats, Arc, Domains};

use std::fmt;
use std::fs;
use std::path::Path;
use std::collections::HashMap;
use yaml_rust::{Yaml, YamlLoader};
use ansi_term::{Colour, Style};

use super::grid::{Grid, Cell, Error};
use super::util::{maybe_color, Direction, Direction::*};
use super::words::{self, Vocabulary};

/// Partial or complete mapping of word slots to the words placed in them.
pub type Assignment = HashMap<Variable, String>;

/// A word slot: starting square, direction and length. Two variables are equal iff all four match.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct Variable {
    pub i: usize,
    pub j: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(i: usize, j: usize, direction: Direction, length: usize) -> Self {
        assert!(length > 0, "word slot at ({}, {}) {} has zero length", i, j, direction);
        Variable { i, j, direction, length }
    }

    /// Squares covered by this slot, in word order.
    pub fn cells(&self) -> Vec<Cell> {
        (0..self.length).map(|k| match self.direction {
                            Across => (self.i, self.j + k),
                            Down   => (self.i + k, self.j),
                        })
                        .collect()
    }
}
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}) {}: {}", self.i, self.j, self.direction, self.length)
    }
}

// ------------------------------------------------

#[derive(Debug)]
pub struct Crossword {
    pub grid: Grid,
    pub words: Vocabulary,
    variables: Vec<Variable>,
    index: HashMap<Variable, usize>,
    overlaps: HashMap<(usize, usize), (usize, usize)>, // keyed by declaration indices, lower first
    neighbors: Vec<Vec<Variable>>,
}

impl Crossword {
    pub fn new(grid: Grid, words: Vocabulary) -> Result<Self, Error>
    {
        if words.is_empty() {
            return Err(Error::Vocabulary("no candidate words".to_string()));
        }
        let variables = grid.variables();
        if variables.is_empty() {
            return Err(Error::Structure("no word slots of two or more squares".to_string()));
        }
        let index = variables.iter()
                             .enumerate()
                             .map(|(n, &var)| (var, n))
                             .collect::<HashMap<_, _>>();

        let mut overlaps = HashMap::<(usize, usize), (usize, usize)>::new();
        for a in 0..variables.len() {
            for b in (a+1)..variables.len() {
                if let Some(overlap) = Self::_intersect(&variables[a], &variables[b]) {
                    overlaps.insert((a, b), overlap);
                }
            }
        }
        let neighbors = (0..variables.len())
            .map(|a| (0..variables.len()).filter(|&b| b != a && overlaps.contains_key(&(a.min(b), a.max(b))))
                                         .map(|b| variables[b])
                                         .collect::<Vec<_>>())
            .collect::<Vec<_>>();

        log::debug!("built crossword: {:?}, {} variables, {} overlaps, {} words",
                    grid, variables.len(), overlaps.len(), words.len());

        Ok(Crossword { grid, words, variables, index, overlaps, neighbors })
    }

    /// Loads a puzzle from a structure file plus an optional word list. Structure files ending
    /// in `.yaml` or `.yml` are read as puzzle documents, which may carry their own words.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(structure: P, words: Option<Q>)
        -> Result<Self, Error>
    {
        let structure = structure.as_ref();
        let text = fs::read_to_string(structure)?;
        let is_yaml = match structure.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"),
            None      => false,
        };

        let (grid, mut vocabulary) = if is_yaml {
            let docs: Vec<Yaml> = YamlLoader::load_from_str(&text)?;
            let doc = docs.get(0).ok_or_else(||
                Error::Structure(format!("{} holds no YAML document", structure.display()))
            )?;
            (Grid::from_yaml(doc)?, words::from_yaml(doc)?)
        } else {
            (Grid::parse(&text)?, Vocabulary::new())
        };
        if let Some(path) = words {
            vocabulary.extend(words::load(path)?);
        }
        log::info!("loaded {} ({}x{}) with {} candidate words",
                   structure.display(), grid.height(), grid.width(), vocabulary.len());
        Self::new(grid, vocabulary)
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Self, Error> {
        Self::new(Grid::from_yaml(doc)?, words::from_yaml(doc)?)
    }

    fn _intersect(a: &Variable, b: &Variable) -> Option<(usize, usize)> {
        let b_cells = b.cells();
        a.cells().iter()
                 .enumerate()
                 .find_map(|(ia, cell)| b_cells.iter()
                                               .position(|c| c == cell)
                                               .map(|ib| (ia, ib)))
    }

    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }

    /// All word slots, in declaration order.
    pub fn variables(&self) -> &[Variable] { &self.variables }

    fn _index_of(&self, var: &Variable) -> usize {
        match self.index.get(var) {
            Some(&n) => n,
            None     => panic!("{} is not a variable of this crossword", var),
        }
    }

    /// Offsets into `a`'s and `b`'s words of the square they share, if any.
    pub fn overlap(&self, a: &Variable, b: &Variable) -> Option<(usize, usize)> {
        let (x, y) = (self._index_of(a), self._index_of(b));
        if x < y {
            self.overlaps.get(&(x, y)).copied()
        } else if x > y {
            self.overlaps.get(&(y, x)).map(|&(p, q)| (q, p))
        } else {
            None
        }
    }

    pub fn neighbors(&self, var: &Variable) -> &[Variable] {
        &self.neighbors[self._index_of(var)]
    }

    pub fn letter_grid(&self, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width()]; self.height()];
        for (var, word) in assignment {
            for ((row, col), c) in var.cells().into_iter().zip(word.chars()) {
                letters[row][col] = Some(c);
            }
        }
        letters
    }

    /// Text rendering of an assignment; blocked squares are drawn as full blocks.
    pub fn render(&self, assignment: &Assignment, emit_color: bool) -> String {
        let letters = self.letter_grid(assignment);
        let blocked = Colour::Fixed(241).paint("\u{2588}");
        let letter_style = Style::new().bold();

        let mut result = String::new();
        for (row, line) in letters.iter().enumerate() {
            for (col, letter) in line.iter().enumerate() {
                if !self.grid.is_open(row, col) {
                    result.push_str(&maybe_color(&blocked, emit_color));
                    continue;
                }
                match letter {
                    Some(c) => result.push_str(&maybe_color(&letter_style.paint(c.to_string()), emit_color)),
                    None    => result.push(' '),
                }
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn vocab(words: &[&str]) -> Vocabulary {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn corner() -> Crossword {
        // across (0,0) len 3 crosses down (0,1) len 3 at across[1] / down[0]
        Crossword::new(Grid::parse("___\n#_#\n#_#").unwrap(), vocab(&["CAT"])).unwrap()
    }

    #[test]
    fn cells_follow_direction() {
        assert_eq!(Variable::new(1, 2, Across, 3).cells(), vec![(1, 2), (1, 3), (1, 4)]);
        assert_eq!(Variable::new(1, 2, Down, 2).cells(), vec![(1, 2), (2, 2)]);
    }

    #[test]
    #[should_panic]
    fn zero_length_variable_panics() {
        Variable::new(0, 0, Across, 0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let cw = corner();
        let a = Variable::new(0, 0, Across, 3);
        let d = Variable::new(0, 1, Down, 3);
        assert_eq!(cw.overlap(&a, &d), Some((1, 0)));
        assert_eq!(cw.overlap(&d, &a), Some((0, 1)));
        assert_eq!(cw.overlap(&a, &a), None);
    }

    #[test]
    fn neighbors_match_overlaps() {
        let cw = Crossword::new(Grid::parse("___\n#_#\n___\n").unwrap(), vocab(&["CAT"])).unwrap();
        for x in cw.variables() {
            assert!(!cw.neighbors(x).contains(x));
            for y in cw.variables() {
                assert_eq!(cw.neighbors(x).contains(y), cw.overlap(x, y).is_some());
            }
        }
        let top = Variable::new(0, 0, Across, 3);
        let bottom = Variable::new(2, 0, Across, 3);
        assert_eq!(cw.overlap(&top, &bottom), None);
        assert_eq!(cw.neighbors(&top), &[Variable::new(0, 1, Down, 3)]);
    }

    #[test]
    #[should_panic(expected = "is not a variable")]
    fn overlap_of_unknown_variable_panics() {
        let cw = corner();
        cw.overlap(&Variable::new(4, 4, Across, 2), &Variable::new(0, 0, Across, 3));
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        let grid = Grid::parse("__").unwrap();
        assert!(matches!(Crossword::new(grid, Vocabulary::new()), Err(Error::Vocabulary(_))));
    }

    #[test]
    fn grid_without_slots_is_rejected() {
        let grid = Grid::parse("_#_").unwrap();
        assert!(matches!(Crossword::new(grid, vocab(&["A"])), Err(Error::Structure(_))));
    }

    #[test]
    fn from_yaml_takes_words_from_document() {
        let docs = YamlLoader::load_from_str("structure: [\"__\"]\nwords: [ox, ax]\n").unwrap();
        let cw = Crossword::from_yaml(&docs[0]).unwrap();
        assert_eq!(cw.variables().len(), 1);
        assert_eq!(cw.words, vocab(&["AX", "OX"]));
    }

    #[test]
    fn render_places_letters() {
        let cw = corner();
        let mut assignment = Assignment::new();
        assignment.insert(Variable::new(0, 0, Across, 3), "CAR".to_string());
        assignment.insert(Variable::new(0, 1, Down, 3), "ART".to_string());
        assert_eq!(cw.render(&assignment, false), "CAR\n\u{2588}R\u{2588}\n\u{2588}T\u{2588}\n");
    }

    #[test]
    fn render_leaves_unfilled_squares_blank() {
        let cw = corner();
        let mut assignment = Assignment::new();
        assignment.insert(Variable::new(0, 0, Across, 3), "CAR".to_string());
        assert_eq!(cw.render(&assignment, false), "CAR\n\u{2588} \u{2588}\n\u{2588} \u{2588}\n");
    }
}
