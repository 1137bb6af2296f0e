// vim: set ai et ts=4 sw=4 sts=4:
//! Fixtures and a brute-force oracle shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crossword::{Assignment, Crossword, Grid, Variable, Vocabulary};

pub fn vocab(words: &[&str]) -> Vocabulary {
    words.iter().map(|w| w.to_uppercase()).collect()
}

pub fn crossword(structure: &str, words: &[&str]) -> Crossword {
    Crossword::new(Grid::parse(structure).unwrap(), vocab(words)).unwrap()
}

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Writes every word's letters into the grid; false if two slots disagree on a square.
fn letters_agree(assignment: &Assignment) -> bool {
    let mut letters = HashMap::new();
    for (var, word) in assignment {
        for (cell, c) in var.cells().into_iter().zip(word.chars()) {
            if *letters.entry(cell).or_insert(c) != c {
                return false;
            }
        }
    }
    true
}

/// Checks an assignment without going through the solver's own consistency test.
pub fn is_valid_solution(cw: &Crossword, assignment: &Assignment) -> bool {
    let complete = cw.variables().iter().all(|v| assignment.contains_key(v))
                   && assignment.len() == cw.variables().len();
    let fits = assignment.iter().all(|(v, w)| w.chars().count() == v.length && cw.words.contains(w));
    let distinct = assignment.values().collect::<HashSet<_>>().len() == assignment.len();
    complete && fits && distinct && letters_agree(assignment)
}

fn search(cw: &Crossword, vars: &[Variable], assignment: &mut Assignment) -> bool {
    let (var, rest) = match vars.split_first() {
        Some(x) => x,
        None    => return true,
    };
    for word in cw.words.iter().filter(|w| w.chars().count() == var.length) {
        if assignment.values().any(|used| used == word) { continue; }
        assignment.insert(*var, word.clone());
        if letters_agree(assignment) && search(cw, rest, assignment) {
            return true;
        }
        assignment.remove(var);
    }
    false
}

/// Exhaustive enumeration: does any valid assignment exist?
pub fn solution_exists(cw: &Crossword) -> bool {
    search(cw, cw.variables(), &mut Assignment::new())
}
