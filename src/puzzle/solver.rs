// vim: set ai et ts=4 sts=4 sw=4:
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::{Crossword, Variable, Assignment};

/// Words still possible for each variable.
pub type Domains = HashMap<Variable, BTreeSet<String>>;

/// Ordered pair `(x, y)`: make `x` consistent with `y`.
pub type Arc = (Variable, Variable);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SolveStats {
    pub revisions: usize,          // calls to revise()
    pub removals: usize,           // words pruned by node and arc consistency
    pub backtrack_calls: usize,
    pub consistency_checks: usize,
}

fn letter_at(word: &str, index: usize) -> Option<char> {
    word.chars().nth(index)
}

fn word_len(word: &str) -> usize {
    word.chars().count()
}

pub struct Solver<'a> {
    crossword: &'a Crossword,
    pub domains: Domains,
    pub stats: SolveStats,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        let domains = crossword.variables()
                               .iter()
                               .map(|&var| (var, crossword.words.clone()))
                               .collect();
        Solver {
            crossword,
            domains,
            stats: SolveStats::default(),
        }
    }

    pub fn crossword(&self) -> &'a Crossword { self.crossword }

    fn _domain(&self, var: &Variable) -> &BTreeSet<String> {
        match self.domains.get(var) {
            Some(words) => words,
            None        => panic!("no domain for {}", var),
        }
    }
    fn _domain_mut(&mut self, var: &Variable) -> &mut BTreeSet<String> {
        match self.domains.get_mut(var) {
            Some(words) => words,
            None        => panic!("no domain for {}", var),
        }
    }

    /// Enforces node and arc consistency, then searches for a complete assignment.
    /// Returns `None` when the puzzle has no solution.
    pub fn solve(&mut self) -> Option<Assignment> {
        log::info!("enforcing node consistency");
        self.enforce_node_consistency();

        // a variable without neighbours is never revised by ac3, so check here
        let crossword = self.crossword;
        if let Some(var) = crossword.variables().iter().find(|v| self._domain(v).is_empty()) {
            log::info!("no candidate words of length {} for {}; no solution", var.length, var);
            return None;
        }

        log::info!("enforcing arc consistency");
        if !self.ac3(None) {
            log::info!("arc consistency emptied a domain; no solution");
            return None;
        }

        log::info!("starting backtracking search");
        let result = self.backtrack(&Assignment::new());
        match result {
            Some(_) => log::info!("found a solution ({:?})", self.stats),
            None    => log::info!("search space exhausted; no solution ({:?})", self.stats),
        }
        result
    }

    /// Removes every word whose length differs from its variable's length.
    pub fn enforce_node_consistency(&mut self) {
        for (var, words) in self.domains.iter_mut() {
            let before = words.len();
            words.retain(|w| word_len(w) == var.length);
            self.stats.removals += before - words.len();
            log::debug!("{}: {} of {} words remain after node consistency", var, words.len(), before);
        }
    }

    /// Makes `x` arc consistent with `y`, removing words of `x` that no word of `y` agrees with
    /// at their shared square. Returns whether anything was removed.
    pub fn revise(&mut self, x: &Variable, y: &Variable) -> bool {
        self.stats.revisions += 1;
        let (i, j) = match self.crossword.overlap(x, y) {
            Some(overlap) => overlap,
            None          => return false,
        };
        let supported: HashSet<char> = self._domain(y).iter()
                                                      .filter_map(|w| letter_at(w, j))
                                                      .collect();
        let x_words = self._domain_mut(x);
        let before = x_words.len();
        x_words.retain(|w| match letter_at(w, i) {
            Some(c) => supported.contains(&c),
            None    => false,
        });
        let removed = before - x_words.len();
        self.stats.removals += removed;

        if removed > 0 {
            log::trace!("revised {} against {}: removed {} words", x, y, removed);
        }
        removed > 0
    }

    /// Every ordered pair of distinct variables that share a square, in declaration order.
    pub fn all_arcs(&self) -> Vec<Arc> {
        let crossword = self.crossword;
        crossword.variables()
                 .iter()
                 .flat_map(|&x| crossword.neighbors(&x).iter().map(move |&y| (x, y)))
                 .collect()
    }

    /// AC-3. Starts from `arcs` if given, otherwise from every arc in the puzzle.
    /// Returns false as soon as some domain becomes empty.
    pub fn ac3(&mut self, arcs: Option<Vec<Arc>>) -> bool {
        let mut queue: VecDeque<Arc> = match arcs {
            Some(arcs) => arcs.into_iter().collect(),
            None       => self.all_arcs().into_iter().collect(),
        };
        log::debug!("ac3 starting with {} arcs", queue.len());

        let crossword = self.crossword;
        while let Some((x, y)) = queue.pop_front() {
            if !self.revise(&x, &y) { continue; }

            if self._domain(&x).is_empty() {
                log::debug!("domain of {} is empty after revising against {}", x, y);
                return false;
            }
            // shrinking x may break consistency of its other neighbours with x
            queue.extend(crossword.neighbors(&x)
                                  .iter()
                                  .filter(|&&z| z != y)
                                  .map(|&z| (z, x)));
        }

        for var in crossword.variables() {
            log::debug!("{}: {} words remain after arc consistency", var, self._domain(var).len());
        }
        true
    }

    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        self.crossword.variables()
                      .iter()
                      .all(|v| assignment.contains_key(v))
    }

    /// True if every word fits its slot, no word is used twice, and every pair of
    /// assigned variables agrees on the square they share.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        if assignment.iter().any(|(var, word)| word_len(word) != var.length) {
            return false;
        }

        let distinct: HashSet<&String> = assignment.values().collect();
        if distinct.len() != assignment.len() {
            return false;
        }

        for (x, x_word) in assignment {
            for y in self.crossword.neighbors(x) {
                let y_word = match assignment.get(y) {
                    Some(w) => w,
                    None    => continue,
                };
                if let Some((i, j)) = self.crossword.overlap(x, y) {
                    if letter_at(x_word, i) != letter_at(y_word, j) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Words of `var`'s domain, least constraining first: ordered by how many words they would
    /// rule out among unassigned neighbours. Ties keep alphabetical order.
    pub fn order_domain_values(&self, var: &Variable, assignment: &Assignment) -> Vec<String> {
        let crossword = self.crossword;
        let open_neighbors = crossword.neighbors(var)
                                      .iter()
                                      .filter(|n| !assignment.contains_key(*n))
                                      .filter_map(|n| crossword.overlap(var, n).map(|o| (n, o)))
                                      .collect::<Vec<_>>();

        let mut ranked = self._domain(var)
            .iter()
            .map(|value| {
                let ruled_out: usize = open_neighbors.iter()
                    .map(|(n, (i, j))| {
                        let c = letter_at(value, *i);
                        self._domain(n).iter()
                                       .filter(|w| letter_at(w, *j) != c)
                                       .count()
                    })
                    .sum();
                (ruled_out, value)
            })
            .collect::<Vec<_>>();
        ranked.sort_by_key(|&(ruled_out, _)| ruled_out);

        ranked.into_iter()
              .map(|(_, value)| value.clone())
              .collect()
    }

    /// Unassigned variable with the fewest remaining words; ties go to the variable with the
    /// most neighbours, then to declaration order.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<Variable> {
        let crossword = self.crossword;
        crossword.variables()
                 .iter()
                 .filter(|v| !assignment.contains_key(*v))
                 .min_by_key(|v| (self._domain(v).len(), Reverse(crossword.neighbors(v).len())))
                 .copied()
    }

    /// Depth-first search extending `assignment`. Each trial works on its own copy, so the
    /// caller's assignment is never modified.
    pub fn backtrack(&mut self, assignment: &Assignment) -> Option<Assignment> {
        self.stats.backtrack_calls += 1;
        if self.assignment_complete(assignment) {
            return Some(assignment.clone());
        }

        let var = self.select_unassigned_variable(assignment)?;
        log::trace!("depth {}: selected {}", assignment.len(), var);

        for value in self.order_domain_values(&var, assignment) {
            let mut candidate = assignment.clone();
            candidate.insert(var, value);

            self.stats.consistency_checks += 1;
            if !self.consistent(&candidate) {
                log::trace!("{} = {} is inconsistent", var, candidate[&var]);
                continue;
            }
            if let Some(result) = self.backtrack(&candidate) {
                return Some(result);
            }
        }
        log::trace!("depth {}: no value fits {}, backtracking", assignment.len(), var);
        None
    }
}
