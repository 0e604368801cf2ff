//! Knuth's Algorithm X over a [`SparseMatrix`].
//!
//! The search picks the column with the fewest live rows, covers it, and tries
//! each of its rows in turn. Trying a row covers every other column that row
//! satisfies; backing out of it uncovers them again in reverse order. No state
//! is ever copied: the links themselves are the undo log.
//!
//! Only the first exact cover found is reported.
//!
//! # Example
//! ```
//! use dlx::cs::combinatorial::dancing_links::SparseMatrix;
//! use dlx::cs::combinatorial::exact_cover::{is_exact_cover, ExactCoverSearch};
//!
//! let rows = vec![vec![0, 1], vec![1, 3], vec![2], vec![3]];
//! let matrix = SparseMatrix::new(&rows, 4).unwrap();
//!
//! let mut search = ExactCoverSearch::new(matrix);
//! assert!(search.solve());
//! assert_eq!(search.solution(), &[0, 2, 3]);
//! assert!(is_exact_cover(&rows, 4, search.solution()));
//! ```

use crate::cs::combinatorial::dancing_links::SparseMatrix;
use crate::cs::error::Result;
use bitvec::prelude::*;
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Removes the column of node `n` from the header list and hides every row that
/// intersects it from the other columns.
///
/// Returns the number of nodes unlinked, the header included.
pub fn cover(matrix: &mut SparseMatrix, n: usize) -> usize {
    let c = matrix.column_header_of(n);
    matrix.remove_horizontally(c);
    let mut updates = 1;
    let mut i = matrix.down(c);
    while i != c {
        let mut j = matrix.right(i);
        while j != i {
            matrix.remove_vertically(j);
            updates += 1;
            j = matrix.right(j);
        }
        i = matrix.down(i);
    }
    updates
}

/// Exact inverse of [`cover`]: walks the column bottom to top and each row right
/// to left, relinking nodes, then puts the header back.
///
/// Must be called in the reverse order of the matching `cover` calls.
pub fn uncover(matrix: &mut SparseMatrix, n: usize) {
    let c = matrix.column_header_of(n);
    let mut i = matrix.up(c);
    while i != c {
        let mut j = matrix.left(i);
        while j != i {
            matrix.insert_vertically(j);
            j = matrix.left(j);
        }
        i = matrix.up(i);
    }
    matrix.insert_horizontally(c);
}

/// Limits that let a caller bound an otherwise unbounded search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Abort after visiting this many search-tree nodes.
    pub node_limit: Option<u64>,
    /// Abort once this much wall-clock time has passed since the search began.
    /// A limit too large to represent as a deadline is treated as no limit.
    pub time_limit: Option<Duration>,
}

impl SearchConfig {
    /// A config without limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search-tree nodes visited (recursive frames entered).
    pub nodes: u64,
    /// Nodes unlinked by `cover`, Knuth's usual cost measure.
    pub updates: u64,
    /// Deepest recursion level reached; the root frame is level 0.
    pub max_depth: usize,
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// An exact cover was found.
    Found,
    /// The whole search space was explored without finding one.
    Exhausted,
    /// A [`SearchConfig`] limit was hit first.
    Aborted,
}

/// Depth-first Algorithm X search over a matrix it owns.
#[derive(Debug, Clone)]
pub struct ExactCoverSearch {
    matrix: SparseMatrix,
    config: SearchConfig,
    /// Row nodes chosen so far, one per level.
    stack: Vec<usize>,
    solution: Vec<usize>,
    stats: SearchStats,
    outcome: Option<SearchOutcome>,
}

impl ExactCoverSearch {
    pub fn new(matrix: SparseMatrix) -> Self {
        Self::with_config(matrix, SearchConfig::default())
    }

    pub fn with_config(matrix: SparseMatrix, config: SearchConfig) -> Self {
        ExactCoverSearch {
            matrix,
            config,
            stack: Vec::new(),
            solution: Vec::new(),
            stats: SearchStats::default(),
            outcome: None,
        }
    }

    /// Searches for an exact cover, returning `true` if one was found.
    ///
    /// A matrix with no rows able to cover some column simply yields `false`.
    pub fn solve(&mut self) -> bool {
        self.search() == SearchOutcome::Found
    }

    /// Runs the search and reports how it ended.
    ///
    /// After [`SearchOutcome::Found`] the matrix is left in its solved state
    /// (every column covered). After [`SearchOutcome::Exhausted`] or
    /// [`SearchOutcome::Aborted`] it is restored exactly. Found and exhausted
    /// results are final and returned again on later calls; an aborted search
    /// starts over.
    pub fn search(&mut self) -> SearchOutcome {
        if let Some(outcome @ (SearchOutcome::Found | SearchOutcome::Exhausted)) = self.outcome {
            return outcome;
        }

        self.stats = SearchStats::default();
        self.stack.clear();
        self.solution.clear();

        // A deadline past the end of `Instant` can never be reached.
        let deadline = self
            .config
            .time_limit
            .and_then(|limit| Instant::now().checked_add(limit));
        let outcome = self.search_level(0, deadline);

        if outcome == SearchOutcome::Found {
            let matrix = &self.matrix;
            self.solution = self.stack.iter().filter_map(|&n| matrix.row(n)).collect();
        }
        debug!(
            "exact cover search {:?} after {} nodes, {} updates, depth {}",
            outcome, self.stats.nodes, self.stats.updates, self.stats.max_depth
        );

        self.outcome = Some(outcome);
        outcome
    }

    fn search_level(&mut self, depth: usize, deadline: Option<Instant>) -> SearchOutcome {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if self.limit_reached(deadline) {
            return SearchOutcome::Aborted;
        }

        let col = self.matrix.select_min_column();
        if col == self.matrix.root() {
            return SearchOutcome::Found;
        }
        trace!(
            "level {}: column {} with {} rows",
            depth,
            col,
            self.matrix.size(col)
        );

        self.stats.updates += cover(&mut self.matrix, col) as u64;

        let mut r = self.matrix.down(col);
        while r != col {
            self.stack.push(r);
            let mut j = self.matrix.right(r);
            while j != r {
                self.stats.updates += cover(&mut self.matrix, j) as u64;
                j = self.matrix.right(j);
            }

            let outcome = self.search_level(depth + 1, deadline);
            if outcome == SearchOutcome::Found {
                return outcome;
            }

            self.stack.pop();
            let mut j = self.matrix.left(r);
            while j != r {
                uncover(&mut self.matrix, j);
                j = self.matrix.left(j);
            }

            if outcome == SearchOutcome::Aborted {
                uncover(&mut self.matrix, col);
                return outcome;
            }
            r = self.matrix.down(r);
        }

        uncover(&mut self.matrix, col);
        SearchOutcome::Exhausted
    }

    fn limit_reached(&self, deadline: Option<Instant>) -> bool {
        if let Some(limit) = self.config.node_limit {
            if self.stats.nodes > limit {
                return true;
            }
        }
        matches!(deadline, Some(deadline) if Instant::now() >= deadline)
    }

    /// Row ids of the exact cover in the order they were chosen; empty unless
    /// the last search found one.
    pub fn solution(&self) -> &[usize] {
        &self.solution
    }

    /// Consumes the search, returning the exact cover if one was found.
    pub fn into_solution(self) -> Option<Vec<usize>> {
        match self.outcome {
            Some(SearchOutcome::Found) => Some(self.solution),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<SearchOutcome> {
        self.outcome
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }
}

/// Builds the matrix for `rows` over `cols` columns and returns the first exact
/// cover found, or `None` if there is none.
///
/// # Example
/// ```
/// use dlx::cs::combinatorial::exact_cover::solve_exact_cover;
///
/// let rows = vec![vec![0, 2], vec![1], vec![0, 1]];
/// assert_eq!(solve_exact_cover(&rows, 3).unwrap(), Some(vec![0, 1]));
///
/// let rows = vec![vec![0, 1], vec![1, 2]];
/// assert_eq!(solve_exact_cover(&rows, 3).unwrap(), None);
/// ```
pub fn solve_exact_cover<R: AsRef<[usize]>>(
    rows: &[R],
    cols: usize,
) -> Result<Option<Vec<usize>>> {
    let mut search = ExactCoverSearch::new(SparseMatrix::new(rows, cols)?);
    search.solve();
    Ok(search.into_solution())
}

/// Returns true if the rows named by `solution` cover every column in
/// `0..cols` exactly once.
pub fn is_exact_cover<R: AsRef<[usize]>>(rows: &[R], cols: usize, solution: &[usize]) -> bool {
    let mut covered = bitvec![0; cols];
    for &r in solution {
        let Some(row) = rows.get(r) else {
            return false;
        };
        for &c in row.as_ref() {
            if c >= cols || covered[c] {
                return false;
            }
            covered.set(c, true);
        }
    }
    covered.all()
}
