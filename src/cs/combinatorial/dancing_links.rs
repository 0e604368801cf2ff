//! The "dancing links" sparse matrix behind Knuth's Algorithm X.
//!
//! Every 1 in the exact cover matrix becomes a node that sits in two circular
//! doubly-linked lists at once: the horizontal list of its row and the vertical
//! list of its column. Each column also has a header node that anchors the
//! vertical list and counts its live members, and a single root node anchors
//! the horizontal list of column headers.
//!
//! All nodes live in one flat vector and refer to each other by index. A node
//! spliced out of a list keeps its own links untouched, so it can be spliced
//! back in with two writes. That is the whole trick: see
//! [`exact_cover`](super::exact_cover) for the search that relies on it.
//!
//! Layout of the node vector for `cols` columns:
//!
//! ```text
//! 0 .. cols           column headers (header index == column index)
//! cols                root
//! cols + 1 ..         data nodes, row by row, in input order
//! ```
//!
//! # Example
//! ```
//! use dlx::cs::combinatorial::dancing_links::SparseMatrix;
//!
//! let rows = vec![vec![0, 1], vec![1, 3], vec![2], vec![3]];
//! let matrix = SparseMatrix::new(&rows, 4).unwrap();
//!
//! assert_eq!(matrix.root(), 4);
//! assert_eq!(matrix.node_count(), 6 + 4 + 1);
//! // Column 0 and column 2 both hold a single row; the leftmost one wins.
//! assert_eq!(matrix.select_min_column(), 0);
//! ```

use crate::cs::error::{Error, Result};
use log::debug;

/// Each dancing-links node links up/down/left/right in a circular list.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Header of the column this node belongs to. Never changes.
    column: usize,
    /// Input row this node was built from, `None` for headers and the root.
    row: Option<usize>,
}

/// Toroidal linked representation of an exact cover matrix.
///
/// The matrix is sized once at construction and never grows or shrinks; only
/// links and column sizes change while a search runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseMatrix {
    nodes: Vec<Node>,
    /// Live node count of each column, indexed by header.
    sizes: Vec<usize>,
    root: usize,
    num_rows: usize,
}

impl SparseMatrix {
    /// Builds the matrix from `rows`, each listing the columns it covers.
    ///
    /// Rows keep their input position as their row id. Empty rows get no nodes
    /// and can therefore never be part of a solution.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `cols` is zero.
    /// - [`Error::ColumnOutOfRange`] if a row names a column `>= cols`.
    /// - [`Error::DuplicateColumn`] if a row names a column twice.
    pub fn new<R: AsRef<[usize]>>(rows: &[R], cols: usize) -> Result<Self> {
        if cols == 0 {
            return Err(Error::InvalidInput(
                "an exact cover problem needs at least one column".to_string(),
            ));
        }

        // Validate everything before linking anything.
        let mut last_seen = vec![usize::MAX; cols];
        let mut data_nodes = 0;
        for (r, row) in rows.iter().enumerate() {
            for &c in row.as_ref() {
                if c >= cols {
                    return Err(Error::ColumnOutOfRange {
                        row: r,
                        column: c,
                        cols,
                    });
                }
                if last_seen[c] == r {
                    return Err(Error::DuplicateColumn { row: r, column: c });
                }
                last_seen[c] = r;
            }
            data_nodes += row.as_ref().len();
        }

        let root = cols;
        let mut nodes = Vec::with_capacity(data_nodes + cols + 1);

        // Column headers and root share one horizontal ring.
        for i in 0..=cols {
            nodes.push(Node {
                left: if i == 0 { cols } else { i - 1 },
                right: if i == cols { 0 } else { i + 1 },
                up: i,
                down: i,
                column: i,
                row: None,
            });
        }

        let mut sizes = vec![0; cols];
        // Bottom-most node of each column so far.
        let mut bottom: Vec<usize> = (0..cols).collect();

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.is_empty() {
                continue;
            }
            let first = nodes.len();
            let last = first + row.len() - 1;
            for (k, &c) in row.iter().enumerate() {
                let n = first + k;
                nodes.push(Node {
                    left: if n == first { last } else { n - 1 },
                    right: if n == last { first } else { n + 1 },
                    up: bottom[c],
                    down: c,
                    column: c,
                    row: Some(r),
                });
                nodes[bottom[c]].down = n;
                bottom[c] = n;
                sizes[c] += 1;
            }
        }

        // Close each column into a circle.
        for (c, &b) in bottom.iter().enumerate() {
            nodes[c].up = b;
        }

        debug!(
            "built dancing links matrix: {} rows, {} columns, {} nodes",
            rows.len(),
            cols,
            nodes.len()
        );

        Ok(SparseMatrix {
            nodes,
            sizes,
            root,
            num_rows: rows.len(),
        })
    }

    /// Builds the matrix from a dense boolean matrix:
    /// `matrix[r][c] = true` means row `r` covers column `c`.
    ///
    /// The column count is taken from the first row; every row must have the
    /// same length.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `matrix` has no rows, if its rows have no
    /// entries, or if any row's length differs from the first row's.
    pub fn from_bool_matrix(matrix: &[Vec<bool>]) -> Result<Self> {
        let cols = match matrix.first() {
            Some(first) => first.len(),
            None => {
                return Err(Error::InvalidInput(
                    "a boolean matrix needs at least one row to fix its width".to_string(),
                ))
            }
        };
        let mut rows = Vec::with_capacity(matrix.len());
        for (r, bits) in matrix.iter().enumerate() {
            if bits.len() != cols {
                return Err(Error::InvalidInput(format!(
                    "row {} has {} entries, expected {}",
                    r,
                    bits.len(),
                    cols
                )));
            }
            let row: Vec<usize> = bits
                .iter()
                .enumerate()
                .filter_map(|(c, &set)| if set { Some(c) } else { None })
                .collect();
            rows.push(row);
        }
        Self::new(&rows, cols)
    }

    #[inline]
    pub fn left(&self, n: usize) -> usize {
        self.nodes[n].left
    }

    #[inline]
    pub fn right(&self, n: usize) -> usize {
        self.nodes[n].right
    }

    #[inline]
    pub fn up(&self, n: usize) -> usize {
        self.nodes[n].up
    }

    #[inline]
    pub fn down(&self, n: usize) -> usize {
        self.nodes[n].down
    }

    /// Input row of node `n`, or `None` for a column header or the root.
    #[inline]
    pub fn row(&self, n: usize) -> Option<usize> {
        self.nodes[n].row
    }

    /// Header of the column owning node `n`. Headers and the root are their own.
    #[inline]
    pub fn column_header_of(&self, n: usize) -> usize {
        self.nodes[n].column
    }

    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Number of nodes currently linked into the column of `header`.
    ///
    /// # Panics
    ///
    /// If `header` is not a column header.
    #[inline]
    pub fn size(&self, header: usize) -> usize {
        self.sizes[header]
    }

    pub fn num_columns(&self) -> usize {
        self.sizes.len()
    }

    /// Number of input rows, empty rows included.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Total nodes: one per row membership, one per column header, one root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_column_header(&self, n: usize) -> bool {
        n < self.root
    }

    /// True once every column header has been unlinked from the root's list.
    pub fn is_fully_covered(&self) -> bool {
        self.right(self.root) == self.root
    }

    /// Returns the linked column header with the fewest live nodes, the leftmost
    /// one on ties, or the root if no header is linked.
    pub fn select_min_column(&self) -> usize {
        let mut c = self.right(self.root);
        let mut best = c;
        while c != self.root {
            if self.sizes[c] < self.sizes[best] {
                best = c;
            }
            if self.sizes[best] == 0 {
                break; // nothing beats an empty column
            }
            c = self.right(c);
        }
        best
    }

    /// Unlinks `n` from its column, leaving `n`'s own links as they are.
    #[inline]
    pub fn remove_vertically(&mut self, n: usize) {
        let Node {
            up, down, column, ..
        } = self.nodes[n];
        self.nodes[down].up = up;
        self.nodes[up].down = down;
        self.sizes[column] -= 1;
    }

    /// Relinks `n` into its column. Inverse of [`remove_vertically`](Self::remove_vertically).
    #[inline]
    pub fn insert_vertically(&mut self, n: usize) {
        let Node {
            up, down, column, ..
        } = self.nodes[n];
        self.nodes[down].up = n;
        self.nodes[up].down = n;
        self.sizes[column] += 1;
    }

    /// Unlinks `n` from its horizontal list, leaving `n`'s own links as they are.
    #[inline]
    pub fn remove_horizontally(&mut self, n: usize) {
        let Node { left, right, .. } = self.nodes[n];
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Relinks `n` into its horizontal list. Inverse of
    /// [`remove_horizontally`](Self::remove_horizontally).
    #[inline]
    pub fn insert_horizontally(&mut self, n: usize) {
        let Node { left, right, .. } = self.nodes[n];
        self.nodes[left].right = n;
        self.nodes[right].left = n;
    }

    /// Verifies the structural invariants of the matrix:
    ///
    /// - the root's horizontal list of linked headers is circular and
    ///   doubly linked;
    /// - every column's vertical list is circular and doubly linked, holds only
    ///   nodes of that column, and has exactly `size(header)` data nodes;
    /// - every row's horizontal list is circular and doubly linked and holds
    ///   only nodes of that row.
    ///
    /// Only meaningful between mutations; a half-finished cover fails it.
    pub fn check_links(&self) -> bool {
        let limit = self.nodes.len();

        // Header ring.
        let mut n = self.root;
        let mut steps = 0;
        loop {
            let r = self.right(n);
            if self.left(r) != n || (r != self.root && !self.is_column_header(r)) {
                return false;
            }
            n = r;
            steps += 1;
            if n == self.root {
                break;
            }
            if steps > limit {
                return false;
            }
        }

        // Column rings.
        for header in 0..self.num_columns() {
            let mut n = header;
            let mut count = 0;
            loop {
                let d = self.down(n);
                if self.up(d) != n || self.column_header_of(d) != header {
                    return false;
                }
                n = d;
                if n == header {
                    break;
                }
                count += 1;
                if count > limit {
                    return false;
                }
            }
            if count != self.sizes[header] {
                return false;
            }
        }

        // Row rings are never touched by the search, so they must always hold.
        for n in self.root + 1..self.nodes.len() {
            let r = self.right(n);
            if self.left(r) != n || self.row(r) != self.row(n) {
                return false;
            }
        }

        true
    }
}
