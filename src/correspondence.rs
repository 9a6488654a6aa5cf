//! Correspondences between the node sets of two graphs and their exhaustive
//! enumeration.
//!
//! A correspondence between graphs of `r` and `c` nodes is an `r x c` binary
//! relation in which every node of either graph is related to at least one
//! node of the other. Cells are addressed by their row-major linear position
//! `z = x * c + y`, which decodes back to `(z / c, z % c)`.
//!
//! Enumeration walks all `2^(r * c)` candidate relations and is therefore
//! exponential in the product of the node counts. It refuses more than
//! [`MAX_CELLS`] cells outright and is practically usable only up to about
//! 20 to 25 cells.

use crate::{Error, Result};
use ndarray::Array2;
use serde::{Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

/// Hard ceiling on `r * c` for [`Correspondences`].
pub const MAX_CELLS: usize = 32;

/// A total relation between the nodes of graph X (rows) and graph Y (columns).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Correspondence {
    relation: Array2<bool>,
}

impl Correspondence {
    /// Fails unless every row and every column relates at least one node.
    pub fn new(relation: Array2<bool>) -> Result<Correspondence> {
        let (rows, cols) = relation.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::Empty);
        }
        if let Some(x) = (0..rows).find(|&x| !relation.row(x).iter().any(|&r| r)) {
            return Err(Error::UncoveredRow(x));
        }
        if let Some(y) = (0..cols).find(|&y| !relation.column(y).iter().any(|&r| r)) {
            return Err(Error::UncoveredColumn(y));
        }
        Ok(Correspondence { relation })
    }

    /// Builds a correspondence from rows of 0/1 entries; any nonzero entry
    /// relates the two nodes.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Correspondence> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != ncols)
        {
            return Err(Error::RaggedRows {
                row,
                len: r.as_ref().len(),
                expected: ncols,
            });
        }
        Correspondence::new(Array2::from_shape_fn((nrows, ncols), |(x, y)| {
            rows[x].as_ref()[y] != 0
        }))
    }

    /// Relates node `i` of X with node `i` of Y.
    pub fn identity(n: usize) -> Result<Correspondence> {
        Correspondence::new(Array2::from_shape_fn((n, n), |(x, y)| x == y))
    }

    /// Relates every node of X with every node of Y.
    pub fn full(rows: usize, cols: usize) -> Result<Correspondence> {
        Correspondence::new(Array2::from_elem((rows, cols), true))
    }

    pub fn shape(&self) -> (usize, usize) {
        self.relation.dim()
    }

    pub fn relation(&self) -> &Array2<bool> {
        &self.relation
    }

    #[inline]
    pub fn is_related(&self, x: usize, y: usize) -> bool {
        self.relation[(x, y)]
    }

    /// Number of related node pairs.
    pub fn num_related(&self) -> usize {
        self.relation.iter().filter(|&&r| r).count()
    }

    /// Row-major linear positions of the related cells, in increasing order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.relation
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r)
            .map(|(z, _)| z)
    }

    /// Decodes a row-major linear position into `(x, y)`.
    #[inline]
    pub fn decode(&self, z: usize) -> (usize, usize) {
        let cols = self.relation.ncols();
        (z / cols, z % cols)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.relation
            .outer_iter()
            .map(|row| row.iter().map(|&r| r as u8).collect())
            .collect()
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (x, row) in self.relation.outer_iter().enumerate() {
            if x > 0 {
                writeln!(f)?;
            }
            for (y, &r) in row.iter().enumerate() {
                if y > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", r as u8)?;
            }
        }
        Ok(())
    }
}

impl Serialize for Correspondence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Lazy enumeration of all correspondences between `rows` and `cols` nodes.
///
/// Candidate `k` in `0..2^(rows * cols)` fills linear position `z` with bit
/// `rows * cols - 1 - z` of `k` (most significant bit first). Candidates are
/// visited in increasing `k` and only those covering every row and column
/// are yielded, so the all-ones relation always comes last.
#[derive(Debug, Clone)]
pub struct Correspondences {
    rows: usize,
    cols: usize,
    row_masks: Vec<u64>,
    col_masks: Vec<u64>,
    next: u64,
    end: u64,
}

impl Correspondences {
    pub fn new(rows: usize, cols: usize) -> Result<Correspondences> {
        Correspondences::with_range(rows, cols, 0..u64::MAX)
    }

    /// Enumerates only the candidates with index in `range` (clamped to the
    /// candidate count).
    pub fn with_range(rows: usize, cols: usize, range: Range<u64>) -> Result<Correspondences> {
        if rows == 0 || cols == 0 {
            return Err(Error::Empty);
        }
        let cells = match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_CELLS => cells,
            cells => {
                return Err(Error::TooManyCells {
                    cells: cells.unwrap_or(usize::MAX),
                    limit: MAX_CELLS,
                })
            }
        };
        let bit = |x: usize, y: usize| 1u64 << (cells - 1 - (x * cols + y));
        let row_masks = (0..rows)
            .map(|x| (0..cols).fold(0, |m, y| m | bit(x, y)))
            .collect();
        let col_masks = (0..cols)
            .map(|y| (0..rows).fold(0, |m, x| m | bit(x, y)))
            .collect();
        let candidates = 1u64 << cells;
        Ok(Correspondences {
            rows,
            cols,
            row_masks,
            col_masks,
            next: range.start.min(candidates),
            end: range.end.min(candidates),
        })
    }

    /// Total number of candidate relations, `2^(rows * cols)`.
    pub fn candidates(&self) -> u64 {
        1u64 << (self.rows * self.cols)
    }

    #[inline]
    fn covers(&self, k: u64) -> bool {
        self.row_masks.iter().all(|&m| k & m != 0) && self.col_masks.iter().all(|&m| k & m != 0)
    }

    fn decode(&self, k: u64) -> Correspondence {
        let cells = self.rows * self.cols;
        let relation = Array2::from_shape_fn((self.rows, self.cols), |(x, y)| {
            (k >> (cells - 1 - (x * self.cols + y))) & 1 == 1
        });
        Correspondence { relation }
    }
}

impl Iterator for Correspondences {
    type Item = Correspondence;

    fn next(&mut self) -> Option<Correspondence> {
        while self.next < self.end {
            let k = self.next;
            self.next += 1;
            if self.covers(k) {
                return Some(self.decode(k));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (0, usize::try_from(remaining).ok())
    }
}

impl FusedIterator for Correspondences {}

/// Lazily enumerates every correspondence between `rows` and `cols` nodes.
pub fn correspondences(rows: usize, cols: usize) -> Result<Correspondences> {
    Correspondences::new(rows, cols)
}

/// Collects every correspondence between `rows` and `cols` nodes.
pub fn enumerate(rows: usize, cols: usize) -> Result<Vec<Correspondence>> {
    Ok(correspondences(rows, cols)?.collect())
}
