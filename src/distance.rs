//! The network distance: the natural logarithm of the smallest distortion over
//! all correspondences between two graphs.
//!
//! The search is exhaustive. Graphs of `r` and `c` nodes have `2^(r * c)`
//! candidate correspondences, so [`DistanceConfig::max_cells`] bounds `r * c`
//! before any work starts and an optional timeout stops a search that runs
//! too long.

use crate::{log_distortion, Correspondence, Correspondences, Error, Result, WeightedGraph};
use approx::relative_eq;
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default bound on `r * c`.
pub const DEFAULT_MAX_CELLS: usize = 20;

/// Relative tolerance of [`NetworkDistance::is_perfect_match`].
pub const PERFECT_MATCH_TOLERANCE: f64 = 1e-12;

// log2 of the number of candidates per parallel work item.
const BLOCK_BITS: usize = 12;

const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Parameters of the distance search.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceConfig {
    /// Largest accepted `r * c`. Searches above [`crate::MAX_CELLS`] are
    /// refused regardless.
    pub max_cells: usize,

    /// Give up once the search has run this long.
    pub timeout: Option<Duration>,

    /// Evaluate blocks of candidates on the rayon thread pool.
    pub parallel: bool,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        DistanceConfig {
            max_cells: DEFAULT_MAX_CELLS,
            timeout: None,
            parallel: false,
        }
    }
}

/// Result of a distance search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkDistance {
    /// Natural logarithm of the smallest distortion. Always finite.
    pub distance: f64,

    /// Smallest distortion over all correspondences, `e^distance`. May be
    /// infinite when the log distortion exceeds the range of `f64`.
    pub distortion: f64,

    /// The first correspondence in enumeration order attaining `distortion`.
    pub correspondence: Correspondence,

    /// Number of correspondences evaluated.
    pub evaluated: u64,
}

impl NetworkDistance {
    /// True if some correspondence matches the two graphs exactly after
    /// rescaling (distortion 1, distance 0).
    pub fn is_perfect_match(&self) -> bool {
        relative_eq!(self.distortion, 1.0, max_relative = PERFECT_MATCH_TOLERANCE)
    }
}

#[derive(Debug)]
struct Best {
    block: u64,
    log_distortion: f64,
    correspondence: Correspondence,
}

#[derive(Debug, Default)]
struct Search {
    best: Option<Best>,
    evaluated: u64,
}

impl Search {
    /// Keeps the smaller distortion; on ties the earlier block wins.
    fn merge(self, other: Search) -> Search {
        let best = match (self.best, other.best) {
            (Some(l), Some(r)) => {
                if r.log_distortion < l.log_distortion
                    || (r.log_distortion == l.log_distortion && r.block < l.block)
                {
                    Some(r)
                } else {
                    Some(l)
                }
            }
            (l, r) => l.or(r),
        };
        Search {
            best,
            evaluated: self.evaluated + other.evaluated,
        }
    }

    fn finish(self) -> Result<NetworkDistance> {
        // the all-ones relation is a candidate of every search
        let best = self.best.ok_or(Error::Empty)?;
        let distance = best.log_distortion;
        let distortion = distance.exp();
        debug!(
            distance,
            distortion,
            evaluated = self.evaluated,
            "network distance"
        );
        Ok(NetworkDistance {
            distance,
            distortion,
            correspondence: best.correspondence,
            evaluated: self.evaluated,
        })
    }
}

fn evaluate<A, B>(
    a: &A,
    b: &B,
    candidates: Correspondences,
    block: u64,
    deadline: Option<Instant>,
) -> Result<Search>
where
    A: WeightedGraph,
    B: WeightedGraph,
{
    let mut search = Search::default();
    for corr in candidates {
        if let Some(deadline) = deadline {
            if search.evaluated % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded {
                    evaluated: search.evaluated,
                });
            }
        }
        let log_dis = log_distortion(a, b, &corr)?;
        search.evaluated += 1;
        if search
            .best
            .as_ref()
            .map_or(true, |best| log_dis < best.log_distortion)
        {
            trace!(log_distortion = log_dis, block, "improved");
            search.best = Some(Best {
                block,
                log_distortion: log_dis,
                correspondence: corr,
            });
        }
    }
    Ok(search)
}

impl DistanceConfig {
    pub fn new() -> DistanceConfig {
        DistanceConfig::default()
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> DistanceConfig {
        self.max_cells = max_cells;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> DistanceConfig {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> DistanceConfig {
        self.parallel = parallel;
        self
    }

    /// Searches all correspondences between `a` and `b` for the smallest
    /// distortion.
    ///
    /// Fails fast with the first error met: dimension errors before the
    /// search, numeric errors from any correspondence, and resource errors
    /// when `r * c` exceeds [`DistanceConfig::max_cells`] or the timeout
    /// passes. The sequential and the parallel search return identical
    /// results.
    pub fn network_distance<A, B>(&self, a: &A, b: &B) -> Result<NetworkDistance>
    where
        A: WeightedGraph + Sync,
        B: WeightedGraph + Sync,
    {
        let (rows, cols) = (a.num_nodes(), b.num_nodes());
        if rows == 0 || cols == 0 {
            return Err(Error::Empty);
        }
        let cells = match rows.checked_mul(cols) {
            Some(cells) if cells <= self.max_cells => cells,
            cells => {
                return Err(Error::TooManyCells {
                    cells: cells.unwrap_or(usize::MAX),
                    limit: self.max_cells,
                })
            }
        };
        let all = Correspondences::new(rows, cols)?;
        let candidates = all.candidates();
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        debug!(
            rows,
            cols,
            candidates,
            parallel = self.parallel,
            "enumerating correspondences"
        );

        let search = if self.parallel {
            let block_len = 1u64 << BLOCK_BITS.min(cells);
            let blocks = candidates / block_len;
            (0..blocks)
                .into_par_iter()
                .map(|block| {
                    let range = block * block_len..(block + 1) * block_len;
                    let candidates = Correspondences::with_range(rows, cols, range)?;
                    evaluate(a, b, candidates, block, deadline)
                })
                .try_reduce(Search::default, |l, r| Ok(l.merge(r)))?
        } else {
            evaluate(a, b, all, 0, deadline)?
        };
        search.finish()
    }
}

/// The network distance between `a` and `b` under the default
/// [`DistanceConfig`].
pub fn distance<A, B>(a: &A, b: &B) -> Result<f64>
where
    A: WeightedGraph + Sync,
    B: WeightedGraph + Sync,
{
    DistanceConfig::default()
        .network_distance(a, b)
        .map(|d| d.distance)
}
