//! A network distance between weighted graphs, a discrete analogue of the
//! Gromov-Hausdorff distance.
//!
//! Each graph is a square matrix of positive edge weights ([`WeightMatrix`]);
//! the two graphs may have different node counts. A [`Correspondence`]
//! relates every node of either graph to at least one node of the other. Its
//! [`distortion`] is the worst multiplicative mismatch between related edge
//! weights after the best uniform rescaling, and the network [`distance`] is
//! the logarithm of the smallest distortion over all correspondences. A
//! distance of 0 means the graphs match exactly after rescaling.
//!
//! The search is exhaustive over `2^(r * c)` candidate relations for graphs
//! of `r` and `c` nodes. It is only practical for `r * c` up to about 20 to
//! 25; see [`DistanceConfig`] and [`MAX_CELLS`] for the limits.
//!
//! ```
//! use network_distance::{distance, WeightMatrix};
//!
//! let x = WeightMatrix::from_rows(vec![vec![2.0, 4.0], vec![5.0, 6.0]])?;
//! let y = WeightMatrix::from_rows(vec![vec![4.0, 8.0], vec![10.0, 12.0]])?;
//! assert_eq!(0.0, distance(&x, &x)?);
//! assert!(distance(&x, &y)?.abs() < 1e-12);
//! # Ok::<(), network_distance::Error>(())
//! ```

pub mod graph;
pub mod input;
mod correspondence;
mod distance;
mod distortion;
mod error;
mod graph_traits;
mod weight_matrix;

pub use graph::GraphBuilder;
pub use {
    correspondence::*, distance::*, distortion::*, error::*, graph_traits::*, weight_matrix::*,
};
