//! Distortion of a single correspondence.
//!
//! For every ordered pair of related cells `((x1, y1), (x2, y2))` the ratio
//! `wx(x1, x2) / wy(y1, y2)` compares the corresponding edge weights of the two
//! graphs. The smallest ratio is the rescaling factor that makes the two
//! weight systems most comparable; the distortion is the largest ratio after
//! dividing by it, so it is never below 1.
//!
//! Ratios are compared as differences of logarithms.

use crate::{Correspondence, EdgeWeight, Error, Result, WeightedGraph};

/// An ordered pair of related cells of a correspondence, drawn with
/// repetition (both positions may be the same cell).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RelatedPair {
    /// Row-major linear positions of the two cells.
    pub positions: (usize, usize),
    /// Nodes `(x1, x2)` of the first graph.
    pub x: (usize, usize),
    /// Nodes `(y1, y2)` of the second graph.
    pub y: (usize, usize),
}

/// All ordered pairs of related cells of `corr`, ordered by first position,
/// then by second.
pub fn related_pairs(corr: &Correspondence) -> impl Iterator<Item = RelatedPair> + '_ {
    let positions: Vec<usize> = corr.positions().collect();
    let k = positions.len();
    (0..k * k).map(move |i| {
        let (z1, z2) = (positions[i / k], positions[i % k]);
        let (x1, y1) = corr.decode(z1);
        let (x2, y2) = corr.decode(z2);
        RelatedPair {
            positions: (z1, z2),
            x: (x1, x2),
            y: (y1, y2),
        }
    })
}

fn check_shape<A, B>(a: &A, b: &B, corr: &Correspondence) -> Result<()>
where
    A: WeightedGraph,
    B: WeightedGraph,
{
    let expected = (a.num_nodes(), b.num_nodes());
    if corr.shape() != expected {
        return Err(Error::CorrespondenceShape {
            expected,
            got: corr.shape(),
        });
    }
    Ok(())
}

/// Smallest and largest log weight ratio over all related pairs.
///
/// Ratios of finite positive weights can leave the range of `f64` (`1e300 /
/// 1e-300`), their logarithms cannot. Every denominator is checked before a
/// non-positive numerator is reported.
fn log_ratio_range<A, B>(a: &A, b: &B, corr: &Correspondence) -> Result<(f64, f64)>
where
    A: WeightedGraph,
    B: WeightedGraph,
{
    check_shape(a, b, corr)?;
    let mut min = std::f64::INFINITY;
    let mut max = std::f64::NEG_INFINITY;
    let mut non_positive: Option<EdgeWeight> = None;
    for pair in related_pairs(corr) {
        let (y1, y2) = pair.y;
        let denominator = b.weight(y1, y2);
        if !(denominator > 0.0) {
            return Err(Error::NonPositiveWeight {
                row: y1,
                col: y2,
                value: denominator,
            });
        }
        let numerator = a.weight(pair.x.0, pair.x.1);
        if !(numerator > 0.0) {
            let ratio = numerator / denominator;
            non_positive = Some(non_positive.map_or(ratio, |r| r.min(ratio)));
            continue;
        }
        let c = numerator.ln() - denominator.ln();
        min = min.min(c);
        max = max.max(c);
    }
    if let Some(ratio) = non_positive {
        return Err(Error::NonPositiveScale(ratio));
    }
    Ok((min, max))
}

/// The optimal rescaling factor of `corr`: the smallest weight ratio over all
/// related pairs.
///
/// Fails with [`Error::ScaleOutOfRange`] if that ratio does not fit an `f64`.
pub fn scale<A, B>(a: &A, b: &B, corr: &Correspondence) -> Result<EdgeWeight>
where
    A: WeightedGraph,
    B: WeightedGraph,
{
    let (min, _) = log_ratio_range(a, b, corr)?;
    let c = min.exp();
    if c == 0.0 || !c.is_finite() {
        return Err(Error::ScaleOutOfRange { log_scale: min });
    }
    Ok(c)
}

/// The natural logarithm of the distortion of `corr`, computed from log
/// weight ratios. Finite and non-negative whenever it succeeds.
pub fn log_distortion<A, B>(a: &A, b: &B, corr: &Correspondence) -> Result<f64>
where
    A: WeightedGraph,
    B: WeightedGraph,
{
    let (min, max) = log_ratio_range(a, b, corr)?;
    // the pair attaining `min` normalizes to exactly 0
    let log_dis = max - min;
    debug_assert!(log_dis >= 0.0);
    Ok(log_dis)
}

/// The distortion of `corr` between graphs `a` and `b`.
///
/// Fails with [`Error::CorrespondenceShape`] unless `corr` is
/// `a.num_nodes() x b.num_nodes()`, with [`Error::NonPositiveWeight`] if a
/// related weight of `b` is not positive, and with
/// [`Error::NonPositiveScale`] if a related weight of `a` is not positive.
/// Extreme weight ranges can push the distortion to infinity; use
/// [`log_distortion`] to stay finite.
pub fn distortion<A, B>(a: &A, b: &B, corr: &Correspondence) -> Result<EdgeWeight>
where
    A: WeightedGraph,
    B: WeightedGraph,
{
    log_distortion(a, b, corr).map(f64::exp)
}
