use crate::{EdgeWeight, Error, Result, WeightedGraph};
use ndarray::Array2;
use std::ops::Index;

/// A square matrix of edge weights describing one weighted graph.
///
/// Entry `(i, j)` is the weight of the relation from node `i` to node `j`.
/// The matrix is not assumed to be symmetric. Every entry is finite; zero and
/// negative entries are accepted here but fail any distortion computation
/// that divides by them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    weights: Array2<EdgeWeight>,
}

impl WeightMatrix {
    pub fn new(weights: Array2<EdgeWeight>) -> Result<WeightMatrix> {
        let (rows, cols) = weights.dim();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Err(Error::Empty);
        }
        if let Some(((row, col), &value)) = weights.indexed_iter().find(|(_, w)| !w.is_finite()) {
            return Err(Error::NonFiniteWeight { row, col, value });
        }
        Ok(WeightMatrix { weights })
    }

    /// Builds a matrix from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<EdgeWeight>>) -> Result<WeightMatrix> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(Error::RaggedRows {
                row,
                len: r.len(),
                expected: ncols,
            });
        }
        let flat: Vec<EdgeWeight> = rows.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((nrows, ncols), flat).map_err(|_| Error::NotSquare {
            rows: nrows,
            cols: ncols,
        })?;
        WeightMatrix::new(weights)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.weights.nrows()
    }

    pub fn as_array(&self) -> &Array2<EdgeWeight> {
        &self.weights
    }

    pub fn into_inner(self) -> Array2<EdgeWeight> {
        self.weights
    }

    /// Relabels the nodes: node `i` of the result is node `order[i]` of `self`.
    ///
    /// Fails with [`Error::NotAPermutation`] unless `order` lists every node
    /// exactly once.
    pub fn permuted(&self, order: &[usize]) -> Result<WeightMatrix> {
        let n = self.len();
        let mut seen = vec![false; n];
        let is_permutation = order.len() == n
            && order
                .iter()
                .all(|&p| p < n && !std::mem::replace(&mut seen[p], true));
        if !is_permutation {
            return Err(Error::NotAPermutation {
                order: order.to_vec(),
                nodes: n,
            });
        }
        Ok(WeightMatrix {
            weights: Array2::from_shape_fn((n, n), |(i, j)| self.weights[(order[i], order[j])]),
        })
    }
}

impl Index<(usize, usize)> for WeightMatrix {
    type Output = EdgeWeight;

    #[inline]
    fn index(&self, idx: (usize, usize)) -> &EdgeWeight {
        &self.weights[idx]
    }
}

impl WeightedGraph for WeightMatrix {
    #[inline]
    fn num_nodes(&self) -> usize {
        self.len()
    }

    #[inline]
    fn weight(&self, i: usize, j: usize) -> EdgeWeight {
        self.weights[(i, j)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use ndarray::array;

    #[test]
    fn test_new() {
        let w = WeightMatrix::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(2, w.len());
        assert_eq!(3.0, w[(1, 0)]);
        assert_eq!(2.0, w.weight(0, 1));
    }

    #[test]
    fn test_not_square() {
        let err = WeightMatrix::new(array![[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]]).unwrap_err();
        assert_eq!(ErrorKind::InvalidDimension, err.kind());

        let err = WeightMatrix::from_rows(vec![vec![1.0, 2.0]]).unwrap_err();
        assert_eq!(ErrorKind::InvalidDimension, err.kind());
    }

    #[test]
    fn test_empty() {
        let err = WeightMatrix::from_rows(vec![]).unwrap_err();
        assert!(matches!(err, Error::Empty));
    }

    #[test]
    fn test_ragged() {
        let err = WeightMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_non_finite() {
        let err = WeightMatrix::new(array![[1.0, std::f64::NAN], [3.0, 4.0]]).unwrap_err();
        assert_eq!(ErrorKind::Numeric, err.kind());
        assert!(matches!(err, Error::NonFiniteWeight { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_zero_weights_accepted() {
        let w = WeightMatrix::from_rows(vec![vec![0.0, -1.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(-1.0, w[(0, 1)]);
    }

    #[test]
    fn test_permuted() {
        let w = WeightMatrix::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]])
            .unwrap();
        let p = w.permuted(&[2, 0, 1]).unwrap();
        assert_eq!(&array![[9.0, 7.0, 8.0], [3.0, 1.0, 2.0], [6.0, 4.0, 5.0]], p.as_array());
    }

    #[test]
    fn test_permuted_rejects_non_permutations() {
        let w = WeightMatrix::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        for order in &[vec![0usize, 0], vec![0], vec![0, 1, 2], vec![1, 2]] {
            let err = w.permuted(order).unwrap_err();
            assert_eq!(ErrorKind::InvalidDimension, err.kind());
            assert!(matches!(err, Error::NotAPermutation { nodes: 2, .. }));
        }
    }

    #[test]
    fn test_to_petgraph() {
        let w = WeightMatrix::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let g = w.to_petgraph();
        assert_eq!(2, g.node_count());
        assert_eq!(4, g.edge_count());
        let weights: Vec<f64> = g.raw_edges().iter().map(|e| e.weight).collect();
        assert_eq!(vec![1.0, 2.0, 3.0, 4.0], weights);
    }
}
