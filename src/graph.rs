use super::{EdgeWeight, Result, WeightMatrix};
use ndarray::Array2;
use petgraph::Directed;
use petgraph::Graph as PetGraph;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Builds a [`WeightMatrix`] from nodes addressed by arbitrary ids and from
/// weighted directed edges between them.
///
/// Nodes get consecutive indices in order of first appearance. Parallel edges
/// accumulate their weights; ordered pairs without an edge receive the absent
/// weight (0.0 unless configured otherwise).
#[derive(Debug)]
pub struct GraphBuilder {
    // maps node_id to node index in the resulting matrix.
    node_map: BTreeMap<usize, usize>,
    edges: Vec<(usize, usize, EdgeWeight)>,
    absent_weight: EdgeWeight,
}

impl GraphBuilder {
    pub fn new() -> GraphBuilder {
        GraphBuilder::with_absent_weight(0.0)
    }

    pub fn with_absent_weight(absent_weight: EdgeWeight) -> GraphBuilder {
        GraphBuilder {
            node_map: BTreeMap::new(),
            edges: Vec::new(),
            absent_weight,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.node_map.len()
    }

    /// Validates and returns the finished weight matrix.
    pub fn graph(self) -> Result<WeightMatrix> {
        let n = self.node_map.len();
        let mut weights: Array2<Option<EdgeWeight>> = Array2::from_elem((n, n), None);
        for (source, target, weight) in self.edges {
            let cell = &mut weights[(source, target)];
            *cell = Some(cell.unwrap_or(0.0) + weight);
        }
        let absent_weight = self.absent_weight;
        WeightMatrix::new(weights.mapv(|w| w.unwrap_or(absent_weight)))
    }

    /// Adds a new node and returns its index. Panics if `node_id` is already known.
    pub fn add_node(&mut self, node_id: usize) -> usize {
        let next_id = self.node_map.len();
        match self.node_map.entry(node_id) {
            Entry::Vacant(e) => {
                e.insert(next_id);
                next_id
            }
            Entry::Occupied(_) => {
                panic!("duplicate node id {}", node_id);
            }
        }
    }

    // returns node index
    pub fn add_or_get_node(&mut self, node_id: usize) -> usize {
        let next_id = self.node_map.len();
        *self.node_map.entry(node_id).or_insert(next_id)
    }

    pub fn add_edge(&mut self, source_node_id: usize, target_node_id: usize, weight: EdgeWeight) {
        let source_index = self.add_or_get_node(source_node_id);
        let target_index = self.add_or_get_node(target_node_id);
        self.edges.push((source_index, target_index, weight));
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a weight matrix from a directed `petgraph` graph. Node `i` of the
/// matrix is the node with index `i`; see [`GraphBuilder`] for the treatment
/// of parallel and absent edges.
pub fn from_petgraph<N>(
    pg: &PetGraph<N, EdgeWeight, Directed>,
    absent_weight: EdgeWeight,
) -> Result<WeightMatrix> {
    let mut builder = GraphBuilder::with_absent_weight(absent_weight);
    for i in pg.node_indices() {
        builder.add_node(i.index());
    }
    for edge in pg.raw_edges() {
        builder.add_edge(edge.source().index(), edge.target().index(), edge.weight);
    }
    builder.graph()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, WeightedGraph};
    use ndarray::array;

    #[test]
    fn test_builder() {
        let mut b = GraphBuilder::with_absent_weight(1.0);
        b.add_node(10);
        b.add_node(20);
        b.add_edge(10, 20, 4.0);
        b.add_edge(20, 20, 2.0);
        let w = b.graph().unwrap();
        assert_eq!(&array![[1.0, 4.0], [1.0, 2.0]], w.as_array());
    }

    #[test]
    fn test_builder_edges_create_nodes() {
        let mut b = GraphBuilder::new();
        b.add_edge(7, 3, 5.0);
        assert_eq!(2, b.num_nodes());
        let w = b.graph().unwrap();
        assert_eq!(5.0, w[(0, 1)]);
        assert_eq!(0.0, w[(1, 0)]);
    }

    #[test]
    fn test_parallel_edges_accumulate() {
        let mut b = GraphBuilder::new();
        b.add_edge(0, 1, 1.5);
        b.add_edge(0, 1, 2.5);
        assert_eq!(4.0, b.graph().unwrap()[(0, 1)]);
    }

    #[test]
    #[should_panic]
    fn test_duplicate_node() {
        let mut b = GraphBuilder::new();
        b.add_node(1);
        b.add_node(1);
    }

    #[test]
    fn test_empty_graph() {
        assert!(matches!(GraphBuilder::new().graph(), Err(Error::Empty)));
    }

    #[test]
    fn test_petgraph_roundtrip() {
        let w = WeightMatrix::new(array![[2.0, 4.0, 8.0], [5.0, 6.0, 3.0], [10.0, 3.0, 6.0]])
            .unwrap();
        assert_eq!(w, from_petgraph(&w.to_petgraph(), 0.0).unwrap());
    }

    #[test]
    fn test_from_sparse_petgraph() {
        let mut pg = PetGraph::<&str, f64, Directed>::new();
        let a = pg.add_node("a");
        let b = pg.add_node("b");
        pg.add_edge(a, b, 3.0);
        let w = from_petgraph(&pg, 0.5).unwrap();
        assert_eq!(&array![[0.5, 3.0], [0.5, 0.5]], w.as_array());
    }
}
