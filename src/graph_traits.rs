//! Traits that represent an abstract weighted graph upon which our algorithm operates.

use petgraph::{graph::NodeIndex, Directed, Graph as PetGraph};

/// The weight of an edge.
pub type EdgeWeight = f64;

/// Abstract representation of a complete weighted graph. Used by the algorithm.
///
/// Every ordered pair of nodes carries a weight, including the self-weight of
/// a node on the diagonal. Weights are not assumed to be symmetric.
pub trait WeightedGraph {
    fn num_nodes(&self) -> usize;

    /// Returns the weight of the relation from node `i` to node `j`.
    fn weight(&self, i: usize, j: usize) -> EdgeWeight;

    /// Converts into a complete directed `petgraph` graph with one edge per
    /// ordered pair of nodes (self-loops included).
    fn to_petgraph(&self) -> PetGraph<(), EdgeWeight, Directed> {
        let n = self.num_nodes();
        let mut graph = PetGraph::with_capacity(n, n * n);
        for i in 0..n {
            let idx = graph.add_node(());
            assert!(idx.index() == i);
        }
        for i in 0..n {
            for j in 0..n {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), self.weight(i, j));
            }
        }
        graph
    }
}
