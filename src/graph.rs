//! Minimal graph adapter traits.
//!
//! These are the ingestion seam: anything that can list a node's out-neighbors can be
//! turned into a [`SparseGraph`](crate::SparseGraph) via
//! [`SparseGraph::from_graph`](crate::SparseGraph::from_graph).

pub trait Graph {
    fn node_count(&self) -> usize;
    fn neighbors(&self, node: usize) -> Vec<usize>;
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }
}

/// Row-major dense adjacency. Any entry `> 0` is an edge.
pub struct AdjacencyMatrix<'a>(pub &'a [Vec<f64>]);

impl<'a> Graph for AdjacencyMatrix<'a> {
    fn node_count(&self) -> usize {
        self.0.len()
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.0[node].iter().enumerate().filter(|(_, &w)| w > 0.0).map(|(i, _)| i).collect()
    }
}

/// Borrowed out-neighbor lists, one per node.
///
/// Neighbor order is kept as given; it becomes the insertion order of the sparse rows.
pub struct AdjacencyList<'a>(pub &'a [Vec<usize>]);

impl<'a> Graph for AdjacencyList<'a> {
    fn node_count(&self) -> usize {
        self.0.len()
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.0.get(node).cloned().unwrap_or_default()
    }
    fn out_degree(&self, node: usize) -> usize {
        self.0.get(node).map_or(0, Vec::len)
    }
}

#[cfg(feature = "petgraph")]
impl<N, E, Ty, Ix> Graph for petgraph::Graph<N, E, Ty, Ix>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn node_count(&self) -> usize {
        self.node_count()
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        // petgraph yields neighbors newest-edge first; reverse to keep insertion order.
        let mut out: Vec<usize> =
            self.neighbors(petgraph::graph::NodeIndex::new(node)).map(|idx| idx.index()).collect();
        out.reverse();
        out
    }
}
