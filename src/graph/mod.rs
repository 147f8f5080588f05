//! Graph construction with a cache-friendly CSR representation.
//!
//! Nodes are identified by contiguous non-negative integers starting at 0,
//! and the node id doubles as the index into every node-indexed vector in
//! this crate (population vectors, adoption vectors, score vectors). The
//! adjacency is stored in Compressed Sparse Row (CSR) format: two flat
//! vectors instead of per-node heap allocations.
//!
//! # Examples
//!
//! ```
//! use redes::graph::Graph;
//!
//! let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)], false);
//! assert_eq!(g.num_nodes(), 3);
//! assert_eq!(g.neighbors(1), &[0, 2]);
//! ```

use crate::error::{RedesError, Result};

pub mod centrality;

pub use centrality::GraphCentrality;

/// Graph node identifier (contiguous integers from 0).
pub type NodeId = usize;

/// Graph structure using CSR (Compressed Sparse Row) adjacency.
///
/// # Invariant
/// Node ids are contiguous from 0 to `num_nodes() - 1`. Callers that pair a
/// graph with node-indexed data (e.g. a population vector) rely on the node
/// id being a valid index into that data; [`Graph::with_node_count`] enforces
/// the coupling at construction time.
#[derive(Debug, Clone)]
pub struct Graph {
    row_ptr: Vec<usize>,      // Offset into col_indices (length = n_nodes + 1)
    col_indices: Vec<NodeId>, // Flattened neighbor lists, sorted per node
    is_directed: bool,
    n_nodes: usize,
    n_edges: usize,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new(is_directed: bool) -> Self {
        Self {
            row_ptr: vec![0],
            col_indices: Vec::new(),
            is_directed,
            n_nodes: 0,
            n_edges: 0,
        }
    }

    /// Get number of nodes in the graph.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Get number of edges in the graph (as given in the input edge list).
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.n_edges
    }

    /// Check if the graph is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.is_directed
    }

    /// Get neighbors of node v in O(degree(v)) time.
    ///
    /// For directed graphs these are the out-neighbors. Returns an empty
    /// slice for out-of-range ids.
    #[must_use]
    pub fn neighbors(&self, v: NodeId) -> &[NodeId] {
        if v >= self.n_nodes {
            return &[];
        }
        let start = self.row_ptr[v];
        let end = self.row_ptr[v + 1];
        &self.col_indices[start..end]
    }

    /// Out-degree of a node (degree for undirected graphs).
    #[must_use]
    pub fn out_degree(&self, v: NodeId) -> usize {
        self.neighbors(v).len()
    }

    /// Degree of every node, indexed by node id.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.n_nodes).map(|v| self.neighbors(v).len()).collect()
    }

    /// Build a graph from an edge list.
    ///
    /// The number of nodes is the maximum id referenced plus one. Neighbor
    /// lists are sorted and deduplicated; for undirected graphs the reverse
    /// of every edge is added as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use redes::graph::Graph;
    ///
    /// let g = Graph::from_edges(&[(0, 1), (1, 2)], true);
    /// assert_eq!(g.num_nodes(), 3);
    /// assert_eq!(g.out_degree(0), 1);
    /// ```
    #[must_use]
    pub fn from_edges(edges: &[(NodeId, NodeId)], is_directed: bool) -> Self {
        if edges.is_empty() {
            return Self::new(is_directed);
        }

        let max_node = edges.iter().flat_map(|&(s, t)| [s, t]).max().unwrap_or(0);
        Self::build(edges, max_node + 1, is_directed)
    }

    /// Build a graph from an edge list with a fixed node count.
    ///
    /// Use this when the graph is paired with node-indexed data of known
    /// length: edges referencing ids at or beyond `n_nodes` fail fast with
    /// [`RedesError::NodeOutOfRange`] instead of silently growing the graph.
    ///
    /// # Errors
    /// Returns `NodeOutOfRange` when an edge endpoint is `>= n_nodes`.
    pub fn with_node_count(
        edges: &[(NodeId, NodeId)],
        n_nodes: usize,
        is_directed: bool,
    ) -> Result<Self> {
        for &(s, t) in edges {
            for node in [s, t] {
                if node >= n_nodes {
                    return Err(RedesError::NodeOutOfRange {
                        node,
                        len: n_nodes,
                    });
                }
            }
        }
        Ok(Self::build(edges, n_nodes, is_directed))
    }

    fn build(edges: &[(NodeId, NodeId)], n_nodes: usize, is_directed: bool) -> Self {
        let mut adj_list: Vec<Vec<NodeId>> = vec![Vec::new(); n_nodes];
        for &(source, target) in edges {
            adj_list[source].push(target);
            if !is_directed && source != target {
                adj_list[target].push(source);
            }
        }

        for neighbors in &mut adj_list {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        let mut row_ptr = Vec::with_capacity(n_nodes + 1);
        let mut col_indices = Vec::new();
        row_ptr.push(0);
        for neighbors in &adj_list {
            col_indices.extend_from_slice(neighbors);
            row_ptr.push(col_indices.len());
        }

        Self {
            row_ptr,
            col_indices,
            is_directed,
            n_nodes,
            n_edges: edges.len(),
        }
    }

    /// Get incoming neighbors (reverse edges).
    ///
    /// For undirected graphs this is the same as [`Graph::neighbors`]. For
    /// directed graphs all nodes are scanned for edges into `v`.
    pub(crate) fn incoming_neighbors(&self, v: NodeId) -> Vec<NodeId> {
        if !self.is_directed {
            return self.neighbors(v).to_vec();
        }

        let mut incoming = Vec::new();
        for u in 0..self.n_nodes {
            if self.neighbors(u).binary_search(&v).is_ok() {
                incoming.push(u);
            }
        }
        incoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(false);
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges(), 0);
        assert!(g.neighbors(0).is_empty());
    }

    #[test]
    fn test_from_edges_undirected() {
        let g = Graph::from_edges(&[(0, 1), (1, 2)], false);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.degrees(), vec![1, 2, 1]);
    }

    #[test]
    fn test_from_edges_directed_out_degree() {
        let g = Graph::from_edges(&[(0, 1), (0, 2), (2, 0)], true);
        assert_eq!(g.out_degree(0), 2);
        assert_eq!(g.out_degree(1), 0);
        assert_eq!(g.out_degree(2), 1);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let g = Graph::from_edges(&[(0, 1), (0, 1), (1, 0)], false);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn test_with_node_count_rejects_out_of_range() {
        let err = Graph::with_node_count(&[(0, 5)], 3, false).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RedesError::NodeOutOfRange { node: 5, len: 3 }
        ));
    }

    #[test]
    fn test_with_node_count_keeps_isolated_nodes() {
        let g = Graph::with_node_count(&[(0, 1)], 4, false).unwrap();
        assert_eq!(g.num_nodes(), 4);
        assert!(g.neighbors(3).is_empty());
    }

    #[test]
    fn test_incoming_neighbors_directed() {
        let g = Graph::from_edges(&[(0, 2), (1, 2)], true);
        assert_eq!(g.incoming_neighbors(2), vec![0, 1]);
        assert!(g.incoming_neighbors(0).is_empty());
    }
}
