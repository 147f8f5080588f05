//! Graph centrality measures used as seed-selection score providers.
//!
//! - Betweenness centrality (Brandes' algorithm, parallel outer loop)
//! - Katz centrality (power iteration with attenuation factor)

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::VecDeque;

use crate::error::{RedesError, Result};

use super::{Graph, NodeId};

/// Extension trait for graph centrality measures.
///
/// Score providers are deterministic and total over the node set: every
/// returned vector has one entry per node, indexed by node id.
pub trait GraphCentrality {
    /// Compute betweenness centrality using Brandes' algorithm (2001).
    ///
    /// Each source's BFS is independent, so the outer loop runs on Rayon
    /// when the `parallel` feature is enabled. Scores for undirected graphs
    /// are halved since every shortest path is counted from both endpoints.
    ///
    /// # Returns
    /// Vector of betweenness scores (one per node)
    ///
    /// # Performance
    /// O(nm) serial for unweighted graphs
    fn betweenness_centrality(&self) -> Vec<f64>;

    /// Compute Katz centrality with attenuation factor.
    ///
    /// # Arguments
    /// * `alpha` - Attenuation factor (must be in (0, 1))
    /// * `max_iter` - Maximum iterations
    /// * `tol` - Convergence tolerance
    ///
    /// # Errors
    /// Returns `InvalidHyperparameter` when `alpha` is outside (0, 1).
    fn katz_centrality(&self, alpha: f64, max_iter: usize, tol: f64) -> Result<Vec<f64>>;
}

impl GraphCentrality for Graph {
    fn betweenness_centrality(&self) -> Vec<f64> {
        if self.num_nodes() == 0 {
            return Vec::new();
        }

        #[cfg(feature = "parallel")]
        let partial_scores: Vec<Vec<f64>> = (0..self.num_nodes())
            .into_par_iter()
            .map(|source| brandes_bfs_from_source(self, source))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let partial_scores: Vec<Vec<f64>> = (0..self.num_nodes())
            .map(|source| brandes_bfs_from_source(self, source))
            .collect();

        let mut centrality = vec![0.0; self.num_nodes()];
        for partial in partial_scores {
            for (i, &score) in partial.iter().enumerate() {
                centrality[i] += score;
            }
        }

        // Undirected shortest paths are counted once per endpoint
        if !self.is_directed() {
            for score in &mut centrality {
                *score /= 2.0;
            }
        }

        centrality
    }

    fn katz_centrality(&self, alpha: f64, max_iter: usize, tol: f64) -> Result<Vec<f64>> {
        if self.num_nodes() == 0 {
            return Ok(Vec::new());
        }

        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(RedesError::InvalidHyperparameter {
                param: "alpha".to_string(),
                value: alpha.to_string(),
                constraint: "0 < alpha < 1".to_string(),
            });
        }

        let n = self.num_nodes();
        let mut x = vec![1.0; n];
        let mut x_new = vec![0.0; n];

        for _ in 0..max_iter {
            // Katz iteration: x_new = 1 + alpha * A^T * x
            #[allow(clippy::needless_range_loop)]
            for v in 0..n {
                let incoming = self.incoming_neighbors(v);
                let neighbors_sum: f64 = incoming.iter().map(|&u| x[u]).sum();
                x_new[v] = 1.0 + alpha * neighbors_sum;
            }

            let diff: f64 = x.iter().zip(&x_new).map(|(a, b)| (a - b).abs()).sum();

            if diff < tol {
                return Ok(x_new);
            }

            std::mem::swap(&mut x, &mut x_new);
        }

        Ok(x)
    }
}

/// Brandes' BFS from a single source node.
///
/// Computes the contribution to betweenness centrality from shortest paths
/// starting at `source`.
fn brandes_bfs_from_source(graph: &Graph, source: NodeId) -> Vec<f64> {
    let n = graph.num_nodes();
    let mut stack = Vec::new(); // Nodes in order of non-increasing distance
    let mut paths = vec![0u64; n];
    let mut distance = vec![i32::MAX; n];
    let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    let mut dependency = vec![0.0; n];

    paths[source] = 1;
    distance[source] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in graph.neighbors(v) {
            if distance[w] == i32::MAX {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                paths[w] = paths[w].saturating_add(paths[v]);
                predecessors[w].push(v);
            }
        }
    }

    // Backward accumulation of dependencies
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            let contrib = (paths[v] as f64 / paths[w] as f64) * (1.0 + dependency[w]);
            dependency[v] += contrib;
        }
    }

    // Endpoints are not interior to their own paths
    dependency[source] = 0.0;

    dependency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_betweenness_path_middle_node() {
        let g = Graph::from_edges(&[(0, 1), (1, 2)], false);
        let bc = g.betweenness_centrality();
        assert!(bc[1] > bc[0]);
        assert!(bc[1] > bc[2]);
    }

    #[test]
    fn test_betweenness_path_exact() {
        // 0 -- 1 -- 2: node 1 lies on the single shortest path 0..2
        let g = Graph::from_edges(&[(0, 1), (1, 2)], false);
        let bc = g.betweenness_centrality();
        assert!((bc[1] - 1.0).abs() < 1e-10);
        assert!(bc[0].abs() < 1e-10);
    }

    #[test]
    fn test_betweenness_endpoints_score_zero() {
        // Endpoints of a path lie on no shortest path between other nodes
        let g = Graph::from_edges(&[(0, 1), (1, 2)], false);
        assert_eq!(g.betweenness_centrality(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_betweenness_empty_graph() {
        let g = Graph::new(false);
        assert!(g.betweenness_centrality().is_empty());
    }

    #[test]
    fn test_katz_star_center_highest() {
        let g = Graph::from_edges(&[(0, 1), (0, 2), (0, 3)], false);
        let kc = g.katz_centrality(0.1, 100, 1e-9).unwrap();
        assert!(kc[0] > kc[1]);
        assert!((kc[1] - kc[2]).abs() < 1e-6);
    }

    #[test]
    fn test_katz_rejects_bad_alpha() {
        let g = Graph::from_edges(&[(0, 1)], false);
        assert!(g.katz_centrality(1.5, 100, 1e-6).is_err());
        assert!(g.katz_centrality(0.0, 100, 1e-6).is_err());
    }

    #[test]
    fn test_betweenness_deterministic() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)];
        let g = Graph::from_edges(&edges, false);
        let a = g.betweenness_centrality();
        let b = g.betweenness_centrality();
        assert_eq!(a, b);
    }
}
