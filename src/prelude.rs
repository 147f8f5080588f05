//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use redes::prelude::*;
//! ```

pub use crate::analysis::{
    ceiling_curve, ceiling_curve_by_betweenness, ceiling_curve_by_degree, ceiling_curve_by_katz,
    CeilingPoint,
};
pub use crate::data::{load_graph, read_edge_list, read_gender_table, Gender};
pub use crate::error::{RedesError, Result};
pub use crate::graph::{Graph, GraphCentrality, NodeId};
pub use crate::linkpred::{
    error_rate, evaluate_thresholds, identity_seed_pairs, predict, read_adjacency, read_pairs,
    write_pairs, AdjacencyMap, LinkedPair, RawId,
};
pub use crate::seeding::{allocate_by_centrality, allocate_by_outdegree};
