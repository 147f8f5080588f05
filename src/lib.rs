//! Redes: social-network structural analysis in pure Rust.
//!
//! Redes studies structural inequality in social graphs (glass-ceiling
//! curves by gender), selects cascade seeds under a mixed node-count and
//! budget constraint, and aligns two graphs over a shared user base via
//! common-neighbor link prediction.
//!
//! # Quick Start
//!
//! ```
//! use redes::prelude::*;
//!
//! // Path graph: the middle node carries all shortest paths
//! let g = Graph::from_edges(&[(0, 1), (1, 2)], false);
//! let population = [4.0, 10.0, 4.0];
//!
//! // Spend up to 8.0 population mass on at most 2 nodes
//! let adoptions = allocate_by_centrality(&g, &population, 2, 8.0).unwrap();
//!
//! assert!(adoptions.iter().all(|&a| (0.0..=1.0).contains(&a)));
//! let spent: f64 = adoptions.iter().zip(&population).map(|(a, p)| a * p).sum();
//! assert!(spent <= 8.0);
//! ```
//!
//! # Modules
//!
//! - [`graph`]: CSR graph plus centrality score providers
//! - [`seeding`]: budget-constrained greedy seed allocation with backfill
//! - [`linkpred`]: cross-graph link prediction and held-out evaluation
//! - [`analysis`]: glass-ceiling curves over score distributions
//! - [`data`]: flat-file loaders for edge lists and attribute tables
//! - [`error`]: crate-wide error type and `Result` alias

pub mod analysis;
pub mod data;
pub mod error;
pub mod graph;
pub mod linkpred;
pub mod prelude;
pub mod seeding;

pub use error::{RedesError, Result};
