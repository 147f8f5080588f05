//! Cross-graph link prediction via iterated common-neighbor matching.
//!
//! Two social graphs covering overlapping user bases are aligned by growing
//! a set of cross-graph identity pairs: starting from known linked pairs,
//! every unlinked node in the first graph is scored against every node in
//! the second by counting common neighbors (the first graph's neighbors are
//! translated into the second graph's id space through the current pair
//! mapping). The best candidate at or above a fixed threshold is accepted,
//! and the whole sweep repeats until a pass discovers nothing new.
//!
//! Node ids here are the raw integer tokens from the input files, not the
//! crate's contiguous [`crate::graph::NodeId`]s: the two graphs come from
//! different sources and share no index space.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{RedesError, Result};

/// Raw node identifier as it appears in edge-list files.
pub type RawId = u64;

/// A cross-graph node-identity pair: `left` in the first graph is believed
/// to be the same user as `right` in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedPair {
    /// Node id in the first graph
    pub left: RawId,
    /// Node id in the second graph
    pub right: RawId,
}

/// Undirected adjacency map keyed by raw node id.
///
/// Backed by ordered containers so iteration (and therefore prediction) is
/// deterministic for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    adj: BTreeMap<RawId, BTreeSet<RawId>>,
}

impl AdjacencyMap {
    /// Build an adjacency map from undirected edge pairs.
    ///
    /// Both directions of every edge are recorded; duplicate edges collapse.
    #[must_use]
    pub fn from_edges(edges: &[(RawId, RawId)]) -> Self {
        let mut adj: BTreeMap<RawId, BTreeSet<RawId>> = BTreeMap::new();
        for &(u, v) in edges {
            adj.entry(u).or_default().insert(v);
            adj.entry(v).or_default().insert(u);
        }
        Self { adj }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// Whether the map has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Whether the node is present.
    #[must_use]
    pub fn contains(&self, v: RawId) -> bool {
        self.adj.contains_key(&v)
    }

    /// Neighbors of a node, if present.
    #[must_use]
    pub fn neighbors(&self, v: RawId) -> Option<&BTreeSet<RawId>> {
        self.adj.get(&v)
    }

    /// Iterate node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = RawId> + '_ {
        self.adj.keys().copied()
    }

    fn iter(&self) -> impl Iterator<Item = (&RawId, &BTreeSet<RawId>)> {
        self.adj.iter()
    }
}

/// Run the fixed-point prediction loop.
///
/// Repeats full sweeps of [`pass`] until one discovers no new link, then
/// returns every link found beyond the seed pairs. Terminates in finitely
/// many passes: each accepted link consumes an unlinked node of `g1`.
///
/// # Arguments
/// * `g1` / `g2` - The two graphs to align
/// * `seed_pairs` - Already-known identity pairs
/// * `threshold` - Minimum common-neighbor count for acceptance
///
/// # Examples
///
/// ```
/// use redes::linkpred::{predict, identity_seed_pairs, AdjacencyMap};
///
/// let edges = [(1, 2), (1, 3), (2, 3), (3, 4), (2, 4)];
/// let g = AdjacencyMap::from_edges(&edges);
/// let seeds = identity_seed_pairs(&g, &g, 2);
/// let found = predict(&g, &g, &seeds, 2);
/// assert!(found.iter().all(|p| p.left == p.right));
/// ```
#[must_use]
pub fn predict(
    g1: &AdjacencyMap,
    g2: &AdjacencyMap,
    seed_pairs: &[LinkedPair],
    threshold: usize,
) -> Vec<LinkedPair> {
    let mut links = seed_pairs.to_vec();
    let mut discovered = Vec::new();

    loop {
        let batch = pass(g1, g2, &links, threshold);
        if batch.is_empty() {
            break;
        }
        discovered.extend_from_slice(&batch);
        links.extend_from_slice(&batch);
    }

    discovered
}

/// One full sweep: score every unlinked g1 node against all of g2 and accept
/// the best candidate per node, greedily and in ascending g1-node order.
fn pass(
    g1: &AdjacencyMap,
    g2: &AdjacencyMap,
    links: &[LinkedPair],
    threshold: usize,
) -> Vec<LinkedPair> {
    let mapping: BTreeMap<RawId, RawId> = links.iter().map(|p| (p.left, p.right)).collect();
    let mut left_linked: BTreeSet<RawId> = links.iter().map(|p| p.left).collect();
    let mut right_linked: BTreeSet<RawId> = links.iter().map(|p| p.right).collect();
    let existing: BTreeSet<(RawId, RawId)> = links.iter().map(|p| (p.left, p.right)).collect();

    let mut found = Vec::new();

    for (&node1, neighbors1) in g1.iter() {
        if left_linked.contains(&node1) {
            continue;
        }

        // Translate g1 neighbors into g2's id space via the current mapping
        let translated: BTreeSet<RawId> = neighbors1
            .iter()
            .filter_map(|n| mapping.get(n).copied())
            .collect();
        if translated.is_empty() {
            continue;
        }

        // Candidates ranked by descending common-neighbor count, then
        // ascending id
        let mut candidates: Vec<(RawId, usize)> = Vec::new();
        for (&node2, neighbors2) in g2.iter() {
            let common = translated.iter().filter(|t| neighbors2.contains(t)).count();
            if common > 0 {
                candidates.push((node2, common));
            }
        }
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        for (node2, score) in candidates {
            if score < threshold {
                break;
            }
            if right_linked.contains(&node2) {
                continue;
            }
            if !existing.contains(&(node1, node2)) {
                found.push(LinkedPair {
                    left: node1,
                    right: node2,
                });
                left_linked.insert(node1);
                right_linked.insert(node2);
                break;
            }
        }
    }

    found
}

/// Seed the prediction with identity pairs for nodes present in both graphs.
///
/// At most `cap` pairs are returned, taken in ascending id order.
#[must_use]
pub fn identity_seed_pairs(g1: &AdjacencyMap, g2: &AdjacencyMap, cap: usize) -> Vec<LinkedPair> {
    let mut pairs = Vec::new();
    for v in g1.nodes() {
        if g2.contains(v) {
            pairs.push(LinkedPair { left: v, right: v });
            if pairs.len() >= cap {
                break;
            }
        }
    }
    pairs
}

/// Error rate of a prediction run: `1 - correct/total`.
///
/// A predicted pair counts as correct when both endpoints exist in their
/// graphs and carry the same id (the self-pairing ground-truth proxy used
/// for held-out evaluation). Returns 0 when nothing was predicted.
#[must_use]
pub fn error_rate(predicted: &[LinkedPair], g1: &AdjacencyMap, g2: &AdjacencyMap) -> f64 {
    if predicted.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .filter(|p| p.left == p.right && g1.contains(p.left) && g2.contains(p.right))
        .count();
    1.0 - correct as f64 / predicted.len() as f64
}

/// Build a sub-sampled snapshot keeping edges incident to a random fraction
/// of the nodes.
///
/// Every sampled node contributes all of its edges, so neighbors outside the
/// sample survive as endpoints (matching how the held-out evaluation graphs
/// are constructed).
#[must_use]
pub fn subsample(graph: &AdjacencyMap, fraction: f64, rng: &mut impl Rng) -> AdjacencyMap {
    let nodes: Vec<RawId> = graph.nodes().collect();
    let keep = (fraction * nodes.len() as f64).floor() as usize;
    let mut edges = Vec::new();
    for &node in nodes.choose_multiple(rng, keep) {
        if let Some(neighbors) = graph.neighbors(node) {
            for &other in neighbors {
                edges.push((node, other));
            }
        }
    }
    AdjacencyMap::from_edges(&edges)
}

/// Held-out threshold sweep: subsample the graph once, pair the snapshot
/// against itself with identity seeds, and report the error rate per
/// threshold.
///
/// A `seed` pins the node sample for reproducible runs.
#[must_use]
pub fn evaluate_thresholds(
    graph: &AdjacencyMap,
    thresholds: &[usize],
    fraction: f64,
    seed: Option<u64>,
) -> Vec<(usize, f64)> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let snapshot = subsample(graph, fraction, &mut rng);
    let seeds = identity_seed_pairs(&snapshot, &snapshot, 1000);

    thresholds
        .iter()
        .map(|&t| {
            let predicted = predict(&snapshot, &snapshot, &seeds, t);
            (t, error_rate(&predicted, &snapshot, &snapshot))
        })
        .collect()
}

/// Read an undirected adjacency map from a whitespace-delimited edge file.
///
/// # Errors
/// `Io` on read failure; `ParseError` (with line number) for lines that do
/// not contain exactly two integer tokens.
pub fn read_adjacency(path: impl AsRef<Path>) -> Result<AdjacencyMap> {
    let edges = read_id_pairs(path.as_ref())?;
    Ok(AdjacencyMap::from_edges(&edges))
}

/// Read linked pairs from a whitespace-delimited two-column file.
///
/// # Errors
/// Same failure modes as [`read_adjacency`].
pub fn read_pairs(path: impl AsRef<Path>) -> Result<Vec<LinkedPair>> {
    let pairs = read_id_pairs(path.as_ref())?;
    Ok(pairs
        .into_iter()
        .map(|(left, right)| LinkedPair { left, right })
        .collect())
}

/// Write linked pairs as whitespace-separated two-column text, one per line.
///
/// # Errors
/// Returns `Io` on write failure.
pub fn write_pairs(path: impl AsRef<Path>, pairs: &[LinkedPair]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for pair in pairs {
        writeln!(writer, "{} {}", pair.left, pair.right)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_id_pairs(path: &Path) -> Result<Vec<(RawId, RawId)>> {
    let display = path.display().to_string();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(RedesError::parse(
                &display,
                idx + 1,
                format!("expected two columns, found {}", tokens.len()),
            ));
        }
        let left = tokens[0].parse::<RawId>().map_err(|_| {
            RedesError::parse(&display, idx + 1, format!("invalid node id {:?}", tokens[0]))
        })?;
        let right = tokens[1].parse::<RawId>().map_err(|_| {
            RedesError::parse(&display, idx + 1, format!("invalid node id {:?}", tokens[1]))
        })?;
        pairs.push((left, right));
    }
    Ok(pairs)
}
