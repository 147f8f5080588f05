//! Glass-ceiling curves: how the share of female users thins out toward the
//! top of a score distribution.
//!
//! For a per-node score (degree, betweenness, Katz centrality) the curve
//! reports, at every observed score level `t`, the percentage of all female
//! users whose score is at least `t`, together with a marker size
//! proportional to the fraction of the whole population still at or above
//! `t`. A flat curve means women are represented evenly across the ranking;
//! one that collapses near the top is the glass-ceiling signature.
//!
//! Rendering is out of scope; the output is plain serializable data points.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::Gender;
use crate::graph::{Graph, GraphCentrality, NodeId};

/// One point of a glass-ceiling curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CeilingPoint {
    /// Score level this point was evaluated at
    pub threshold: f64,
    /// Percentage of all female users with score >= threshold (0-100)
    pub pct_female: f64,
    /// 1000 x fraction of all users with score >= threshold
    pub marker_size: f64,
}

/// Compute a glass-ceiling curve over an arbitrary per-node score vector.
///
/// Thresholds are the sorted distinct score values. At each threshold `t`:
/// `pct_female = 100 * |{v : female, score(v) >= t}| / |females|` (0 when the
/// table holds no females) and `marker_size = 1000 * |{v : score(v) >= t}| / n`.
///
/// Nodes missing from `gender` count toward the totals but not toward the
/// female counts.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use redes::analysis::ceiling_curve;
/// use redes::data::Gender;
///
/// let gender = HashMap::from([(0, Gender::Female), (1, Gender::Male)]);
/// let points = ceiling_curve(&[1.0, 2.0], &gender);
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].pct_female, 100.0);
/// assert_eq!(points[1].pct_female, 0.0); // the sole female is below 2.0
/// ```
#[must_use]
pub fn ceiling_curve(scores: &[f64], gender: &HashMap<NodeId, Gender>) -> Vec<CeilingPoint> {
    let n = scores.len();
    if n == 0 {
        return Vec::new();
    }

    let is_female = |v: NodeId| gender.get(&v) == Some(&Gender::Female);
    let total_females = (0..n).filter(|&v| is_female(v)).count();

    let mut order: Vec<NodeId> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut thresholds: Vec<f64> = scores.to_vec();
    thresholds.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    thresholds.dedup();

    // Single ascending sweep: nodes strictly below the current threshold
    // are counted once and subtracted from the totals.
    let mut below = 0usize;
    let mut females_below = 0usize;
    let mut cursor = 0usize;
    let mut points = Vec::with_capacity(thresholds.len());

    for &t in &thresholds {
        while cursor < n && scores[order[cursor]] < t {
            if is_female(order[cursor]) {
                females_below += 1;
            }
            below += 1;
            cursor += 1;
        }
        let at_or_above = n - below;
        let females_at_or_above = total_females - females_below;

        let pct_female = if total_females > 0 {
            100.0 * females_at_or_above as f64 / total_females as f64
        } else {
            0.0
        };
        points.push(CeilingPoint {
            threshold: t,
            pct_female,
            marker_size: 1000.0 * at_or_above as f64 / n as f64,
        });
    }

    points
}

/// Glass-ceiling curve over raw node degrees.
///
/// Unlike the generic curve, the degree variant sweeps every integer from 0
/// to the maximum degree, observed or not.
#[must_use]
pub fn ceiling_curve_by_degree(
    graph: &Graph,
    gender: &HashMap<NodeId, Gender>,
) -> Vec<CeilingPoint> {
    let degrees = graph.degrees();
    let n = degrees.len();
    if n == 0 {
        return Vec::new();
    }

    let is_female = |v: NodeId| gender.get(&v) == Some(&Gender::Female);
    let total_females = (0..n).filter(|&v| is_female(v)).count();
    let max_degree = degrees.iter().copied().max().unwrap_or(0);

    // Per-degree histograms, then suffix sums for ">= k" counts
    let mut users_at = vec![0usize; max_degree + 1];
    let mut females_at = vec![0usize; max_degree + 1];
    for (v, &d) in degrees.iter().enumerate() {
        users_at[d] += 1;
        if is_female(v) {
            females_at[d] += 1;
        }
    }

    let mut users_suffix = 0usize;
    let mut females_suffix = 0usize;
    let mut points = vec![
        CeilingPoint {
            threshold: 0.0,
            pct_female: 0.0,
            marker_size: 0.0,
        };
        max_degree + 1
    ];
    for k in (0..=max_degree).rev() {
        users_suffix += users_at[k];
        females_suffix += females_at[k];
        points[k] = CeilingPoint {
            threshold: k as f64,
            pct_female: if total_females > 0 {
                100.0 * females_suffix as f64 / total_females as f64
            } else {
                0.0
            },
            marker_size: 1000.0 * users_suffix as f64 / n as f64,
        };
    }

    points
}

/// Glass-ceiling curve over betweenness centrality.
#[must_use]
pub fn ceiling_curve_by_betweenness(
    graph: &Graph,
    gender: &HashMap<NodeId, Gender>,
) -> Vec<CeilingPoint> {
    ceiling_curve(&graph.betweenness_centrality(), gender)
}

/// Glass-ceiling curve over Katz centrality.
///
/// # Errors
/// Propagates `InvalidHyperparameter` from the Katz computation when
/// `alpha` lies outside (0, 1).
pub fn ceiling_curve_by_katz(
    graph: &Graph,
    gender: &HashMap<NodeId, Gender>,
    alpha: f64,
) -> crate::error::Result<Vec<CeilingPoint>> {
    let scores = graph.katz_centrality(alpha, 100, 1e-6)?;
    Ok(ceiling_curve(&scores, gender))
}
