//! Budget-constrained seed selection for cascade models.
//!
//! Both allocators answer the same question: given a per-node population
//! weight, a maximum node count and a finite budget, which nodes should be
//! activated (and at what fractional adoption rate) to maximize spread
//! potential? They differ only in the priority ranking:
//!
//! - [`allocate_by_centrality`] ranks by betweenness centrality divided by
//!   population (cost-efficiency), allocating fractionally down the ranking.
//! - [`allocate_by_outdegree`] ranks by raw out-degree and allocates
//!   all-or-nothing, backfilling from the largest untouched populations.
//!
//! Each allocator runs a primary greedy pass followed by a backfill repair
//! pass targeting at least 90% budget utilization. The output is an adoption
//! vector: one rate in [0, 1] per node id, entries growing in value and
//! never shrinking during a run.

use crate::error::{RedesError, Result};
use crate::graph::{Graph, GraphCentrality, NodeId};

/// Fraction of the budget the backfill pass tries to reach.
const UTILIZATION_TARGET: f64 = 0.9;

/// Select cascade seeds by cost-efficiency-adjusted betweenness centrality.
///
/// Each node's betweenness score is divided by its population, so the
/// ranking prefers high-impact, low-cost nodes. The primary pass walks the
/// ranking allocating `min(1, remaining_budget / population)` until
/// `node_limit` nodes are selected or the budget is exhausted; zero-population
/// nodes are skipped and do not count against the limit. The backfill pass
/// then tops up nodes from the unconsumed tail of the ranking until 90% of
/// the budget is committed, the node limit is hit, or the tail runs out.
///
/// # Arguments
/// * `graph` - Node/edge structure; node ids index `population`
/// * `population` - Population mass per node, all entries finite and >= 0
/// * `node_limit` - Maximum number of nodes to activate
/// * `budget` - Maximum total population mass to commit
///
/// # Returns
/// Adoption vector with one rate in [0, 1] per node id. Guarantees
/// `sum(rate * population) <= budget`.
///
/// # Errors
/// `DimensionMismatch` when `population.len() != graph.num_nodes()`,
/// `InvalidPopulation` for negative or non-finite entries,
/// `InvalidHyperparameter` for a negative or non-finite budget.
///
/// # Examples
///
/// ```
/// use redes::graph::Graph;
/// use redes::seeding::allocate_by_centrality;
///
/// // Path graph: the middle node carries all shortest paths.
/// let g = Graph::from_edges(&[(0, 1), (1, 2)], false);
/// let adoptions = allocate_by_centrality(&g, &[5.0, 10.0, 5.0], 1, 4.0).unwrap();
/// assert_eq!(adoptions[1], 0.4); // 4.0 budget over population 10
/// ```
pub fn allocate_by_centrality(
    graph: &Graph,
    population: &[f64],
    node_limit: usize,
    budget: f64,
) -> Result<Vec<f64>> {
    validate_inputs(graph, population, budget)?;

    let mut adoptions = vec![0.0; population.len()];
    if node_limit == 0 || budget <= 0.0 {
        return Ok(adoptions);
    }

    let centrality = graph.betweenness_centrality();

    // Cost-efficiency: score per unit of population, zero-population guarded
    let adjusted: Vec<f64> = (0..graph.num_nodes())
        .map(|v| {
            if population[v] > 0.0 {
                centrality[v] / population[v]
            } else {
                0.0
            }
        })
        .collect();

    let ranking = rank_descending(&adjusted);

    let mut used_budget = 0.0;
    let mut selected = 0usize;
    // Next unexamined ranking position. Kept separate from `selected`:
    // zero-population nodes advance the cursor without counting toward
    // the node limit.
    let mut next_rank = 0usize;

    // Primary pass: fractional greedy allocation down the ranking
    while next_rank < ranking.len() && selected < node_limit && used_budget < budget {
        let node = ranking[next_rank];
        next_rank += 1;

        let pop = population[node];
        if pop <= 0.0 {
            continue;
        }

        let adoption_rate = ((budget - used_budget) / pop).min(1.0);
        adoptions[node] = adoption_rate;
        used_budget += adoption_rate * pop;
        selected += 1;
    }

    // Backfill pass: top up the unconsumed tail toward 90% utilization.
    // The cursor only moves forward, so the loop terminates once the
    // ranking is exhausted even when every remaining population is zero.
    let target = UTILIZATION_TARGET * budget;
    while next_rank < ranking.len() && selected < node_limit && used_budget < target {
        let node = ranking[next_rank];
        next_rank += 1;

        let pop = population[node];
        if pop <= 0.0 {
            continue;
        }

        // Positive by the loop guard (used_budget < target) and pop > 0
        let additional_budget = pop.min(target - used_budget);
        debug_assert!(additional_budget > 0.0);
        adoptions[node] = additional_budget / pop;
        used_budget += additional_budget;
        selected += 1;
    }

    Ok(adoptions)
}

/// Select cascade seeds by raw out-degree with all-or-nothing allocation.
///
/// The primary pass walks nodes in descending out-degree order and fully
/// allocates a node only when its entire population fits in the remaining
/// budget; nodes that do not fit are skipped, and the pass stops once
/// `node_limit` nodes are fully allocated. The backfill pass then repeatedly
/// picks the maximum-population node still at rate zero and allocates the
/// largest fraction that fits within 90% of the budget.
///
/// # Errors
/// Beyond the shared validation errors, returns
/// [`RedesError::ExhaustedCandidates`] when the backfill pass needs more
/// budget committed but no zero-adoption node with positive population
/// remains.
///
/// # Examples
///
/// ```
/// use redes::graph::Graph;
/// use redes::seeding::allocate_by_outdegree;
///
/// let g = Graph::from_edges(&[(0, 1), (0, 2), (1, 2)], true);
/// let adoptions = allocate_by_outdegree(&g, &[4.0, 4.0, 4.0], 3, 10.0).unwrap();
/// assert_eq!(adoptions[0], 1.0); // highest out-degree, fits fully
/// ```
pub fn allocate_by_outdegree(
    graph: &Graph,
    population: &[f64],
    node_limit: usize,
    budget: f64,
) -> Result<Vec<f64>> {
    validate_inputs(graph, population, budget)?;

    let mut adoptions = vec![0.0; population.len()];
    if node_limit == 0 || budget <= 0.0 {
        return Ok(adoptions);
    }

    let degrees: Vec<f64> = (0..graph.num_nodes())
        .map(|v| graph.out_degree(v) as f64)
        .collect();
    let ranking = rank_descending(&degrees);

    let mut used_budget = 0.0;
    let mut full_allocations = 0usize;

    // Primary pass: all-or-nothing, skip nodes that do not fit
    for &node in &ranking {
        let pop = population[node];
        if used_budget + pop <= budget {
            adoptions[node] = 1.0;
            used_budget += pop;
            full_allocations += 1;
            if full_allocations == node_limit {
                break;
            }
        }
    }

    // Backfill pass: largest untouched population first
    let target = UTILIZATION_TARGET * budget;
    while used_budget < target {
        let Some(node) = max_population_unallocated(&adoptions, population) else {
            return Err(RedesError::ExhaustedCandidates {
                used_budget,
                target,
            });
        };

        let pop = population[node];
        let additional_adoption = ((target - used_budget) / pop).min(1.0);
        adoptions[node] += additional_adoption;
        used_budget += additional_adoption * pop;
    }

    Ok(adoptions)
}

/// Node ids sorted by descending score, ties broken by ascending id.
///
/// The tie-break makes both allocators deterministic: two runs over the same
/// inputs produce identical adoption vectors.
fn rank_descending(scores: &[f64]) -> Vec<NodeId> {
    let mut order: Vec<NodeId> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    order
}

/// Maximum-population node with adoption still at zero, smallest id on ties.
///
/// Zero-population nodes are never candidates: topping them up cannot make
/// progress toward the utilization target.
fn max_population_unallocated(adoptions: &[f64], population: &[f64]) -> Option<NodeId> {
    let mut best: Option<NodeId> = None;
    for v in 0..population.len() {
        if adoptions[v] != 0.0 || population[v] <= 0.0 {
            continue;
        }
        match best {
            Some(b) if population[v] <= population[b] => {}
            _ => best = Some(v),
        }
    }
    best
}

fn validate_inputs(graph: &Graph, population: &[f64], budget: f64) -> Result<()> {
    if population.len() != graph.num_nodes() {
        return Err(RedesError::dimension_mismatch(
            "population length",
            graph.num_nodes(),
            population.len(),
        ));
    }
    if !budget.is_finite() || budget < 0.0 {
        return Err(RedesError::InvalidHyperparameter {
            param: "budget".to_string(),
            value: budget.to_string(),
            constraint: "finite and >= 0".to_string(),
        });
    }
    for (node, &value) in population.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(RedesError::InvalidPopulation { node, value });
        }
    }
    Ok(())
}
