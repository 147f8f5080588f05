//! End-to-end tests: load flat files, build graphs, run the allocators,
//! the glass-ceiling analysis, and the link-prediction pipeline together.

use std::fs::File;
use std::io::Write;

use redes::prelude::*;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn seeding_pipeline_from_edge_file() {
    let dir = tempfile::tempdir().unwrap();
    let edges = write_file(&dir, "edges.txt", "0 1\n1 2\n2 3\n3 4\n1 3\n");
    let g = load_graph(&edges, false).unwrap();
    assert_eq!(g.num_nodes(), 5);

    let population = [6.0, 3.0, 9.0, 2.0, 5.0];
    let budget = 12.0;
    let adoptions = allocate_by_centrality(&g, &population, 4, budget).unwrap();

    for &rate in &adoptions {
        assert!((0.0..=1.0).contains(&rate));
    }
    let spent: f64 = adoptions.iter().zip(&population).map(|(a, p)| a * p).sum();
    assert!(spent <= budget + 1e-12);
    assert!(spent >= 0.9 * budget - 1e-12);
}

#[test]
fn centrality_and_outdegree_agree_on_bounds() {
    let g = Graph::from_edges(&[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (4, 0)], true);
    let population = [4.0, 7.0, 2.0, 9.0, 3.0];
    let budget = 15.0;

    let by_centrality = allocate_by_centrality(&g, &population, 5, budget).unwrap();
    let by_outdegree = allocate_by_outdegree(&g, &population, 5, budget).unwrap();

    for adoptions in [&by_centrality, &by_outdegree] {
        let spent: f64 = adoptions.iter().zip(&population).map(|(a, p)| a * p).sum();
        assert!(spent <= budget + 1e-12);
        assert!(adoptions.iter().all(|&a| (0.0..=1.0).contains(&a)));
    }
}

#[test]
fn glass_ceiling_curves_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let edges = write_file(&dir, "edges.txt", "0 1\n0 2\n0 3\n1 2\n");
    let gender = write_file(&dir, "gender.csv", "user_id,gender\n0,F\n1,F\n2,M\n3,M\n");

    let g = load_graph(&edges, false).unwrap();
    let table = read_gender_table(&gender).unwrap();

    let by_degree = ceiling_curve_by_degree(&g, &table);
    assert_eq!(by_degree.first().map(|p| p.pct_female), Some(100.0));

    let by_betweenness = ceiling_curve_by_betweenness(&g, &table);
    assert!(!by_betweenness.is_empty());
    // Node 0 dominates the betweenness ranking and is female
    assert_eq!(by_betweenness.last().unwrap().pct_female, 50.0);

    let by_katz = ceiling_curve_by_katz(&g, &table, 0.1).unwrap();
    assert!(!by_katz.is_empty());
}

#[test]
fn link_prediction_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let content = "1 2\n1 3\n2 3\n2 4\n3 4\n4 5\n3 5\n2 5\n";
    let g1_path = write_file(&dir, "g1.txt", content);
    let g2_path = write_file(&dir, "g2.txt", content);
    let pairs_path = write_file(&dir, "pairs.txt", "1 1\n2 2\n");

    let g1 = read_adjacency(&g1_path).unwrap();
    let g2 = read_adjacency(&g2_path).unwrap();
    let seeds = read_pairs(&pairs_path).unwrap();

    let found = predict(&g1, &g2, &seeds, 2);
    assert!(!found.is_empty());
    assert_eq!(error_rate(&found, &g1, &g2), 0.0);

    let out_path = dir.path().join("predicted.txt");
    write_pairs(&out_path, &found).unwrap();
    let reloaded = read_pairs(&out_path).unwrap();
    assert_eq!(reloaded, found);
}

#[test]
fn link_prediction_threshold_sweep_is_reproducible() {
    let g = AdjacencyMap::from_edges(&[
        (1, 2),
        (1, 3),
        (2, 3),
        (2, 4),
        (3, 4),
        (4, 5),
        (3, 5),
        (2, 5),
        (5, 6),
        (4, 6),
    ]);
    let a = evaluate_thresholds(&g, &[3, 4, 5], 0.8, Some(9));
    let b = evaluate_thresholds(&g, &[3, 4, 5], 0.8, Some(9));
    assert_eq!(a, b);
    for (_, err) in a {
        assert!((0.0..=1.0).contains(&err));
    }
}

#[test]
fn population_roster_guards_bad_edges() {
    // An edge referencing a node outside the population roster must fail
    // fast instead of corrupting a later adoption-vector write.
    let err = Graph::with_node_count(&[(0, 1), (1, 9)], 5, false).unwrap_err();
    assert!(matches!(err, RedesError::NodeOutOfRange { node: 9, len: 5 }));

    let g = Graph::from_edges(&[(0, 1), (1, 9)], false);
    let population = vec![1.0; 5]; // shorter than the 10-node graph
    let err = allocate_by_centrality(&g, &population, 3, 4.0).unwrap_err();
    assert!(matches!(err, RedesError::DimensionMismatch { .. }));
}
