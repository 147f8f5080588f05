//! Flat-file loaders for edge lists and node-attribute tables.
//!
//! Edge lists are whitespace-delimited pairs of node ids, one edge per line.
//! Attribute tables carry a header row and `user_id,gender` columns
//! (comma- or whitespace-separated). Malformed lines fail fast with their
//! line number rather than silently producing a truncated graph.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RedesError, Result};
use crate::graph::{Graph, NodeId};

/// Node gender attribute.
///
/// Attribute files in the wild carry plenty of values besides `F`/`M`;
/// everything unrecognized maps to `Unknown` rather than failing the load,
/// matching a left-join of attributes onto the node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Recorded as female (`F`/`f`)
    Female,
    /// Recorded as male (`M`/`m`)
    Male,
    /// Missing or unrecognized attribute value
    Unknown,
}

impl Gender {
    fn parse(token: &str) -> Self {
        match token.trim() {
            "F" | "f" => Gender::Female,
            "M" | "m" => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

/// Read a whitespace-delimited edge list.
///
/// Blank lines are ignored. Node ids must be non-negative integers.
///
/// # Errors
/// `Io` on read failure; `ParseError` with the 1-based line number for lines
/// without exactly two integer tokens.
pub fn read_edge_list(path: impl AsRef<Path>) -> Result<Vec<(NodeId, NodeId)>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut edges = Vec::new();
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
        let source = parse_node(tokens[0], &display, idx + 1)?;
        let target = parse_node(tokens[1], &display, idx + 1)?;
        edges.push((source, target));
    }
    Ok(edges)
}

/// Load a graph straight from an edge-list file.
///
/// # Errors
/// Same failure modes as [`read_edge_list`].
pub fn load_graph(path: impl AsRef<Path>, directed: bool) -> Result<Graph> {
    let edges = read_edge_list(path)?;
    Ok(Graph::from_edges(&edges, directed))
}

/// Read a node-attribute table mapping user ids to gender.
///
/// The first line is a header and is skipped. Data lines hold a user id and
/// a gender token, separated by a comma or whitespace. Users absent from the
/// table simply have no entry in the returned map.
///
/// # Errors
/// `Io` on read failure; `ParseError` for data lines without two columns or
/// with a non-integer user id.
pub fn read_gender_table(path: impl AsRef<Path>) -> Result<HashMap<NodeId, Gender>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut table = HashMap::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            continue; // header row
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = if trimmed.contains(',') {
            trimmed.split(',').map(str::trim).collect()
        } else {
            trimmed.split_whitespace().collect()
        };
        if tokens.len() != 2 {
            return Err(RedesError::parse(
                &display,
                idx + 1,
                format!("expected user_id and gender, found {} columns", tokens.len()),
            ));
        }
        let user = parse_node(tokens[0], &display, idx + 1)?;
        table.insert(user, Gender::parse(tokens[1]));
    }
    Ok(table)
}

fn parse_node(token: &str, path: &str, line: usize) -> Result<NodeId> {
    token
        .parse::<NodeId>()
        .map_err(|_| RedesError::parse(path, line, format!("invalid node id {token:?}")))
}
