#![allow(dead_code)]

use std::path::PathBuf;

use floorplan_lib::{load_graph, Graph, Position};
use nanorand::{Rng, WyRand};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_path() -> PathBuf {
    fixtures_dir().join("floor_plan.json")
}

pub fn fixture_graph() -> Graph {
    let (graph, _) = load_graph(&fixture_path()).expect("fixture floor plan loads");
    graph
}

/// `A(0,0) B(3,4) C(6,4)` with `A-B` weight 5 (`L1`) and `B-C` weight 3 (`L2`).
pub fn abc_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_node("A", Position::new(0.0, 0.0));
    graph.add_node("B", Position::new(3.0, 4.0));
    graph.add_node("C", Position::new(6.0, 4.0));
    graph.add_edge("A", "B", 5.0, "L1");
    graph.add_edge("B", "C", 3.0, "L2");
    graph
}

/// Random graph whose weights are never below the straight-line distance, so
/// the Euclidean heuristic stays admissible.
///
/// Self-loops and second edges between an already connected pair are not
/// generated, so every hop has exactly one segment and [`path_cost`] matches
/// the search cost.
pub fn random_admissible_graph(seed: u64, nodes: usize, edges: usize) -> Graph {
    let mut rng = WyRand::new_seed(seed);
    let mut graph = Graph::new();

    for index in 0..nodes {
        let x = rng.generate_range(0_u32..100) as f64;
        let y = rng.generate_range(0_u32..100) as f64;
        graph.add_node(node_id(index), Position::new(x, y));
    }

    for index in 0..edges {
        let from = node_id(rng.generate_range(0..nodes));
        let to = node_id(rng.generate_range(0..nodes));
        if from == to || graph.edge_between(&from, &to).is_some() {
            continue;
        }
        let distance = {
            let a = graph.node(&from).unwrap().position;
            let b = graph.node(&to).unwrap().position;
            a.distance_to(&b)
        };
        let slack = rng.generate_range(0_u32..20) as f64;
        graph.add_edge(&from, &to, distance + slack, &format!("L{index}"));
    }

    graph
}

pub fn node_id(index: usize) -> String {
    format!("n{index}")
}

/// Cost of the path through `nodes` using the first edge between each pair.
pub fn path_cost(graph: &Graph, nodes: &[String]) -> f64 {
    nodes
        .windows(2)
        .map(|pair| graph.edge_between(&pair[0], &pair[1]).expect("edge").weight)
        .sum()
}

/// Straightforward O(V^2) Dijkstra used as the reference for optimality
/// checks. Returns `None` when `goal` is unreachable.
pub fn reference_cost(graph: &Graph, start: &str, goal: &str) -> Option<f64> {
    use std::collections::{HashMap, HashSet};

    let mut dist: HashMap<&str, f64> = HashMap::new();
    let mut done: HashSet<&str> = HashSet::new();
    dist.insert(start, 0.0);

    loop {
        let current = dist
            .iter()
            .filter(|(id, _)| !done.contains(*id))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(id, cost)| (*id, *cost));
        let Some((id, cost)) = current else {
            return None;
        };
        if id == goal {
            return Some(cost);
        }
        done.insert(id);
        for edge in graph.neighbours(id) {
            let next = cost + edge.weight;
            let entry = dist.entry(edge.to.as_str()).or_insert(f64::INFINITY);
            if next < *entry {
                *entry = next;
            }
        }
    }
}
