//! Demonstration on a large, dense random graph that is never materialized.

use std::collections::HashSet;

use itertools::Itertools;
use petgraph::visit::Dfs;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::Serialize;

use crate::graph::{ComplementView, Graph, GraphView, SparseGraph};

const SIZE: usize = 2000;
const DENSITY: f64 = 0.995;
const SEED: u64 = 7;

#[derive(Serialize)]
struct Report {
    size: usize,
    density: f64,
    seed: u64,
    stored_non_edges: usize,
    edges: usize,
    min_degree: usize,
    max_degree: usize,
    mean_degree: f64,
    connected_components: usize,
}

/// A G(n, p) random graph on the nodes `0..size`, in that order.
///
/// # Panics
/// If `density` is not in `[0, 1]`.
pub fn erdos_renyi(size: usize, density: f64, rng: &mut impl Rng) -> SparseGraph<usize> {
    let mut graph = SparseGraph::with_capacity(size);
    for node in 0..size {
        graph.add_node(node);
    }
    for (a, b) in (0..size).tuple_combinations() {
        if rng.gen_bool(density) {
            graph.add_edge((a, b));
        }
    }
    graph
}

pub fn run() -> Result<(), serde_json::Error> {
    let rng = &mut Pcg64::seed_from_u64(SEED);

    // the complement of a G(n, p) graph is a G(n, 1 - p) graph, so we can draw the
    // non-edges directly
    let non_edges = erdos_renyi(SIZE, 1. - DENSITY, rng);
    tracing::info!(
        size = SIZE,
        non_edges = non_edges.edge_count(),
        "drew the non-edges"
    );

    let view = ComplementView::new(&non_edges);
    let (min_degree, max_degree, degree_sum) = view.degrees().fold(
        (usize::MAX, 0, 0),
        |(min, max, sum), (_, degree)| (min.min(degree), max.max(degree), sum + degree),
    );

    let graph = Graph::new(view);
    let mut visited = HashSet::with_capacity(SIZE);
    let mut connected_components = 0;
    for node in view.iter_nodes() {
        if visited.contains(&node) {
            continue;
        }
        connected_components += 1;
        let mut dfs = Dfs::new(&graph, node);
        while let Some(reached) = dfs.next(&graph) {
            visited.insert(reached);
        }
    }
    tracing::debug!(connected_components, "traversed the dense graph");

    let report = Report {
        size: SIZE,
        density: DENSITY,
        seed: SEED,
        stored_non_edges: non_edges.edge_count(),
        edges: view.edge_count(),
        min_degree: if SIZE == 0 { 0 } else { min_degree },
        max_degree,
        mean_degree: degree_sum as f64 / SIZE.max(1) as f64,
        connected_components,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
