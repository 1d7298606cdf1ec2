use std::collections::HashSet;

use petgraph::{
    Undirected,
    visit::{
        GraphBase, GraphProp, IntoNeighbors, IntoNodeIdentifiers, NodeCount, Visitable,
    },
};

use super::{Edge, view::GraphView};

/// Newtype around `impl `[GraphView] types that supports foreign traits, so that
/// petgraph's traversals (`Dfs`, `Bfs`, `has_path_connecting`, ...) run on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Graph<G>(pub G);

impl<G> Graph<G> {
    pub fn new(graph: G) -> Self {
        Self(graph)
    }
}

impl<G: GraphView> GraphBase for Graph<G> {
    type NodeId = G::Node;
    type EdgeId = Edge<G::Node>;
}

impl<G: GraphView> GraphProp for Graph<G> {
    type EdgeType = Undirected;
}

impl<G: GraphView> NodeCount for Graph<G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }
}

impl<G: GraphView> Visitable for Graph<G> {
    type Map = HashSet<G::Node>;

    fn visit_map(&self) -> Self::Map {
        HashSet::with_capacity(self.0.node_count())
    }

    fn reset_map(&self, map: &mut Self::Map) {
        map.clear();
    }
}

impl<'a, G: GraphView> IntoNeighbors for &'a Graph<G> {
    type Neighbors = G::Neighbors<'a>;

    /// # Panics
    /// If `a` is not a node of the graph; petgraph only passes nodes it got from the
    /// graph.
    fn neighbors(self, a: Self::NodeId) -> Self::Neighbors {
        self.0.neighbors(a).unwrap_or_else(|err| panic!("invalid node: {err}"))
    }
}

impl<'a, G: GraphView> IntoNodeIdentifiers for &'a Graph<G> {
    type NodeIdentifiers = G::Nodes<'a>;

    fn node_identifiers(self) -> Self::NodeIdentifiers {
        self.0.iter_nodes()
    }
}
