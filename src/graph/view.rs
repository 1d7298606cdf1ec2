//! The read-only query surface shared by explicitly stored graphs and computed views.
//!
//! Algorithms should be written against [GraphView] (or against the petgraph traits via
//! [Graph](super::Graph)), never against a concrete graph type, so that they run
//! unmodified on a [SparseGraph](super::SparseGraph) as well as on a
//! [ComplementView](super::ComplementView).
//!
//! All sequences returned here are lazy: nothing is computed before iteration. They can
//! be cloned, and every call creates a fresh sequence, so results can be iterated as
//! often as needed.

use super::{
    NodeId, NodeNotFound,
    attrs::{EdgeAttrs, UNIT_WEIGHT, Weight},
};

pub trait GraphView {
    type Node: NodeId;
    type Nodes<'a>: Iterator<Item = Self::Node> + Clone
    where
        Self: 'a;
    /// Unordered; the order need not be stable across calls.
    type Neighbors<'a>: Iterator<Item = Self::Node> + Clone
    where
        Self: 'a;

    fn node_count(&self) -> usize;

    fn iter_nodes(&self) -> Self::Nodes<'_>;

    fn contains_node(&self, node: Self::Node) -> bool;

    fn neighbors(
        &self,
        node: Self::Node,
    ) -> Result<Self::Neighbors<'_>, NodeNotFound<Self::Node>>;

    /// `false` if one of the nodes is not in the graph.
    fn has_edge(&self, a: Self::Node, b: Self::Node) -> bool;

    /// The attributes of the edge `(a, b)`, if it exists.
    fn edge_weight(&self, a: Self::Node, b: Self::Node) -> Option<&'static EdgeAttrs> {
        self.has_edge(a, b).then_some(&UNIT_WEIGHT)
    }

    /// The neighbours of `node`, each mapped to the attributes of the connecting edge.
    fn neighbor_map(
        &self,
        node: Self::Node,
    ) -> Result<NeighborMap<'_, Self>, NodeNotFound<Self::Node>> {
        Ok(NeighborMap { graph: self, node, neighbors: self.neighbors(node)? })
    }

    /// The number of neighbours, where a self-loop counts twice.
    fn degree(&self, node: Self::Node) -> Result<usize, NodeNotFound<Self::Node>> {
        let (len, self_loop) = self
            .neighbors(node)?
            .fold((0, false), |(len, self_loop), n| (len + 1, self_loop || n == node));
        Ok(len + usize::from(self_loop))
    }

    /// Like [GraphView::degree], but summing up the attribute `weight` of the edges.
    /// Edges without that attribute count with weight 1.
    fn weighted_degree(
        &self,
        node: Self::Node,
        weight: &str,
    ) -> Result<Weight, NodeNotFound<Self::Node>> {
        let mut degree = 0;
        for (neighbour, attrs) in self.neighbor_map(node)?.iter() {
            let w = attrs.get(weight).unwrap_or(1);
            degree += w;
            if neighbour == node {
                degree += w;
            }
        }
        Ok(degree)
    }

    /// The degrees of all nodes, in node order.
    fn degrees(&self) -> Degrees<'_, Self, Self::Nodes<'_>> {
        Degrees { graph: self, nodes: self.iter_nodes(), weight: None }
    }

    /// The degrees of the given nodes, in the given order; nodes that are not in the
    /// graph are skipped. The degrees are still computed with respect to the whole
    /// graph, not only the given nodes.
    fn degrees_of<I>(
        &self,
        nbunch: I,
    ) -> Degrees<'_, Self, Nbunch<'_, Self, I::IntoIter>>
    where
        I: IntoIterator<Item = Self::Node>,
    {
        Degrees { graph: self, nodes: self.nbunch_iter(nbunch), weight: None }
    }

    /// Filter `nbunch` down to the nodes that are in the graph.
    fn nbunch_iter<I>(&self, nbunch: I) -> Nbunch<'_, Self, I::IntoIter>
    where
        I: IntoIterator<Item = Self::Node>,
    {
        Nbunch { graph: self, nodes: nbunch.into_iter() }
    }

    /// Every node together with its neighbours, in node order.
    fn adjacency(&self) -> Adjacency<'_, Self> {
        Adjacency { graph: self, nodes: self.iter_nodes() }
    }
}

/// A node's neighbours mapped to edge attributes; cf. [GraphView::neighbor_map].
pub struct NeighborMap<'g, G: GraphView + ?Sized + 'g> {
    graph: &'g G,
    node: G::Node,
    neighbors: G::Neighbors<'g>,
}

impl<'g, G: GraphView + ?Sized + 'g> NeighborMap<'g, G> {
    pub fn node(&self) -> G::Node {
        self.node
    }

    pub fn get(&self, neighbour: G::Node) -> Option<&'static EdgeAttrs> {
        self.graph.edge_weight(self.node, neighbour)
    }

    pub fn contains_key(&self, neighbour: G::Node) -> bool {
        self.graph.has_edge(self.node, neighbour)
    }

    pub fn keys(&self) -> G::Neighbors<'g> {
        self.neighbors.clone()
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (G::Node, &'static EdgeAttrs)> + Clone + 'g {
        self.neighbors.clone().map(|n| (n, &UNIT_WEIGHT))
    }

    pub fn len(&self) -> usize {
        self.neighbors.clone().count()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.clone().next().is_none()
    }
}

impl<'g, G: GraphView + ?Sized + 'g> Clone for NeighborMap<'g, G> {
    fn clone(&self) -> Self {
        Self { graph: self.graph, node: self.node, neighbors: self.neighbors.clone() }
    }
}

/// Lazy `(node, degree)` pairs; cf. [GraphView::degrees].
///
/// Weighted and unweighted degrees share the item type: an unweighted degree is the
/// weighted degree with all weights 1, so it is a [Weight] as well. This relies on
/// [Weight] being `usize`; otherwise the two branches of `next` do not unify.
pub struct Degrees<'g, G: ?Sized, I> {
    graph: &'g G,
    nodes: I,
    weight: Option<&'g str>,
}

impl<'g, G: GraphView + ?Sized, I> Degrees<'g, G, I> {
    /// Switch to weighted degrees, cf. [GraphView::weighted_degree].
    pub fn weighted(self, weight: &'g str) -> Self {
        Self { weight: Some(weight), ..self }
    }
}

impl<G: ?Sized, I: Clone> Clone for Degrees<'_, G, I> {
    fn clone(&self) -> Self {
        Self { graph: self.graph, nodes: self.nodes.clone(), weight: self.weight }
    }
}

impl<G, I> Iterator for Degrees<'_, G, I>
where
    G: GraphView + ?Sized,
    I: Iterator<Item = G::Node>,
{
    type Item = (G::Node, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        for node in self.nodes.by_ref() {
            let degree = match self.weight {
                None => self.graph.degree(node),
                Some(weight) => self.graph.weighted_degree(node, weight),
            };
            if let Ok(degree) = degree {
                return Some((node, degree));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.nodes.size_hint().1)
    }
}

/// The nodes of an iterator that are in the graph; cf. [GraphView::nbunch_iter].
pub struct Nbunch<'g, G: ?Sized, I> {
    graph: &'g G,
    nodes: I,
}

impl<G: ?Sized, I: Clone> Clone for Nbunch<'_, G, I> {
    fn clone(&self) -> Self {
        Self { graph: self.graph, nodes: self.nodes.clone() }
    }
}

impl<G, I> Iterator for Nbunch<'_, G, I>
where
    G: GraphView + ?Sized,
    I: Iterator<Item = G::Node>,
{
    type Item = G::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.nodes.find(|node| graph.contains_node(*node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.nodes.size_hint().1)
    }
}

/// Lazy `(node, neighbours)` pairs; cf. [GraphView::adjacency].
pub struct Adjacency<'g, G: GraphView + ?Sized + 'g> {
    graph: &'g G,
    nodes: G::Nodes<'g>,
}

impl<'g, G: GraphView + ?Sized + 'g> Clone for Adjacency<'g, G> {
    fn clone(&self) -> Self {
        Self { graph: self.graph, nodes: self.nodes.clone() }
    }
}

impl<'g, G: GraphView + ?Sized + 'g> Iterator for Adjacency<'g, G> {
    type Item = (G::Node, G::Neighbors<'g>);

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.nodes
            .by_ref()
            .find_map(|node| {
                graph.neighbors(node).ok().map(|neighbors| (node, neighbors))
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}
