use std::iter::Copied;

use hashbrown::{HashSet, hash_set};
use indexmap::{IndexMap, map::Keys};
use itertools::Itertools;

use super::{Edge, InconsistentStore, NodeId, NodeNotFound, view::GraphView};

pub type Neighbourhood<N> = HashSet<N>;

/// What a [ComplementView](super::ComplementView) needs from the graph that records
/// the non-edges: the node universe and, per node, the recorded neighbourhood.
///
/// The recorded neighbourhoods are expected to be symmetric. Nothing relies on it for
/// memory safety, but an asymmetric store makes the derived neighbourhoods disagree
/// with each other; [SparseStore::check] detects that.
pub trait SparseStore {
    type Node: NodeId;
    /// Must yield the same order every time as long as the store is not mutated.
    type Nodes<'a>: Iterator<Item = Self::Node> + Clone
    where
        Self: 'a;

    fn node_count(&self) -> usize;

    fn iter_nodes(&self) -> Self::Nodes<'_>;

    /// [None] if and only if `node` is not in the store.
    fn recorded(&self, node: Self::Node) -> Option<&Neighbourhood<Self::Node>>;

    fn contains_node(&self, node: Self::Node) -> bool {
        self.recorded(node).is_some()
    }

    /// Check whether the recorded neighbourhoods describe a simple undirected graph.
    fn check(&self) -> Result<(), InconsistentStore<Self::Node>> {
        for node in self.iter_nodes() {
            // the node comes from the store itself
            let Some(recorded) = self.recorded(node) else {
                continue;
            };
            for &neighbour in recorded {
                if node == neighbour {
                    return Err(InconsistentStore::SelfLoop(node));
                }
                if !self.recorded(neighbour).is_some_and(|n| n.contains(&node)) {
                    return Err(InconsistentStore::IncompatibleNeighbourhoods(
                        node, neighbour,
                    ));
                }
            }
        }
        Ok(())
    }
}

/// An explicitly stored undirected graph, keeping the nodes in insertion order.
///
/// Used as the store of non-edges behind a [ComplementView](super::ComplementView), but
/// it is an ordinary (sparse) graph and implements [GraphView] itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseGraph<N: NodeId> {
    nodes: IndexMap<N, Neighbourhood<N>>,
}

impl<N: NodeId> Default for SparseGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> SparseGraph<N> {
    pub fn new() -> Self {
        Self { nodes: IndexMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: IndexMap::with_capacity(capacity) }
    }

    /// Returns whether the node is new.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, HashSet::new());
        true
    }

    pub fn add_edge(&mut self, (a, b): Edge<N>) {
        self.nodes.entry(a).or_default().insert(b);
        self.nodes.entry(b).or_default().insert(a);
    }

    pub fn from_edges(edges: impl IntoIterator<Item = Edge<N>>) -> Self {
        let mut ret = Self::new();
        for edge in edges {
            ret.add_edge(edge);
        }
        ret
    }

    /// Every neighbour relation is recorded in both directions.
    pub fn from_adjacency<A, I>(adj: A) -> Self
    where
        A: IntoIterator<Item = (N, I)>,
        I: IntoIterator<Item = N>,
    {
        let mut ret = Self::new();
        for (node, neighbours) in adj {
            ret.add_node(node);
            for neighbour in neighbours {
                ret.add_edge((node, neighbour));
            }
        }
        ret
    }

    /// Record exactly what is given; neighbours that are not yet nodes are added as
    /// nodes. The result might not be a valid graph, cf. [SparseStore::check].
    pub fn from_symmetric_adjacency_unchecked<A, I>(adj: A) -> Self
    where
        A: IntoIterator<Item = (N, I)>,
        I: IntoIterator<Item = N>,
    {
        let mut ret = Self::new();
        for (node, neighbours) in adj {
            ret.add_node(node);
            for neighbour in neighbours {
                ret.add_node(neighbour);
                ret.neighbours_mut_or_insert(node).insert(neighbour);
            }
        }
        ret
    }

    pub(crate) fn neighbours_mut_or_insert(&mut self, node: N) -> &mut Neighbourhood<N> {
        self.nodes.entry(node).or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn recorded(&self, node: N) -> Option<&Neighbourhood<N>> {
        self.nodes.get(&node)
    }

    pub fn iter_nodes(&self) -> Copied<Keys<'_, N, Neighbourhood<N>>> {
        self.nodes.keys().copied()
    }

    pub fn iter_with_neighbourhoods(
        &self,
    ) -> impl Iterator<Item = (N, &Neighbourhood<N>)> + Clone {
        self.nodes.iter().map(|(&node, neighbours)| (node, neighbours))
    }

    /// Number of unordered pairs; a self-loop counts once. Only meaningful for a
    /// symmetric store.
    pub fn edge_count(&self) -> usize {
        let (ends, loops) = self.iter_with_neighbourhoods().fold(
            (0, 0),
            |(ends, loops), (node, neighbours)| {
                (ends + neighbours.len(), loops + usize::from(neighbours.contains(&node)))
            },
        );
        (ends + loops) / 2
    }

    /// Remove self-loops and add the missing reverse relations.
    pub fn correct(&mut self) {
        let nodes = self.iter_nodes().collect::<Vec<_>>();
        for node in nodes {
            let neighbours = self.neighbours_mut_or_insert(node);
            neighbours.remove(&node);
            // PERF: have to clone here
            for neighbour in neighbours.clone() {
                self.neighbours_mut_or_insert(neighbour).insert(node);
            }
        }
    }

    /// The graph on the same nodes (in the same order) where two distinct nodes are
    /// adjacent if and only if they are not adjacent here.
    pub fn complement(&self) -> Self {
        let nodes = self
            .iter_with_neighbourhoods()
            .map(|(node, neighbours)| {
                let complemented: Neighbourhood<N> = self
                    .iter_nodes()
                    .filter(|other| *other != node && !neighbours.contains(other))
                    .collect();
                (node, complemented)
            })
            .collect();
        Self { nodes }
    }

    /// The induced subgraph on `nodes`, keeping this graph's node order. Nodes that are
    /// not in the graph are ignored.
    pub fn subgraph(&self, nodes: impl IntoIterator<Item = N>) -> Self {
        let keep: HashSet<N> =
            nodes.into_iter().filter(|node| self.contains_node(*node)).collect();
        let nodes = self
            .iter_with_neighbourhoods()
            .filter(|(node, _)| keep.contains(node))
            .map(|(node, neighbours)| {
                let kept: Neighbourhood<N> =
                    neighbours.iter().copied().filter(|n| keep.contains(n)).collect();
                (node, kept)
            })
            .collect();
        Self { nodes }
    }

    /// All edges, each once; a self-loop is reported as `(node, node)`.
    pub fn edges(&self) -> Vec<Edge<N>> {
        let positions: IndexMap<N, usize> =
            self.iter_nodes().enumerate().map(|(pos, node)| (node, pos)).collect();
        self.iter_with_neighbourhoods()
            .flat_map(|(node, neighbours)| neighbours.iter().map(move |&n| (node, n)))
            .filter(|(a, b)| positions.get(a) <= positions.get(b))
            .sorted_by_key(|(a, b)| (positions.get(a), positions.get(b)))
            .collect()
    }
}

impl<N: NodeId> SparseStore for SparseGraph<N> {
    type Node = N;
    type Nodes<'a>
        = Copied<Keys<'a, N, Neighbourhood<N>>>
    where
        Self: 'a;

    #[inline]
    fn node_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn iter_nodes(&self) -> Self::Nodes<'_> {
        SparseGraph::iter_nodes(self)
    }
    #[inline]
    fn recorded(&self, node: N) -> Option<&Neighbourhood<N>> {
        SparseGraph::recorded(self, node)
    }
    #[inline]
    fn contains_node(&self, node: N) -> bool {
        SparseGraph::contains_node(self, node)
    }
}

impl<S: SparseStore + ?Sized> SparseStore for &S {
    type Node = S::Node;
    type Nodes<'a>
        = S::Nodes<'a>
    where
        Self: 'a;

    #[inline]
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
    #[inline]
    fn iter_nodes(&self) -> Self::Nodes<'_> {
        (**self).iter_nodes()
    }
    #[inline]
    fn recorded(&self, node: S::Node) -> Option<&Neighbourhood<S::Node>> {
        (**self).recorded(node)
    }
    #[inline]
    fn contains_node(&self, node: S::Node) -> bool {
        (**self).contains_node(node)
    }
    #[inline]
    fn check(&self) -> Result<(), InconsistentStore<S::Node>> {
        (**self).check()
    }
}

impl<N: NodeId> GraphView for SparseGraph<N> {
    type Node = N;
    type Nodes<'a>
        = Copied<Keys<'a, N, Neighbourhood<N>>>
    where
        Self: 'a;
    type Neighbors<'a>
        = Copied<hash_set::Iter<'a, N>>
    where
        Self: 'a;

    fn node_count(&self) -> usize {
        self.len()
    }

    fn iter_nodes(&self) -> Self::Nodes<'_> {
        SparseGraph::iter_nodes(self)
    }

    fn contains_node(&self, node: N) -> bool {
        SparseGraph::contains_node(self, node)
    }

    fn neighbors(&self, node: N) -> Result<Self::Neighbors<'_>, NodeNotFound<N>> {
        self.recorded(node)
            .map(|neighbours| neighbours.iter().copied())
            .ok_or(NodeNotFound(node))
    }

    fn has_edge(&self, a: N, b: N) -> bool {
        self.recorded(a).is_some_and(|neighbours| neighbours.contains(&b))
    }
}
