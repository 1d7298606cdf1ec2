//! The implicit complement of a graph.
//!
//! Instead of storing a dense graph, only its non-edges are stored in a [SparseStore];
//! the [ComplementView] answers all queries as if the dense graph was stored: the
//! neighbours of a node `n` are all nodes of the store, minus the ones recorded for `n`,
//! minus `n` itself. Nothing is cached, every query recomputes the set difference, which
//! is linear in the number of nodes.

use hashbrown::HashSet;

use super::{
    InconsistentStore, NodeNotFound, SparseGraph,
    sparse::{Neighbourhood, SparseStore},
    view::GraphView,
};

/// Read-only lens over a store of non-edges; cf. the module documentation.
///
/// The store should be symmetric (cf. [SparseStore::check]), otherwise the derived
/// neighbourhoods are inconsistent with each other.
pub struct ComplementView<'a, S> {
    store: &'a S,
}

impl<S> Clone for ComplementView<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ComplementView<'_, S> {}

impl<S: SparseStore> std::fmt::Debug for ComplementView<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplementView")
            .field("nodes", &self.store.node_count())
            .finish_non_exhaustive()
    }
}

impl<'a, S: SparseStore> ComplementView<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Like [ComplementView::new], but check the store first.
    pub fn checked(store: &'a S) -> Result<Self, InconsistentStore<S::Node>> {
        store.check().inspect_err(|err| {
            tracing::debug!(%err, "refusing to view an inconsistent store of non-edges")
        })?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// The number of edges of the dense graph. Only exact for a symmetric store.
    pub fn edge_count(&self) -> usize {
        let num_nodes = self.store.node_count();
        let non_edge_ends: usize = self
            .store
            .iter_nodes()
            .map(|node| {
                self.store.recorded(node).map_or(0, |recorded| {
                    recorded
                        .iter()
                        .filter(|&&other| {
                            other != node && self.store.contains_node(other)
                        })
                        .count()
                })
            })
            .sum();
        (num_nodes * num_nodes.saturating_sub(1) - non_edge_ends) / 2
    }

    /// The store of non-edges of the induced subgraph on `nodes`, in store order.
    /// Nodes not in the store are ignored. View it again to get the induced subgraph.
    pub fn subgraph(
        &self,
        nodes: impl IntoIterator<Item = S::Node>,
    ) -> SparseGraph<S::Node> {
        let keep: HashSet<S::Node> =
            nodes.into_iter().filter(|node| self.store.contains_node(*node)).collect();
        let mut ret = SparseGraph::with_capacity(keep.len());
        let kept = self.store.iter_nodes().filter(|node| keep.contains(node));
        for node in kept.clone() {
            ret.add_node(node);
        }
        for node in kept {
            if let Some(recorded) = self.store.recorded(node) {
                ret.neighbours_mut_or_insert(node)
                    .extend(recorded.iter().copied().filter(|n| keep.contains(n)));
            }
        }
        tracing::debug!(nodes = ret.len(), "built induced store of non-edges");
        ret
    }

    /// Materialize the dense graph; only sensible for small graphs.
    pub fn to_dense(&self) -> SparseGraph<S::Node> {
        let mut ret = SparseGraph::with_capacity(self.store.node_count());
        for node in self.store.iter_nodes() {
            ret.add_node(node);
        }
        for (node, neighbours) in self.adjacency() {
            ret.neighbours_mut_or_insert(node).extend(neighbours);
        }
        ret
    }
}

impl<'a, S: SparseStore> GraphView for ComplementView<'a, S> {
    type Node = S::Node;
    type Nodes<'b>
        = S::Nodes<'a>
    where
        Self: 'b;
    type Neighbors<'b>
        = Complement<'a, S>
    where
        Self: 'b;

    #[inline]
    fn node_count(&self) -> usize {
        self.store.node_count()
    }

    #[inline]
    fn iter_nodes(&self) -> S::Nodes<'a> {
        self.store.iter_nodes()
    }

    #[inline]
    fn contains_node(&self, node: S::Node) -> bool {
        self.store.contains_node(node)
    }

    fn neighbors(
        &self,
        node: S::Node,
    ) -> Result<Complement<'a, S>, NodeNotFound<S::Node>> {
        let recorded = self.store.recorded(node).ok_or(NodeNotFound(node))?;
        Ok(Complement { node, recorded, universe: self.store.iter_nodes() })
    }

    fn has_edge(&self, a: S::Node, b: S::Node) -> bool {
        a != b
            && self.store.contains_node(b)
            && self.store.recorded(a).is_some_and(|recorded| !recorded.contains(&b))
    }
}

/// The neighbours of a node in a [ComplementView], computed while iterating.
pub struct Complement<'a, S: SparseStore + 'a> {
    node: S::Node,
    recorded: &'a Neighbourhood<S::Node>,
    universe: S::Nodes<'a>,
}

impl<'a, S: SparseStore + 'a> Complement<'a, S> {
    /// The node whose neighbours these are.
    pub fn node(&self) -> S::Node {
        self.node
    }
}

impl<'a, S: SparseStore + 'a> Clone for Complement<'a, S> {
    fn clone(&self) -> Self {
        Self { node: self.node, recorded: self.recorded, universe: self.universe.clone() }
    }
}

impl<'a, S: SparseStore + 'a> Iterator for Complement<'a, S> {
    type Item = S::Node;

    fn next(&mut self) -> Option<S::Node> {
        let (node, recorded) = (self.node, self.recorded);
        self.universe.find(|other| *other != node && !recorded.contains(other))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.universe.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::{
        graph::{EdgeAttrs, UNIT_WEIGHT, WEIGHT, test_utils::*},
        run::erdos_renyi,
    };

    #[test]
    fn small_example() {
        let store = small_non_edges();
        let view = ComplementView::new(&store);

        assert_eq!(sorted(view.neighbors(0).unwrap()), sorted([2, 3]));
        assert_eq!(sorted(view.neighbors(1).unwrap()), sorted([2, 3]));
        assert_eq!(sorted(view.neighbors(2).unwrap()), sorted([0, 1, 3]));
        assert_eq!(sorted(view.neighbors(3).unwrap()), sorted([0, 1, 2]));

        assert_eq!(
            view.degrees().collect::<Vec<_>>(),
            vec![(0, 2), (1, 2), (2, 3), (3, 3)]
        );
        assert_eq!(view.degrees().map(|(_, d)| d).sum::<usize>(), 10);
        assert_eq!(view.edge_count(), 5);

        assert!(view.has_edge(0, 2));
        assert!(!view.has_edge(0, 1));
        assert!(!view.has_edge(2, 2));
        assert!(!view.has_edge(2, 7));
        assert_eq!(view.edge_weight(3, 0), Some(&UNIT_WEIGHT));
        assert_eq!(view.edge_weight(1, 0), None);
    }

    #[test]
    fn borrowed_store() {
        let store = small_non_edges();
        let borrowed = &store;
        let view: ComplementView<'_, &SparseGraph<usize>> =
            ComplementView::new(&borrowed);

        assert_eq!(view.node_count(), 4);
        assert_eq!(sorted(view.neighbors(0).unwrap()), sorted([2, 3]));
        assert_eq!(sorted(view.neighbors(2).unwrap()), sorted([0, 1, 3]));
        assert_eq!(
            view.degrees().collect::<Vec<_>>(),
            vec![(0, 2), (1, 2), (2, 3), (3, 3)]
        );
        assert_eq!(view.edge_count(), 5);
        assert!(!view.has_edge(0, 1));
        assert!(view.degree(4).is_err());
        assert!(ComplementView::checked(&borrowed).is_ok());
        assert_eq!(view.to_dense(), ComplementView::new(&store).to_dense());
    }

    #[test]
    fn lazy_sequences_are_restartable() {
        let store = small_non_edges();
        let view = ComplementView::new(&store);

        let neighbours = view.neighbors(2).unwrap();
        assert_eq!(neighbours.node(), 2);
        assert_eq!(neighbours.clone().count(), 3);
        assert_eq!(
            neighbours.clone().collect::<Vec<_>>(),
            neighbours.collect::<Vec<_>>()
        );

        let adjacency = view.adjacency();
        assert_eq!(adjacency.clone().count(), 4);
        assert_eq!(
            adjacency.clone().map(|(n, _)| n).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            adjacency.map(|(n, nbrs)| (n, sorted(nbrs))).collect::<Vec<_>>(),
            vec![
                (0, sorted([2, 3])),
                (1, sorted([2, 3])),
                (2, sorted([0, 1, 3])),
                (3, sorted([0, 1, 2])),
            ]
        );
    }

    #[test]
    fn missing_and_isolated_nodes() {
        let store = store!((0, [1, 2]), (1, [0, 2]), (2, [0, 1]),);
        let view = ComplementView::new(&store);

        // every node is isolated in the dense graph, but still present
        for node in 0..3 {
            assert_eq!(view.neighbors(node).unwrap().count(), 0);
            assert_eq!(view.degree(node), Ok(0));
        }
        assert!(matches!(view.neighbors(3), Err(NodeNotFound(3))));
        assert!(view.neighbor_map(3).is_err());
        assert_eq!(view.degree(3), Err(NodeNotFound(3)));
        assert_eq!(view.weighted_degree(3, WEIGHT), Err(NodeNotFound(3)));
        assert_eq!(NodeNotFound(3).to_string(), "node 3 not found in the graph");
        assert_eq!(view.degrees_of([3, 0]).collect::<Vec<_>>(), vec![(0, 0)]);

        let empty = SparseGraph::<usize>::new();
        let view = ComplementView::new(&empty);
        assert_eq!(view.degrees().count(), 0);
        assert_eq!(view.edge_count(), 0);
    }

    #[test]
    fn neighbor_map() {
        let store = small_non_edges();
        let view = ComplementView::new(&store);
        let map = view.neighbor_map(0).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(2), Some(&UNIT_WEIGHT));
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(0), None);
        assert!(map.contains_key(3));
        assert_eq!(sorted(map.keys()), sorted([2, 3]));
        // all derived edges share the one record
        let records: Vec<&EdgeAttrs> = map.iter().map(|(_, attrs)| attrs).collect();
        assert!(records.iter().all(|attrs| std::ptr::eq(*attrs, &UNIT_WEIGHT)));
    }

    #[test]
    fn self_loop_adjustment_is_unreachable() {
        // even if the store lists a node as its own non-neighbour, or does not list it
        // at all, the node is never its own neighbour
        let store = store!((0, [0]), (1, []), (2, [2, 1]), (3, []),);
        let view = ComplementView::new(&store);
        for node in 0..4 {
            assert!(view.neighbors(node).unwrap().all(|n| n != node));
            assert_eq!(view.degree(node), Ok(view.neighbors(node).unwrap().count()));
        }
        assert_eq!(view.degree(0), Ok(3));
        assert_eq!(view.degree(2), Ok(2));
        assert_eq!(view.edge_count(), 5);
    }

    #[test]
    fn weighted_degree_equals_degree() {
        let store = erdos_renyi(30, 0.2, &mut rng(3));
        let view = ComplementView::new(&store);
        for node in view.iter_nodes() {
            let degree = view.degree(node).unwrap();
            assert_eq!(view.weighted_degree(node, WEIGHT), Ok(degree));
            assert_eq!(view.weighted_degree(node, "capacity"), Ok(degree));
            assert_eq!(view.weighted_degree(node, ""), Ok(degree));
        }
        assert_eq!(
            view.degrees().weighted("capacity").collect::<Vec<_>>(),
            view.degrees().collect::<Vec<_>>()
        );
    }

    #[test]
    fn agrees_with_explicit_graph() {
        let rng = &mut rng(42);
        for size in [0, 1, 2, 5, 17, 40] {
            let density = rng.gen_range(0.0..=1.0);
            let dense = erdos_renyi(size, density, rng);
            let non_edges = dense.complement();
            let view = ComplementView::new(&non_edges);

            assert_eq!(view.node_count(), dense.len());
            assert_eq!(view.edge_count(), dense.edge_count());
            assert_eq!(view.to_dense(), dense);

            for node in dense.iter_nodes() {
                assert_eq!(
                    sorted(view.neighbors(node).unwrap()),
                    sorted(dense.neighbors(node).unwrap())
                );
                assert_eq!(view.degree(node), dense.degree(node));
                for other in dense.iter_nodes() {
                    assert_eq!(view.has_edge(node, other), dense.has_edge(node, other));
                }
            }

            assert_eq!(
                view.degrees().map(|(_, d)| d).sum::<usize>(),
                dense.degrees().map(|(_, d)| d).sum::<usize>()
            );
            assert_eq!(
                view.degrees().map(|(_, d)| d).sum::<usize>(),
                2 * dense.edge_count()
            );

            let subset: Vec<usize> = (0..size).filter(|_| rng.gen_bool(0.5)).collect();
            assert_eq!(
                view.degrees_of(subset.iter().copied()).collect::<Vec<_>>(),
                dense.degrees_of(subset.iter().copied()).collect::<Vec<_>>()
            );
            assert_eq!(
                view.degrees_of(subset.iter().copied()).map(|(_, d)| d).sum::<usize>(),
                subset.iter().map(|&n| dense.degree(n).unwrap()).sum::<usize>()
            );
        }
    }

    #[test]
    fn subgraph() {
        let store = small_non_edges();
        let view = ComplementView::new(&store);

        let sub_store = view.subgraph([3, 1, 0, 8]);
        assert_eq!(sub_store.iter_nodes().collect::<Vec<_>>(), vec![0, 1, 3]);
        let sub_view = ComplementView::new(&sub_store);
        assert_eq!(sorted(sub_view.neighbors(0).unwrap()), sorted([3]));
        assert_eq!(sorted(sub_view.neighbors(3).unwrap()), sorted([0, 1]));
        assert_eq!(sub_view.to_dense(), view.to_dense().subgraph([0, 1, 3]));
    }

    #[test]
    fn checked() {
        let store = small_non_edges();
        assert!(ComplementView::checked(&store).is_ok());

        let asymmetric = store!((0, [1]), (1, []),);
        assert_eq!(
            ComplementView::checked(&asymmetric).unwrap_err(),
            InconsistentStore::IncompatibleNeighbourhoods(0, 1)
        );
        // the unchecked view silently derives inconsistent neighbourhoods
        let view = ComplementView::new(&asymmetric);
        assert!(std::ptr::eq(view.store(), &asymmetric));
        assert!(!view.has_edge(0, 1));
        assert!(view.has_edge(1, 0));
    }
}
