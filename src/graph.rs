use std::{fmt::Debug, hash::Hash};

// Edge is undirected; (a, b) and (b, a) denote the same edge
pub type Edge<N> = (N, N);

/// Anything that can be used to identify a node.
pub trait NodeId: Copy + Eq + Hash + Debug {}

impl<N: Copy + Eq + Hash + Debug> NodeId for N {}

/// A query referenced a node that is not a key of the graph.
///
/// This is not the same as an isolated node: an isolated node is a key with an empty
/// neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("node {0:?} not found in the graph")]
pub struct NodeNotFound<N>(pub N);

/// The recorded adjacencies do not describe a simple undirected graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InconsistentStore<N> {
    #[error("self loop detected on node {0:?}")]
    SelfLoop(N),
    #[error("incompatible neighbourhoods between the nodes {0:?} and {1:?}")]
    IncompatibleNeighbourhoods(N, N),
}

impl<N> InconsistentStore<N> {
    pub fn map<M>(self, f: impl Fn(N) -> M) -> InconsistentStore<M> {
        match self {
            InconsistentStore::SelfLoop(node) => InconsistentStore::SelfLoop(f(node)),
            InconsistentStore::IncompatibleNeighbourhoods(a, b) => {
                InconsistentStore::IncompatibleNeighbourhoods(f(a), f(b))
            },
        }
    }
}

pub mod attrs;
pub mod complement;
pub mod impl_petgraph;
pub mod sparse;
pub mod view;

pub use attrs::{EdgeAttrs, UNIT_WEIGHT, WEIGHT, Weight};
pub use complement::{Complement, ComplementView};
pub use impl_petgraph::Graph;
pub use sparse::{Neighbourhood, SparseGraph, SparseStore};
pub use view::{Adjacency, Degrees, GraphView, Nbunch, NeighborMap};
