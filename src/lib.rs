//! Implicit views of the complement of a graph.
//!
//! A dense graph is represented by the (few) edges it does not have, stored in a
//! [SparseGraph](graph::SparseGraph); a [ComplementView](graph::ComplementView) over
//! that store answers neighbour, degree and adjacency queries as if the dense graph was
//! stored explicitly.

pub mod graph;
pub mod run;
