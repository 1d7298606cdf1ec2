//! Edge attributes of graphs whose edges are not stored.
//!
//! None of the edges of a [ComplementView](super::ComplementView) exist in memory, so
//! all of them share one attribute record, [UNIT_WEIGHT]. It is a `static` and only ever
//! handed out by shared reference, so no edge can change the apparent weight of the
//! others.

pub type Weight = usize;

/// The attribute key under which the weight of an edge is stored.
pub const WEIGHT: &str = "weight";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeAttrs {
    weight: Weight,
}

/// The attributes of every derived edge.
pub static UNIT_WEIGHT: EdgeAttrs = EdgeAttrs { weight: 1 };

impl EdgeAttrs {
    pub const fn weight(&self) -> Weight {
        self.weight
    }

    /// Look up an attribute by its key; only [WEIGHT] is known.
    pub fn get(&self, key: &str) -> Option<Weight> {
        (key == WEIGHT).then_some(self.weight)
    }
}
