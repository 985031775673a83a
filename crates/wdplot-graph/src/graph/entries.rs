//! Internal storage entries for [`Digraph`](super::Digraph).

use super::{EdgeKey, VertexId};

#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexEntry {
    pub(in crate::graph) id: VertexId,
    // Indices into `Digraph::edges`, in insertion order.
    pub(in crate::graph) out_edges: Vec<usize>,
    pub(in crate::graph) in_edges: Vec<usize>,
}

impl VertexEntry {
    pub(in crate::graph) fn new(id: VertexId) -> Self {
        Self {
            id,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) weight: f64,
}
