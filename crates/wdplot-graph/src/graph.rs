//! The [`Digraph`] container.
//!
//! Storage follows a vector-plus-index scheme: vertices and arcs live in insertion-ordered
//! vectors, and Fx-hashed maps translate ids/keys to slots. Per-vertex incidence lists are
//! maintained eagerly since the graph is only ever grown.

use rustc_hash::FxBuildHasher;
use std::fmt;

pub mod alg;
mod edge_key;
mod entries;

pub use edge_key::EdgeKey;
use entries::{EdgeEntry, VertexEntry};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Vertex identity: a non-negative integer index.
pub type VertexId = usize;

/// A weighted arc as seen by iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Default)]
pub struct Digraph {
    vertices: Vec<VertexEntry>,
    vertex_index: HashMap<VertexId, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `v` if absent. Returns `true` when the vertex was newly inserted.
    pub fn add_vertex(&mut self, v: VertexId) -> bool {
        if self.vertex_index.contains_key(&v) {
            return false;
        }
        let idx = self.vertices.len();
        self.vertices.push(VertexEntry::new(v));
        self.vertex_index.insert(v, idx);
        true
    }

    /// Adds the arc `from -> to`, creating missing endpoints.
    ///
    /// At most one arc exists per ordered pair: re-adding an existing pair keeps its position in
    /// iteration order, replaces the weight, and returns the previous weight.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> Option<f64> {
        self.add_vertex(from);
        self.add_vertex(to);

        let key = EdgeKey::new(from, to);
        if let Some(&idx) = self.edge_index.get(&key) {
            let previous = self.edges[idx].weight;
            self.edges[idx].weight = weight;
            return Some(previous);
        }

        let edge_idx = self.edges.len();
        self.edges.push(EdgeEntry { key, weight });
        self.edge_index.insert(key, edge_idx);

        let from_ix = self.vertex_index[&from];
        let to_ix = self.vertex_index[&to];
        self.vertices[from_ix].out_edges.push(edge_idx);
        self.vertices[to_ix].in_edges.push(edge_idx);
        None
    }

    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertex_index.contains_key(&v)
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.contains_key(EdgeKey::new(from, to))
    }

    pub fn contains_key(&self, key: EdgeKey) -> bool {
        self.edge_index.contains_key(&key)
    }

    pub fn weight(&self, from: VertexId, to: VertexId) -> Option<f64> {
        self.edge_index
            .get(&EdgeKey::new(from, to))
            .map(|&idx| self.edges[idx].weight)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|v| v.id)
    }

    /// Arcs in first-insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> + '_ {
        self.edges.iter().map(Self::edge_of)
    }

    /// Dense 0-based slot of `v` in [`Digraph::vertices`] order.
    pub fn vertex_position(&self, v: VertexId) -> Option<usize> {
        self.vertex_index.get(&v).copied()
    }

    pub fn out_edges(&self, v: VertexId) -> Vec<Edge> {
        let Some(&ix) = self.vertex_index.get(&v) else {
            return Vec::new();
        };
        self.vertices[ix]
            .out_edges
            .iter()
            .map(|&e| Self::edge_of(&self.edges[e]))
            .collect()
    }

    pub fn in_edges(&self, v: VertexId) -> Vec<Edge> {
        let Some(&ix) = self.vertex_index.get(&v) else {
            return Vec::new();
        };
        self.vertices[ix]
            .in_edges
            .iter()
            .map(|&e| Self::edge_of(&self.edges[e]))
            .collect()
    }

    pub fn successors(&self, v: VertexId) -> Vec<VertexId> {
        self.out_edges(v).into_iter().map(|e| e.to).collect()
    }

    pub fn predecessors(&self, v: VertexId) -> Vec<VertexId> {
        self.in_edges(v).into_iter().map(|e| e.from).collect()
    }

    pub fn self_loop_count(&self) -> usize {
        self.edges.iter().filter(|e| e.key.is_self_loop()).count()
    }

    fn edge_of(entry: &EdgeEntry) -> Edge {
        Edge {
            from: entry.key.from,
            to: entry.key.to,
            weight: entry.weight,
        }
    }
}

impl fmt::Display for Digraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Digraph (V={}, E={})",
            self.vertex_count(),
            self.edge_count()
        )?;
        let mut ids: Vec<VertexId> = self.vertices().collect();
        ids.sort_unstable();
        for v in ids {
            write!(f, "Vertex {v}: ")?;
            let out = self.out_edges(v);
            for (i, e) in out.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "--{}-->({})", crate::format_weight(e.weight), e.to)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
