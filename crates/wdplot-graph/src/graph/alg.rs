//! Helper algorithms over the undirected projection of a [`Digraph`].

use super::{Digraph, VertexId};
use std::collections::VecDeque;

/// Undirected simple graph derived from a [`Digraph`], indexed densely.
///
/// Slot `i` corresponds to the `i`-th vertex of [`Digraph::vertices`]. Self-loops are dropped
/// and the arcs `u -> v` / `v -> u` collapse into one undirected edge. Neighbour lists keep the
/// order in which arcs were first inserted.
#[derive(Debug, Clone, Default)]
pub struct UndirectedProjection {
    pub vertices: Vec<VertexId>,
    pub adjacency: Vec<Vec<usize>>,
    pub edges: Vec<(usize, usize)>,
}

impl UndirectedProjection {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

pub fn undirected_simple_adjacency(g: &Digraph) -> UndirectedProjection {
    let vertices: Vec<VertexId> = g.vertices().collect();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut seen: hashbrown::HashSet<(usize, usize), rustc_hash::FxBuildHasher> =
        hashbrown::HashSet::default();

    for e in g.edges() {
        if e.is_self_loop() {
            continue;
        }
        let (Some(a), Some(b)) = (g.vertex_position(e.from), g.vertex_position(e.to)) else {
            debug_assert!(false, "edge endpoint missing from vertex index");
            continue;
        };
        let key = (a.min(b), a.max(b));
        if !seen.insert(key) {
            continue;
        }
        adjacency[a].push(b);
        adjacency[b].push(a);
        edges.push((a, b));
    }

    UndirectedProjection {
        vertices,
        adjacency,
        edges,
    }
}

/// Weakly connected components, each listed in discovery order starting from the earliest
/// vertex of [`Digraph::vertices`].
pub fn components(g: &Digraph) -> Vec<Vec<VertexId>> {
    let projection = undirected_simple_adjacency(g);
    let mut seen = vec![false; projection.vertex_count()];
    let mut out: Vec<Vec<VertexId>> = Vec::new();

    for start in 0..projection.vertex_count() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<VertexId> = Vec::new();
        let mut q: VecDeque<usize> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(projection.vertices[v]);
            for &w in &projection.adjacency[v] {
                if !seen[w] {
                    seen[w] = true;
                    q.push_back(w);
                }
            }
        }
        out.push(comp);
    }

    out
}
