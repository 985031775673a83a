#![forbid(unsafe_code)]

//! Directed, weighted graph container used by `wdplot`.
//!
//! Vertices are non-negative integer ids. Arcs are ordered pairs carrying an `f64` weight; at
//! most one arc exists per ordered pair, so re-declaring an arc replaces its weight. Self-loops
//! and directed cycles are allowed.
//!
//! Helper algorithms over the undirected projection live in [`alg`].

mod graph;

pub use graph::{Digraph, Edge, EdgeKey, VertexId, alg};

/// Formats an arc weight the way labels and summaries print it.
///
/// Uses the shortest decimal text that parses back to the same `f64`, and always keeps a
/// fractional part for integral values (`2.0` rather than `2`).
pub fn format_weight(weight: f64) -> String {
    format!("{weight:?}")
}
