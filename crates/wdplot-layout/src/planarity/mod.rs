//! Planarity testing on the undirected projection of a digraph.
//!
//! Arc direction, antiparallel pairs and self-loops do not affect planarity, so the test runs
//! on [`wdplot_graph::alg::undirected_simple_adjacency`]. Node `i` of a returned
//! [`PlanarEmbedding`] is the `i`-th vertex of [`Digraph::vertices`].

mod embedding;
pub(crate) mod lr;

pub use embedding::PlanarEmbedding;

use crate::error::Result;
use wdplot_graph::{Digraph, alg};

pub fn is_planar(graph: &Digraph) -> bool {
    lr::is_planar(&alg::undirected_simple_adjacency(graph))
}

/// Returns a combinatorial embedding when `graph` is planar, `Ok(None)` otherwise.
pub fn check_planarity(graph: &Digraph) -> Result<Option<PlanarEmbedding>> {
    lr::planar_embedding(&alg::undirected_simple_adjacency(graph))
}
