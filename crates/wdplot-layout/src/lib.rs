#![forbid(unsafe_code)]

//! Headless layout for weighted digraphs.
//!
//! [`select_layout`] tests the undirected projection for planarity and, when it is planar,
//! draws it crossing-free with straight lines; otherwise it falls back to a seeded
//! Fruchterman-Reingold simulation. [`layout`] runs one algorithm unconditionally.
//!
//! Coordinates are normalised: centred on the origin with the largest absolute coordinate at
//! `1.0`. Mapping them to pixels is the renderer's job.

pub mod algo;
pub mod error;
pub mod graph;
pub mod planarity;

pub use algo::{Algorithm, LayoutChoice, LayoutOptions, LayoutStrategy, SpringOptions};
pub use error::{Error, Result};
pub use graph::{Layout, Point};
pub use planarity::{PlanarEmbedding, check_planarity, is_planar};

use wdplot_graph::{Digraph, alg};

/// Runs `algorithm` on `graph`.
pub fn layout(graph: &Digraph, algorithm: &Algorithm) -> Result<Layout> {
    let projection = alg::undirected_simple_adjacency(graph);
    match algorithm {
        Algorithm::Planar => {
            let embedding = planarity::lr::planar_embedding(&projection)?.ok_or(Error::NotPlanar)?;
            planar(&projection, &embedding)
        }
        Algorithm::ForceDirected(opts) => Ok(force_directed(&projection, opts)),
    }
}

/// Chooses a strategy per `options.choice` and lays `graph` out with it.
pub fn select_layout(graph: &Digraph, options: &LayoutOptions) -> Result<Layout> {
    let projection = alg::undirected_simple_adjacency(graph);
    let embedding = match options.choice {
        LayoutChoice::ForceDirected => None,
        LayoutChoice::Auto | LayoutChoice::Planar => {
            let embedding = planarity::lr::planar_embedding(&projection)?;
            tracing::debug!(
                vertices = projection.vertex_count(),
                edges = projection.edge_count(),
                planar = embedding.is_some(),
                "planarity test"
            );
            embedding
        }
    };

    let layout = match (options.choice, embedding) {
        (LayoutChoice::Planar, None) => return Err(Error::NotPlanar),
        (_, Some(embedding)) => planar(&projection, &embedding)?,
        (_, None) => force_directed(&projection, &options.spring),
    };
    tracing::info!(
        strategy = %layout.strategy,
        seed = layout.seed,
        vertices = layout.len(),
        "layout selected"
    );
    Ok(layout)
}

fn planar(projection: &alg::UndirectedProjection, embedding: &PlanarEmbedding) -> Result<Layout> {
    let points = algo::planar::layout(embedding)?;
    Ok(Layout {
        strategy: LayoutStrategy::Planar,
        seed: None,
        positions: projection.vertices.iter().copied().zip(points).collect(),
    })
}

fn force_directed(projection: &alg::UndirectedProjection, opts: &SpringOptions) -> Layout {
    let seed = opts.seed.unwrap_or_else(rand::random);
    let points = algo::spring::layout(projection, opts, seed);
    Layout {
        strategy: LayoutStrategy::ForceDirected,
        seed: Some(seed),
        positions: projection.vertices.iter().copied().zip(points).collect(),
    }
}
