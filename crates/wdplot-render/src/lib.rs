#![forbid(unsafe_code)]

//! Headless rendering for laid-out weighted digraphs.
//!
//! Rendering happens in two stages: [`build_scene`] turns normalised layout coordinates into
//! pixel geometry (a serialisable [`Scene`]), and [`render_scene_svg`] writes that scene as a
//! standalone SVG document. [`render_svg`] chains both with the deterministic text measurer.

pub mod model;
pub mod scene;
pub mod svg;
pub mod text;

pub use model::{EdgeLabel, EdgePath, EdgeShape, NodeShape, Scene, ScenePoint};
pub use scene::build_scene;
pub use svg::{SvgRenderOptions, Theme, render_scene_svg};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};

use wdplot_graph::{Digraph, VertexId};
use wdplot_layout::Layout;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout has no position for vertex {vertex}")]
    MissingPosition { vertex: VertexId },
    #[error("render options JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Builds the scene for `graph` and serialises it as SVG.
pub fn render_svg(graph: &Digraph, layout: &Layout, options: &SvgRenderOptions) -> Result<String> {
    let measurer = DeterministicTextMeasurer::default();
    let scene = build_scene(graph, layout, options, &measurer)?;
    Ok(render_scene_svg(&scene, options))
}
