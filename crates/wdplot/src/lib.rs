#![forbid(unsafe_code)]

//! `wdplot` turns a weighted digraph in the plain text format into a picture.
//!
//! The pipeline is parse ([`wdplot_core`]) -> layout ([`wdplot_layout`], planar when the
//! undirected projection admits it, spring otherwise) -> scene + SVG ([`wdplot_render`]).
//! Nothing is drawn when parsing fails.
//!
//! # Features
//!
//! - `raster`: PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion
//! - `display`: show a plot in the platform image viewer (implies `raster`)

pub use wdplot_core::{
    Digraph, Edge, EdgeKey, EndpointPolicy, ParseError, ParseErrorKind, ParseOptions, VertexId,
    format_weight, load_digraph, parse_digraph, read_digraph,
};
pub use wdplot_layout::{
    Algorithm, Layout, LayoutChoice, LayoutOptions, LayoutStrategy, Point, SpringOptions,
    is_planar, select_layout,
};
pub use wdplot_render::{
    DeterministicTextMeasurer, Scene, SvgRenderOptions, TextMeasurer, Theme, build_scene,
    render_scene_svg,
};

#[cfg(feature = "display")]
pub mod display;
#[cfg(feature = "raster")]
pub mod raster;

use std::io::BufRead;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] wdplot_core::Error),
    #[error(transparent)]
    Layout(#[from] wdplot_layout::Error),
    #[error(transparent)]
    Render(#[from] wdplot_render::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    pub parse: ParseOptions,
    pub layout: LayoutOptions,
    pub svg: SvgRenderOptions,
}

impl PlotOptions {
    /// Defaults with weight labels switched on or off.
    pub fn with_weights(show_weights: bool) -> Self {
        let mut options = Self::default();
        options.svg.show_weights = show_weights;
        options
    }
}

/// Every intermediate product of one run, so callers can inspect or re-encode any stage.
#[derive(Debug, Clone)]
pub struct Plot {
    pub graph: Digraph,
    pub layout: Layout,
    pub scene: Scene,
    pub svg: String,
}

/// Lays out and renders an already-built digraph.
pub fn plot_digraph(graph: Digraph, options: &PlotOptions) -> Result<Plot> {
    let layout = select_layout(&graph, &options.layout)?;
    let measurer = DeterministicTextMeasurer::default();
    let scene = build_scene(&graph, &layout, &options.svg, &measurer)?;
    let svg = render_scene_svg(&scene, &options.svg);
    tracing::debug!(bytes = svg.len(), strategy = %layout.strategy, "plot rendered");
    Ok(Plot {
        graph,
        layout,
        scene,
        svg,
    })
}

pub fn plot_text(text: &str, options: &PlotOptions) -> Result<Plot> {
    let graph = parse_digraph(text, options.parse)?;
    plot_digraph(graph, options)
}

pub fn plot_reader<R: BufRead>(reader: R, options: &PlotOptions) -> Result<Plot> {
    let graph = read_digraph(reader, options.parse)?;
    plot_digraph(graph, options)
}

pub fn plot_file(path: impl AsRef<Path>, options: &PlotOptions) -> Result<Plot> {
    let graph = load_digraph(path, options.parse)?;
    plot_digraph(graph, options)
}
