pub mod planar;
pub mod spring;

use serde::{Deserialize, Serialize};

/// Which family of algorithm positioned the vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Crossing-free straight-line drawing derived from a planar embedding.
    Planar,
    /// Fruchterman-Reingold spring simulation.
    ForceDirected,
}

impl std::fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LayoutStrategy::Planar => "planar",
            LayoutStrategy::ForceDirected => "force-directed",
        })
    }
}

/// Explicit algorithm for [`crate::layout`].
#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Fails with [`crate::Error::NotPlanar`] when the projection has no planar embedding.
    Planar,
    ForceDirected(SpringOptions),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpringOptions {
    /// Seed for the initial positions. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    pub iterations: usize,
    /// Stop once the mean per-vertex displacement of an iteration drops below this.
    pub threshold: f64,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            seed: None,
            iterations: 50,
            threshold: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutChoice {
    /// Planar when the graph admits it, force-directed otherwise.
    #[default]
    Auto,
    Planar,
    ForceDirected,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOptions {
    pub choice: LayoutChoice,
    pub spring: SpringOptions,
}
