use serde::{Deserialize, Serialize};
use wdplot_graph::VertexId;
use wdplot_layout::LayoutStrategy;

/// Pixel geometry of a plot, ready to be serialised as SVG (y grows downwards).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub strategy: LayoutStrategy,
    /// Radius shared by every vertex circle.
    pub node_radius: f64,
    pub nodes: Vec<NodeShape>,
    pub edges: Vec<EdgeShape>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeShape {
    pub vertex: VertexId,
    pub cx: f64,
    pub cy: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeShape {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
    pub path: EdgePath,
    pub label: Option<EdgeLabel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

impl ScenePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Arc geometry. Every variant ends where the arrowhead sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgePath {
    Line {
        start: ScenePoint,
        end: ScenePoint,
    },
    /// One of an antiparallel pair, bent away from its partner.
    Quadratic {
        start: ScenePoint,
        control: ScenePoint,
        end: ScenePoint,
    },
    /// Self-loop above its vertex.
    Loop {
        start: ScenePoint,
        control1: ScenePoint,
        control2: ScenePoint,
        end: ScenePoint,
    },
}

impl EdgePath {
    /// Point halfway along the curve parameter.
    pub fn midpoint(&self) -> ScenePoint {
        match *self {
            EdgePath::Line { start, end } => {
                ScenePoint::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0)
            }
            EdgePath::Quadratic {
                start,
                control,
                end,
            } => ScenePoint::new(
                0.25 * start.x + 0.5 * control.x + 0.25 * end.x,
                0.25 * start.y + 0.5 * control.y + 0.25 * end.y,
            ),
            EdgePath::Loop {
                start,
                control1,
                control2,
                end,
            } => ScenePoint::new(
                (start.x + 3.0 * control1.x + 3.0 * control2.x + end.x) / 8.0,
                (start.y + 3.0 * control1.y + 3.0 * control2.y + end.y) / 8.0,
            ),
        }
    }
}

/// Weight label centred on `(x, y)` and rotated by `angle` degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub width: f64,
    pub height: f64,
}
