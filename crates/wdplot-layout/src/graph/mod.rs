use crate::algo::LayoutStrategy;
use indexmap::IndexMap;
use serde::Serialize;
use wdplot_graph::VertexId;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Normalised vertex coordinates plus the strategy that produced them.
///
/// Positions are centred on the origin and scaled so that the largest absolute coordinate is
/// `1.0` (unless every vertex sits on the origin). Iteration order follows the digraph's vertex
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub strategy: LayoutStrategy,
    /// Seed used for the initial spring positions; `None` for planar drawings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub positions: IndexMap<VertexId, Point>,
}

impl Layout {
    pub fn position(&self, v: VertexId) -> Option<Point> {
        self.positions.get(&v).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Centres `points` on their mean and scales them into `[-1, 1]`.
pub(crate) fn rescale(points: &mut [Point]) {
    if points.is_empty() {
        return;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut lim = 0.0_f64;
    for p in points.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        lim = lim.max(p.x.abs()).max(p.y.abs());
    }
    if lim > 0.0 {
        for p in points.iter_mut() {
            p.x /= lim;
            p.y /= lim;
        }
    }
}
