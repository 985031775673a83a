//! Pixel geometry for a laid-out digraph.
//!
//! Layout coordinates live in `[-1, 1]` with y pointing up; the scene flips y and maps the
//! square onto the canvas minus margins and vertex radius, so every circle stays visible.

use crate::model::{EdgeLabel, EdgePath, EdgeShape, NodeShape, Scene, ScenePoint};
use crate::svg::SvgRenderOptions;
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, Result};
use wdplot_graph::{Digraph, Edge, format_weight};
use wdplot_layout::Layout;

const LABEL_PADDING: f64 = 4.0;
const WEIGHT_PADDING_X: f64 = 4.0;
const WEIGHT_PADDING_Y: f64 = 2.0;
const LOOP_SPREAD: f64 = 0.45;

struct Viewport {
    cx: f64,
    cy: f64,
    half_w: f64,
    half_h: f64,
}

impl Viewport {
    fn new(options: &SvgRenderOptions, radius: f64) -> Self {
        let inset = options.margin.max(0.0) + radius;
        Self {
            cx: options.width / 2.0,
            cy: options.height / 2.0,
            half_w: (options.width / 2.0 - inset).max(1.0),
            half_h: (options.height / 2.0 - inset).max(1.0),
        }
    }

    fn map(&self, x: f64, y: f64) -> ScenePoint {
        ScenePoint::new(self.cx + x * self.half_w, self.cy - y * self.half_h)
    }
}

fn unit(dx: f64, dy: f64) -> (f64, f64) {
    let len = dx.hypot(dy);
    if len <= f64::EPSILON {
        (1.0, 0.0)
    } else {
        (dx / len, dy / len)
    }
}

fn toward(from: ScenePoint, to: ScenePoint, distance: f64) -> ScenePoint {
    let (ux, uy) = unit(to.x - from.x, to.y - from.y);
    ScenePoint::new(from.x + ux * distance, from.y + uy * distance)
}

fn self_loop(center: ScenePoint, r: f64) -> EdgePath {
    let (sin, cos) = LOOP_SPREAD.sin_cos();
    EdgePath::Loop {
        start: ScenePoint::new(center.x - r * sin, center.y - r * cos),
        control1: ScenePoint::new(center.x - 1.6 * r, center.y - 3.2 * r),
        control2: ScenePoint::new(center.x + 1.6 * r, center.y - 3.2 * r),
        end: ScenePoint::new(center.x + r * sin, center.y - r * cos),
    }
}

fn straight(from: ScenePoint, to: ScenePoint, r: f64) -> EdgePath {
    let len = (to.x - from.x).hypot(to.y - from.y);
    if len <= 2.0 * r {
        return EdgePath::Line {
            start: from,
            end: to,
        };
    }
    EdgePath::Line {
        start: toward(from, to, r),
        end: toward(to, from, r),
    }
}

/// One arc of an antiparallel pair. The bend follows the left normal of `from -> to`, so the
/// partner arc bends to the other side.
fn bent(from: ScenePoint, to: ScenePoint, r: f64) -> EdgePath {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = dx.hypot(dy);
    let (ux, uy) = unit(dx, dy);
    let offset = (0.2 * len).max(r);
    let control = ScenePoint::new(
        (from.x + to.x) / 2.0 - uy * offset,
        (from.y + to.y) / 2.0 + ux * offset,
    );
    EdgePath::Quadratic {
        start: toward(from, control, r),
        control,
        end: toward(to, control, r),
    }
}

/// Rotation in degrees along `from -> to`, flipped so text never reads upside down.
fn upright_angle(from: ScenePoint, to: ScenePoint) -> f64 {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    if dx.hypot(dy) <= f64::EPSILON {
        return 0.0;
    }
    let mut angle = dy.atan2(dx).to_degrees();
    if angle > 90.0 {
        angle -= 180.0;
    } else if angle < -90.0 {
        angle += 180.0;
    }
    angle
}

fn weight_label(
    edge: &Edge,
    path: &EdgePath,
    angle: f64,
    options: &SvgRenderOptions,
    measurer: &dyn TextMeasurer,
) -> EdgeLabel {
    let text = format_weight(edge.weight);
    let style = TextStyle {
        font_family: Some(options.font_family.clone()),
        font_size: options.edge_label_font_size,
        font_weight: None,
    };
    let metrics = measurer.measure(&text, &style);
    let at = path.midpoint();
    EdgeLabel {
        text,
        x: at.x,
        y: at.y,
        angle,
        width: metrics.width + 2.0 * WEIGHT_PADDING_X,
        height: metrics.height + 2.0 * WEIGHT_PADDING_Y,
    }
}

/// Computes circles, arc paths and (optionally) weight labels in canvas pixels.
///
/// Fails with [`Error::MissingPosition`] when `layout` lacks any vertex of `graph`.
pub fn build_scene(
    graph: &Digraph,
    layout: &Layout,
    options: &SvgRenderOptions,
    measurer: &dyn TextMeasurer,
) -> Result<Scene> {
    let node_style = TextStyle {
        font_family: Some(options.font_family.clone()),
        font_size: options.font_size,
        font_weight: None,
    };

    let mut labels = Vec::with_capacity(graph.vertex_count());
    let mut radius = options.node_radius.max(1.0);
    for v in graph.vertices() {
        let label = v.to_string();
        let metrics = measurer.measure(&label, &node_style);
        radius = radius.max(metrics.width / 2.0 + LABEL_PADDING);
        labels.push((v, label));
    }

    let viewport = Viewport::new(options, radius);
    let mut nodes = Vec::with_capacity(labels.len());
    for (vertex, label) in labels {
        let p = layout
            .position(vertex)
            .ok_or(Error::MissingPosition { vertex })?;
        let at = viewport.map(p.x, p.y);
        nodes.push(NodeShape {
            vertex,
            cx: at.x,
            cy: at.y,
            label,
        });
    }

    let center_of = |v| -> Result<ScenePoint> {
        let p = layout
            .position(v)
            .ok_or(Error::MissingPosition { vertex: v })?;
        Ok(viewport.map(p.x, p.y))
    };

    let mut edges = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        let from = center_of(edge.from)?;
        let to = center_of(edge.to)?;

        let (path, angle) = if edge.is_self_loop() {
            (self_loop(from, radius), 0.0)
        } else if graph.contains_key(edge.key().reversed()) {
            (bent(from, to, radius), upright_angle(from, to))
        } else {
            (straight(from, to, radius), upright_angle(from, to))
        };

        let label = options
            .show_weights
            .then(|| weight_label(&edge, &path, angle, options, measurer));

        edges.push(EdgeShape {
            from: edge.from,
            to: edge.to,
            weight: edge.weight,
            path,
            label,
        });
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        radius,
        "scene built"
    );

    Ok(Scene {
        width: options.width,
        height: options.height,
        strategy: layout.strategy,
        node_radius: radius,
        nodes,
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn upright_angle_stays_readable() {
        let o = ScenePoint::new(0.0, 0.0);
        assert!(approx(upright_angle(o, ScenePoint::new(1.0, 0.0)), 0.0));
        assert!(approx(upright_angle(o, ScenePoint::new(-1.0, 0.0)), 0.0));
        assert!(approx(upright_angle(o, ScenePoint::new(0.0, 1.0)), 90.0));
        assert!(approx(upright_angle(o, ScenePoint::new(-1.0, -1.0)), 45.0));
        assert!(approx(upright_angle(o, o), 0.0));
    }

    #[test]
    fn straight_edges_are_clipped_to_circles() {
        let path = straight(ScenePoint::new(0.0, 0.0), ScenePoint::new(100.0, 0.0), 10.0);
        assert_eq!(
            path,
            EdgePath::Line {
                start: ScenePoint::new(10.0, 0.0),
                end: ScenePoint::new(90.0, 0.0),
            }
        );
    }

    #[test]
    fn overlapping_circles_are_not_clipped() {
        let a = ScenePoint::new(0.0, 0.0);
        let b = ScenePoint::new(5.0, 0.0);
        assert_eq!(straight(a, b, 10.0), EdgePath::Line { start: a, end: b });
    }

    #[test]
    fn antiparallel_arcs_bend_to_opposite_sides() {
        let a = ScenePoint::new(0.0, 0.0);
        let b = ScenePoint::new(100.0, 0.0);
        let EdgePath::Quadratic { control: c1, .. } = bent(a, b, 10.0) else {
            panic!("expected a quadratic path");
        };
        let EdgePath::Quadratic { control: c2, .. } = bent(b, a, 10.0) else {
            panic!("expected a quadratic path");
        };
        assert!(approx(c1.x, 50.0) && approx(c2.x, 50.0));
        assert!(approx(c1.y, 20.0));
        assert!(approx(c2.y, -20.0));
    }

    #[test]
    fn self_loop_sits_above_the_vertex() {
        let center = ScenePoint::new(50.0, 50.0);
        let EdgePath::Loop {
            start,
            control1,
            control2,
            end,
        } = self_loop(center, 10.0)
        else {
            panic!("expected a loop path");
        };
        assert!(start.x < center.x && end.x > center.x);
        assert!(start.y < center.y && end.y < center.y);
        assert!(control1.y < start.y && control2.y < end.y);
        assert!(start != end);
    }
}
